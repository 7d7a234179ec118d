//! # rs-boilerpipe
//!
//! Boilerplate removal and fulltext extraction from HTML pages.
//!
//! A page is segmented into text blocks annotated with shallow text
//! features (word counts, link density, text density, markup depth). An
//! extractor, a fixed sequence of filters, then classifies every block as
//! content or boilerplate, fusing and relabeling blocks along the way.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_boilerpipe::extract;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><p>Main content here.</p></body></html>"#;
//!
//! let result = extract(html)?;
//! println!("Title: {:?}", result.title);
//! println!("Content: {}", result.content_text);
//! # Ok::<(), rs_boilerpipe::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Segmentation**: markup events become [`TextBlock`]s ([`segmentation`])
//! - **Filters**: classifiers, fusion operators and relabeling passes ([`filters`])
//! - **Extractors**: named filter compositions ([`Extractor`])
//! - **Estimation**: a post-hoc verdict on sparse results ([`SimpleEstimator`])

mod error;
mod extract;
mod options;
mod result;

/// Compiled regex patterns shared by all stages.
pub mod patterns;

/// Word tokenizer and line-wrap statistics.
pub mod tokenizer;

/// Label vocabulary and label actions.
pub mod labels;

/// Text blocks, documents and document statistics.
pub mod document;

/// Markup events, tag actions and the block segmenter.
pub mod segmentation;

/// Block classifiers, fusion operators and simple filters.
pub mod filters;

/// Named filter pipelines.
pub mod extractors;

/// Extraction quality estimate.
pub mod estimator;

/// Character encoding detection and transcoding.
pub mod encoding;

use std::io::Read;

// Public API - re-exports
pub use document::{TextBlock, TextDocument, TextDocumentStatistics};
pub use error::{Error, Result};
pub use estimator::SimpleEstimator;
pub use extractors::{extract_document, Extractor};
pub use filters::Filter;
pub use options::Options;
pub use result::ExtractResult;
pub use segmentation::{
    segment, segment_bytes, segment_html, segment_reader, segment_with, EventSource, HtmlSource, MarkupEvent,
};

/// Extracts main content from an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use rs_boilerpipe::extract;
///
/// let html = "<html><body><p>Content</p></body></html>";
/// let result = extract(html)?;
/// println!("{}", result.content_text);
/// # Ok::<(), rs_boilerpipe::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract(html: &str) -> Result<ExtractResult> {
    extract_with_options(html, &Options::default())
}

/// Extracts main content from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_boilerpipe::{extract_with_options, Extractor, Options};
///
/// let html = "<html><body><p>Content</p><p>More content</p></body></html>";
/// let options = Options {
///     extractor: Extractor::KeepEverything,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, &options)?;
/// assert_eq!(result.content_text, "Content\nMore content\n");
/// # Ok::<(), rs_boilerpipe::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_with_options(html: &str, options: &Options) -> Result<ExtractResult> {
    extract::extract_source(&mut HtmlSource::new(html), options)
}

/// Extracts main content from HTML bytes with automatic encoding detection.
///
/// The encoding is taken from a byte order mark, `<meta charset="...">` or
/// `<meta http-equiv="Content-Type" content="...; charset=...">`, and
/// defaults to UTF-8. Invalid sequences are replaced with U+FFFD.
///
/// # Example
///
/// ```rust
/// use rs_boilerpipe::{extract_bytes_with_options, Extractor, Options};
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9</p></body></html>";
/// let options = Options {
///     extractor: Extractor::KeepEverything,
///     ..Options::default()
/// };
/// let result = extract_bytes_with_options(html, &options)?;
/// assert!(result.content_text.contains("Café"));
/// # Ok::<(), rs_boilerpipe::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes(html: &[u8]) -> Result<ExtractResult> {
    extract_bytes_with_options(html, &Options::default())
}

/// Extracts main content from HTML bytes with custom options and automatic
/// encoding detection.
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<ExtractResult> {
    extract::extract_source(&mut HtmlSource::from_bytes(html), options)
}

/// Reads HTML from `reader` and extracts its main content.
///
/// Read failures surface as [`Error::Processing`] with the I/O error as
/// source.
#[allow(clippy::missing_errors_doc)]
pub fn extract_reader<R: Read>(reader: R, options: &Options) -> Result<ExtractResult> {
    extract::extract_source(&mut HtmlSource::from_reader(reader)?, options)
}

/// Extracts from a recorded or custom event stream.
#[allow(clippy::missing_errors_doc)]
pub fn extract_events<S>(source: &mut S, options: &Options) -> Result<ExtractResult>
where
    S: EventSource + ?Sized,
{
    extract::extract_source(source, options)
}

/// Runs `extractor` over `html` and returns the content text.
///
/// # Example
///
/// ```rust
/// use rs_boilerpipe::{get_text, Extractor};
///
/// let text = get_text("<body><p>Hello there</p></body>", &Extractor::KeepEverything)?;
/// assert_eq!(text, "Hello there\n");
/// # Ok::<(), rs_boilerpipe::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn get_text(html: &str, extractor: &Extractor) -> Result<String> {
    let mut document = segment_html(html)?;
    extractor.process(&mut document);
    Ok(document.content())
}
