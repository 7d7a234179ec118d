//! Extraction driver: segment, run the extractor, estimate quality.

use log::debug;

use crate::document::{TextDocument, TextDocumentStatistics};
use crate::error::Result;
use crate::estimator::SimpleEstimator;
use crate::options::Options;
use crate::result::ExtractResult;
use crate::segmentation::{segment, EventSource};

/// Main entry point for content extraction from any event source.
pub(crate) fn extract_source<S>(source: &mut S, options: &Options) -> Result<ExtractResult>
where
    S: EventSource + ?Sized,
{
    let document = segment(source)?;
    Ok(process_document(document, options))
}

/// Runs the configured extractor over an already segmented document.
pub(crate) fn process_document(mut document: TextDocument, options: &Options) -> ExtractResult {
    let before = TextDocumentStatistics::new(&document, false);
    let changed = options.extractor.process(&mut document);

    let low_quality = options.estimate_quality.then(|| {
        let after = TextDocumentStatistics::new(&document, true);
        SimpleEstimator::is_low_quality(&before, &after)
    });

    debug!(
        "{} extraction: {} -> {} blocks, changed={changed}, low_quality={low_quality:?}",
        options.extractor,
        before.num_blocks,
        document.text_blocks.len()
    );

    ExtractResult {
        title: document.title.clone(),
        content_text: document.text(options.include_content, options.include_non_content),
        changed,
        low_quality,
        document,
    }
}
