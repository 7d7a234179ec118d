//! Markup segmentation: from markup events to an annotated block sequence.
//!
//! A parser (or a recorded event list) implements [`EventSource`]; the
//! [`BlockSegmenter`] consumes the events, consulting a [`TagActionTable`] for
//! per-element behavior, and yields a [`TextDocument`].

mod events;
mod handler;
mod html;
mod tags;

use std::io::Read;

pub use events::{attribute, ContentHandler, EventSource, MarkupEvent};
pub use handler::BlockSegmenter;
pub use html::HtmlSource;
pub use tags::{TagAction, TagActionTable, DEFAULT_TAG_ACTIONS};

use crate::document::TextDocument;
use crate::error::{Error, Result};

/// Segments an event stream with the default tag actions.
pub fn segment<S>(source: &mut S) -> Result<TextDocument>
where
    S: EventSource + ?Sized,
{
    segment_with(source, &DEFAULT_TAG_ACTIONS)
}

/// Segments an event stream with a custom tag table.
///
/// Acquisition failures are wrapped as [`Error::Processing`]; no partial
/// document is returned.
pub fn segment_with<S>(source: &mut S, tag_actions: &TagActionTable) -> Result<TextDocument>
where
    S: EventSource + ?Sized,
{
    let mut segmenter = BlockSegmenter::new(tag_actions);
    source.replay(&mut segmenter).map_err(Error::processing)?;
    Ok(segmenter.into_document())
}

/// Parses and segments an HTML string.
pub fn segment_html(html: &str) -> Result<TextDocument> {
    segment(&mut HtmlSource::new(html))
}

/// Decodes, parses and segments raw HTML bytes.
pub fn segment_bytes(html: &[u8]) -> Result<TextDocument> {
    segment(&mut HtmlSource::from_bytes(html))
}

/// Reads, decodes, parses and segments HTML from `reader`.
pub fn segment_reader<R: Read>(reader: R) -> Result<TextDocument> {
    segment(&mut HtmlSource::from_reader(reader)?)
}
