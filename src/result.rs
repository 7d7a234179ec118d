//! Result types for extraction output.

use crate::document::TextDocument;

/// Result of content extraction from an HTML document.
///
/// Holds the selected text along with the fully processed document, so
/// callers can inspect block classifications and labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractResult {
    /// Title captured from `<title>`, if any.
    pub title: Option<String>,

    /// Text of the blocks selected by `Options::include_content` and
    /// `Options::include_non_content`, one block per line.
    pub content_text: String,

    /// Whether any filter of the extractor changed the document.
    pub changed: bool,

    /// Quality verdict of the simple estimator.
    ///
    /// `None` when `Options::estimate_quality` is off.
    pub low_quality: Option<bool>,

    /// The processed document.
    pub document: TextDocument,
}
