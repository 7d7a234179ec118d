//! Document model: text blocks and the document holding them.

mod block;
mod statistics;

pub use block::{TextBlock, EMPTY_END, EMPTY_START};
pub use statistics::TextDocumentStatistics;

/// An optional title plus the ordered block sequence of one document.
///
/// Filters mutate `text_blocks` in place (merge, split, relabel, remove) but
/// never reorder surviving blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextDocument {
    /// Title captured from `<title>` outside the body, if any.
    pub title: Option<String>,
    /// Blocks in document order.
    pub text_blocks: Vec<TextBlock>,
}

impl TextDocument {
    #[must_use]
    pub fn new(title: Option<String>, text_blocks: Vec<TextBlock>) -> Self {
        Self { title, text_blocks }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Text of the content blocks, one block per line.
    #[must_use]
    pub fn content(&self) -> String {
        self.text(true, false)
    }

    /// Text of the selected blocks, each followed by a newline.
    #[must_use]
    pub fn text(&self, include_content: bool, include_non_content: bool) -> String {
        let mut out = String::new();
        for block in &self.text_blocks {
            let wanted = if block.is_content() {
                include_content
            } else {
                include_non_content
            };
            if wanted {
                out.push_str(block.text());
                out.push('\n');
            }
        }
        out
    }

    /// Per-block dump of offsets, features, classification, labels and text.
    #[must_use]
    pub fn debug_string(&self) -> String {
        let mut out = String::new();
        for block in &self.text_blocks {
            out.push_str(&block.to_string());
            out.push('\n');
        }
        out
    }
}
