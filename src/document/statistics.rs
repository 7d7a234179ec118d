use super::TextDocument;

/// Shallow word statistics of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextDocumentStatistics {
    pub num_words: usize,
    pub num_blocks: usize,
}

impl TextDocumentStatistics {
    /// Counts words and blocks, optionally restricted to content blocks.
    #[must_use]
    pub fn new(doc: &TextDocument, content_only: bool) -> Self {
        doc.text_blocks
            .iter()
            .filter(|tb| !content_only || tb.is_content())
            .fold(Self::default(), |acc, tb| Self {
                num_words: acc.num_words + tb.num_words(),
                num_blocks: acc.num_blocks + 1,
            })
    }

    /// Words per counted block; 0 when no block was counted.
    #[must_use]
    pub fn avg_num_words(&self) -> f64 {
        if self.num_blocks == 0 {
            return 0.0;
        }
        self.num_words as f64 / self.num_blocks as f64
    }
}
