//! Post-hoc quality estimate of an extraction.

use crate::document::TextDocumentStatistics;

/// Judges whether an extraction looks too sparse to trust.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleEstimator;

impl SimpleEstimator {
    /// Words required in the document before extraction.
    pub const MIN_WORDS_BEFORE: usize = 90;
    /// Words required in the extracted content.
    pub const MIN_WORDS_AFTER: usize = 70;
    /// Average words per extracted block.
    pub const MIN_AVG_WORDS_AFTER: f64 = 25.0;

    /// `before` covers all blocks of the segmented document, `after` the
    /// content blocks of the processed one.
    #[must_use]
    pub fn is_low_quality(before: &TextDocumentStatistics, after: &TextDocumentStatistics) -> bool {
        before.num_words < Self::MIN_WORDS_BEFORE
            || after.num_words < Self::MIN_WORDS_AFTER
            || after.avg_num_words() < Self::MIN_AVG_WORDS_AFTER
    }
}
