//! Block filters: classifiers, fusion operators and simple relabeling passes.
//!
//! Every filter takes a [`TextDocument`], may merge, split, drop or relabel
//! its blocks, and reports whether anything changed. Filters hold no
//! per-document state, so one instance can be shared by any number of
//! concurrent extractions.

mod classifiers;
mod fusion;
mod largest;
mod simple;
mod terminating;
mod title;

use std::mem;

pub use classifiers::{DensityRulesClassifier, NumWordsRulesClassifier};
pub use fusion::{BlockProximityFusion, ContentFusion, LabelFusion, SimpleBlockFusionProcessor};
pub use largest::{ExpandTitleToContentFilter, KeepLargestBlockFilter, KeepLargestFulltextBlockFilter};
pub use simple::{
    AddPrecedingLabelsFilter, BoilerplateBlockFilter, ConditionalLabelFilter, InvertedFilter,
    LabelToBoilerplateFilter, LabelToContentFilter, MarkEverythingContentFilter, MinClauseWordsFilter,
    MinFulltextWordsFilter, MinWordsFilter, SplitParagraphBlocksFilter, SurroundingToContentFilter,
};
pub use terminating::{IgnoreBlocksAfterContentFilter, IgnoreBlocksAfterContentFromEndFilter, TerminatingBlocksFinder};
pub use title::{ArticleMetadataFilter, DocumentTitleMatchClassifier};

use crate::document::{TextBlock, TextDocument, EMPTY_END, EMPTY_START};

/// A pass over a document.
pub trait Filter {
    /// Processes `doc` in place; returns whether anything changed.
    fn process(&self, doc: &mut TextDocument) -> bool;

    /// Short type name, used in debug logs.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Text density from which a block's words count as full-text words.
pub const FULLTEXT_MIN_TEXT_DENSITY: f64 = 9.0;

/// Words of `block` if its text density reaches [`FULLTEXT_MIN_TEXT_DENSITY`], else 0.
#[must_use]
pub fn num_full_text_words(block: &TextBlock) -> usize {
    if block.text_density() >= FULLTEXT_MIN_TEXT_DENSITY {
        block.num_words()
    } else {
        0
    }
}

/// Sets every block's content flag from `classify(previous, current, next)`.
///
/// Sentinels stand in for the missing neighbours at both ends. Decisions are
/// computed on the unmodified sequence and applied afterwards.
pub(crate) fn classify_windowed<F>(doc: &mut TextDocument, classify: F) -> bool
where
    F: Fn(&TextBlock, &TextBlock, &TextBlock) -> bool,
{
    let blocks = &doc.text_blocks;
    let decisions: Vec<bool> = blocks
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let prev = i.checked_sub(1).and_then(|p| blocks.get(p)).unwrap_or(&EMPTY_START);
            let next = blocks.get(i + 1).unwrap_or(&EMPTY_END);
            classify(prev, current, next)
        })
        .collect();

    let mut changed = false;
    for (block, is_content) in doc.text_blocks.iter_mut().zip(decisions) {
        changed |= block.set_is_content(is_content);
    }
    changed
}

/// Rebuilds the block sequence, folding each block into the preceding
/// survivor whenever `should_merge(survivor, block)` holds.
pub(crate) fn fuse_with_previous<F>(doc: &mut TextDocument, mut should_merge: F) -> bool
where
    F: FnMut(&TextBlock, &TextBlock) -> bool,
{
    let blocks = mem::take(&mut doc.text_blocks);
    let mut fused: Vec<TextBlock> = Vec::with_capacity(blocks.len());
    let mut changed = false;

    for block in blocks {
        match fused.last_mut() {
            Some(prev) if should_merge(prev, &block) => {
                prev.merge_next(block);
                changed = true;
            }
            _ => fused.push(block),
        }
    }

    doc.text_blocks = fused;
    changed
}


#[cfg(test)]
mod tests {
    use super::test_support::{block, dense_block, doc};
    use super::*;

    #[test]
    fn full_text_words_need_density_nine() {
        assert_eq!(num_full_text_words(&block("x", 9, 0, 0)), 9);
        assert_eq!(num_full_text_words(&block("x", 8, 0, 0)), 0);
        assert_eq!(num_full_text_words(&dense_block("x", 18, 2, 0)), 18);
    }

    #[test]
    fn windowed_classification_sees_sentinels() {
        let mut d = doc(vec![block("a", 1, 0, 0), block("b", 2, 0, 1)]);
        let changed = classify_windowed(&mut d, |prev, cur, next| {
            prev.offset_blocks_start() == -1 || next.offset_blocks_end() == i64::MAX || cur.num_words() > 5
        });
        assert!(changed);
        assert!(d.text_blocks.iter().all(TextBlock::is_content));
    }

    #[test]
    fn fusion_folds_into_running_survivor() {
        let mut d = doc(vec![block("a", 1, 0, 0), block("b", 1, 0, 1), block("c", 5, 0, 2)]);
        let changed = fuse_with_previous(&mut d, |prev, next| prev.num_words() == next.num_words());
        assert!(changed);
        assert_eq!(d.text_blocks.len(), 2);
        assert_eq!(d.text_blocks[0].text(), "a\nb");
    }
}
