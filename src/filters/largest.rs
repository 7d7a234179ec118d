//! Largest-block selection and title expansion.

use super::{num_full_text_words, Filter};
use crate::document::{TextBlock, TextDocument};
use crate::labels::{MIGHT_BE_CONTENT, TITLE};

/// Keeps only `keep` as content; every other block is demoted and marked as
/// possibly content.
fn keep_only(blocks: &mut [TextBlock], keep: Option<usize>) -> bool {
    let mut changed = false;
    for (i, block) in blocks.iter_mut().enumerate() {
        if Some(i) == keep {
            changed |= block.set_is_content(true);
        } else {
            changed |= block.set_is_content(false);
            if !block.has_label(MIGHT_BE_CONTENT) {
                block.add_label(MIGHT_BE_CONTENT);
                changed = true;
            }
        }
    }
    changed
}

/// Index of the first content block maximizing `score`.
fn first_max_content_block<F>(blocks: &[TextBlock], score: F) -> Option<usize>
where
    F: Fn(&TextBlock) -> usize,
{
    let mut best: Option<(usize, usize)> = None;
    for (i, block) in blocks.iter().enumerate() {
        if !block.is_content() {
            continue;
        }
        let s = score(block);
        if best.is_none_or(|(_, max)| s > max) {
            best = Some((i, s));
        }
    }
    best.map(|(i, _)| i)
}

/// Keeps the content block with the most words as the only content block.
///
/// With `expand_to_same_tag_level`, the contiguous neighbours sharing the kept
/// block's tag level are kept too; expansion stops at the first shallower
/// block in each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepLargestBlockFilter {
    pub expand_to_same_tag_level: bool,
}

impl KeepLargestBlockFilter {
    pub const INSTANCE: Self = Self {
        expand_to_same_tag_level: false,
    };
    pub const INSTANCE_EXPAND_TO_SAME_TAG_LEVEL: Self = Self {
        expand_to_same_tag_level: true,
    };

    fn expand(blocks: &mut [TextBlock], n: usize) -> bool {
        let level = blocks[n].tag_level();
        let mut changed = false;

        for block in blocks[..n].iter_mut().rev() {
            match block.tag_level() {
                tl if tl < level => break,
                tl if tl == level => changed |= block.set_is_content(true),
                _ => {}
            }
        }
        for block in &mut blocks[n + 1..] {
            match block.tag_level() {
                tl if tl < level => break,
                tl if tl == level => changed |= block.set_is_content(true),
                _ => {}
            }
        }
        changed
    }
}

impl Filter for KeepLargestBlockFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let blocks = &mut doc.text_blocks;
        if blocks.len() < 2 {
            return false;
        }

        let largest = first_max_content_block(blocks, TextBlock::num_words);
        let mut changed = keep_only(blocks, largest);

        if let (true, Some(n)) = (self.expand_to_same_tag_level, largest) {
            changed |= Self::expand(blocks, n);
        }
        changed
    }
}

/// Like [`KeepLargestBlockFilter`], but only full-text words count.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepLargestFulltextBlockFilter;

impl Filter for KeepLargestFulltextBlockFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let blocks = &mut doc.text_blocks;
        if blocks.len() < 2 {
            return false;
        }
        match first_max_content_block(blocks, num_full_text_words) {
            Some(largest) => keep_only(blocks, Some(largest)),
            None => false,
        }
    }
}

/// Re-marks as content the demoted blocks between the title block and the
/// first content block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandTitleToContentFilter;

impl Filter for ExpandTitleToContentFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut title = None;
        let mut content_start = None;
        for (i, block) in doc.text_blocks.iter().enumerate() {
            if content_start.is_some() {
                break;
            }
            if block.has_label(TITLE) {
                title = Some(i);
            }
            if block.is_content() {
                content_start = Some(i);
            }
        }

        let (Some(title), Some(content_start)) = (title, content_start) else {
            return false;
        };
        if content_start <= title {
            return false;
        }

        let mut changed = false;
        for block in &mut doc.text_blocks[title..content_start] {
            if block.has_label(MIGHT_BE_CONTENT) {
                changed |= block.set_is_content(true);
            }
        }
        changed
    }
}
