//! Fusion operators: merge adjacent blocks into one.

use std::collections::BTreeSet;

use super::{fuse_with_previous, Filter};
use crate::document::{TextBlock, TextDocument};
use crate::labels::{MARKUP_PREFIX, STRICTLY_NOT_CONTENT};

/// Merges adjacent blocks of exactly equal text density.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleBlockFusionProcessor;

impl Filter for SimpleBlockFusionProcessor {
    fn process(&self, doc: &mut TextDocument) -> bool {
        if doc.text_blocks.len() < 2 {
            return false;
        }
        fuse_with_previous(doc, |prev, block| prev.text_density() == block.text_density())
    }
}

/// Merges content blocks that lie close to the preceding block in the
/// original sequence.
///
/// Non-content blocks are never absorbed; they become the new running
/// survivor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProximityFusion {
    pub max_blocks_distance: i64,
    /// Both blocks must be content.
    pub content_only: bool,
    /// Both blocks must share the same tag level.
    pub same_tag_level_only: bool,
}

impl BlockProximityFusion {
    pub const MAX_DISTANCE_1: Self = Self::new(1, false, false);
    pub const MAX_DISTANCE_1_SAME_TAG_LEVEL: Self = Self::new(1, false, true);
    pub const MAX_DISTANCE_1_CONTENT_ONLY: Self = Self::new(1, true, false);
    pub const MAX_DISTANCE_1_CONTENT_ONLY_SAME_TAG_LEVEL: Self = Self::new(1, true, true);

    #[must_use]
    pub const fn new(max_blocks_distance: i64, content_only: bool, same_tag_level_only: bool) -> Self {
        Self {
            max_blocks_distance,
            content_only,
            same_tag_level_only,
        }
    }

    fn should_merge(&self, prev: &TextBlock, block: &TextBlock) -> bool {
        if !block.is_content() {
            return false;
        }
        let gap = block.offset_blocks_start() - prev.offset_blocks_end() - 1;
        gap <= self.max_blocks_distance
            && (!self.content_only || prev.is_content())
            && (!self.same_tag_level_only || prev.tag_level() == block.tag_level())
    }
}

impl Filter for BlockProximityFusion {
    fn process(&self, doc: &mut TextDocument) -> bool {
        if doc.text_blocks.len() < 2 {
            return false;
        }
        if self.content_only && !doc.text_blocks.iter().any(TextBlock::is_content) {
            return false;
        }
        fuse_with_previous(doc, |prev, block| self.should_merge(prev, block))
    }
}

/// Merges adjacent blocks carrying the same markup-derived labels.
///
/// Blocks without any label never fuse.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelFusion;

impl LabelFusion {
    fn markup_labels(block: &TextBlock) -> BTreeSet<&str> {
        block
            .labels()
            .iter()
            .map(String::as_str)
            .filter(|label| label.starts_with(MARKUP_PREFIX))
            .collect()
    }

    fn equal_labels(prev: &TextBlock, block: &TextBlock) -> bool {
        if prev.labels().is_empty() || block.labels().is_empty() {
            return false;
        }
        Self::markup_labels(prev) == Self::markup_labels(block)
    }
}

impl Filter for LabelFusion {
    fn process(&self, doc: &mut TextDocument) -> bool {
        if doc.text_blocks.len() < 2 {
            return false;
        }
        fuse_with_previous(doc, Self::equal_labels)
    }
}

/// Lets content blocks absorb their low-link-density followers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentFusion;

impl ContentFusion {
    pub const MAX_LINK_DENSITY: f64 = 0.56;
}

impl Filter for ContentFusion {
    fn process(&self, doc: &mut TextDocument) -> bool {
        if doc.text_blocks.len() < 2 {
            return false;
        }
        let mut changed = false;
        while fuse_with_previous(doc, |prev, block| {
            prev.is_content()
                && block.link_density() < Self::MAX_LINK_DENSITY
                && !block.has_label(STRICTLY_NOT_CONTENT)
        }) {
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{block, content, dense_block, doc, flags};

    fn texts(d: &TextDocument) -> Vec<&str> {
        d.text_blocks.iter().map(TextBlock::text).collect()
    }

    #[test]
    fn equal_density_blocks_fuse() {
        let mut d = doc(vec![block("a", 5, 0, 0), block("b", 5, 0, 1), block("c", 7, 0, 2)]);
        assert!(SimpleBlockFusionProcessor.process(&mut d));
        assert_eq!(texts(&d), vec!["a\nb", "c"]);
        // merged: 10 words over 2 lines keeps density 5
        assert!((d.text_blocks[0].text_density() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn proximity_fusion_skips_distant_and_non_content_blocks() {
        let mut d = doc(vec![
            content(block("a", 5, 0, 0)),
            content(block("b", 5, 0, 1)),
            block("nav", 2, 0, 2),
            content(block("c", 5, 0, 5)),
        ]);
        assert!(BlockProximityFusion::MAX_DISTANCE_1.process(&mut d));
        assert_eq!(texts(&d), vec!["a\nb", "nav", "c"]);
        assert_eq!(d.text_blocks[0].offset_blocks_end(), 1);
    }

    #[test]
    fn proximity_fusion_absorbs_content_into_boilerplate_unless_content_only() {
        let blocks = vec![block("nav", 2, 0, 0), content(block("story", 30, 0, 1))];

        let mut plain = doc(blocks.clone());
        assert!(BlockProximityFusion::MAX_DISTANCE_1.process(&mut plain));
        assert_eq!(texts(&plain), vec!["nav\nstory"]);
        assert_eq!(flags(&plain), vec![true]);

        let mut content_only = doc(blocks);
        assert!(!BlockProximityFusion::MAX_DISTANCE_1_CONTENT_ONLY.process(&mut content_only));
        assert_eq!(content_only.text_blocks.len(), 2);
    }

    #[test]
    fn proximity_fusion_same_tag_level() {
        let mut a = content(block("a", 5, 0, 0));
        a.set_tag_level(3);
        let mut b = content(block("b", 5, 0, 1));
        b.set_tag_level(4);
        let mut d = doc(vec![a, b]);
        assert!(!BlockProximityFusion::MAX_DISTANCE_1_CONTENT_ONLY_SAME_TAG_LEVEL.process(&mut d));
        assert_eq!(d.text_blocks.len(), 2);
    }

    #[test]
    fn label_fusion_compares_markup_labels() {
        let mut a = block("a", 3, 0, 0);
        a.add_labels(["<li>", "font-3"]);
        let mut b = block("b", 3, 0, 1);
        b.add_labels(["<li>"]);
        let mut c = block("c", 3, 0, 2);
        c.add_label("<p>");
        let unlabeled = block("d", 3, 0, 3);
        let mut d = doc(vec![a, b, c, unlabeled]);

        assert!(LabelFusion.process(&mut d));
        assert_eq!(texts(&d), vec!["a\nb", "c", "d"]);
    }

    #[test]
    fn content_fusion_absorbs_followers() {
        let mut strict = block("footer", 4, 0, 3);
        strict.add_label(STRICTLY_NOT_CONTENT);
        let mut d = doc(vec![
            content(dense_block("story", 40, 2, 0)),
            block("more", 6, 0, 1),
            block("links", 4, 4, 2),
            strict,
        ]);
        assert!(ContentFusion.process(&mut d));
        assert_eq!(texts(&d), vec!["story\nmore", "links", "footer"]);
        assert!(!ContentFusion.process(&mut d));
    }
}
