//! Text blocks: the unit every filter classifies.

use std::collections::BTreeSet;
use std::fmt;

use crate::tokenizer::WordStats;

/// Leading sentinel used by windowed classifiers before the first block.
pub static EMPTY_START: TextBlock = TextBlock::sentinel(-1);

/// Trailing sentinel used by windowed classifiers after the last block.
pub static EMPTY_END: TextBlock = TextBlock::sentinel(i64::MAX);

/// A contiguous (or fused) span of text with its shallow text features.
///
/// Blocks are created once by the segmenter; afterwards filters only merge,
/// split, relabel or flip their content flag. Densities are always derived
/// from the accumulated counters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    text: String,
    contained_text_elements: BTreeSet<usize>,
    labels: Vec<String>,
    num_words: usize,
    num_words_in_anchor_text: usize,
    num_words_in_wrapped_lines: usize,
    num_wrapped_lines: usize,
    offset_blocks_start: i64,
    offset_blocks_end: i64,
    tag_level: i32,
    text_density: f64,
    link_density: f64,
    is_content: bool,
}

impl TextBlock {
    /// Creates a block at sequence position `offset_blocks`.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        stats: WordStats,
        contained_text_elements: BTreeSet<usize>,
        offset_blocks: i64,
    ) -> Self {
        let mut block = Self {
            text: text.into(),
            contained_text_elements,
            labels: Vec::new(),
            num_words: stats.num_words,
            num_words_in_anchor_text: stats.num_words_in_anchor_text,
            num_words_in_wrapped_lines: stats.num_words_in_wrapped_lines,
            num_wrapped_lines: stats.num_wrapped_lines,
            offset_blocks_start: offset_blocks,
            offset_blocks_end: offset_blocks,
            tag_level: 0,
            text_density: 0.0,
            link_density: 0.0,
            is_content: false,
        };
        block.init_densities();
        block
    }

    /// Creates a block whose counters are computed from its own text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let stats = WordStats::of_text(&text);
        Self::new(text, stats, BTreeSet::new(), 0)
    }

    /// A block holding `text` that inherits this block's position, provenance,
    /// labels and content flag. Counters are computed from `text`.
    #[must_use]
    pub fn derive(&self, text: &str) -> Self {
        let mut block = Self::new(
            text,
            WordStats::of_text(text),
            self.contained_text_elements.clone(),
            self.offset_blocks_start,
        );
        block.offset_blocks_end = self.offset_blocks_end;
        block.tag_level = self.tag_level;
        block.labels.clone_from(&self.labels);
        block.is_content = self.is_content;
        block
    }

    const fn sentinel(offset: i64) -> Self {
        Self {
            text: String::new(),
            contained_text_elements: BTreeSet::new(),
            labels: Vec::new(),
            num_words: 0,
            num_words_in_anchor_text: 0,
            num_words_in_wrapped_lines: 0,
            num_wrapped_lines: 1,
            offset_blocks_start: offset,
            offset_blocks_end: offset,
            tag_level: 0,
            text_density: 0.0,
            link_density: 0.0,
            is_content: false,
        }
    }

    fn init_densities(&mut self) {
        if self.num_words_in_wrapped_lines == 0 {
            self.num_words_in_wrapped_lines = self.num_words;
            self.num_wrapped_lines = 1;
        }
        self.text_density = self.num_words_in_wrapped_lines as f64 / self.num_wrapped_lines as f64;
        self.link_density = if self.num_words == 0 {
            0.0
        } else {
            self.num_words_in_anchor_text as f64 / self.num_words as f64
        };
    }

    /// Absorbs `other`, which directly follows this block.
    ///
    /// Text is joined with a newline, counters are summed, offsets widen to
    /// cover both, the tag level drops to the shallower one, labels and
    /// provenance are concatenated/unioned, and the content flag is OR-ed.
    pub fn merge_next(&mut self, other: TextBlock) {
        self.text.push('\n');
        self.text.push_str(&other.text);

        self.num_words += other.num_words;
        self.num_words_in_anchor_text += other.num_words_in_anchor_text;
        self.num_words_in_wrapped_lines += other.num_words_in_wrapped_lines;
        self.num_wrapped_lines += other.num_wrapped_lines;

        self.offset_blocks_start = self.offset_blocks_start.min(other.offset_blocks_start);
        self.offset_blocks_end = self.offset_blocks_end.max(other.offset_blocks_end);

        self.init_densities();

        self.is_content |= other.is_content;
        self.contained_text_elements.extend(other.contained_text_elements);
        self.labels.extend(other.labels);
        self.tag_level = self.tag_level.min(other.tag_level);
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    #[must_use]
    pub fn num_words_in_anchor_text(&self) -> usize {
        self.num_words_in_anchor_text
    }

    #[must_use]
    pub fn num_words_in_wrapped_lines(&self) -> usize {
        self.num_words_in_wrapped_lines
    }

    #[must_use]
    pub fn num_wrapped_lines(&self) -> usize {
        self.num_wrapped_lines
    }

    /// Words per estimated wrapped line.
    #[must_use]
    pub fn text_density(&self) -> f64 {
        self.text_density
    }

    /// Fraction of words inside anchor text.
    #[must_use]
    pub fn link_density(&self) -> f64 {
        self.link_density
    }

    #[must_use]
    pub fn offset_blocks_start(&self) -> i64 {
        self.offset_blocks_start
    }

    #[must_use]
    pub fn offset_blocks_end(&self) -> i64 {
        self.offset_blocks_end
    }

    /// Markup depth at which the block's first characters were seen.
    #[must_use]
    pub fn tag_level(&self) -> i32 {
        self.tag_level
    }

    pub fn set_tag_level(&mut self, tag_level: i32) {
        self.tag_level = tag_level;
    }

    #[must_use]
    pub fn is_content(&self) -> bool {
        self.is_content
    }

    /// Sets the content flag, returning whether it changed.
    pub fn set_is_content(&mut self, is_content: bool) -> bool {
        let changed = self.is_content != is_content;
        self.is_content = is_content;
        changed
    }

    /// Indices of the original text events this block was built from.
    #[must_use]
    pub fn contained_text_elements(&self) -> &BTreeSet<usize> {
        &self.contained_text_elements
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn add_label(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    pub fn add_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Removes the first occurrence of `label`.
    pub fn remove_label(&mut self, label: &str) -> bool {
        match self.labels.iter().position(|l| l == label) {
            Some(pos) => {
                self.labels.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}-{};tl={};nw={};nwl={};td={:.3};ld={:.3}]\t{},{}\n{}",
            self.offset_blocks_start,
            self.offset_blocks_end,
            self.tag_level,
            self.num_words,
            self.num_wrapped_lines,
            self.text_density,
            self.link_density,
            if self.is_content { "CONTENT" } else { "boilerplate" },
            self.labels.join(","),
            self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(words: usize, anchor: usize, wrapped_words: usize, lines: usize, offset: i64) -> TextBlock {
        TextBlock::new(
            "text",
            WordStats {
                num_words: words,
                num_words_in_anchor_text: anchor,
                num_words_in_wrapped_lines: wrapped_words,
                num_wrapped_lines: lines,
            },
            BTreeSet::from([usize::try_from(offset).unwrap_or_default()]),
            offset,
        )
    }

    #[test]
    fn densities_from_counters() {
        let tb = block(10, 2, 10, 1, 0);
        assert!((tb.link_density() - 0.2).abs() < 1e-9);
        assert!((tb.text_density() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_words_has_zero_link_density() {
        let tb = block(0, 0, 0, 0, 0);
        assert_eq!(tb.link_density(), 0.0);
        assert_eq!(tb.text_density(), 0.0);
        assert_eq!(tb.num_wrapped_lines(), 1);
    }

    #[test]
    fn merge_accumulates_counters_and_widens_offsets() {
        let mut a = block(5, 0, 5, 1, 0);
        a.set_tag_level(2);
        a.add_label("a");
        let mut b = block(3, 3, 3, 1, 1);
        b.set_tag_level(3);
        b.add_label("b");
        b.set_is_content(true);

        a.merge_next(b);

        assert_eq!(a.num_words(), 8);
        assert_eq!(a.num_words_in_anchor_text(), 3);
        assert_eq!(a.num_wrapped_lines(), 2);
        assert_eq!((a.offset_blocks_start(), a.offset_blocks_end()), (0, 1));
        assert_eq!(a.tag_level(), 2);
        assert!(a.is_content());
        assert_eq!(a.labels(), ["a", "b"]);
        assert_eq!(a.text(), "text\ntext");
        assert_eq!(a.contained_text_elements().len(), 2);
        assert!((a.link_density() - 0.375).abs() < 1e-9);
        assert!((a.text_density() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn labels_permit_duplicates_and_remove_first() {
        let mut tb = TextBlock::from_text("x");
        tb.add_label("l");
        tb.add_labels(["l", "m"]);
        assert!(tb.remove_label("l"));
        assert_eq!(tb.labels(), ["l", "m"]);
        assert!(!tb.remove_label("zz"));
    }

    #[test]
    fn sentinels_have_zero_features() {
        assert_eq!(EMPTY_START.offset_blocks_start(), -1);
        assert_eq!(EMPTY_END.offset_blocks_end(), i64::MAX);
        for s in [&EMPTY_START, &EMPTY_END] {
            assert_eq!(s.num_words(), 0);
            assert_eq!(s.text_density(), 0.0);
            assert_eq!(s.link_density(), 0.0);
        }
    }

    #[test]
    fn display_shows_features_and_text() {
        let mut tb = block(10, 2, 10, 1, 4);
        tb.set_is_content(true);
        tb.add_label("x");
        let dump = tb.to_string();
        assert!(dump.starts_with("[4-4;tl=0;nw=10;nwl=1;td=10.000;ld=0.200]\tCONTENT,x\n"));
        assert!(dump.ends_with("text"));
    }
}
