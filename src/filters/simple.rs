//! Simple relabeling passes: flag flips, thresholds, label mapping,
//! paragraph splitting and clause checks.

use std::mem;

use super::{num_full_text_words, Filter};
use crate::document::{TextBlock, TextDocument};
use crate::labels::{BlockCondition, LabelAction};
use crate::patterns::{CLAUSE_DELIMITER, CLAUSE_WHITESPACE, PARAGRAPH_BREAK};

/// Marks every block as content.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkEverythingContentFilter;

impl Filter for MarkEverythingContentFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changed = false;
        for block in &mut doc.text_blocks {
            changed |= block.set_is_content(true);
        }
        changed
    }
}

/// Flips every block's content flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvertedFilter;

impl Filter for InvertedFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        for block in &mut doc.text_blocks {
            let flipped = !block.is_content();
            block.set_is_content(flipped);
        }
        !doc.text_blocks.is_empty()
    }
}

/// Drops every non-content block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoilerplateBlockFilter;

impl Filter for BoilerplateBlockFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let before = doc.text_blocks.len();
        doc.text_blocks.retain(TextBlock::is_content);
        doc.text_blocks.len() != before
    }
}

/// Demotes content blocks with fewer than `min_words` words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinWordsFilter {
    pub min_words: usize,
}

impl MinWordsFilter {
    #[must_use]
    pub const fn new(min_words: usize) -> Self {
        Self { min_words }
    }
}

impl Filter for MinWordsFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changed = false;
        for block in &mut doc.text_blocks {
            if block.is_content() && block.num_words() < self.min_words {
                changed |= block.set_is_content(false);
            }
        }
        changed
    }
}

/// Demotes content blocks with fewer than `min_words` full-text words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinFulltextWordsFilter {
    pub min_words: usize,
}

impl MinFulltextWordsFilter {
    pub const DEFAULT_INSTANCE: Self = Self::new(30);

    #[must_use]
    pub const fn new(min_words: usize) -> Self {
        Self { min_words }
    }
}

impl Default for MinFulltextWordsFilter {
    fn default() -> Self {
        Self::DEFAULT_INSTANCE
    }
}

impl Filter for MinFulltextWordsFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changed = false;
        for block in &mut doc.text_blocks {
            if block.is_content() && num_full_text_words(block) < self.min_words {
                changed |= block.set_is_content(false);
            }
        }
        changed
    }
}

fn has_any_label(block: &TextBlock, labels: &[String]) -> bool {
    labels.iter().any(|l| block.has_label(l))
}

/// Marks blocks carrying any of the given labels as content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelToContentFilter {
    labels: Vec<String>,
}

impl LabelToContentFilter {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for LabelToContentFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changed = false;
        for block in &mut doc.text_blocks {
            if !block.is_content() && has_any_label(block, &self.labels) {
                changed |= block.set_is_content(true);
            }
        }
        changed
    }
}

/// Marks blocks carrying any of the given labels as boilerplate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelToBoilerplateFilter {
    labels: Vec<String>,
}

impl LabelToBoilerplateFilter {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for LabelToBoilerplateFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changed = false;
        for block in &mut doc.text_blocks {
            if block.is_content() && has_any_label(block, &self.labels) {
                changed |= block.set_is_content(false);
            }
        }
        changed
    }
}

/// Applies a (possibly conditional) label action to every block.
#[derive(Debug, Clone)]
pub struct ConditionalLabelFilter {
    action: LabelAction,
}

impl ConditionalLabelFilter {
    #[must_use]
    pub fn new(action: LabelAction) -> Self {
        Self { action }
    }
}

impl Filter for ConditionalLabelFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changed = false;
        for block in &mut doc.text_blocks {
            changed |= self.action.add_to(block);
        }
        changed
    }
}

/// Splits blocks at line breaks into one block per paragraph.
///
/// Each paragraph inherits the parent's content flag, labels and position;
/// its counters are recomputed from its own text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitParagraphBlocksFilter;

impl Filter for SplitParagraphBlocksFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let blocks = mem::take(&mut doc.text_blocks);
        let mut split = Vec::with_capacity(blocks.len());
        let mut changed = false;

        for block in blocks {
            let paragraphs: Vec<&str> = PARAGRAPH_BREAK.split(block.text()).collect();
            if paragraphs.len() < 2 {
                split.push(block);
                continue;
            }
            split.extend(paragraphs.into_iter().filter(|p| !p.is_empty()).map(|p| block.derive(p)));
            changed = true;
        }

        doc.text_blocks = split;
        changed
    }
}

/// Demotes content blocks that contain no clause of at least `min_words`
/// words.
///
/// A clause ends at a letter or digit followed by clause punctuation and
/// whitespace. With `accept_clauses_without_delimiter`, the trailing text
/// after the last delimiter is checked too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinClauseWordsFilter {
    pub min_words: usize,
    pub accept_clauses_without_delimiter: bool,
}

impl MinClauseWordsFilter {
    pub const INSTANCE: Self = Self::new(5, false);

    #[must_use]
    pub const fn new(min_words: usize, accept_clauses_without_delimiter: bool) -> Self {
        Self {
            min_words,
            accept_clauses_without_delimiter,
        }
    }

    fn is_clause_accepted(&self, clause: &str) -> bool {
        let mut n = 1;
        for _ in CLAUSE_WHITESPACE.find_iter(clause) {
            n += 1;
            if n >= self.min_words {
                return true;
            }
        }
        n >= self.min_words
    }

    fn has_clause(&self, text: &str) -> bool {
        let mut start = 0;
        for m in CLAUSE_DELIMITER.find_iter(text) {
            // keep the letter or digit that precedes the punctuation
            let first = text[m.start()..].chars().next().map_or(0, char::len_utf8);
            if self.is_clause_accepted(&text[start..m.start() + first]) {
                return true;
            }
            start = m.end();
        }
        self.accept_clauses_without_delimiter && self.is_clause_accepted(&text[start..])
    }
}

impl Default for MinClauseWordsFilter {
    fn default() -> Self {
        Self::INSTANCE
    }
}

impl Filter for MinClauseWordsFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changed = false;
        for block in &mut doc.text_blocks {
            if block.is_content() && !self.has_clause(block.text()) {
                changed |= block.set_is_content(false);
            }
        }
        changed
    }
}

fn no_links_and_several_words(block: &TextBlock) -> bool {
    block.link_density() == 0.0 && block.num_words() > 6
}

/// Marks a non-content block as content when both neighbours are content
/// and the block meets `condition`.
#[derive(Debug, Clone, Copy)]
pub struct SurroundingToContentFilter {
    condition: BlockCondition,
}

impl SurroundingToContentFilter {
    pub const INSTANCE_TEXT: Self = Self::new(no_links_and_several_words);

    #[must_use]
    pub const fn new(condition: BlockCondition) -> Self {
        Self { condition }
    }
}

impl Default for SurroundingToContentFilter {
    fn default() -> Self {
        Self::INSTANCE_TEXT
    }
}

impl Filter for SurroundingToContentFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let blocks = &mut doc.text_blocks;
        let mut changed = false;
        for i in 1..blocks.len().saturating_sub(1) {
            let surrounded = blocks[i - 1].is_content() && blocks[i + 1].is_content();
            let block = &mut blocks[i];
            if surrounded && !block.is_content() && (self.condition)(block) {
                changed |= block.set_is_content(true);
            }
        }
        changed
    }
}

/// Adds each block's labels, prefixed, to the block that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddPrecedingLabelsFilter {
    pub prefix: String,
}

impl AddPrecedingLabelsFilter {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Filter for AddPrecedingLabelsFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let preceding: Vec<Vec<String>> = doc
            .text_blocks
            .iter()
            .map(|b| b.labels().iter().map(|l| format!("{}{l}", self.prefix)).collect())
            .collect();

        let mut changed = false;
        for (block, labels) in doc.text_blocks.iter_mut().skip(1).zip(preceding) {
            if !labels.is_empty() {
                block.add_labels(labels);
                changed = true;
            }
        }
        changed
    }
}
