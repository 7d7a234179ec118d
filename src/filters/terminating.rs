//! End-of-text detection: comment sections, footers and what follows them.

use super::{num_full_text_words, Filter};
use crate::document::TextDocument;
use crate::labels::{INDICATES_END_OF_TEXT, MIGHT_BE_CONTENT, STRICTLY_NOT_CONTENT};

const PREFIXES: [&str; 4] = ["comments", "© reuters", "please rate this", "post a comment"];

const AFTER_NUMBER: [&str; 2] = [" comments", " users responded in"];

const CONTAINED: [&str; 7] = [
    "what you think...",
    "add your comment",
    "add comment",
    "reader views",
    "have your say",
    "reader comments",
    "rätta artikeln",
];

const EXACT: &str = "thanks for your comments - this feedback is now closed";

/// Labels short blocks that typically mark the end of an article's text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminatingBlocksFinder;

impl TerminatingBlocksFinder {
    pub const MAX_WORDS: usize = 15;
    pub const MIN_LENGTH: usize = 8;

    /// Whether `text` (already trimmed and lowercased) reads like a
    /// terminating block.
    #[must_use]
    pub fn is_terminating(text: &str) -> bool {
        PREFIXES.iter().any(|p| text.starts_with(p))
            || starts_with_number(text, &AFTER_NUMBER)
            || CONTAINED.iter().any(|c| text.contains(c))
            || text == EXACT
    }
}

/// A non-empty run of ASCII digits followed by one of `suffixes`.
fn starts_with_number(text: &str, suffixes: &[&str]) -> bool {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && suffixes.iter().any(|s| text[digits..].starts_with(s))
}

impl Filter for TerminatingBlocksFinder {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changed = false;
        for block in &mut doc.text_blocks {
            if block.num_words() >= Self::MAX_WORDS {
                continue;
            }
            let text = block.text().trim();
            if text.chars().count() < Self::MIN_LENGTH {
                continue;
            }
            if Self::is_terminating(&text.to_lowercase()) && !block.has_label(INDICATES_END_OF_TEXT) {
                block.add_label(INDICATES_END_OF_TEXT);
                changed = true;
            }
        }
        changed
    }
}

/// Demotes everything from the first end-of-text block reached after enough
/// full-text content words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreBlocksAfterContentFilter {
    pub min_num_words: usize,
}

impl IgnoreBlocksAfterContentFilter {
    pub const DEFAULT_INSTANCE: Self = Self::new(60);
    pub const INSTANCE_200: Self = Self::new(200);

    #[must_use]
    pub const fn new(min_num_words: usize) -> Self {
        Self { min_num_words }
    }
}

impl Default for IgnoreBlocksAfterContentFilter {
    fn default() -> Self {
        Self::DEFAULT_INSTANCE
    }
}

impl Filter for IgnoreBlocksAfterContentFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut num_words = 0;
        let mut found_end_of_text = false;
        let mut changed = false;

        for block in &mut doc.text_blocks {
            if block.is_content() {
                num_words += num_full_text_words(block);
            }
            if block.has_label(INDICATES_END_OF_TEXT) && num_words >= self.min_num_words {
                found_end_of_text = true;
            }
            if found_end_of_text {
                changed |= block.set_is_content(false);
            }
        }
        changed
    }
}

/// Walks from the end of the document demoting end-of-text blocks, until
/// more than [`Self::MAX_WORDS_FROM_END`] content words have been seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreBlocksAfterContentFromEndFilter;

impl IgnoreBlocksAfterContentFromEndFilter {
    pub const MAX_WORDS_FROM_END: usize = 200;
}

impl Filter for IgnoreBlocksAfterContentFromEndFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut words = 0;
        let mut changed = false;

        for block in doc.text_blocks.iter_mut().rev() {
            if block.has_label(INDICATES_END_OF_TEXT) {
                if !block.has_label(STRICTLY_NOT_CONTENT) {
                    block.add_label(STRICTLY_NOT_CONTENT);
                    changed = true;
                }
                changed |= block.remove_label(MIGHT_BE_CONTENT);
                changed |= block.set_is_content(false);
            } else if block.is_content() {
                words += block.num_words();
                if words > Self::MAX_WORDS_FROM_END {
                    break;
                }
            }
        }
        changed
    }
}
