//! Title matching and article metadata detection.

use regex::Regex;

use super::Filter;
use crate::document::TextDocument;
use crate::labels::{ARTICLE_METADATA, TITLE};
use crate::patterns::{BYLINE, DATE_LINE, TITLE_SEPARATORS};

/// Labels blocks whose text equals the document title or one of its parts.
///
/// Candidates are the trimmed title plus, for each separator rule from
/// strict to permissive, the longest part of the title split by that rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTitleMatchClassifier {
    potential_titles: Option<Vec<String>>,
}

impl DocumentTitleMatchClassifier {
    #[must_use]
    pub fn new(title: Option<&str>) -> Self {
        let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::default();
        };

        let mut titles = vec![title.to_string()];
        for separator in TITLE_SEPARATORS.iter() {
            if let Some(part) = longest_part(title, separator) {
                if !titles.contains(&part) {
                    titles.push(part);
                }
            }
        }
        Self {
            potential_titles: Some(titles),
        }
    }

    /// Candidate titles, or `None` when the document had no usable title.
    #[must_use]
    pub fn potential_titles(&self) -> Option<&[String]> {
        self.potential_titles.as_deref()
    }
}

fn word_count(text: &str) -> usize {
    text.split(' ').filter(|w| !w.is_empty()).count()
}

/// Longest part by (word count, character length), skipping parts that look
/// like a domain. `None` if the separator does not split the title.
fn longest_part(title: &str, separator: &Regex) -> Option<String> {
    let parts: Vec<&str> = separator.split(title).collect();
    if parts.len() == 1 {
        return None;
    }

    let mut longest: Option<((usize, usize), &str)> = None;
    for part in parts {
        if part.contains(".com") {
            continue;
        }
        let key = (word_count(part), part.chars().count());
        if longest.is_none_or(|(best, _)| key > best) {
            longest = Some((key, part));
        }
    }

    longest
        .map(|(_, part)| part.trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
}

impl Filter for DocumentTitleMatchClassifier {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let Some(titles) = &self.potential_titles else {
            return false;
        };

        let mut changed = false;
        for block in &mut doc.text_blocks {
            let text = block.text().trim();
            if titles.iter().any(|t| t == text) && !block.has_label(TITLE) {
                block.add_label(TITLE);
                changed = true;
            }
        }
        changed
    }
}

/// Marks short date lines and bylines as content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleMetadataFilter;

impl ArticleMetadataFilter {
    pub const MAX_WORDS: usize = 10;
}

impl Filter for ArticleMetadataFilter {
    fn process(&self, doc: &mut TextDocument) -> bool {
        let mut changed = false;
        for block in &mut doc.text_blocks {
            if block.num_words() > Self::MAX_WORDS {
                continue;
            }
            if DATE_LINE.is_match(block.text()) || BYLINE.is_match(block.text()) {
                changed |= block.set_is_content(true);
                if !block.has_label(ARTICLE_METADATA) {
                    block.add_label(ARTICLE_METADATA);
                    changed = true;
                }
            }
        }
        changed
    }
}
