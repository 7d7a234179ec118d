//! Unicode word tokenizer and shallow word statistics.
//!
//! Text is split on Unicode word boundaries; runs of punctuation stay attached
//! to the adjoining word so "U.S." or "don't" come out as one token.

use crate::patterns::{NOT_WORD_BOUNDARY, TOKEN_SEPARATORS, VALID_WORD_CHARACTER, WORD_BOUNDARY};

/// Marks the start of anchor text inside a token buffer.
pub const ANCHOR_TEXT_START: &str = "$\u{e00a}<";

/// Marks the end of anchor text inside a token buffer.
pub const ANCHOR_TEXT_END: &str = ">\u{e00a}$";

/// Visual line width used to estimate wrapped lines.
pub const MAX_LINE_LENGTH: usize = 80;

/// Ordered, single-pass sequence of tokens produced by [`tokenize`].
#[derive(Debug)]
pub struct Tokens {
    inner: std::vec::IntoIter<String>,
}

impl Iterator for Tokens {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Tokens {}

/// Tokenizes `text` on Unicode word boundaries.
///
/// # Example
///
/// ```
/// use rs_boilerpipe::tokenizer::tokenize;
///
/// let tokens: Vec<String> = tokenize("Hello, world!").collect();
/// assert_eq!(tokens, vec!["Hello,", "world!"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Tokens {
    let marked = WORD_BOUNDARY.replace_all(text, "\u{2063}");
    let glued = NOT_WORD_BOUNDARY.replace_all(&marked, "$1");
    let collapsed = TOKEN_SEPARATORS.replace_all(&glued, " ");

    let tokens: Vec<String> = collapsed
        .trim()
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Tokens {
        inner: tokens.into_iter(),
    }
}

/// A token is a word iff it contains a letter, digit or numeral code point.
#[must_use]
pub fn is_word(token: &str) -> bool {
    VALID_WORD_CHARACTER.is_match(token)
}

/// Word counts and the synthetic line-wrap estimate of one text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    /// Words in the run.
    pub num_words: usize,
    /// Words between anchor-start and anchor-end markers.
    pub num_words_in_anchor_text: usize,
    /// Words on completed wrapped lines (all words if nothing wrapped).
    pub num_words_in_wrapped_lines: usize,
    /// Estimated wrapped lines, at least 1.
    pub num_wrapped_lines: usize,
}

impl WordStats {
    /// Classifies `tokens`, counting words, anchored words and wrapped lines.
    ///
    /// `in_anchor_text` carries the anchor state across runs, as markers may
    /// open in one block and close in a later one. Returns `None` when no token
    /// other than anchor markers was seen.
    pub fn from_tokens<I, S>(tokens: I, in_anchor_text: &mut bool) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut num_words = 0;
        let mut num_linked_words = 0;
        let mut num_wrapped_lines = 0;
        // line length plus one: the first word carries no separator
        let mut current_line_length: usize = 0;
        let mut num_tokens = 0;
        let mut num_words_current_line = 0;

        for token in tokens {
            let token = token.as_ref();
            if token == ANCHOR_TEXT_START {
                *in_anchor_text = true;
            } else if token == ANCHOR_TEXT_END {
                *in_anchor_text = false;
            } else if is_word(token) {
                num_tokens += 1;
                num_words += 1;
                num_words_current_line += 1;
                if *in_anchor_text {
                    num_linked_words += 1;
                }
                let token_length = token.chars().count();
                current_line_length += token_length + 1;
                if current_line_length > MAX_LINE_LENGTH + 1 {
                    num_wrapped_lines += 1;
                    current_line_length = token_length + 1;
                    num_words_current_line = 1;
                }
            } else {
                num_tokens += 1;
            }
        }

        if num_tokens == 0 {
            return None;
        }

        let num_words_in_wrapped_lines = if num_wrapped_lines == 0 {
            num_wrapped_lines = 1;
            num_words
        } else {
            num_words - num_words_current_line
        };

        Some(Self {
            num_words,
            num_words_in_anchor_text: num_linked_words,
            num_words_in_wrapped_lines,
            num_wrapped_lines,
        })
    }

    /// Statistics of plain text without anchor markup.
    #[must_use]
    pub fn of_text(text: &str) -> Self {
        let mut in_anchor_text = false;
        Self::from_tokens(tokenize(text), &mut in_anchor_text).unwrap_or_default()
    }
}
