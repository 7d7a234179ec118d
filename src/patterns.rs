//! Compiled regex patterns used by the tokenizer, the segmenter and the filters.
//!
//! All patterns are compiled once at first use via `LazyLock` and shared
//! read-only afterwards.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Tokenizer Patterns
// =============================================================================

/// Zero-width Unicode word boundary; every match gets an invisible separator.
pub static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b").expect("WORD_BOUNDARY regex"));

/// Punctuation that must stay glued to the adjoining word, with the invisible
/// separators around it.
pub static NOT_WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{2063}*([\"'.,!@\\-:;$?()/])\u{2063}*").expect("NOT_WORD_BOUNDARY regex")
});

/// Runs of spaces and invisible separators, collapsed to one space.
pub static TOKEN_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[ \u{2063}]+").expect("TOKEN_SEPARATORS regex"));

/// A token counts as a word iff it contains one of these code points.
pub static VALID_WORD_CHARACTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{Nd}\p{Nl}\p{No}]").expect("VALID_WORD_CHARACTER regex")
});

// =============================================================================
// Charset Sniffing Patterns
// =============================================================================

/// `<meta charset=...>`
pub static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/;]+)"#).expect("META_CHARSET regex")
});

/// `<meta http-equiv="Content-Type" content="...; charset=...">`
pub static META_CONTENT_TYPE_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("META_CONTENT_TYPE_CHARSET regex")
});

// =============================================================================
// Segmentation Patterns
// =============================================================================

/// `size` attribute of `<font>`: optional sign, one digit.
pub static FONT_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([+\-]?)([0-9])").expect("FONT_SIZE regex"));

// =============================================================================
// Title Matching Patterns
// =============================================================================

/// Separator rules for title variants, from strict to permissive.
pub static TITLE_SEPARATORS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"[ ]*[|»:][ ]*").expect("TITLE_SEPARATORS[0] regex"),
        Regex::new(r"[ ]*[|»:()][ ]*").expect("TITLE_SEPARATORS[1] regex"),
        Regex::new(r"[ ]*[|»:()\-][ ]*").expect("TITLE_SEPARATORS[2] regex"),
        Regex::new(r"[ ]*[|»,:()\-][ ]*").expect("TITLE_SEPARATORS[3] regex"),
    ]
});

// =============================================================================
// Article Metadata Patterns
// =============================================================================

/// Short date lines ("Jan 5, 2010 10:30 pm EST").
pub static DATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9 ,./]*\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec|January|February|March|April|May|June|July|August|September|October|November|December)?\b[0-9 ,:apm./]*([CPSDMGET]{2,3})?$",
    )
    .expect("DATE_LINE regex")
});

/// Bylines ("By Jane Doe").
pub static BYLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Bb]y ").expect("BYLINE regex"));

// =============================================================================
// Paragraph / Clause Patterns
// =============================================================================

/// Paragraph separators inside a fused block.
pub static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\r]+").expect("PARAGRAPH_BREAK regex"));

/// End of a clause: a letter or digit, delimiter punctuation, then whitespace
/// or end of text.
pub static CLAUSE_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\d][,.:;!?]+(?:[ \n\r]+|$)").expect("CLAUSE_DELIMITER regex")
});

/// Whitespace runs inside a clause.
pub static CLAUSE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \n\r]+").expect("CLAUSE_WHITESPACE regex"));
