//! Configuration options for content extraction.
//!
//! The `Options` struct picks the extractor pipeline and which blocks end up
//! in the returned text.

use crate::extractors::Extractor;

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_boilerpipe::{Extractor, Options};
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     extractor: Extractor::LargestContent,
///     include_non_content: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Filter pipeline run over the segmented document.
    ///
    /// Default: `Extractor::Article`
    pub extractor: Extractor,

    /// Include content blocks in `ExtractResult::content_text`.
    ///
    /// Default: `true`
    pub include_content: bool,

    /// Include boilerplate blocks in `ExtractResult::content_text`.
    ///
    /// Default: `false`
    pub include_non_content: bool,

    /// Run the quality estimator and report its verdict in
    /// `ExtractResult::low_quality`.
    ///
    /// Default: `true`
    pub estimate_quality: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            extractor: Extractor::Article,
            include_content: true,
            include_non_content: false,
            estimate_quality: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert_eq!(opts.extractor, Extractor::Article);
        assert!(opts.include_content);
        assert!(!opts.include_non_content);
        assert!(opts.estimate_quality);
    }

    #[test]
    fn test_custom_options() {
        let opts = Options {
            extractor: Extractor::KeepEverythingMinKWords(10),
            include_non_content: true,
            estimate_quality: false,
            ..Options::default()
        };

        assert_eq!(opts.extractor, Extractor::KeepEverythingMinKWords(10));
        assert!(opts.include_content);
        assert!(opts.include_non_content);
        assert!(!opts.estimate_quality);
    }
}
