//! Label vocabulary and label actions.
//!
//! Labels are opaque strings attached to [`TextBlock`]s. Filters use a small
//! fixed vocabulary; markup-derived labels start with [`MARKUP_PREFIX`].

use std::fmt;

use crate::document::TextBlock;

/// Block matches a title candidate.
pub const TITLE: &str = "boilerpipe/TITLE";
/// Block holds a date line or byline.
pub const ARTICLE_METADATA: &str = "boilerpipe/ARTICLE_METADATA";
/// Block looks like the start of comments or a footer.
pub const INDICATES_END_OF_TEXT: &str = "boilerpipe/INDICATES_END_OF_TEXT";
/// Block was demoted by a largest-block filter but might still be content.
pub const MIGHT_BE_CONTENT: &str = "boilerpipe/MIGHT_BE_CONTENT";
/// Block must never become content again.
pub const STRICTLY_NOT_CONTENT: &str = "boilerpipe/STRICTLY_NOT_CONTENT";
/// Block closed by a horizontal rule; attached by an `hr` label action.
pub const HR: &str = "boilerpipe/HR";
/// Prefix of labels derived from markup (e.g. `<h1>`).
pub const MARKUP_PREFIX: &str = "<";

/// Predicate over a block's features.
pub type BlockCondition = fn(&TextBlock) -> bool;

/// Labels to attach to a block, optionally only when a condition holds.
#[derive(Clone)]
pub struct LabelAction {
    labels: Vec<String>,
    condition: Option<BlockCondition>,
}

impl LabelAction {
    /// Unconditionally attaches `labels`.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            condition: None,
        }
    }

    /// Attaches `labels` only to blocks meeting `condition`.
    pub fn conditional<I, S>(condition: BlockCondition, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            condition: Some(condition),
        }
    }

    /// The labels this action attaches.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Applies the action, returning whether any label was added.
    pub fn add_to(&self, block: &mut TextBlock) -> bool {
        if self.condition.is_some_and(|cond| !cond(block)) {
            return false;
        }
        block.add_labels(self.labels.iter().cloned());
        !self.labels.is_empty()
    }
}

impl fmt::Debug for LabelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelAction")
            .field("labels", &self.labels)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}
