//! Per-element segmentation behavior.
//!
//! Every element name maps to one [`TagAction`]; names without an entry
//! increase the depth and force a flush, like generic block elements.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::labels::LabelAction;

/// How an element affects segmentation.
#[derive(Debug, Clone)]
pub enum TagAction {
    /// Character content is dropped until the matching end tag.
    Ignorable,
    /// Link text; words inside count as anchor words. May not nest.
    Anchor,
    /// Flushes and toggles the body counter.
    Body,
    /// Inline element that separates words.
    InlineWhitespace,
    /// Inline element that neither separates words nor flushes.
    InlineNoWhitespace,
    /// Flushes on start and end.
    BlockLevel,
    /// Tracks the `size` attribute; blocks get a `font-N` label.
    Font,
    /// Block-level element queueing a label action at its depth.
    BlockLabel(LabelAction),
    /// Inline element queueing a label action at its depth.
    InlineLabel(LabelAction),
    /// Runs both actions, OR-ing their results.
    Chained(Box<TagAction>, Box<TagAction>),
}

impl TagAction {
    /// Whether the element counts towards the tag level.
    #[must_use]
    pub fn changes_tag_level(&self) -> bool {
        match self {
            Self::Font | Self::InlineLabel(_) => false,
            Self::Chained(first, second) => first.changes_tag_level() || second.changes_tag_level(),
            Self::Ignorable
            | Self::Anchor
            | Self::Body
            | Self::InlineWhitespace
            | Self::InlineNoWhitespace
            | Self::BlockLevel
            | Self::BlockLabel(_) => true,
        }
    }

    #[must_use]
    pub fn chain(self, next: TagAction) -> Self {
        Self::Chained(Box::new(self), Box::new(next))
    }
}

/// Immutable name to behavior table, keyed by lower-case element name.
#[derive(Debug, Clone, Default)]
pub struct TagActionTable {
    actions: HashMap<String, TagAction>,
}

/// The process-wide default table.
pub static DEFAULT_TAG_ACTIONS: LazyLock<TagActionTable> = LazyLock::new(TagActionTable::standard);

impl TagActionTable {
    /// An empty table: every element behaves like an unknown block element.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard HTML behaviors.
    #[must_use]
    pub fn standard() -> Self {
        const IGNORABLE: [&str; 8] = [
            "style", "script", "option", "object", "embed", "applet", "link", "noscript",
        ];
        const INLINE_NO_WHITESPACE: [&str; 13] = [
            "strike", "u", "b", "i", "em", "strong", "span", "sup", "code", "tt", "sub", "var",
            "font",
        ];

        let mut table = Self::empty()
            .set("a", TagAction::Anchor)
            .set("body", TagAction::Body)
            .set("abbr", TagAction::InlineWhitespace)
            .set("acronym", TagAction::InlineWhitespace);
        for tag in IGNORABLE {
            table = table.set(tag, TagAction::Ignorable);
        }
        for tag in INLINE_NO_WHITESPACE {
            table = table.set(tag, TagAction::InlineNoWhitespace);
        }
        table
    }

    /// Replaces the action for `tag`.
    #[must_use]
    pub fn set(mut self, tag: &str, action: TagAction) -> Self {
        self.actions.insert(tag.to_ascii_lowercase(), action);
        self
    }

    /// Adds an action for `tag`, chaining after any existing one.
    #[must_use]
    pub fn add(mut self, tag: &str, action: TagAction) -> Self {
        let key = tag.to_ascii_lowercase();
        let combined = match self.actions.remove(&key) {
            Some(previous) => previous.chain(action),
            None => action,
        };
        self.actions.insert(key, combined);
        self
    }

    /// Looks up the action for an element name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&TagAction> {
        if tag.bytes().any(|b| b.is_ascii_uppercase()) {
            self.actions.get(&tag.to_ascii_lowercase())
        } else {
            self.actions.get(tag)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
