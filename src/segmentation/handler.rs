//! The block segmenter: turns markup events into a [`TextDocument`].

use std::collections::BTreeSet;
use std::mem;

use log::{debug, warn};

use super::events::{attribute, ContentHandler};
use super::tags::{TagAction, TagActionTable, DEFAULT_TAG_ACTIONS};
use crate::document::{TextBlock, TextDocument};
use crate::labels::LabelAction;
use crate::patterns::FONT_SIZE;
use crate::tokenizer::{tokenize, WordStats, ANCHOR_TEXT_END, ANCHOR_TEXT_START};

const DEFAULT_FONT_SIZE: i32 = 3;

/// Markup-event driven segmentation state machine.
///
/// Text is buffered until a flush is triggered by block-level markup, at which
/// point the buffer becomes one [`TextBlock`]. Anchor markers go into the token
/// buffer only, so link words can be counted without altering the block text.
#[derive(Debug)]
pub struct BlockSegmenter<'a> {
    tag_actions: &'a TagActionTable,

    text_blocks: Vec<TextBlock>,
    title: Option<String>,

    text_buffer: String,
    token_buffer: String,
    last_was_whitespace: bool,
    flush: bool,

    tag_level: i32,
    block_tag_level: Option<i32>,
    in_body: usize,
    in_anchor: usize,
    in_ignorable_element: usize,
    in_anchor_text: bool,
    last_start_tag: String,

    font_size_stack: Vec<Option<i32>>,
    label_stacks: Vec<Option<Vec<&'a LabelAction>>>,

    offset_blocks: i64,
    text_element_idx: usize,
    contained_text_elements: BTreeSet<usize>,
}

impl Default for BlockSegmenter<'static> {
    fn default() -> Self {
        Self::new(&DEFAULT_TAG_ACTIONS)
    }
}

impl<'a> BlockSegmenter<'a> {
    #[must_use]
    pub fn new(tag_actions: &'a TagActionTable) -> Self {
        Self {
            tag_actions,
            text_blocks: Vec::new(),
            title: None,
            text_buffer: String::new(),
            token_buffer: String::new(),
            last_was_whitespace: false,
            flush: false,
            tag_level: 0,
            block_tag_level: None,
            in_body: 0,
            in_anchor: 0,
            in_ignorable_element: 0,
            in_anchor_text: false,
            last_start_tag: String::new(),
            font_size_stack: Vec::new(),
            label_stacks: Vec::new(),
            offset_blocks: 0,
            text_element_idx: 0,
            contained_text_elements: BTreeSet::new(),
        }
    }

    /// Clears all per-document state, keeping allocations and the tag table.
    pub fn reset(&mut self) {
        self.text_blocks.clear();
        self.title = None;
        self.text_buffer.clear();
        self.token_buffer.clear();
        self.last_was_whitespace = false;
        self.flush = false;
        self.tag_level = 0;
        self.block_tag_level = None;
        self.in_body = 0;
        self.in_anchor = 0;
        self.in_ignorable_element = 0;
        self.in_anchor_text = false;
        self.last_start_tag.clear();
        self.font_size_stack.clear();
        self.label_stacks.clear();
        self.offset_blocks = 0;
        self.text_element_idx = 0;
        self.contained_text_elements.clear();
    }

    /// Flushes pending text and hands out the document, leaving the segmenter
    /// reset for the next one.
    pub fn finish(&mut self) -> TextDocument {
        self.flush_block();
        let doc = TextDocument::new(self.title.take(), mem::take(&mut self.text_blocks));
        debug!(
            "segmented {} blocks (title: {:?})",
            doc.text_blocks.len(),
            doc.title
        );
        self.reset();
        doc
    }

    #[must_use]
    pub fn into_document(mut self) -> TextDocument {
        self.finish()
    }

    fn flush_block(&mut self) {
        if self.in_body == 0 {
            if self.last_start_tag.eq_ignore_ascii_case("title") {
                let title = self.token_buffer.trim();
                if !title.is_empty() {
                    self.title = Some(title.to_string());
                }
            }
            self.discard_pending();
            return;
        }

        if self.token_buffer.is_empty() {
            return;
        }
        if self.token_buffer == " " && self.last_was_whitespace {
            self.text_buffer.clear();
            self.token_buffer.clear();
            return;
        }

        let Some(stats) = WordStats::from_tokens(tokenize(&self.token_buffer), &mut self.in_anchor_text)
        else {
            self.discard_pending();
            return;
        };

        let mut block = TextBlock::new(
            self.text_buffer.trim(),
            stats,
            mem::take(&mut self.contained_text_elements),
            self.offset_blocks,
        );
        self.offset_blocks += 1;
        self.text_buffer.clear();
        self.token_buffer.clear();

        block.set_tag_level(self.block_tag_level.take().unwrap_or(self.tag_level));
        self.add_text_block(block);
    }

    fn discard_pending(&mut self) {
        self.text_buffer.clear();
        self.token_buffer.clear();
        self.block_tag_level = None;
        self.contained_text_elements.clear();
    }

    fn add_text_block(&mut self, mut block: TextBlock) {
        if let Some(size) = self.current_font_size() {
            block.add_label(format!("font-{size}"));
        }
        for action in self.label_stacks.iter().flatten().flatten() {
            action.add_to(&mut block);
        }
        self.text_blocks.push(block);
    }

    fn current_font_size(&self) -> Option<i32> {
        self.font_size_stack.iter().rev().flatten().next().copied()
    }

    fn add_whitespace_if_necessary(&mut self) {
        if !self.last_was_whitespace {
            self.token_buffer.push(' ');
            self.text_buffer.push(' ');
            self.last_was_whitespace = true;
        }
    }

    fn add_label_action(&mut self, action: &'a LabelAction) {
        if let Some(slot) = self.label_stacks.last_mut() {
            slot.get_or_insert_with(Vec::new).push(action);
        }
    }

    fn push_anchor_marker(&mut self, marker: &str) {
        self.add_whitespace_if_necessary();
        self.token_buffer.push_str(marker);
        self.token_buffer.push(' ');
        self.last_was_whitespace = true;
    }

    fn anchor_start(&mut self) {
        if self.in_anchor > 0 {
            warn!("input contains nested <a> elements; closing the open anchor to recover");
            self.anchor_end();
        }
        self.in_anchor += 1;
        if self.in_ignorable_element == 0 {
            self.push_anchor_marker(ANCHOR_TEXT_START);
        }
    }

    fn anchor_end(&mut self) {
        if self.in_anchor == 0 {
            return;
        }
        self.in_anchor -= 1;
        if self.in_anchor == 0 && self.in_ignorable_element == 0 {
            self.push_anchor_marker(ANCHOR_TEXT_END);
        }
    }

    fn font_size(&self, attributes: &[(String, String)]) -> Option<i32> {
        let caps = FONT_SIZE.captures(attribute(attributes, "size")?)?;
        let value: i32 = caps.get(2)?.as_str().parse().ok()?;
        match caps.get(1).map_or("", |m| m.as_str()) {
            "" => Some(value),
            sign => {
                let base = self.current_font_size().unwrap_or(DEFAULT_FONT_SIZE);
                Some(if sign == "+" { base + value } else { base - value })
            }
        }
    }

    /// Runs the start half of `action`; returns whether a flush is requested.
    fn start_action(&mut self, action: &'a TagAction, attributes: &[(String, String)]) -> bool {
        match action {
            TagAction::Ignorable => {
                self.in_ignorable_element += 1;
                true
            }
            TagAction::Anchor => {
                self.anchor_start();
                false
            }
            TagAction::Body => {
                self.flush_block();
                self.in_body += 1;
                false
            }
            TagAction::InlineWhitespace => {
                self.add_whitespace_if_necessary();
                false
            }
            TagAction::InlineNoWhitespace => false,
            TagAction::BlockLevel => true,
            TagAction::Font => {
                let size = self.font_size(attributes);
                self.font_size_stack.push(size);
                false
            }
            TagAction::BlockLabel(labels) => {
                self.add_label_action(labels);
                true
            }
            TagAction::InlineLabel(labels) => {
                self.add_whitespace_if_necessary();
                self.add_label_action(labels);
                false
            }
            TagAction::Chained(first, second) => {
                let a = self.start_action(first, attributes);
                let b = self.start_action(second, attributes);
                a | b
            }
        }
    }

    /// Runs the end half of `action`; returns whether a flush is requested.
    fn end_action(&mut self, action: &'a TagAction) -> bool {
        match action {
            TagAction::Ignorable => {
                self.in_ignorable_element = self.in_ignorable_element.saturating_sub(1);
                true
            }
            TagAction::Anchor => {
                self.anchor_end();
                false
            }
            TagAction::Body => {
                self.flush_block();
                self.in_body = self.in_body.saturating_sub(1);
                false
            }
            TagAction::InlineWhitespace | TagAction::InlineLabel(_) => {
                self.add_whitespace_if_necessary();
                false
            }
            TagAction::InlineNoWhitespace => false,
            TagAction::BlockLevel | TagAction::BlockLabel(_) => true,
            TagAction::Font => {
                self.font_size_stack.pop();
                false
            }
            TagAction::Chained(first, second) => {
                let a = self.end_action(first);
                let b = self.end_action(second);
                a | b
            }
        }
    }
}

impl<'a> ContentHandler for BlockSegmenter<'a> {
    fn start_element(&mut self, name: &str, attributes: &[(String, String)]) {
        self.label_stacks.push(None);

        let table: &'a TagActionTable = self.tag_actions;
        match table.get(name) {
            Some(action) => {
                if action.changes_tag_level() {
                    self.tag_level += 1;
                }
                let flush = self.start_action(action, attributes);
                self.flush |= flush;
            }
            None => {
                self.tag_level += 1;
                self.flush = true;
            }
        }

        self.last_start_tag.clear();
        self.last_start_tag.push_str(name);
    }

    fn characters(&mut self, text: &str) {
        self.text_element_idx += 1;
        if self.flush {
            self.flush_block();
            self.flush = false;
        }

        if self.in_ignorable_element != 0 || text.is_empty() {
            return;
        }

        let normalized: String = text
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();
        let after_start = normalized.trim_start_matches(' ');
        let start_whitespace = after_start.len() != normalized.len();
        let core = after_start.trim_end_matches(' ');
        let end_whitespace = core.len() != after_start.len();

        if core.is_empty() {
            if !self.last_was_whitespace {
                self.text_buffer.push(' ');
                self.token_buffer.push(' ');
            }
            self.last_was_whitespace = true;
            return;
        }

        if start_whitespace && !self.last_was_whitespace {
            self.text_buffer.push(' ');
            self.token_buffer.push(' ');
        }

        if self.block_tag_level.is_none() {
            self.block_tag_level = Some(self.tag_level);
        }

        self.text_buffer.push_str(core);
        self.token_buffer.push_str(core);
        if end_whitespace {
            self.text_buffer.push(' ');
            self.token_buffer.push(' ');
        }

        self.last_was_whitespace = end_whitespace;
        self.contained_text_elements.insert(self.text_element_idx);
    }

    fn end_element(&mut self, name: &str) {
        let table: &'a TagActionTable = self.tag_actions;
        let (flush, changes_tag_level) = match table.get(name) {
            Some(action) => (self.end_action(action), action.changes_tag_level()),
            None => (true, true),
        };
        self.flush |= flush;

        if changes_tag_level {
            self.tag_level -= 1;
        }

        if self.flush {
            self.flush_block();
            self.flush = false;
        }

        self.label_stacks.pop();
    }

    fn end_document(&mut self) {
        self.flush_block();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::HR;
    use crate::segmentation::events::{EventSource, MarkupEvent};
    use crate::segmentation::tags::TagActionTable;

    fn run(events: &[MarkupEvent]) -> TextDocument {
        run_with(&DEFAULT_TAG_ACTIONS, events)
    }

    fn run_with(table: &TagActionTable, mut events: &[MarkupEvent]) -> TextDocument {
        let mut segmenter = BlockSegmenter::new(table);
        match events.replay(&mut segmenter) {
            Ok(()) => segmenter.into_document(),
            Err(err) => panic!("replay failed: {err}"),
        }
    }

    fn body(inner: Vec<MarkupEvent>) -> Vec<MarkupEvent> {
        let mut events = vec![
            MarkupEvent::StartDocument,
            MarkupEvent::start("html"),
            MarkupEvent::start("body"),
        ];
        events.extend(inner);
        events.extend([
            MarkupEvent::end("body"),
            MarkupEvent::end("html"),
            MarkupEvent::EndDocument,
        ]);
        events
    }

    fn texts(doc: &TextDocument) -> Vec<&str> {
        doc.text_blocks.iter().map(TextBlock::text).collect()
    }

    #[test]
    fn captures_title_outside_body() {
        let events = vec![
            MarkupEvent::StartDocument,
            MarkupEvent::start("html"),
            MarkupEvent::start("head"),
            MarkupEvent::start("title"),
            MarkupEvent::text(" My Title "),
            MarkupEvent::end("title"),
            MarkupEvent::end("head"),
            MarkupEvent::end("html"),
            MarkupEvent::EndDocument,
        ];
        let doc = run(&events);
        assert_eq!(doc.title(), Some("My Title"));
        assert!(doc.text_blocks.is_empty());
    }

    #[test]
    fn text_outside_body_makes_no_blocks() {
        let events = vec![
            MarkupEvent::start("div"),
            MarkupEvent::text("stray words here"),
            MarkupEvent::end("div"),
            MarkupEvent::EndDocument,
        ];
        assert!(run(&events).text_blocks.is_empty());
    }

    #[test]
    fn block_elements_split_and_inline_elements_join() {
        let doc = run(&body(vec![
            MarkupEvent::start("p"),
            MarkupEvent::text("Hello "),
            MarkupEvent::start("b"),
            MarkupEvent::text("bold"),
            MarkupEvent::end("b"),
            MarkupEvent::text("er world"),
            MarkupEvent::end("p"),
            MarkupEvent::start("div"),
            MarkupEvent::text("Second block"),
            MarkupEvent::end("div"),
        ]));
        assert_eq!(texts(&doc), vec!["Hello bolder world", "Second block"]);
        assert_eq!(doc.text_blocks[0].offset_blocks_start(), 0);
        assert_eq!(doc.text_blocks[1].offset_blocks_start(), 1);
    }

    #[test]
    fn whitespace_is_normalized_and_not_duplicated() {
        let doc = run(&body(vec![
            MarkupEvent::start("p"),
            MarkupEvent::text("one\n\ttwo "),
            MarkupEvent::start("span"),
            MarkupEvent::text("  "),
            MarkupEvent::end("span"),
            MarkupEvent::text(" three"),
            MarkupEvent::end("p"),
        ]));
        assert_eq!(texts(&doc), vec!["one  two three"]);
        assert_eq!(doc.text_blocks[0].num_words(), 3);
    }

    #[test]
    fn anchor_words_count_towards_link_density() {
        let doc = run(&body(vec![
            MarkupEvent::start("p"),
            MarkupEvent::text("Read"),
            MarkupEvent::start("a"),
            MarkupEvent::text("the full story"),
            MarkupEvent::end("a"),
            MarkupEvent::text("now"),
            MarkupEvent::end("p"),
        ]));
        let block = &doc.text_blocks[0];
        assert_eq!(block.text(), "Read the full story now");
        assert_eq!(block.num_words(), 5);
        assert_eq!(block.num_words_in_anchor_text(), 3);
        assert!((block.link_density() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn nested_anchor_is_repaired() {
        let doc = run(&body(vec![
            MarkupEvent::start("p"),
            MarkupEvent::start("a"),
            MarkupEvent::text("outer"),
            MarkupEvent::start("a"),
            MarkupEvent::text("inner"),
            MarkupEvent::end("a"),
            MarkupEvent::end("a"),
            MarkupEvent::text("plain words"),
            MarkupEvent::end("p"),
        ]));
        let block = &doc.text_blocks[0];
        assert_eq!(block.num_words(), 4);
        assert_eq!(block.num_words_in_anchor_text(), 2);
    }

    #[test]
    fn ignorable_content_is_dropped() {
        let doc = run(&body(vec![
            MarkupEvent::start("p"),
            MarkupEvent::text("visible"),
            MarkupEvent::end("p"),
            MarkupEvent::start("script"),
            MarkupEvent::text("var x = 1;"),
            MarkupEvent::end("script"),
        ]));
        assert_eq!(texts(&doc), vec!["visible"]);
    }

    #[test]
    fn tag_level_is_snapshot_at_first_character() {
        let doc = run(&body(vec![
            MarkupEvent::start("div"),
            MarkupEvent::start("div"),
            MarkupEvent::text("deep"),
            MarkupEvent::end("div"),
            MarkupEvent::text("shallow"),
            MarkupEvent::end("div"),
        ]));
        // html, body, div, div
        assert_eq!(doc.text_blocks[0].tag_level(), 4);
        assert_eq!(doc.text_blocks[1].tag_level(), 3);
    }

    #[test]
    fn punctuation_only_block_has_no_words() {
        let doc = run(&body(vec![
            MarkupEvent::start("div"),
            MarkupEvent::text("|"),
            MarkupEvent::end("div"),
        ]));
        assert_eq!(doc.text_blocks.len(), 1);
        assert_eq!(doc.text_blocks[0].num_words(), 0);
    }

    #[test]
    fn font_sizes_and_label_actions_become_labels() {
        let table = TagActionTable::standard()
            .set("font", TagAction::Font)
            .set("h1", TagAction::BlockLabel(LabelAction::new(["<h1>"])))
            .set("q", TagAction::InlineLabel(LabelAction::new(["<q>"])));
        let doc = run_with(
            &table,
            &body(vec![
                MarkupEvent::start_with("font", &[("size", "5")]),
                MarkupEvent::start_with("font", &[("size", "-1")]),
                MarkupEvent::start("h1"),
                MarkupEvent::text("Headline"),
                MarkupEvent::end("h1"),
                MarkupEvent::end("font"),
                MarkupEvent::end("font"),
                MarkupEvent::start("q"),
                MarkupEvent::start("p"),
                MarkupEvent::text("quoted words"),
                MarkupEvent::end("p"),
                MarkupEvent::end("q"),
            ]),
        );
        assert_eq!(doc.text_blocks[0].labels(), ["font-4", "<h1>"]);
        assert_eq!(doc.text_blocks[1].text(), "quoted words");
        assert_eq!(doc.text_blocks[1].labels(), ["<q>"]);
    }

    fn font_table() -> TagActionTable {
        TagActionTable::standard().set("font", TagAction::Font)
    }

    fn paragraph(text: &str) -> [MarkupEvent; 3] {
        [MarkupEvent::start("p"), MarkupEvent::text(text), MarkupEvent::end("p")]
    }

    #[test]
    fn relative_font_size_defaults_to_three() {
        let mut events = vec![MarkupEvent::start_with("font", &[("size", "+2")])];
        events.extend(paragraph("alpha"));
        events.push(MarkupEvent::end("font"));
        events.push(MarkupEvent::start_with("font", &[("size", "-1")]));
        events.extend(paragraph("omega"));
        events.push(MarkupEvent::end("font"));

        let doc = run_with(&font_table(), &body(events));
        assert_eq!(texts(&doc), vec!["alpha", "omega"]);
        assert_eq!(doc.text_blocks[0].labels(), ["font-5"]);
        assert_eq!(doc.text_blocks[1].labels(), ["font-2"]);
    }

    #[test]
    fn font_without_usable_size_is_skipped() {
        let mut events = vec![
            MarkupEvent::start_with("font", &[("size", "6")]),
            MarkupEvent::start("font"),
        ];
        events.extend(paragraph("beta"));
        events.push(MarkupEvent::start_with("font", &[("size", "large")]));
        events.push(MarkupEvent::start_with("font", &[("size", "+1")]));
        events.extend(paragraph("gamma"));
        events.extend((0..4).map(|_| MarkupEvent::end("font")));
        events.extend(paragraph("delta"));

        let doc = run_with(&font_table(), &body(events));
        assert_eq!(texts(&doc), vec!["beta", "gamma", "delta"]);
        assert_eq!(doc.text_blocks[0].labels(), ["font-6"]);
        assert_eq!(doc.text_blocks[1].labels(), ["font-7"]);
        assert!(doc.text_blocks[2].labels().is_empty());
    }

    #[test]
    fn chained_action_combines_flush_and_depth() {
        let table = TagActionTable::standard().set(
            "span",
            TagAction::InlineLabel(LabelAction::new(["<span>"])).chain(TagAction::BlockLevel),
        );
        let events = body(vec![
            MarkupEvent::start("p"),
            MarkupEvent::text("before"),
            MarkupEvent::start("span"),
            MarkupEvent::text("inside"),
            MarkupEvent::end("span"),
            MarkupEvent::text("after"),
            MarkupEvent::end("p"),
        ]);

        assert_eq!(texts(&run(&events)), vec!["beforeinsideafter"]);

        let doc = run_with(&table, &events);
        assert_eq!(texts(&doc), vec!["before", "inside", "after"]);
        let levels: Vec<i32> = doc.text_blocks.iter().map(TextBlock::tag_level).collect();
        assert_eq!(levels[1], levels[0] + 1);
        assert_eq!(levels[2], levels[0]);
        assert_eq!(doc.text_blocks[1].labels(), ["<span>"]);
        assert!(doc.text_blocks[2].labels().is_empty());
    }

    #[test]
    fn block_label_reaches_text_flushed_at_its_start() {
        let table = TagActionTable::standard().set("h2", TagAction::BlockLabel(LabelAction::new(["<h2>"])));
        let doc = run_with(
            &table,
            &body(vec![
                MarkupEvent::start("div"),
                MarkupEvent::text("before"),
                MarkupEvent::start("h2"),
                MarkupEvent::text("Heading"),
                MarkupEvent::end("h2"),
                MarkupEvent::end("div"),
            ]),
        );
        assert_eq!(texts(&doc), vec!["before", "Heading"]);
        assert_eq!(doc.text_blocks[0].labels(), ["<h2>"]);
        assert_eq!(doc.text_blocks[1].labels(), ["<h2>"]);
    }

    #[test]
    fn horizontal_rule_labels_the_block_it_closes() {
        let table = TagActionTable::standard().set("hr", TagAction::BlockLabel(LabelAction::new([HR])));
        let doc = run_with(
            &table,
            &body(vec![
                MarkupEvent::text("above the rule"),
                MarkupEvent::start("hr"),
                MarkupEvent::end("hr"),
                MarkupEvent::text("below the rule"),
            ]),
        );
        assert_eq!(texts(&doc), vec!["above the rule", "below the rule"]);
        assert_eq!(doc.text_blocks[0].labels(), [HR]);
        assert!(doc.text_blocks[1].labels().is_empty());
    }

    #[test]
    fn reset_allows_reuse() {
        let mut segmenter = BlockSegmenter::default();
        let mut events = body(vec![MarkupEvent::text("first document")]);
        assert!(events.replay(&mut segmenter).is_ok());
        let first = segmenter.finish();
        assert!(events.replay(&mut segmenter).is_ok());
        let second = segmenter.finish();
        assert_eq!(first, second);
        assert_eq!(second.text_blocks[0].offset_blocks_start(), 0);
    }
}
