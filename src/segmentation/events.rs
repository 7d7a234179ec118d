//! Markup event contract between a parser and the segmenter.

use crate::error::Result;

/// One markup event, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    StartDocument,
    StartElement {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// A text run. May fire several times per element, whitespace-only included.
    Characters(String),
    EndElement {
        name: String,
    },
    EndDocument,
}

impl MarkupEvent {
    /// Shorthand for a start tag without attributes.
    #[must_use]
    pub fn start(name: &str) -> Self {
        Self::StartElement {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn start_with(name: &str, attributes: &[(&str, &str)]) -> Self {
        Self::StartElement {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::Characters(text.to_string())
    }

    #[must_use]
    pub fn end(name: &str) -> Self {
        Self::EndElement {
            name: name.to_string(),
        }
    }
}

/// Receiver of markup events.
pub trait ContentHandler {
    fn start_document(&mut self) {}

    fn start_element(&mut self, name: &str, attributes: &[(String, String)]);

    fn characters(&mut self, text: &str);

    fn end_element(&mut self, name: &str);

    fn end_document(&mut self) {}

    /// Dispatches a recorded event to the matching callback.
    fn handle(&mut self, event: &MarkupEvent) {
        match event {
            MarkupEvent::StartDocument => self.start_document(),
            MarkupEvent::StartElement { name, attributes } => self.start_element(name, attributes),
            MarkupEvent::Characters(text) => self.characters(text),
            MarkupEvent::EndElement { name } => self.end_element(name),
            MarkupEvent::EndDocument => self.end_document(),
        }
    }
}

/// Anything that can replay a markup event stream into a handler.
pub trait EventSource {
    /// Feeds the whole stream to `handler`, failing only if the underlying
    /// input cannot be acquired or parsed.
    fn replay(&mut self, handler: &mut dyn ContentHandler) -> Result<()>;
}

impl EventSource for &[MarkupEvent] {
    fn replay(&mut self, handler: &mut dyn ContentHandler) -> Result<()> {
        for event in self.iter() {
            handler.handle(event);
        }
        Ok(())
    }
}

impl EventSource for Vec<MarkupEvent> {
    fn replay(&mut self, handler: &mut dyn ContentHandler) -> Result<()> {
        self.as_slice().replay(handler)
    }
}

/// Case-insensitive attribute lookup.
#[must_use]
pub fn attribute<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl ContentHandler for Recorder {
        fn start_document(&mut self) {
            self.0.push("doc".into());
        }
        fn start_element(&mut self, name: &str, attributes: &[(String, String)]) {
            self.0.push(format!("<{name}:{}>", attributes.len()));
        }
        fn characters(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
        fn end_element(&mut self, name: &str) {
            self.0.push(format!("</{name}>"));
        }
    }

    #[test]
    fn replays_recorded_events_in_order() {
        let mut events = vec![
            MarkupEvent::StartDocument,
            MarkupEvent::start_with("font", &[("size", "+1")]),
            MarkupEvent::text("hi"),
            MarkupEvent::end("font"),
            MarkupEvent::EndDocument,
        ];
        let mut rec = Recorder::default();
        assert!(events.replay(&mut rec).is_ok());
        assert_eq!(rec.0, vec!["doc", "<font:1>", "hi", "</font>"]);
    }

    #[test]
    fn attribute_lookup_ignores_case() {
        let attrs = vec![("SIZE".to_string(), "4".to_string())];
        assert_eq!(attribute(&attrs, "size"), Some("4"));
        assert_eq!(attribute(&attrs, "face"), None);
    }
}
