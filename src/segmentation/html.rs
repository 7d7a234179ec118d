//! HTML event source backed by `dom_query`.

use std::io::Read;

use dom_query::{Document, NodeRef};

use super::events::{ContentHandler, EventSource};
use crate::encoding::decode_html;
use crate::error::Result;

/// A parsed HTML document, replayed as markup events in document order.
///
/// Comments and doctypes are skipped; element names are lower-cased.
pub struct HtmlSource {
    document: Document,
}

enum Step<'a> {
    Enter(NodeRef<'a>),
    Leave(String),
}

impl HtmlSource {
    #[must_use]
    pub fn new(html: &str) -> Self {
        Self {
            document: Document::from(html),
        }
    }

    /// Decodes raw bytes (BOM, then meta charset, then UTF-8) and parses them.
    #[must_use]
    pub fn from_bytes(html: &[u8]) -> Self {
        Self::new(&decode_html(html))
    }

    /// Reads `reader` to the end and parses the bytes.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }
}

impl std::fmt::Debug for HtmlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlSource").finish_non_exhaustive()
    }
}

impl EventSource for HtmlSource {
    fn replay(&mut self, handler: &mut dyn ContentHandler) -> Result<()> {
        handler.start_document();

        // explicit stack: deeply nested markup must not overflow the call stack
        let mut stack: Vec<Step<'_>> = self
            .document
            .root()
            .children()
            .into_iter()
            .rev()
            .map(Step::Enter)
            .collect();

        while let Some(step) = stack.pop() {
            match step {
                Step::Leave(name) => handler.end_element(&name),
                Step::Enter(node) if node.is_element() => {
                    let Some(name) = node.node_name() else {
                        continue;
                    };
                    let name = name.to_ascii_lowercase();
                    let attributes: Vec<(String, String)> = node
                        .attrs()
                        .iter()
                        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                        .collect();

                    handler.start_element(&name, &attributes);
                    stack.push(Step::Leave(name));
                    stack.extend(node.children().into_iter().rev().map(Step::Enter));
                }
                Step::Enter(node) if node.is_text() => handler.characters(&node.text()),
                Step::Enter(_) => {}
            }
        }

        handler.end_document();
        Ok(())
    }
}
