use crate::error::{Result, ScanJsonError};

/// An owned XML element, detached from the parser's arena.
///
/// Attributes and children keep document order. `text` is the element's
/// leading text content (between the start tag and the first child
/// element), trimmed; whitespace-only content is dropped entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Parse an XML document and return its root element.
    ///
    /// Any well-formed document is accepted; there is no schema awareness.
    /// Malformed input surfaces the parser's own diagnostic as a
    /// `ParseFailure`.
    pub fn parse(xml: &str) -> Result<Element> {
        let document =
            roxmltree::Document::parse(xml).map_err(|e| ScanJsonError::ParseFailure {
                message: e.to_string(),
            })?;
        Ok(Self::from_node(document.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Element {
        let tag = node.tag_name().name().to_string();
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        let mut text = None;
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_node(child));
            } else if child.is_text() && children.is_empty() && text.is_none() {
                let trimmed = child.text().unwrap_or("").trim();
                if !trimmed.is_empty() {
                    text = Some(trimmed.to_string());
                }
            }
        }

        Element {
            tag,
            attributes,
            text,
            children,
        }
    }
}
