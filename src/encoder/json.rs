use crate::encoder::dom::Element;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// JSON-compatible encoding of one XML element.
///
/// Serializes as an object with up to three reserved keys, each omitted
/// when empty: `@attributes`, `@text`, `@children`. An element with no
/// attributes, text, or children serializes to `{}`. Key order is
/// insertion order, so output is byte-for-byte deterministic for a given
/// input tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedValue {
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<(String, ChildValue)>,
}

/// Value slot under `@children` for one tag name.
///
/// A tag seen once stays `Single`; a second occurrence promotes the slot
/// to `Many`, appending in encounter order. The distinction is part of the
/// wire contract: one child serializes as an object, several as an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildValue {
    Single(Box<EncodedValue>),
    Many(Vec<EncodedValue>),
}

impl ChildValue {
    fn push(&mut self, value: EncodedValue) {
        match self {
            ChildValue::Single(existing) => {
                let first = std::mem::take(existing.as_mut());
                *self = ChildValue::Many(vec![first, value]);
            }
            ChildValue::Many(values) => values.push(value),
        }
    }

    /// The encoded values in this slot, in encounter order.
    pub fn values(&self) -> Vec<&EncodedValue> {
        match self {
            ChildValue::Single(value) => vec![value.as_ref()],
            ChildValue::Many(values) => values.iter().collect(),
        }
    }
}

/// Encode an element into its JSON-compatible representation.
///
/// Depth-first, post-order. The element's own tag name is not stored; it
/// becomes the key under the parent's `@children`, and the document root's
/// tag is supplied by [`EncodedDocument`]. Cannot fail on a parsed tree.
pub fn encode(element: &Element) -> EncodedValue {
    let mut children: Vec<(String, ChildValue)> = Vec::new();
    for child in &element.children {
        let encoded = encode(child);
        match children.iter_mut().find(|(tag, _)| tag == &child.tag) {
            Some((_, slot)) => slot.push(encoded),
            None => children.push((child.tag.clone(), ChildValue::Single(Box::new(encoded)))),
        }
    }

    EncodedValue {
        attributes: element.attributes.clone(),
        text: element.text.clone(),
        children,
    }
}

/// Reconstruct an element tree from an encoded value.
///
/// The tag name comes from key context, mirroring how it was dropped
/// during encoding. Attributes, text, and the relative order of same-tag
/// siblings are restored exactly; siblings of different tags come back
/// grouped by first appearance, which is all JSON object semantics can
/// carry.
pub fn decode(tag: &str, value: &EncodedValue) -> Element {
    let mut element = Element::new(tag);
    element.attributes = value.attributes.clone();
    element.text = value.text.clone();
    for (child_tag, slot) in &value.children {
        for child_value in slot.values() {
            element.children.push(decode(child_tag, child_value));
        }
    }
    element
}

/// A root element together with its tag name, ready for persistence as
/// `{ "<root_tag>": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument {
    pub root_tag: String,
    pub value: EncodedValue,
}

impl EncodedDocument {
    pub fn from_root(root: &Element) -> Self {
        Self {
            root_tag: root.tag.clone(),
            value: encode(root),
        }
    }
}

impl Serialize for EncodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = usize::from(!self.attributes.is_empty())
            + usize::from(self.text.is_some())
            + usize::from(!self.children.is_empty());
        let mut map = serializer.serialize_map(Some(entries))?;
        if !self.attributes.is_empty() {
            map.serialize_entry("@attributes", &OrderedMap(&self.attributes))?;
        }
        if let Some(ref text) = self.text {
            map.serialize_entry("@text", text)?;
        }
        if !self.children.is_empty() {
            map.serialize_entry("@children", &OrderedMap(&self.children))?;
        }
        map.end()
    }
}

impl Serialize for ChildValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChildValue::Single(value) => value.serialize(serializer),
            ChildValue::Many(values) => values.serialize(serializer),
        }
    }
}

impl Serialize for EncodedDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.root_tag, &self.value)?;
        map.end()
    }
}

/// Serializes a slice of pairs as a JSON object in slice order.
struct OrderedMap<'a, V>(&'a [(String, V)]);

impl<V: Serialize> Serialize for OrderedMap<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_str(xml: &str) -> String {
        let root = Element::parse(xml).unwrap();
        serde_json::to_string(&encode(&root)).unwrap()
    }

    #[test]
    fn test_empty_element_encodes_to_empty_object() {
        assert_eq!(encode_str("<x/>"), "{}");
    }

    #[test]
    fn test_whitespace_only_element_encodes_to_empty_object() {
        assert_eq!(encode_str("<x>   \n </x>"), "{}");
    }

    #[test]
    fn test_empty_node_identity() {
        assert_eq!(
            encode_str(r#"<x a="1"><y/></x>"#),
            r#"{"@attributes":{"a":"1"},"@children":{"y":{}}}"#
        );
    }

    #[test]
    fn test_single_child_stays_single() {
        let root = Element::parse("<ports><port portid=\"22\"/></ports>").unwrap();
        let encoded = encode(&root);
        assert!(matches!(encoded.children[0].1, ChildValue::Single(_)));
    }

    #[test]
    fn test_duplicate_tag_promotion() {
        let root = Element::parse(
            "<ports><port portid=\"22\"/><port portid=\"80\"/><port portid=\"443\"/></ports>",
        )
        .unwrap();
        let encoded = encode(&root);
        assert_eq!(encoded.children.len(), 1);
        match &encoded.children[0].1 {
            ChildValue::Many(values) => {
                assert_eq!(values.len(), 3);
                assert_eq!(values[0].attributes[0].1, "22");
                assert_eq!(values[1].attributes[0].1, "80");
                assert_eq!(values[2].attributes[0].1, "443");
            }
            ChildValue::Single(_) => panic!("expected Many after promotion"),
        }
    }

    #[test]
    fn test_text_and_attributes_serialized_in_order() {
        assert_eq!(
            encode_str(r#"<service name="ssh" product="OpenSSH">banner</service>"#),
            r#"{"@attributes":{"name":"ssh","product":"OpenSSH"},"@text":"banner"}"#
        );
    }

    #[test]
    fn test_document_wraps_root_tag() {
        let root = Element::parse("<nmaprun scanner=\"nmap\"/>").unwrap();
        let document = EncodedDocument::from_root(&root);
        assert_eq!(
            serde_json::to_string(&document).unwrap(),
            r#"{"nmaprun":{"@attributes":{"scanner":"nmap"}}}"#
        );
    }

    #[test]
    fn test_round_trip_structural_fidelity() {
        let xml = r#"<nmaprun scanner="nmap" version="7.94">
            <host starttime="1">
                <address addr="10.0.0.1" addrtype="ipv4"/>
                <ports>
                    <port protocol="tcp" portid="22"><state state="open"/></port>
                    <port protocol="tcp" portid="80"><state state="open"/></port>
                </ports>
                <hostnames><hostname name="gateway">router</hostname></hostnames>
            </host>
        </nmaprun>"#;
        let root = Element::parse(xml).unwrap();
        let decoded = decode(&root.tag, &encode(&root));
        assert_eq!(decoded, root);
    }

    #[test]
    fn test_decode_groups_by_first_seen_tag() {
        // Cross-tag interleaving is not representable in a JSON object, so
        // decode returns siblings grouped by tag; same-tag order survives.
        let root = Element::parse(r#"<r><a n="1"/><b/><a n="2"/></r>"#).unwrap();
        let decoded = decode(&root.tag, &encode(&root));
        let tags: Vec<&str> = decoded.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "a", "b"]);
        assert_eq!(decoded.children[0].attributes[0].1, "1");
        assert_eq!(decoded.children[1].attributes[0].1, "2");
    }

    #[test]
    fn test_pretty_output_is_deterministic() {
        let xml = r#"<host><status state="up"/><address addr="10.0.0.1"/></host>"#;
        let first = serde_json::to_string_pretty(&encode(&Element::parse(xml).unwrap())).unwrap();
        let second = serde_json::to_string_pretty(&encode(&Element::parse(xml).unwrap())).unwrap();
        assert_eq!(first, second);
        // Keys appear in document order, not alphabetical order.
        let status = first.find("status").unwrap();
        let address = first.find("address").unwrap();
        assert!(status < address);
    }
}
