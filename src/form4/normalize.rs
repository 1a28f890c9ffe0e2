use serde_json::{Map, Value};

use super::error::Form4Error;

/// Element names that are semantically list-valued in `ownershipDocument`.
/// SEC generators collapse single occurrences to bare elements; these are
/// always surfaced as sequences so extraction can assume uniform shapes.
const LIST_ELEMENTS: [&str; 9] = [
    "issuer",
    "reportingOwner",
    "nonDerivativeTransaction",
    "nonDerivativeHolding",
    "derivativeTransaction",
    "derivativeHolding",
    "footnote",
    "footnoteId",
    "ownerSignature",
];

/// Decode a raw filing byte stream to text. EDGAR documents are normally
/// UTF-8 but older submissions arrive in Windows-1252.
pub fn decode_document(bytes: &[u8]) -> Result<String, Form4Error> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }
    let (text, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
    if had_errors {
        return Err(Form4Error::MalformedDocument(
            "document is neither UTF-8 nor Windows-1252".to_string(),
        ));
    }
    Ok(text.into_owned())
}

/// Parse one `ownershipDocument` into a uniform tree.
///
/// Elements become objects keyed by child name, attributes become
/// `@`-prefixed keys, text-only elements become strings, and every
/// list-valued field is a sequence even when the source holds a single
/// occurrence. Self-closing and empty elements become `""`, distinct from
/// an absent key.
pub fn normalize_document(xml: &str) -> Result<Value, Form4Error> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| Form4Error::MalformedDocument(e.to_string()))?;
    let root = doc.root_element();
    if root.tag_name().name() != "ownershipDocument" {
        return Err(Form4Error::MalformedDocument(format!(
            "expected ownershipDocument root, found {}",
            root.tag_name().name()
        )));
    }
    Ok(element_to_value(root))
}

fn element_to_value(node: roxmltree::Node) -> Value {
    let children: Vec<_> = node.children().filter(|n| n.is_element()).collect();
    let text = element_text(node);

    if children.is_empty() {
        if node.attributes().next().is_none() {
            return Value::String(text);
        }
        let mut map = Map::new();
        insert_attributes(&mut map, node);
        if !text.is_empty() {
            map.insert("#text".to_string(), Value::String(text));
        }
        return Value::Object(map);
    }

    let mut map = Map::new();
    insert_attributes(&mut map, node);
    for child in children {
        let name = child.tag_name().name().to_string();
        let value = element_to_value(child);
        match map.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(name, value);
            }
        }
    }

    for name in LIST_ELEMENTS {
        if let Some(v) = map.get_mut(name) {
            if !v.is_array() {
                let single = v.take();
                *v = Value::Array(vec![single]);
            }
        }
    }

    Value::Object(map)
}

fn insert_attributes(map: &mut Map<String, Value>, node: roxmltree::Node) {
    for attr in node.attributes() {
        map.insert(
            format!("@{}", attr.name()),
            Value::String(attr.value().to_string()),
        );
    }
}

fn element_text(node: roxmltree::Node) -> String {
    node.children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}
