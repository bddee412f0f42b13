//! Raw document normalizer.
//!
//! Rules:
//! - every object-valued top-level field becomes a `Mapping`
//! - inside the `sbc` collection, every entry's `variants` object becomes a `Mapping`
//! - everything else is converted as-is (objects stay `Record`s)
//!
//! Arrays are never reinterpreted. A document without an `sbc` field is not an
//! error here; the validator reports what is missing.

use serde_json::Value;

use super::Node;

/// Field holding the SBC collection.
const SBC_FIELD: &str = "sbc";

/// Field of an SBC entry holding its variants.
const VARIANTS_FIELD: &str = "variants";

/// Normalize a parsed JSON document.
///
/// Non-object documents are converted unchanged; validation rejects them.
pub fn normalize(document: Value) -> Node {
    let fields = match document {
        Value::Object(fields) => fields,
        other => return Node::from_json(other),
    };

    let fields = fields
        .into_iter()
        .map(|(key, value)| {
            let node = match value {
                Value::Object(_) if key == SBC_FIELD => normalize_sbc_collection(value),
                Value::Object(_) => to_mapping(value),
                other => Node::from_json(other),
            };
            (key, node)
        })
        .collect();

    Node::Record(fields)
}

fn to_mapping(value: Value) -> Node {
    match Node::from_json(value) {
        Node::Record(entries) => Node::Mapping(entries),
        other => other,
    }
}

fn normalize_sbc_collection(value: Value) -> Node {
    let entries = match value {
        Value::Object(entries) => entries,
        other => return Node::from_json(other),
    };

    let entries = entries
        .into_iter()
        .map(|(id, entry)| {
            let node = match entry {
                Value::Object(sbc_fields) => Node::Record(
                    sbc_fields
                        .into_iter()
                        .map(|(k, v)| {
                            let n = if k == VARIANTS_FIELD && v.is_object() {
                                to_mapping(v)
                            } else {
                                Node::from_json(v)
                            };
                            (k, n)
                        })
                        .collect(),
                ),
                other => Node::from_json(other),
            };
            (id, node)
        })
        .collect();

    Node::Mapping(entries)
}
