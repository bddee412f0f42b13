//! Raw document representation.
//!
//! A fetched catalog document is plain JSON. Before validation it is turned
//! into a [`Node`] tree that distinguishes two kinds of JSON objects:
//! - `Record`: an entity with named fields (a link, an image, a CPU, ...)
//! - `Mapping`: a keyed collection of entities (catalog id -> entity)
//!
//! JSON cannot express this difference, so [`normalize`] decides which objects
//! are keyed collections. The validator then requires a `Mapping` wherever the
//! schema declares a keyed collection.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

pub mod assemble;
pub mod normalize;

pub use assemble::{Collection, DocumentBuilder};
pub use normalize::normalize;

/// A normalized JSON node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Node>),
    Record(IndexMap<String, Node>),
    Mapping(IndexMap<String, Node>),
}

impl Node {
    /// Convert a JSON value without reinterpreting any object: every object
    /// becomes a `Record`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from_json).collect()),
            Value::Object(obj) => Node::Record(
                obj.into_iter()
                    .map(|(k, v)| (k, Node::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert back to JSON. Records and mappings both become objects.
    pub fn into_json(self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Number(n) => Value::Number(n),
            Node::String(s) => Value::String(s),
            Node::Array(items) => Value::Array(items.into_iter().map(Node::into_json).collect()),
            Node::Record(fields) | Node::Mapping(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, v.into_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    /// Short type name used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Record(_) => "object",
            Node::Mapping(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_record(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Mapping(entries) => Some(entries),
            _ => None,
        }
    }
}
