//! Generic schema walker.
//!
//! Consumes a normalized [`Node`] and returns a cleaned node in which:
//! - undeclared record fields are dropped
//! - omitted or `null` optional fields are removed, or filled with their default
//! - image URIs starting with `/` are made absolute against the serving origin
//!
//! Validation is fail-fast: the first violation aborts the walk and is reported
//! with the dotted path of the offending field (`sbc.pi4.variants.4gb.ram`).

use indexmap::IndexMap;
use url::Url;

use super::{DefaultValue, FieldKind, FieldSpec, RecordSchema};
use crate::document::Node;
use crate::errors::{ValidationError, ValidationErrorKind};

/// Inputs the walker needs besides the document itself.
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    /// Origin used to absolutize `/`-relative image URIs.
    pub origin: &'a Url,
}

/// Validate a normalized document against a root record schema.
pub fn validate_document(
    schema: &RecordSchema,
    document: Node,
    ctx: &ValidationContext<'_>,
) -> Result<Node, ValidationError> {
    validate_record(schema, document, "", ctx)
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn wrong_type(path: &str, expected: &'static str, found: &Node) -> ValidationError {
    ValidationError::new(
        if path.is_empty() { "$" } else { path },
        ValidationErrorKind::WrongType {
            expected,
            found: found.type_name(),
        },
    )
}

fn validate_record(
    schema: &RecordSchema,
    node: Node,
    path: &str,
    ctx: &ValidationContext<'_>,
) -> Result<Node, ValidationError> {
    let mut fields = match node {
        Node::Record(fields) => fields,
        other => return Err(wrong_type(path, "object", &other)),
    };

    let mut out = IndexMap::with_capacity(schema.fields.len());
    for spec in schema.fields {
        let field_path = child_path(path, spec.name);
        if let Some(value) = validate_field(spec, fields.swap_remove(spec.name), &field_path, ctx)? {
            out.insert(spec.name.to_string(), value);
        }
    }

    Ok(Node::Record(out))
}

/// Validate one record field. `Ok(None)` means the field is absent from the output.
fn validate_field(
    spec: &FieldSpec,
    value: Option<Node>,
    path: &str,
    ctx: &ValidationContext<'_>,
) -> Result<Option<Node>, ValidationError> {
    match value {
        None if spec.required => Err(ValidationError::missing(path)),
        Some(Node::Null) if !spec.nullable => {
            Err(ValidationError::new(path, ValidationErrorKind::UnexpectedNull))
        }
        None | Some(Node::Null) => Ok(spec.default.map(default_node)),
        Some(v) => validate_value(&spec.kind, v, path, ctx).map(Some),
    }
}

fn default_node(default: DefaultValue) -> Node {
    match default {
        DefaultValue::Bool(b) => Node::Bool(b),
        DefaultValue::EmptyArray => Node::Array(Vec::new()),
    }
}

fn validate_value(
    kind: &FieldKind,
    node: Node,
    path: &str,
    ctx: &ValidationContext<'_>,
) -> Result<Node, ValidationError> {
    match (kind, node) {
        (FieldKind::String, n @ Node::String(_)) => Ok(n),
        (FieldKind::Number, n @ Node::Number(_)) => Ok(n),
        (FieldKind::Bool, n @ Node::Bool(_)) => Ok(n),
        (FieldKind::Uri, Node::String(s)) => parse_uri(&s, path).map(|_| Node::String(s)),
        (FieldKind::ImageUri, Node::String(s)) => {
            resolve_image_uri(&s, ctx.origin, path).map(|u| Node::String(u.into()))
        }
        (FieldKind::Record(schema), n) => validate_record(schema, n, path, ctx),
        (FieldKind::Array(item), Node::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(idx, it)| validate_value(item, it, &format!("{path}[{idx}]"), ctx))
            .collect::<Result<Vec<_>, _>>()
            .map(Node::Array),
        (FieldKind::Mapping(item), Node::Mapping(entries)) => {
            let mut out = IndexMap::with_capacity(entries.len());
            for (key, it) in entries {
                if key.trim().is_empty() {
                    return Err(ValidationError::structural(path, "catalog id must not be empty"));
                }
                let value = validate_value(item, it, &child_path(path, &key), ctx)?;
                out.insert(key, value);
            }
            Ok(Node::Mapping(out))
        }
        (kind, other) => Err(wrong_type(path, kind.expected(), &other)),
    }
}

fn parse_uri(s: &str, path: &str) -> Result<Url, ValidationError> {
    Url::parse(s)
        .map_err(|e| ValidationError::new(path, ValidationErrorKind::InvalidUri(format!("{e}: {s}"))))
}

fn resolve_image_uri(s: &str, origin: &Url, path: &str) -> Result<Url, ValidationError> {
    if s.starts_with('/') {
        return origin.join(s).map_err(|e| {
            ValidationError::new(path, ValidationErrorKind::InvalidUri(format!("{e}: {s}")))
        });
    }
    parse_uri(s, path)
}
