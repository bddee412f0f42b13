//! Declarative catalog schema.
//!
//! Every entity shape is a static [`RecordSchema`]: a list of [`FieldSpec`]s
//! carrying the field name, its [`FieldKind`], whether it is required, whether
//! `null` is accepted, and the default used when it is omitted.
//!
//! A single generic walker ([`validate::validate_document`]) checks a normalized
//! document against these descriptors. There is no per-entity validation code.

pub mod catalog;
pub mod validate;

pub use catalog::ROOT;
pub use validate::{validate_document, ValidationContext};

/// Shape of a record (an entity with named fields).
#[derive(Debug)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Expected type of a field value.
#[derive(Debug)]
pub enum FieldKind {
    String,
    /// Absolute URI.
    Uri,
    /// URI that may be relative to the serving origin when it starts with `/`.
    ImageUri,
    Number,
    Bool,
    Record(&'static RecordSchema),
    /// Ordered sequence.
    Array(&'static FieldKind),
    /// Keyed collection (catalog id -> value). Requires a normalized mapping.
    Mapping(&'static FieldKind),
}

impl FieldKind {
    pub fn expected(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Uri | Self::ImageUri => "URI string",
            Self::Number => "number",
            Self::Bool => "boolean",
            Self::Record(_) => "object",
            Self::Array(_) => "array",
            Self::Mapping(_) => "mapping",
        }
    }
}

/// Value substituted for an omitted optional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    EmptyArray,
}

/// One field of a record.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    pub default: Option<DefaultValue>,
}

impl FieldSpec {
    /// A required, non-nullable field.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
            default: None,
        }
    }

    /// An optional field that may be omitted or set to `null`.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: true,
            default: None,
        }
    }

    /// An optional, non-nullable field filled with `default` when omitted.
    pub const fn defaulted(name: &'static str, kind: FieldKind, default: DefaultValue) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: false,
            default: Some(default),
        }
    }
}
