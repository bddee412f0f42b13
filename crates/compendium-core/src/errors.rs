//! Error types for compendium-core.
//!
//! Every fallible core operation returns [`CompendiumResult`]. Hosts (the CLI)
//! map these into user-visible messages; the core never displays anything.
//!
//! Taxonomy:
//! - `Fetch`: network failure or non-2xx response (raised by hosts)
//! - `MalformedResponse`: the body is not a JSON document
//! - `Validation`: the document does not match the catalog schema
//! - `NotFound`: a lookup references a catalog id absent from the graph
//! - `Invariant`: a guarantee of validation found false at read time (a defect)
//! - `InvalidArgument`: bad configuration or caller input

use std::fmt;

use thiserror::Error;

pub type CompendiumResult<T> = Result<T, CompendiumError>;

#[derive(Debug, Error)]
pub enum CompendiumError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown {kind} '{id}'")]
    NotFound { kind: &'static str, id: String },

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CompendiumError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Build an invariant violation and log it under its own target.
    pub fn invariant(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!(target: "invariant", "{msg}");
        Self::Invariant(msg)
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Stable short code, used by hosts for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Invariant(_) => "invariant",
            Self::InvalidArgument(_) => "invalid_argument",
        }
    }
}

/// A schema violation, located by the dotted path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed at '{path}': {kind}")]
pub struct ValidationError {
    pub path: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, ValidationErrorKind::Missing)
    }

    pub fn structural(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(path, ValidationErrorKind::Structural(msg.into()))
    }

    /// Last segment of the path, i.e. the field name itself.
    pub fn field(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    UnexpectedNull,
    InvalidUri(String),
    Structural(String),
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "required field is missing"),
            Self::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::UnexpectedNull => write!(f, "field must not be null"),
            Self::InvalidUri(e) => write!(f, "invalid URI: {e}"),
            Self::Structural(msg) => write!(f, "{msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field() {
        let e = ValidationError::missing("sbc.pi4.name");
        assert_eq!(e.field(), "name");
        assert!(e.to_string().contains("'sbc.pi4.name'"));
        assert!(e.to_string().contains("missing"));
    }

    #[test]
    fn codes_are_stable() {
        let e: CompendiumError = ValidationError::missing("cpu").into();
        assert_eq!(e.code(), "validation");
        assert_eq!(CompendiumError::not_found("manufacturer", "x").code(), "not_found");
        assert_eq!(
            CompendiumError::not_found("manufacturer", "x").to_string(),
            "unknown manufacturer 'x'"
        );
    }
}
