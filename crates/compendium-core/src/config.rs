//! Configuration structures for compendium-core.
//!
//! These are explicit, serializable objects built by the host (CLI) and passed
//! into the pipeline. The core crate itself does not read environment variables.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{CompendiumError, CompendiumResult};

/// Default serving origin used to absolutize `/`-relative image URLs.
pub const DEFAULT_ORIGIN: &str = "http://localhost/";

/// Path of the data document relative to the serving origin.
pub const DATA_DOCUMENT_PATH: &str = "/resources/sbc-compendium/data/data.json";

/// Global configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Origin the document was served from.
    pub origin: Url,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            limits: LimitsConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl CoreConfig {
    /// Configuration for a document fetched from `document_url`.
    ///
    /// Only the origin of the URL is kept.
    pub fn for_document_url(document_url: &Url) -> CompendiumResult<Self> {
        let origin = origin_of(document_url)?;
        Ok(Self {
            origin,
            ..Self::default()
        })
    }
}

fn default_origin() -> Url {
    // DEFAULT_ORIGIN is a constant, well-formed URL.
    Url::parse(DEFAULT_ORIGIN).unwrap_or_else(|_| unreachable!("constant origin parses"))
}

/// Reduce a URL to `scheme://host[:port]/`. Credentials are dropped.
pub fn origin_of(url: &Url) -> CompendiumResult<Url> {
    let (scheme, host) = match url.host_str() {
        Some(host) if !url.cannot_be_a_base() => (url.scheme(), host),
        _ => {
            return Err(CompendiumError::invalid_argument(format!(
                "URL has no origin: {url}"
            )))
        }
    };
    let origin = match url.port() {
        Some(port) => format!("{scheme}://{host}:{port}/"),
        None => format!("{scheme}://{host}/"),
    };
    Url::parse(&origin)
        .map_err(|e| CompendiumError::invalid_argument(format!("invalid origin {origin}: {e}")))
}

/// Resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "LimitsConfig::default_max_json_bytes")]
    pub max_json_bytes: usize,
}

impl LimitsConfig {
    fn default_max_json_bytes() -> usize {
        16 * 1024 * 1024
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_json_bytes: Self::default_max_json_bytes(),
        }
    }
}

/// Validation toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Check that manufacturer and CPU references point at existing entries.
    #[serde(default = "ValidationConfig::default_check_references")]
    pub check_references: bool,
}

impl ValidationConfig {
    fn default_check_references() -> bool {
        true
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_references: Self::default_check_references(),
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CoreConfig) -> CompendiumResult<()> {
    if cfg.limits.max_json_bytes == 0 {
        return Err(CompendiumError::invalid_argument(
            "max_json_bytes must be greater than zero",
        ));
    }

    if cfg.origin.cannot_be_a_base() {
        return Err(CompendiumError::invalid_argument(
            "origin must be a base URL",
        ));
    }

    if !cfg.origin.username().is_empty() || cfg.origin.password().is_some() {
        return Err(CompendiumError::invalid_argument(
            "origin must not carry credentials",
        ));
    }

    Ok(())
}
