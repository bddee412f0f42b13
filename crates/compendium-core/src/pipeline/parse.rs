//! Entry points of the validating parser.
//!
//! - [`parse_json_bytes`]: strict JSON decoding with a size limit
//! - [`parse`]: JSON value -> [`Root`]
//! - [`ingest`]: response body -> [`Root`]
//!
//! Parsing is atomic: either a complete `Root` is returned or the first
//! violation is. Parsing the same bytes twice yields equal roots.

use serde_json::Value;

use crate::config::{validate_config, CoreConfig};
use crate::errors::{CompendiumError, CompendiumResult};
use crate::model::Root;
use crate::pipeline::stages::{BuildRootStage, NormalizeStage, ValidateStage};
use crate::pipeline::{Pipeline, PipelineContext, PipelineData, PipelineReport};

/// Decode a response body into JSON, rejecting bodies over `max_bytes`.
pub fn parse_json_bytes(bytes: &[u8], max_bytes: usize) -> CompendiumResult<Value> {
    if bytes.len() > max_bytes {
        return Err(CompendiumError::malformed(format!(
            "JSON payload too large ({} bytes > limit {})",
            bytes.len(),
            max_bytes
        )));
    }

    serde_json::from_slice(bytes)
        .map_err(|e| CompendiumError::malformed(format!("failed to parse JSON: {e}")))
}

/// The standard normalize -> validate -> build pipeline.
pub fn catalog_pipeline() -> Pipeline {
    let mut p = Pipeline::new();
    p.push_stage(NormalizeStage::new("document.normalize"))
        .push_stage(ValidateStage::new("document.validate"))
        .push_stage(BuildRootStage::new("document.build"));
    p
}

/// Run the pipeline and keep its diagnostics.
///
/// On success the report's output is a [`Root`]; take it with
/// [`PipelineReport::require_root`] after inspecting the warnings.
pub fn parse_with_report(document: Value, config: &CoreConfig) -> CompendiumResult<PipelineReport> {
    validate_config(config)?;

    let ctx = PipelineContext::new(config.clone());
    let report = catalog_pipeline().run(ctx, PipelineData::Json(document))?;

    tracing::debug!(
        diagnostics = report.diagnostics.len(),
        warnings = report.warnings().count(),
        "catalog parsed"
    );
    Ok(report)
}

/// Parse a JSON document into a typed catalog.
pub fn parse(document: Value, config: &CoreConfig) -> CompendiumResult<Root> {
    parse_with_report(document, config)?.require_root()
}

/// Decode a fetched response body and run the pipeline, keeping diagnostics.
pub fn ingest_with_report(bytes: &[u8], config: &CoreConfig) -> CompendiumResult<PipelineReport> {
    let document = parse_json_bytes(bytes, config.limits.max_json_bytes)?;
    parse_with_report(document, config)
}

/// Decode and parse a fetched response body.
pub fn ingest(bytes: &[u8], config: &CoreConfig) -> CompendiumResult<Root> {
    ingest_with_report(bytes, config)?.require_root()
}
