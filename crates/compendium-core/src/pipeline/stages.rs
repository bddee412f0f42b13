//! Built-in stages of the catalog ingest pipeline.
//!
//! Included stages:
//! - [`NormalizeStage`]: JSON value -> normalized node tree
//! - [`ValidateStage`]: schema walk against [`crate::schema::ROOT`]
//! - [`BuildRootStage`]: typed root + integrity checks

use crate::document::{normalize, Node};
use crate::errors::{CompendiumError, CompendiumResult, ValidationError};
use crate::model::{Root, RootRecord};
use crate::pipeline::integrity::check_integrity;
use crate::pipeline::{PipelineContext, PipelineData, Stage};
use crate::schema::{validate_document, ValidationContext, ROOT};

fn unexpected(stage: &str, expected: &str, got: &PipelineData) -> CompendiumError {
    CompendiumError::invariant(format!(
        "stage {stage} expected {expected} input, got {}",
        got.kind()
    ))
}

/// Stage: turn keyed-collection objects into mappings.
pub struct NormalizeStage {
    id: String,
}

impl NormalizeStage {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Stage for NormalizeStage {
    fn id(&self) -> &str {
        &self.id
    }

    fn run(&self, ctx: &mut PipelineContext, input: PipelineData) -> CompendiumResult<PipelineData> {
        match input {
            PipelineData::Json(v) => {
                let node = normalize(v);
                let boards = node
                    .as_record()
                    .and_then(|r| r.get("sbc"))
                    .and_then(Node::as_mapping)
                    .map_or(0, |m| m.len());
                ctx.push_info("document.normalized", format!("{boards} boards normalized"));
                Ok(PipelineData::Node(node))
            }
            other => Err(unexpected(&self.id, "json", &other)),
        }
    }
}

/// Stage: validate the normalized tree against the root schema.
pub struct ValidateStage {
    id: String,
}

impl ValidateStage {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Stage for ValidateStage {
    fn id(&self) -> &str {
        &self.id
    }

    fn run(&self, ctx: &mut PipelineContext, input: PipelineData) -> CompendiumResult<PipelineData> {
        let node = match input {
            PipelineData::Node(node) => node,
            other => return Err(unexpected(&self.id, "node", &other)),
        };

        let vctx = ValidationContext {
            origin: &ctx.config.origin,
        };
        match validate_document(&ROOT, node, &vctx) {
            Ok(clean) => {
                ctx.push_info("document.validated", "document matches the catalog schema");
                Ok(PipelineData::Node(clean))
            }
            Err(e) => {
                ctx.push_error("document.invalid", e.to_string());
                Err(e.into())
            }
        }
    }
}

/// Stage: decode the validated tree into a [`Root`] and check cross-entry rules.
pub struct BuildRootStage {
    id: String,
}

impl BuildRootStage {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Stage for BuildRootStage {
    fn id(&self) -> &str {
        &self.id
    }

    fn run(&self, ctx: &mut PipelineContext, input: PipelineData) -> CompendiumResult<PipelineData> {
        let node = match input {
            PipelineData::Node(node) => node,
            other => return Err(unexpected(&self.id, "node", &other)),
        };

        let root = decode_root(node)?;
        check_integrity(&root, &ctx.config.validation)?;
        if !ctx.config.validation.check_references {
            ctx.push_warning(
                "integrity.references_unchecked",
                "manufacturer and CPU references were not checked",
            );
        }
        for (sbc_id, sbc) in root.sbcs() {
            if sbc.common_variant.is_none() && sbc.variants.len() > 1 {
                ctx.push_warning(
                    "document.no_common_variant",
                    format!("board '{sbc_id}' has {} variants and no _common", sbc.variants.len()),
                );
            }
        }

        ctx.push_info(
            "document.built",
            format!(
                "catalog built (cpu={}, soc={}, sbc={}, manufacturer={})",
                root.cpus().len(),
                root.socs().len(),
                root.sbcs().len(),
                root.manufacturers().len()
            ),
        );
        Ok(PipelineData::Root(Box::new(root)))
    }
}

/// Decode an already validated tree. A failure here means the schema
/// descriptors and the model types disagree.
fn decode_root(node: Node) -> CompendiumResult<Root> {
    serde_json::from_value::<RootRecord>(node.into_json())
        .map(Root::from)
        .map_err(|e| {
            ValidationError::structural("$", format!("validated document does not decode: {e}")).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DiagnosticLevel;
    use serde_json::json;

    #[test]
    fn normalize_rejects_wrong_input() {
        let st = NormalizeStage::new("document.normalize");
        let err = st
            .run(&mut PipelineContext::default(), PipelineData::None)
            .unwrap_err();
        assert_eq!(err.code(), "invariant");
    }

    #[test]
    fn validate_records_error_diagnostic() {
        let st = ValidateStage::new("document.validate");
        let mut ctx = PipelineContext::default();
        let node = normalize(json!({"manufacturer": {}}));
        assert!(st.run(&mut ctx, PipelineData::Node(node)).is_err());
        assert!(ctx.diagnostics.iter().any(|d| d.code == "document.invalid"));
    }

    fn minimal(variants: serde_json::Value) -> Node {
        let image = json!({"url": "https://e.com/p.png", "attribution": {"author": "a", "license": "l"}});
        normalize(json!({
            "cpu": {},
            "manufacturer": {"m": {"name": "M", "links": [], "logo": image}},
            "sbc": {"b": {"name": "B", "manufacturer": "m", "variants": variants, "picture": image}},
            "soc": {},
            "license": {},
            "author": {},
            "version": 1
        }))
    }

    fn build(ctx: &mut PipelineContext, node: Node) -> CompendiumResult<PipelineData> {
        let clean = ValidateStage::new("document.validate").run(ctx, PipelineData::Node(node))?;
        BuildRootStage::new("document.build").run(ctx, clean)
    }

    #[test]
    fn skipped_reference_checks_are_reported() {
        let mut ctx = PipelineContext::default();
        ctx.config.validation.check_references = false;
        let ram = json!({"capacity": 1, "type": "DDR4"});
        build(&mut ctx, minimal(json!({"1gb": {"ram": ram}}))).unwrap();

        let codes: Vec<_> = ctx
            .diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(codes, vec!["integrity.references_unchecked"]);
    }

    #[test]
    fn boards_without_common_variant_are_reported() {
        let mut ctx = PipelineContext::default();
        let ram = json!({"capacity": 1, "type": "DDR4"});
        build(&mut ctx, minimal(json!({"1gb": {"ram": ram}, "2gb": {"ram": ram}}))).unwrap();

        let warning = ctx
            .diagnostics
            .iter()
            .find(|d| d.level == DiagnosticLevel::Warning)
            .unwrap();
        assert_eq!(warning.code, "document.no_common_variant");
        assert!(warning.message.contains("'b'"));
    }
}
