//! Ingest pipeline for catalog documents.
//!
//! A fetched document goes through an ordered list of stages:
//! - `document.normalize`: JSON value -> normalized [`Node`] tree
//! - `document.validate`: schema walk, defaults, URI resolution
//! - `document.build`: typed [`Root`] plus integrity checks
//!
//! This module defines:
//! - `Pipeline` and `Stage` traits
//! - `PipelineContext` (configuration and diagnostics)
//! - `PipelineReport` (output + diagnostics)
//!
//! The core crate does not do network or filesystem I/O. Hosts fetch the bytes
//! and hand them to [`parse::ingest`].

use serde_json::Value;

use crate::config::CoreConfig;
use crate::document::Node;
use crate::errors::{CompendiumError, CompendiumResult};
use crate::model::Root;

pub mod integrity;
pub mod parse;
pub mod stages;

pub use parse::{catalog_pipeline, ingest, ingest_with_report, parse, parse_json_bytes, parse_with_report};

/// A stable identifier for a pipeline stage, dot-delimited (`document.validate`).
pub type StageId = String;

/// A structured diagnostic emitted by pipeline stages.
#[derive(Debug, Clone)]
pub struct PipelineDiagnostic {
    pub level: DiagnosticLevel,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

/// Pipeline context shared by all stages.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    pub config: CoreConfig,

    /// Collected diagnostics.
    pub diagnostics: Vec<PipelineDiagnostic>,
}

impl PipelineContext {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            diagnostics: Vec::new(),
        }
    }

    pub fn push_info(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticLevel::Info, code, message);
    }

    pub fn push_warning(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticLevel::Warning, code, message);
    }

    pub fn push_error(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticLevel::Error, code, message);
    }

    fn push(&mut self, level: DiagnosticLevel, code: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(PipelineDiagnostic {
            level,
            code: code.into(),
            message: message.into(),
        });
    }
}

/// A stage input/output carrier.
#[derive(Debug, Clone)]
pub enum PipelineData {
    None,

    /// Parsed but unchecked JSON document.
    Json(Value),

    /// Normalized (and, after validation, cleaned) document tree.
    Node(Node),

    /// The typed catalog.
    Root(Box<Root>),
}

impl PipelineData {
    fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json(_) => "json",
            Self::Node(_) => "node",
            Self::Root(_) => "root",
        }
    }
}

/// A pipeline stage. Stages are pure: no I/O, no clock, no environment.
pub trait Stage {
    fn id(&self) -> &str;
    fn run(&self, ctx: &mut PipelineContext, input: PipelineData) -> CompendiumResult<PipelineData>;
}

/// A pipeline is an ordered list of stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage + Send + Sync>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn push_stage<S: Stage + Send + Sync + 'static>(&mut self, s: S) -> &mut Self {
        self.stages.push(Box::new(s));
        self
    }

    pub fn stages(&self) -> usize {
        self.stages.len()
    }

    /// Run the pipeline. The first failing stage aborts the run.
    pub fn run(&self, mut ctx: PipelineContext, input: PipelineData) -> CompendiumResult<PipelineReport> {
        let mut data = input;

        for st in &self.stages {
            tracing::debug!(stage = st.id(), input = data.kind(), "stage start");
            data = st.run(&mut ctx, data)?;
            ctx.push_info("pipeline.stage.end", format!("completed stage {}", st.id()));
        }

        Ok(PipelineReport {
            output: data,
            diagnostics: ctx.diagnostics,
        })
    }
}

/// Pipeline run result.
#[derive(Debug)]
pub struct PipelineReport {
    pub output: PipelineData,
    pub diagnostics: Vec<PipelineDiagnostic>,
}

impl PipelineReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &PipelineDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
    }

    pub fn require_root(self) -> CompendiumResult<Root> {
        match self.output {
            PipelineData::Root(root) => Ok(*root),
            other => Err(CompendiumError::invariant(format!(
                "expected root pipeline output, got {}",
                other.kind()
            ))),
        }
    }
}
