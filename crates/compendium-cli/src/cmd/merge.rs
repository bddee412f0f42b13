use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use compendium_core::document::{Collection, DocumentBuilder};
use indicatif::ProgressBar;
use serde::Serialize;
use walkdir::WalkDir;

use crate::output;

#[derive(Debug, Serialize)]
pub struct MergeOut {
    pub output: String,
    pub version: i64,
    pub entries: usize,
}

/// Merge `<input>/<collection>/<id>.json` files into one document at `output`.
///
/// The version is also written next to the document as `<output>.version`.
pub fn run(input: &Path, output_path: &Path, version: Option<i64>) -> Result<()> {
    if !input.is_dir() {
        return Err(anyhow!("input directory does not exist: {}", input.display()));
    }

    let files = collect_files(input)?;
    let bar = ProgressBar::new(files.len() as u64);

    let mut builder = DocumentBuilder::new();
    for (collection, id, path) in &files {
        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_slice(&raw)
            .with_context(|| format!("invalid json in {}", path.display()))?;
        builder.insert(*collection, id.as_str(), value)?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    for collection in Collection::ALL {
        tracing::debug!(%collection, entries = builder.len(collection), "collection merged");
    }

    let version = version.unwrap_or_else(|| time::OffsetDateTime::now_utc().unix_timestamp());
    let doc = builder.build(version);

    fs::write(output_path, serde_json::to_vec(&doc)?)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    let mut version_path = output_path.as_os_str().to_owned();
    version_path.push(".version");
    fs::write(&version_path, version.to_string())?;

    tracing::info!(output = %output_path.display(), version, entries = files.len(), "catalog merged");

    let out = MergeOut {
        output: output_path.display().to_string(),
        version,
        entries: files.len(),
    };
    if output::is_json() {
        return output::print_json(&out);
    }
    output::status(true, "merged", &out.output)?;
    output::field("version", out.version);
    output::field("entries", out.entries);
    Ok(())
}

/// List entry files per collection, sorted by file name.
///
/// Missing collection directories and non-JSON files are skipped.
fn collect_files(input: &Path) -> Result<Vec<(Collection, String, std::path::PathBuf)>> {
    let mut files = Vec::new();
    for collection in Collection::ALL {
        let dir = input.join(collection.as_str());
        if !dir.is_dir() {
            tracing::warn!(%collection, dir = %dir.display(), "collection directory missing");
            continue;
        }

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                return Err(anyhow!("non UTF-8 file name: {}", path.display()));
            };
            files.push((collection, id.to_string(), path.to_path_buf()));
        }
    }
    Ok(files)
}
