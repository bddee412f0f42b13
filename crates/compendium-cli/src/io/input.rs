use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use compendium_core::config::{CoreConfig, DATA_DOCUMENT_PATH, DEFAULT_ORIGIN};
use compendium_core::pipeline::ingest_with_report;
use compendium_core::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

use crate::args::Cli;

/// Where the catalog document comes from.
#[derive(Debug, Clone)]
pub enum Source {
    Url(Url),
    File(PathBuf),
}

impl Source {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if let Some(path) = &cli.file {
            return Ok(Self::File(path.clone()));
        }
        let url = match &cli.url {
            Some(raw) => Url::parse(raw).with_context(|| format!("invalid --url: {raw}"))?,
            None => default_document_url()?,
        };
        Ok(Self::Url(url))
    }
}

pub fn default_document_url() -> Result<Url> {
    let origin = Url::parse(DEFAULT_ORIGIN)?;
    Ok(origin.join(DATA_DOCUMENT_PATH)?)
}

/// Fetch or read the document and run it through the ingest pipeline.
///
/// Image URLs are absolutized against the origin of the fetched URL; local
/// files use the default origin.
pub async fn load_root(cli: &Cli) -> Result<Root> {
    let source = Source::from_cli(cli)?;
    let (bytes, mut config) = match &source {
        Source::Url(url) => (fetch_document(url).await?, CoreConfig::for_document_url(url)?),
        Source::File(path) => (read_file(path)?, CoreConfig::default()),
    };
    config.validation.check_references = !cli.no_reference_checks;

    let report = ingest_with_report(&bytes, &config)?;
    for warning in report.warnings() {
        tracing::warn!(code = %warning.code, "{}", warning.message);
    }
    let root = report.require_root()?;
    tracing::info!(
        version = root.version(),
        sbcs = root.sbcs().len(),
        "catalog loaded"
    );
    Ok(root)
}

/// GET the document. Non-2xx statuses fail with the status text.
pub async fn fetch_document(url: &Url) -> CompendiumResult<Vec<u8>> {
    tracing::debug!(%url, "fetching catalog");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("fetching {url}"));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = fetch_bytes(url).await;
    spinner.finish_and_clear();
    result
}

async fn fetch_bytes(url: &Url) -> CompendiumResult<Vec<u8>> {
    let resp = reqwest::get(url.clone())
        .await
        .map_err(|e| CompendiumError::fetch(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(CompendiumError::fetch(status.to_string()));
    }

    let body = resp
        .bytes()
        .await
        .map_err(|e| CompendiumError::fetch(e.to_string()))?;
    Ok(body.to_vec())
}

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    tracing::debug!(path = %path.display(), "reading catalog");
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_points_at_data_document() {
        assert_eq!(
            default_document_url().unwrap().as_str(),
            "http://localhost/resources/sbc-compendium/data/data.json"
        );
    }
}
