use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "sbc-compendium", version, about = "SBC compendium catalog tool")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// URL of the catalog document
    /// (default: http://localhost/resources/sbc-compendium/data/data.json).
    #[arg(long, global = true, conflicts_with = "file")]
    pub url: Option<String>,

    /// Read the catalog document from a local file instead of fetching it.
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Do not check manufacturer and CPU references between entries.
    #[arg(long, global = true)]
    pub no_reference_checks: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load and validate the catalog, then print a summary.
    Check,

    /// Show a manufacturer and the SoCs and boards it makes.
    Manufacturer {
        id: String,
    },

    /// Show a board variant with the common variant's values applied.
    Variant {
        sbc: String,
        name: String,
    },

    /// Merge per-entity JSON files into a single catalog document.
    Merge {
        /// Directory holding one sub-directory per collection.
        input: PathBuf,

        /// Output document path.
        output: PathBuf,

        /// Document version (default: current unix time).
        #[arg(long)]
        version: Option<i64>,
    },
}
