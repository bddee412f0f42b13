use anyhow::Result;

use crate::args::{Cli, Command};

mod check;
mod manufacturer;
mod merge;
mod variant;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Check => check::run(&cli).await,
        Command::Manufacturer { id } => manufacturer::run(&cli, id).await,
        Command::Variant { sbc, name } => variant::run(&cli, sbc, name).await,
        Command::Merge { input, output, version } => merge::run(input, output, *version),
    }
}
