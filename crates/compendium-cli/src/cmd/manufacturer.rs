use anyhow::Result;
use compendium_core::prelude::*;

use crate::args::Cli;
use crate::io::input;
use crate::output;

pub async fn run(cli: &Cli, id: &str) -> Result<()> {
    let root = input::load_root(cli).await?;
    let projection = project_by_manufacturer(&root, id)?;

    if output::is_json() {
        return output::print_json(&projection);
    }

    output::status(true, projection.id, &projection.manufacturer.name)?;
    for link in &projection.manufacturer.links {
        output::field("link", format!("{} <{}>", link.title, link.url));
    }
    for (soc_id, soc) in &projection.socs {
        output::field("soc", format!("{soc_id} ({}, {} cores)", soc.name, soc.cpu_core_count()));
    }
    for (sbc_id, sbc) in &projection.sbcs {
        let variants: Vec<&str> = sbc.variants.keys().map(String::as_str).collect();
        output::field("sbc", format!("{sbc_id} ({}) [{}]", sbc.name, variants.join(", ")));
    }
    if projection.socs.is_empty() && projection.sbcs.is_empty() {
        output::field("entries", "none");
    }
    Ok(())
}
