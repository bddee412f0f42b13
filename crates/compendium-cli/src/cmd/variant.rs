use anyhow::Result;
use compendium_core::prelude::*;
use compendium_core::units::{format_bytes, FormattedSize};
use serde::Serialize;

use crate::args::Cli;
use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct RamOut {
    pub capacity: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: FormattedSize,
}

#[derive(Debug, Serialize)]
pub struct VariantOut<'a> {
    pub sbc: &'a str,
    pub variant: &'a str,
    pub inherits_common: bool,
    pub ram: RamOut,
    pub links: Vec<&'a Link>,
    pub remarks: Vec<&'a str>,
    pub pictures: Vec<&'a Image>,
}

pub async fn run(cli: &Cli, sbc: &str, name: &str) -> Result<()> {
    let root = input::load_root(cli).await?;
    let eff = root.variant(sbc, name)?;

    let ram = eff.ram()?;
    let out = VariantOut {
        sbc,
        variant: name,
        inherits_common: eff.common().is_some(),
        ram: RamOut {
            capacity: ram.capacity,
            kind: ram.kind.clone(),
            size: format_bytes(ram.capacity, 2),
        },
        links: eff.links(),
        remarks: eff.remarks(),
        pictures: eff.pictures(),
    };

    if output::is_json() {
        return output::print_json(&out);
    }

    output::status(true, &format!("{sbc}/{name}"), &root.sbcs()[sbc].name)?;
    output::field("ram", format!("{} {} ({})", out.ram.size.binary, out.ram.kind, out.ram.size.si));
    for link in &out.links {
        output::field("link", format!("{} <{}>", link.title, link.url));
    }
    for remark in &out.remarks {
        output::field("remark", remark);
    }
    for picture in &out.pictures {
        output::field("picture", &picture.url);
    }
    Ok(())
}
