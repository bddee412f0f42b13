use anyhow::Result;
use compendium_core::prelude::*;
use serde::Serialize;

use crate::args::Cli;
use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct Counts {
    pub authors: usize,
    pub manufacturers: usize,
    pub cpus: usize,
    pub socs: usize,
    pub sbcs: usize,
    pub variants: usize,
    pub licenses: usize,
}

impl Counts {
    fn of(root: &Root) -> Self {
        Self {
            authors: root.authors().len(),
            manufacturers: root.manufacturers().len(),
            cpus: root.cpus().len(),
            socs: root.socs().len(),
            sbcs: root.sbcs().len(),
            variants: root.sbcs().values().map(|s| s.variants.len()).sum(),
            licenses: root.licenses().len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckOut {
    pub ok: bool,
    pub screen: ScreenId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Counts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let mut screens = ScreenRegistry::with_all_screens();
    screens.change_screen(ScreenId::Loading)?;

    let root = match input::load_root(cli).await {
        Ok(root) => root,
        Err(err) => {
            tracing::error!(error = %err, "catalog failed to load");
            screens.crash(format!("{err:#}"))?;
            render(&CheckOut {
                ok: false,
                screen: ScreenId::Crash,
                version: None,
                counts: None,
                error: screens.crash_message().map(str::to_string),
            })?;
            return Err(err);
        }
    };

    let transition = screens.change_screen(ScreenId::Home)?;
    render(&CheckOut {
        ok: true,
        screen: transition.shown,
        version: Some(root.version()),
        counts: Some(Counts::of(&root)),
        error: None,
    })
}

fn render(out: &CheckOut) -> Result<()> {
    if output::is_json() {
        return output::print_json(out);
    }

    if let Some(err) = &out.error {
        return output::status(false, "invalid", err);
    }

    output::status(true, "ok", "catalog is valid")?;
    if let Some(version) = out.version {
        output::field("version", version);
    }
    if let Some(c) = &out.counts {
        output::field("authors", c.authors);
        output::field("manufacturers", c.manufacturers);
        output::field("cpus", c.cpus);
        output::field("socs", c.socs);
        output::field("sbcs", c.sbcs);
        output::field("variants", c.variants);
        output::field("licenses", c.licenses);
    }
    Ok(())
}
