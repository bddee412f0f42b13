//! Manufacturer projection: one manufacturer and everything it makes.

use indexmap::IndexMap;
use serde::Serialize;

use crate::errors::{CompendiumError, CompendiumResult};
use crate::model::{Cpu, Manufacturer, Root, Sbc, Soc};

/// Read-only view over the entries of a single manufacturer, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct ManufacturerProjection<'a> {
    pub id: &'a str,
    pub manufacturer: &'a Manufacturer,
    /// Always empty: CPUs carry no manufacturer in the catalog data.
    pub cpus: IndexMap<&'a str, &'a Cpu>,
    pub socs: IndexMap<&'a str, &'a Soc>,
    pub sbcs: IndexMap<&'a str, &'a Sbc>,
}

/// Select `manufacturer_id` and every SoC and board whose `manufacturer` field equals it.
pub fn project_by_manufacturer<'a>(
    root: &'a Root,
    manufacturer_id: &str,
) -> CompendiumResult<ManufacturerProjection<'a>> {
    let (id, manufacturer) = root
        .manufacturers()
        .get_key_value(manufacturer_id)
        .ok_or_else(|| CompendiumError::not_found("manufacturer", manufacturer_id))?;

    // TODO: filter CPUs once the catalog records a designer id on each CPU.
    let cpus = IndexMap::new();

    let socs = root
        .socs()
        .iter()
        .filter(|(_, soc)| soc.manufacturer == manufacturer_id)
        .map(|(k, v)| (k.as_str(), v))
        .collect();

    let sbcs = root
        .sbcs()
        .iter()
        .filter(|(_, sbc)| sbc.manufacturer == manufacturer_id)
        .map(|(k, v)| (k.as_str(), v))
        .collect();

    Ok(ManufacturerProjection {
        id: id.as_str(),
        manufacturer,
        cpus,
        socs,
        sbcs,
    })
}

impl<'a> ManufacturerProjection<'a> {
    pub fn is_empty(&self) -> bool {
        self.cpus.is_empty() && self.socs.is_empty() && self.sbcs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn unknown_manufacturer_on_blank_root() {
        let root = Root::blank();
        let err = project_by_manufacturer(&root, "raspberry").unwrap_err();
        assert_matches!(err, CompendiumError::NotFound { kind: "manufacturer", .. });
    }
}
