//! Cross-entry checks run after the schema walk.
//!
//! Always enforced:
//! - every board has at least one named variant besides `_common`
//! - every named variant has RAM, itself or through the common variant
//!
//! Enforced when `check_references` is set:
//! - `soc.*.manufacturer` and `sbc.*.manufacturer` name an existing manufacturer
//! - `soc.*.cpus[*].id` names an existing CPU

use crate::config::ValidationConfig;
use crate::errors::ValidationError;
use crate::model::Root;

pub fn check_integrity(root: &Root, cfg: &ValidationConfig) -> Result<(), ValidationError> {
    check_variants(root)?;
    if cfg.check_references {
        check_references(root)?;
    }
    Ok(())
}

fn check_variants(root: &Root) -> Result<(), ValidationError> {
    for (sbc_id, sbc) in root.sbcs() {
        if sbc.variants.is_empty() {
            return Err(ValidationError::structural(
                format!("sbc.{sbc_id}.variants"),
                "board must declare at least one variant besides _common",
            ));
        }

        let common_ram = sbc
            .common_variant
            .as_ref()
            .and_then(|c| c.ram.as_ref())
            .is_some();
        for (name, variant) in &sbc.variants {
            if variant.ram.is_none() && !common_ram {
                return Err(ValidationError::structural(
                    format!("sbc.{sbc_id}.variants.{name}.ram"),
                    "variant has no RAM and its board has no common RAM",
                ));
            }
        }
    }
    Ok(())
}

fn check_references(root: &Root) -> Result<(), ValidationError> {
    let manufacturers = root.manufacturers();

    for (soc_id, soc) in root.socs() {
        if !manufacturers.contains_key(&soc.manufacturer) {
            return Err(ValidationError::structural(
                format!("soc.{soc_id}.manufacturer"),
                format!("unknown manufacturer '{}'", soc.manufacturer),
            ));
        }
        for (idx, cpu) in soc.cpus.iter().enumerate() {
            if !root.cpus().contains_key(&cpu.id) {
                return Err(ValidationError::structural(
                    format!("soc.{soc_id}.cpus[{idx}].id"),
                    format!("unknown cpu '{}'", cpu.id),
                ));
            }
        }
    }

    for (sbc_id, sbc) in root.sbcs() {
        if !manufacturers.contains_key(&sbc.manufacturer) {
            return Err(ValidationError::structural(
                format!("sbc.{sbc_id}.manufacturer"),
                format!("unknown manufacturer '{}'", sbc.manufacturer),
            ));
        }
    }

    Ok(())
}
