//! Variant resolution.
//!
//! A board may declare a `_common` variant. Its links, remarks and pictures are
//! appended to every named sibling's own values, and its RAM is used when a
//! sibling declares none. Resolution happens at read time; neither variant is
//! modified. There are exactly two tiers: a named variant and, optionally, the
//! common variant.

use crate::errors::{CompendiumError, CompendiumResult};
use crate::model::{Image, Link, Root, Sbc, SbcVariant, SbcVariantRam, COMMON_SBC_VARIANT_KEY};

/// A variant paired with the common variant it falls back to.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveVariant<'a> {
    variant: &'a SbcVariant,
    common: Option<&'a SbcVariant>,
}

impl<'a> EffectiveVariant<'a> {
    pub fn new(variant: &'a SbcVariant, common: Option<&'a SbcVariant>) -> Self {
        Self { variant, common }
    }

    /// The variant's own fields.
    pub fn own(&self) -> &'a SbcVariant {
        self.variant
    }

    pub fn common(&self) -> Option<&'a SbcVariant> {
        self.common
    }

    /// Own links, then the common variant's. Duplicates are kept.
    pub fn links(&self) -> Vec<&'a Link> {
        self.chain(|v| &v.links)
    }

    /// Own remarks, then the common variant's.
    pub fn remarks(&self) -> Vec<&'a str> {
        self.chain(|v| &v.remarks)
            .into_iter()
            .map(String::as_str)
            .collect()
    }

    /// Own pictures, then the common variant's.
    pub fn pictures(&self) -> Vec<&'a Image> {
        self.chain(|v| &v.pictures)
    }

    /// Own RAM if declared, else the common variant's.
    ///
    /// Fails with an invariant violation when neither tier declares RAM; the
    /// parser rejects such documents, so this only happens for hand-built data.
    pub fn ram(&self) -> CompendiumResult<&'a SbcVariantRam> {
        if let Some(ram) = &self.variant.ram {
            return Ok(ram);
        }
        match self.common {
            Some(common) => EffectiveVariant::new(common, None).ram(),
            None => Err(CompendiumError::invariant(
                "variant chain declares no RAM at any level",
            )),
        }
    }

    fn chain<T>(&self, field: impl Fn(&'a SbcVariant) -> &'a Vec<T>) -> Vec<&'a T> {
        let mut out: Vec<&'a T> = field(self.variant).iter().collect();
        if let Some(common) = self.common {
            out.extend(field(common).iter());
        }
        out
    }
}

impl Sbc {
    /// Resolve a named variant of this board.
    ///
    /// `_common` is not a named variant and is never found here.
    pub fn effective_variant(&self, name: &str) -> Option<EffectiveVariant<'_>> {
        if name == COMMON_SBC_VARIANT_KEY {
            return None;
        }
        let variant = self.variants.get(name)?;
        Some(EffectiveVariant::new(variant, self.common_variant.as_ref()))
    }
}

impl Root {
    /// Pair a variant with the common variant its weak link points at.
    pub fn effective<'a>(&'a self, variant: &'a SbcVariant) -> EffectiveVariant<'a> {
        EffectiveVariant::new(variant, self.common_variant_of(variant))
    }

    /// Look up `sbc_id` / `variant_name` and resolve it.
    pub fn variant(&self, sbc_id: &str, variant_name: &str) -> CompendiumResult<EffectiveVariant<'_>> {
        let sbc = self
            .sbcs()
            .get(sbc_id)
            .ok_or_else(|| CompendiumError::not_found("sbc", sbc_id))?;
        sbc.effective_variant(variant_name)
            .ok_or_else(|| CompendiumError::not_found("variant", format!("{sbc_id}/{variant_name}")))
    }
}
