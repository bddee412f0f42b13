//! Typed catalog model.
//!
//! These types are the output of the validating parser. They are plain data:
//! every invariant has already been checked by the schema walker and the
//! integrity stage, and nothing here is mutated after parsing.
//!
//! Recommended imports:
//! - `use compendium_core::model::*;`
//! - or `use compendium_core::prelude::*;`
//!
//! `Root` and `Sbc` serialize but do not deserialize: the only way in is
//! [`crate::pipeline::parse`], which decodes crate-private record types after
//! validation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

mod root;

pub use root::Root;
pub(crate) use root::RootRecord;

/// Key of the variant whose fields are inherited by its siblings.
pub const COMMON_SBC_VARIANT_KEY: &str = "_common";

/// A keyed catalog collection, in document order.
pub type Catalog<T> = IndexMap<String, T>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: Url,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub store: bool,
    #[serde(default)]
    pub wiki: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

/// Free-text credit; neither field references a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub author: String,
    pub license: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Always absolute once parsed.
    pub url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attribution: Attribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuCacheLayer {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CpuCacheLayer {
    pub fn has_note(&self) -> bool {
        self.note.is_some()
    }

    pub fn note_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.note.as_deref().unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuCache {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1: Option<CpuCacheLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2: Option<CpuCacheLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l3: Option<CpuCacheLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    pub name: String,
    pub launch: String,
    pub designer: String,
    pub micro_architecture: String,
    pub caches: CpuCache,
    pub links: Vec<Link>,
}

/// A CPU cluster of a SoC. `id` is a key of `Root::cpus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocCpu {
    pub id: String,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Soc {
    pub name: String,
    pub manufacturer: String,
    pub cpus: Vec<SocCpu>,
    pub links: Vec<Link>,
    pub picture: Image,
}

impl Soc {
    /// Total number of cores across all CPU clusters.
    pub fn cpu_core_count(&self) -> f64 {
        self.cpus.iter().map(|c| c.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub name: String,
    pub links: Vec<Link>,
    pub logo: Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbcVariantRam {
    /// Capacity in bytes.
    pub capacity: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One configuration of a board.
///
/// Own fields only. Effective values, which fall back to the board's common
/// variant, come from [`crate::resolve::EffectiveVariant`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SbcVariant {
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<SbcVariantRam>,
    #[serde(default)]
    pub remarks: Vec<String>,
    #[serde(default)]
    pub pictures: Vec<Image>,

    /// Catalog id of the owning board when that board has a common variant.
    /// A lookup key, not an owning reference.
    #[serde(skip)]
    pub(crate) common_of: Option<String>,
}

impl SbcVariant {
    /// Id of the board whose common variant this variant inherits from.
    pub fn common_of(&self) -> Option<&str> {
        self.common_of.as_deref()
    }
}

/// A board. Serializes in document shape, with the common variant back under
/// `_common`, so the output can be fed to the parser again.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "SbcRecord")]
pub struct Sbc {
    pub name: String,
    pub manufacturer: String,
    pub common_variant: Option<SbcVariant>,
    /// Named variants. Never contains [`COMMON_SBC_VARIANT_KEY`].
    pub variants: Catalog<SbcVariant>,
    pub picture: Image,
}

impl Sbc {
    pub fn variant(&self, name: &str) -> Option<&SbcVariant> {
        self.variants.get(name)
    }
}

/// Board as it appears in the document, with `_common` still among the variants.
///
/// Only the build stage decodes these; there is no public way to deserialize
/// an [`Sbc`] outside the parser.
#[derive(Serialize, Deserialize)]
pub(crate) struct SbcRecord {
    name: String,
    manufacturer: String,
    variants: Catalog<SbcVariant>,
    picture: Image,
}

impl From<SbcRecord> for Sbc {
    fn from(r: SbcRecord) -> Self {
        let mut variants = r.variants;
        let common_variant = variants.shift_remove(COMMON_SBC_VARIANT_KEY);
        Self {
            name: r.name,
            manufacturer: r.manufacturer,
            common_variant,
            variants,
            picture: r.picture,
        }
    }
}

impl From<Sbc> for SbcRecord {
    fn from(sbc: Sbc) -> Self {
        let mut variants = Catalog::with_capacity(sbc.variants.len() + 1);
        if let Some(common) = sbc.common_variant {
            variants.insert(COMMON_SBC_VARIANT_KEY.to_string(), common);
        }
        variants.extend(sbc.variants);
        Self {
            name: sbc.name,
            manufacturer: sbc.manufacturer,
            variants,
            picture: sbc.picture,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub link: Link,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn image() -> serde_json::Value {
        json!({"url": "https://e.com/p.png", "attribution": {"author": "a", "license": "l"}})
    }

    fn board() -> Sbc {
        let record: SbcRecord = serde_json::from_value(json!({
            "name": "Pi 4",
            "manufacturer": "raspberry",
            "variants": {"_common": {"remarks": ["A"]}, "4gb": {}, "8gb": {}},
            "picture": image()
        }))
        .unwrap();
        Sbc::from(record)
    }

    #[test]
    fn common_variant_is_extracted() {
        let sbc = board();
        assert_eq!(sbc.common_variant.as_ref().unwrap().remarks, vec!["A"]);
        assert!(!sbc.variants.contains_key(COMMON_SBC_VARIANT_KEY));
        assert_eq!(sbc.variants.keys().collect::<Vec<_>>(), vec!["4gb", "8gb"]);
    }

    #[test]
    fn common_variant_serializes_under_its_key() {
        let v = serde_json::to_value(board()).unwrap();
        assert!(v.get("common_variant").is_none());
        let keys: Vec<_> = v["variants"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec![COMMON_SBC_VARIANT_KEY, "4gb", "8gb"]);
        assert_eq!(v["variants"]["_common"]["remarks"], json!(["A"]));
    }

    #[test]
    fn core_count_sums_clusters() {
        let soc: Soc = serde_json::from_value(json!({
            "name": "RK3399",
            "manufacturer": "rockchip",
            "cpus": [{"id": "a72", "count": 2}, {"id": "a53", "count": 4}],
            "links": [],
            "picture": image()
        }))
        .unwrap();
        assert_eq!(soc.cpu_core_count(), 6.0);
    }

    #[test]
    fn ram_type_field_is_renamed() {
        let ram: SbcVariantRam =
            serde_json::from_value(json!({"capacity": 1073741824u64, "type": "LPDDR4"})).unwrap();
        assert_eq!(ram.kind, "LPDDR4");
        assert_eq!(serde_json::to_value(&ram).unwrap()["type"], "LPDDR4");
    }

    #[test]
    fn cache_note_fallback() {
        let layer = CpuCacheLayer { min: 32.0, max: 64.0, note: None };
        assert!(!layer.has_note());
        assert_eq!(layer.note_or("n/a"), "n/a");
    }
}
