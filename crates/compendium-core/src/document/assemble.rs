//! Catalog document assembly.
//!
//! The catalog is authored as one JSON file per entity, grouped by collection
//! (`sbc/pi4.json`, `soc/bcm2711.json`, ...). [`DocumentBuilder`] merges those
//! entries into the single document served to clients.
//!
//! The builder does no I/O; the host reads the files and feeds the values in.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::errors::{CompendiumError, CompendiumResult};

/// A top-level collection of the catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Author,
    Manufacturer,
    Sbc,
    Cpu,
    Soc,
    License,
}

impl Collection {
    /// All collections, in document order.
    pub const ALL: [Collection; 6] = [
        Collection::Author,
        Collection::Manufacturer,
        Collection::Sbc,
        Collection::Cpu,
        Collection::Soc,
        Collection::License,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Manufacturer => "manufacturer",
            Self::Sbc => "sbc",
            Self::Cpu => "cpu",
            Self::Soc => "soc",
            Self::License => "license",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = CompendiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CompendiumError::invalid_argument(format!("unknown collection: {s}")))
    }
}

/// Accumulates catalog entries and emits the merged document.
///
/// Entries are keyed by id in a `BTreeMap`, so the output order does not depend
/// on the order in which files were read.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    entries: BTreeMap<Collection, BTreeMap<String, Value>>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entry. Ids must be non-empty and unique within a collection.
    pub fn insert(
        &mut self,
        collection: Collection,
        id: impl Into<String>,
        value: Value,
    ) -> CompendiumResult<()> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CompendiumError::invalid_argument(format!(
                "empty id in collection {collection}"
            )));
        }

        let slot = self.entries.entry(collection).or_default();
        if slot.contains_key(&id) {
            return Err(CompendiumError::invalid_argument(format!(
                "duplicate id '{id}' in collection {collection}"
            )));
        }
        slot.insert(id, value);
        Ok(())
    }

    /// Number of entries in a collection.
    pub fn len(&self, collection: Collection) -> usize {
        self.entries.get(&collection).map_or(0, BTreeMap::len)
    }

    /// Emit the document. Every collection is present, even when empty.
    pub fn build(self, version: i64) -> Value {
        let mut entries = self.entries;
        let mut doc = Map::new();
        for collection in Collection::ALL {
            let items: Map<String, Value> = entries
                .remove(&collection)
                .unwrap_or_default()
                .into_iter()
                .collect();
            doc.insert(collection.as_str().to_string(), Value::Object(items));
        }
        doc.insert("version".to_string(), Value::from(version));
        Value::Object(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_all_collections() {
        let mut b = DocumentBuilder::new();
        b.insert(Collection::Cpu, "a72", json!({"name": "Cortex-A72"})).unwrap();
        let doc = b.build(1_700_000_000);
        for c in Collection::ALL {
            assert!(doc[c.as_str()].is_object(), "missing {c}");
        }
        assert_eq!(doc["cpu"]["a72"]["name"], "Cortex-A72");
        assert_eq!(doc["version"], 1_700_000_000);
    }

    #[test]
    fn entries_sorted_by_id() {
        let mut b = DocumentBuilder::new();
        b.insert(Collection::Soc, "rk3588", json!({})).unwrap();
        b.insert(Collection::Soc, "bcm2711", json!({})).unwrap();
        let doc = b.build(0);
        let keys: Vec<_> = doc["soc"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["bcm2711", "rk3588"]);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut b = DocumentBuilder::new();
        b.insert(Collection::Sbc, "pi4", json!({})).unwrap();
        let err = b.insert(Collection::Sbc, "pi4", json!({})).unwrap_err();
        assert!(err.to_string().contains("duplicate id 'pi4'"));
        // same id in another collection is fine
        b.insert(Collection::Soc, "pi4", json!({})).unwrap();
        assert_eq!(b.len(Collection::Sbc), 1);
    }

    #[test]
    fn collection_names_parse() {
        assert_eq!("license".parse::<Collection>().unwrap(), Collection::License);
        assert!("boards".parse::<Collection>().is_err());
    }
}
