use serde::{Deserialize, Serialize};

use super::{Author, Catalog, Cpu, License, Manufacturer, Sbc, SbcRecord, SbcVariant, Soc};

/// The parsed catalog document.
///
/// Only [`crate::pipeline::parse`] builds a populated `Root`; it cannot be
/// deserialized directly. Fields are private and read-only afterwards.
/// Serializing yields a document the parser accepts again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Root {
    cpu: Catalog<Cpu>,
    manufacturer: Catalog<Manufacturer>,
    sbc: Catalog<Sbc>,
    soc: Catalog<Soc>,
    license: Catalog<License>,
    author: Catalog<Author>,
    version: f64,
    #[serde(skip)]
    blank: bool,
}

/// Version carried by [`Root::blank`].
pub const BLANK_VERSION: f64 = -1.0;

/// Document shape decoded by the build stage after validation.
#[derive(Deserialize)]
pub(crate) struct RootRecord {
    cpu: Catalog<Cpu>,
    manufacturer: Catalog<Manufacturer>,
    sbc: Catalog<SbcRecord>,
    soc: Catalog<Soc>,
    license: Catalog<License>,
    author: Catalog<Author>,
    version: f64,
}

impl From<RootRecord> for Root {
    fn from(r: RootRecord) -> Self {
        let mut sbc: Catalog<Sbc> = r.sbc.into_iter().map(|(id, b)| (id, Sbc::from(b))).collect();
        // Link named variants to their board's common slot by id.
        for (id, board) in sbc.iter_mut() {
            if board.common_variant.is_none() {
                continue;
            }
            for variant in board.variants.values_mut() {
                variant.common_of = Some(id.clone());
            }
        }

        Self {
            cpu: r.cpu,
            manufacturer: r.manufacturer,
            sbc,
            soc: r.soc,
            license: r.license,
            author: r.author,
            version: r.version,
            blank: false,
        }
    }
}

impl Root {
    /// Placeholder used before real data has loaded: empty collections, version -1.
    pub fn blank() -> Self {
        Self {
            cpu: Catalog::new(),
            manufacturer: Catalog::new(),
            sbc: Catalog::new(),
            soc: Catalog::new(),
            license: Catalog::new(),
            author: Catalog::new(),
            version: BLANK_VERSION,
            blank: true,
        }
    }

    /// True only for [`Root::blank`]; a parsed document with version -1 is not blank.
    pub fn is_blank(&self) -> bool {
        self.blank
    }

    pub fn cpus(&self) -> &Catalog<Cpu> {
        &self.cpu
    }

    pub fn manufacturers(&self) -> &Catalog<Manufacturer> {
        &self.manufacturer
    }

    pub fn sbcs(&self) -> &Catalog<Sbc> {
        &self.sbc
    }

    pub fn socs(&self) -> &Catalog<Soc> {
        &self.soc
    }

    pub fn licenses(&self) -> &Catalog<License> {
        &self.license
    }

    pub fn authors(&self) -> &Catalog<Author> {
        &self.author
    }

    pub fn version(&self) -> f64 {
        self.version
    }

    /// Follow a variant's weak link to its board's common variant.
    pub fn common_variant_of(&self, variant: &SbcVariant) -> Option<&SbcVariant> {
        let sbc_id = variant.common_of()?;
        self.sbc.get(sbc_id)?.common_variant.as_ref()
    }
}

impl Default for Root {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_root_is_empty() {
        let r = Root::blank();
        assert_eq!(r.version(), -1.0);
        assert!(r.is_blank());
        assert!(r.cpus().is_empty());
        assert!(r.sbcs().is_empty());
        assert!(r.authors().is_empty());
    }

    #[test]
    fn document_version_minus_one_is_not_blank() {
        let record: RootRecord = serde_json::from_value(serde_json::json!({
            "cpu": {}, "manufacturer": {}, "sbc": {}, "soc": {},
            "license": {}, "author": {}, "version": -1
        }))
        .unwrap();
        let root = Root::from(record);
        assert_eq!(root.version(), BLANK_VERSION);
        assert!(!root.is_blank());
        assert_ne!(root, Root::blank());
    }
}
