//! Schema descriptors for every catalog entity.

use super::{DefaultValue, FieldKind, FieldSpec, RecordSchema};

use FieldKind::{Array, Bool, ImageUri, Mapping, Number, Record, Uri};

// Element kinds shared by array and mapping fields.
static LINK_KIND: FieldKind = Record(&LINK);
static IMAGE_KIND: FieldKind = Record(&IMAGE);
static STRING_KIND: FieldKind = FieldKind::String;
static SOC_CPU_KIND: FieldKind = Record(&SOC_CPU);
static SBC_VARIANT_KIND: FieldKind = Record(&SBC_VARIANT);
static CPU_KIND: FieldKind = Record(&CPU);
static MANUFACTURER_KIND: FieldKind = Record(&MANUFACTURER);
static SBC_KIND: FieldKind = Record(&SBC);
static SOC_KIND: FieldKind = Record(&SOC);
static LICENSE_KIND: FieldKind = Record(&LICENSE);
static AUTHOR_KIND: FieldKind = Record(&AUTHOR);

pub static LINK: RecordSchema = RecordSchema {
    name: "Link",
    fields: &[
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("url", Uri),
        FieldSpec::defaulted("official", Bool, DefaultValue::Bool(false)),
        FieldSpec::defaulted("store", Bool, DefaultValue::Bool(false)),
        FieldSpec::defaulted("wiki", Bool, DefaultValue::Bool(false)),
    ],
};

pub static AUTHOR: RecordSchema = RecordSchema {
    name: "Author",
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("url", Uri),
    ],
};

pub static ATTRIBUTION: RecordSchema = RecordSchema {
    name: "Attribution",
    fields: &[
        FieldSpec::required("author", FieldKind::String),
        FieldSpec::required("license", FieldKind::String),
    ],
};

pub static IMAGE: RecordSchema = RecordSchema {
    name: "Image",
    fields: &[
        FieldSpec::required("url", ImageUri),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::required("attribution", Record(&ATTRIBUTION)),
    ],
};

pub static CPU_CACHE_LAYER: RecordSchema = RecordSchema {
    name: "CpuCacheLayer",
    fields: &[
        FieldSpec::required("min", Number),
        FieldSpec::required("max", Number),
        FieldSpec::optional("note", FieldKind::String),
    ],
};

pub static CPU_CACHE: RecordSchema = RecordSchema {
    name: "CpuCache",
    fields: &[
        FieldSpec::optional("l1", Record(&CPU_CACHE_LAYER)),
        FieldSpec::optional("l2", Record(&CPU_CACHE_LAYER)),
        FieldSpec::optional("l3", Record(&CPU_CACHE_LAYER)),
    ],
};

pub static CPU: RecordSchema = RecordSchema {
    name: "Cpu",
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("launch", FieldKind::String),
        FieldSpec::required("designer", FieldKind::String),
        FieldSpec::required("micro_architecture", FieldKind::String),
        FieldSpec::required("caches", Record(&CPU_CACHE)),
        FieldSpec::required("links", Array(&LINK_KIND)),
    ],
};

pub static SOC_CPU: RecordSchema = RecordSchema {
    name: "SocCpu",
    fields: &[
        FieldSpec::required("id", FieldKind::String),
        FieldSpec::required("count", Number),
    ],
};

pub static SOC: RecordSchema = RecordSchema {
    name: "Soc",
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("manufacturer", FieldKind::String),
        FieldSpec::required("cpus", Array(&SOC_CPU_KIND)),
        FieldSpec::required("links", Array(&LINK_KIND)),
        FieldSpec::required("picture", Record(&IMAGE)),
    ],
};

pub static MANUFACTURER: RecordSchema = RecordSchema {
    name: "Manufacturer",
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("links", Array(&LINK_KIND)),
        FieldSpec::required("logo", Record(&IMAGE)),
    ],
};

pub static SBC_VARIANT_RAM: RecordSchema = RecordSchema {
    name: "SbcVariantRam",
    fields: &[
        FieldSpec::required("capacity", Number),
        FieldSpec::required("type", FieldKind::String),
    ],
};

pub static SBC_VARIANT: RecordSchema = RecordSchema {
    name: "SbcVariant",
    fields: &[
        FieldSpec::defaulted("links", Array(&LINK_KIND), DefaultValue::EmptyArray),
        FieldSpec::optional("ram", Record(&SBC_VARIANT_RAM)),
        FieldSpec::defaulted("remarks", Array(&STRING_KIND), DefaultValue::EmptyArray),
        FieldSpec::defaulted("pictures", Array(&IMAGE_KIND), DefaultValue::EmptyArray),
    ],
};

pub static SBC: RecordSchema = RecordSchema {
    name: "Sbc",
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("manufacturer", FieldKind::String),
        FieldSpec::required("variants", Mapping(&SBC_VARIANT_KIND)),
        FieldSpec::required("picture", Record(&IMAGE)),
    ],
};

pub static LICENSE: RecordSchema = RecordSchema {
    name: "License",
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("link", Record(&LINK)),
    ],
};

/// The document root. `version` is required.
pub static ROOT: RecordSchema = RecordSchema {
    name: "Root",
    fields: &[
        FieldSpec::required("cpu", Mapping(&CPU_KIND)),
        FieldSpec::required("manufacturer", Mapping(&MANUFACTURER_KIND)),
        FieldSpec::required("sbc", Mapping(&SBC_KIND)),
        FieldSpec::required("soc", Mapping(&SOC_KIND)),
        FieldSpec::required("license", Mapping(&LICENSE_KIND)),
        FieldSpec::required("author", Mapping(&AUTHOR_KIND)),
        FieldSpec::required("version", Number),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_lists_all_collections() {
        let names: Vec<_> = ROOT.fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec!["cpu", "manufacturer", "sbc", "soc", "license", "author", "version"]
        );
        assert!(ROOT.fields.iter().all(|f| f.required));
    }

    #[test]
    fn link_flags_default_false() {
        for flag in ["official", "store", "wiki"] {
            let f = LINK.field(flag).unwrap();
            assert!(!f.required);
            assert_eq!(f.default, Some(DefaultValue::Bool(false)));
        }
    }
}
