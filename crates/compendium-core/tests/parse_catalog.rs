//! parse_catalog.rs
//!
//! End-to-end parsing of a realistic catalog document: field fidelity,
//! defaulting, common-variant extraction, atomic failure and idempotence.

use assert_matches::assert_matches;
use compendium_core::prelude::*;
use compendium_core::{ValidationError, ValidationErrorKind};
use serde_json::{json, Value};

const CATALOG: &str = include_str!("fixtures/catalog.json");

fn document() -> Value {
    serde_json::from_str(CATALOG).expect("fixture is valid JSON")
}

fn config() -> CoreConfig {
    let url = url::Url::parse("http://boards.example/resources/sbc-compendium/data/data.json").unwrap();
    CoreConfig::for_document_url(&url).unwrap()
}

fn validation_error(err: CompendiumError) -> ValidationError {
    match err {
        CompendiumError::Validation(v) => v,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn scalar_fields_survive_parsing() {
    let root = parse(document(), &config()).unwrap();

    assert_eq!(root.version(), 1_700_000_000.0);

    let a72 = &root.cpus()["cortex-a72"];
    assert_eq!(a72.name, "Cortex-A72");
    assert_eq!(a72.launch, "2015");
    assert_eq!(a72.designer, "ARM");
    assert_eq!(a72.micro_architecture, "ARMv8-A");
    let l1 = a72.caches.l1.as_ref().unwrap();
    assert_eq!((l1.min, l1.max), (48.0, 48.0));
    assert_eq!(l1.note.as_deref(), Some("per core, instruction"));
    assert!(a72.caches.l2.as_ref().unwrap().note.is_none());
    assert!(a72.caches.l3.is_none());

    let bcm = &root.socs()["bcm2711"];
    assert_eq!(bcm.manufacturer, "raspberry");
    assert_eq!(bcm.cpus[0].id, "cortex-a72");
    assert_eq!(bcm.cpu_core_count(), 4.0);

    let author = &root.authors()["nibblepoker"];
    assert_eq!(author.url.as_ref().unwrap().as_str(), "https://nibblepoker.lu/");

    let license = &root.licenses()["cc-by-sa-4.0"];
    assert_eq!(license.link.title, "Legal code");
}

#[test]
fn collections_keep_document_order() {
    let root = parse(document(), &config()).unwrap();
    let sbc_ids: Vec<_> = root.sbcs().keys().map(String::as_str).collect();
    assert_eq!(sbc_ids, vec!["pi4", "quartz64"]);
    let manufacturers: Vec<_> = root.manufacturers().keys().map(String::as_str).collect();
    assert_eq!(manufacturers, vec!["raspberry", "rockchip"]);
}

#[test]
fn link_flags_default_to_false() {
    let root = parse(document(), &config()).unwrap();
    let wiki = &root.cpus()["cortex-a72"].links[0];
    assert!(wiki.wiki);
    assert!(!wiki.official);
    assert!(!wiki.store);

    let legal = &root.licenses()["cc-by-sa-4.0"].link;
    assert!(!legal.official && !legal.store && !legal.wiki);
}

#[test]
fn common_variant_is_extracted() {
    let root = parse(document(), &config()).unwrap();
    let pi4 = &root.sbcs()["pi4"];

    assert!(pi4.common_variant.is_some());
    assert!(!pi4.variants.contains_key(COMMON_SBC_VARIANT_KEY));
    assert_eq!(pi4.variants.keys().map(String::as_str).collect::<Vec<_>>(), vec!["2gb", "8gb"]);

    // variants of a board with a common variant are linked to it by id
    assert_eq!(pi4.variants["2gb"].common_of(), Some("pi4"));
    assert!(root.sbcs()["quartz64"].common_variant.is_none());
    assert_eq!(root.sbcs()["quartz64"].variants["4gb"].common_of(), None);
}

#[test]
fn variant_sequences_default_to_empty() {
    let root = parse(document(), &config()).unwrap();
    let v = &root.sbcs()["quartz64"].variants["4gb"];
    assert!(v.links.is_empty());
    assert!(v.remarks.is_empty());
    assert!(v.pictures.is_empty());
}

#[test]
fn relative_image_urls_use_serving_origin() {
    let root = parse(document(), &config()).unwrap();
    assert_eq!(
        root.manufacturers()["raspberry"].logo.url.as_str(),
        "http://boards.example/resources/sbc-compendium/images/raspberry.svg"
    );
    // absolute URLs are untouched
    assert_eq!(
        root.manufacturers()["rockchip"].logo.url.as_str(),
        "https://example.com/rockchip.png"
    );
}

#[test]
fn missing_cpu_collection_is_named() {
    let mut doc = document();
    doc.as_object_mut().unwrap().remove("cpu");

    let err = validation_error(parse(doc, &config()).unwrap_err());
    assert_eq!(err.path, "cpu");
    assert_eq!(err.kind, ValidationErrorKind::Missing);
}

#[test]
fn missing_version_is_rejected() {
    let mut doc = document();
    doc.as_object_mut().unwrap().remove("version");

    let err = validation_error(parse(doc, &config()).unwrap_err());
    assert_eq!(err.path, "version");
}

#[test]
fn nested_failure_reports_full_path() {
    let mut doc = document();
    doc["sbc"]["pi4"]["variants"]["8gb"]["ram"]["capacity"] = json!("8GB");

    let err = validation_error(parse(doc, &config()).unwrap_err());
    assert_eq!(err.path, "sbc.pi4.variants.8gb.ram.capacity");
    assert_eq!(
        err.kind,
        ValidationErrorKind::WrongType { expected: "number", found: "string" }
    );
}

#[test]
fn null_required_field_is_rejected() {
    let mut doc = document();
    doc["soc"]["bcm2711"]["name"] = Value::Null;

    let err = validation_error(parse(doc, &config()).unwrap_err());
    assert_eq!(err.path, "soc.bcm2711.name");
    assert_eq!(err.kind, ValidationErrorKind::UnexpectedNull);
}

#[test]
fn collection_given_as_array_is_rejected() {
    let mut doc = document();
    doc["license"] = json!([]);

    let err = validation_error(parse(doc, &config()).unwrap_err());
    assert_eq!(err.path, "license");
    assert_matches!(err.kind, ValidationErrorKind::WrongType { expected: "mapping", .. });
}

#[test]
fn board_with_only_common_variant_is_rejected() {
    let mut doc = document();
    doc["sbc"]["pi4"]["variants"] = json!({"_common": {"ram": {"capacity": 1, "type": "DDR4"}}});

    let err = validation_error(parse(doc, &config()).unwrap_err());
    assert_eq!(err.path, "sbc.pi4.variants");
    assert_matches!(err.kind, ValidationErrorKind::Structural(_));
}

#[test]
fn variant_without_any_ram_is_rejected() {
    let mut doc = document();
    doc["sbc"]["quartz64"]["variants"]["8gb"] = json!({"remarks": ["no ram listed"]});

    let err = validation_error(parse(doc, &config()).unwrap_err());
    assert_eq!(err.path, "sbc.quartz64.variants.8gb.ram");
}

#[test]
fn dangling_cpu_reference_is_rejected_unless_disabled() {
    let mut doc = document();
    doc["soc"]["rk3566"]["cpus"][0]["id"] = json!("cortex-a53");

    let err = validation_error(parse(doc.clone(), &config()).unwrap_err());
    assert_eq!(err.path, "soc.rk3566.cpus[0].id");

    let mut lenient = config();
    lenient.validation.check_references = false;
    let root = parse(doc, &lenient).unwrap();
    assert_eq!(root.socs()["rk3566"].cpus[0].id, "cortex-a53");
}

#[test]
fn dangling_manufacturer_reference_is_rejected() {
    let mut doc = document();
    doc["sbc"]["quartz64"]["manufacturer"] = json!("pine64");

    let err = validation_error(parse(doc, &config()).unwrap_err());
    assert_eq!(err.path, "sbc.quartz64.manufacturer");
}

#[test]
fn parsing_is_idempotent() {
    let bytes = CATALOG.as_bytes();
    let a = ingest(bytes, &config()).unwrap();
    let b = ingest(bytes, &config()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn oversized_body_is_malformed() {
    let mut cfg = config();
    cfg.limits.max_json_bytes = 16;
    let err = ingest(CATALOG.as_bytes(), &cfg).unwrap_err();
    assert_matches!(err, CompendiumError::MalformedResponse(_));
}

#[test]
fn serialized_root_parses_back_to_equal_root() {
    let root = parse(document(), &config()).unwrap();
    let serialized = serde_json::to_value(&root).unwrap();

    assert_eq!(
        serialized["sbc"]["pi4"]["variants"][COMMON_SBC_VARIANT_KEY]["ram"]["type"],
        "LPDDR4"
    );
    assert!(serialized["sbc"]["pi4"].get("common_variant").is_none());

    let back = parse(serialized, &config()).unwrap();
    assert_eq!(back, root);
    assert!(back.sbcs()["pi4"].common_variant.is_some());
    assert_eq!(back.variant("pi4", "2gb").unwrap().ram().unwrap().capacity, 2_147_483_648.0);
}

#[test]
fn invalid_board_only_enters_through_parse() {
    let mut doc = document();
    doc["sbc"]["quartz64"]["variants"] = json!({});
    doc["sbc"]["quartz64"]["manufacturer"] = json!("pine64");

    let err = validation_error(parse(doc, &config()).unwrap_err());
    assert_eq!(err.path, "sbc.quartz64.variants");
}

#[test]
fn parsed_document_is_never_blank() {
    let mut doc = document();
    doc["version"] = json!(-1);
    let root = parse(doc, &config()).unwrap();
    assert_eq!(root.version(), -1.0);
    assert!(!root.is_blank());
    assert!(Root::blank().is_blank());
}
