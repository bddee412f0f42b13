//! manufacturer_projection.rs

use assert_matches::assert_matches;
use compendium_core::prelude::*;

fn root() -> Root {
    let doc = serde_json::from_str(include_str!("fixtures/catalog.json")).unwrap();
    parse(doc, &CoreConfig::default()).unwrap()
}

#[test]
fn projection_selects_by_manufacturer_field() {
    let root = root();
    let p = project_by_manufacturer(&root, "raspberry").unwrap();

    assert_eq!(p.id, "raspberry");
    assert_eq!(p.manufacturer.name, "Raspberry Pi Foundation");
    assert_eq!(p.socs.keys().copied().collect::<Vec<_>>(), vec!["bcm2711"]);
    assert_eq!(p.sbcs.keys().copied().collect::<Vec<_>>(), vec!["pi4"]);
    assert!(p.cpus.is_empty());
    assert!(!p.is_empty());
}

#[test]
fn projection_entries_are_the_catalog_entries() {
    let root = root();
    let p = project_by_manufacturer(&root, "rockchip").unwrap();
    assert!(std::ptr::eq(p.sbcs["quartz64"], &root.sbcs()["quartz64"]));
    assert!(std::ptr::eq(p.socs["rk3566"], &root.socs()["rk3566"]));
}

#[test]
fn projection_serializes_as_collections() {
    let root = root();
    let p = project_by_manufacturer(&root, "rockchip").unwrap();
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["id"], "rockchip");
    assert!(v["cpus"].as_object().unwrap().is_empty());
    assert_eq!(v["sbcs"]["quartz64"]["name"], "Quartz64 Model A");
}

#[test]
fn unknown_manufacturer_is_not_found() {
    let root = root();
    let err = project_by_manufacturer(&root, "pine64").unwrap_err();
    assert_matches!(err, CompendiumError::NotFound { kind: "manufacturer", .. });
    assert_eq!(err.to_string(), "unknown manufacturer 'pine64'");
}
