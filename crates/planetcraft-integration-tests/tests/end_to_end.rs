//! Integration test: catalog files on disk through to resolved plans.
//!
//! Writes small catalogs in TOML and RON to temporary directories, loads
//! them through `planetcraft-data`, and drives the resolvers exactly as a
//! presentation layer would: pick a project, resolve its chain, aggregate,
//! expand.

use planetcraft_core::test_utils::recipe;
use planetcraft_core::*;
use planetcraft_data::{DataLoadError, load_catalog};
use std::fs;
use std::path::{Path, PathBuf};

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "planetcraft_e2e_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn launch_pad_from_toml_tables() {
    let dir = make_test_dir("launch_pad");
    fs::write(dir.join("items_data.toml"), "[\"Steel Bar\"]\nIron = 5\n").unwrap();
    fs::write(dir.join("alloys_data.toml"), "").unwrap();
    fs::write(
        dir.join("project_data.toml"),
        "[\"Launch Pad\".requires]\n\"Steel Bar\" = 10\n",
    )
    .unwrap();
    fs::write(dir.join("base_materials.toml"), "materials = [\"Iron\"]\n").unwrap();

    let catalog = load_catalog(&dir).unwrap();

    let out = expand_requirements(&catalog, &recipe(&[("Steel Bar", 10)]));
    assert_eq!(out.breakdown.used_items.get("Steel Bar"), 10);
    assert_eq!(out.breakdown.used_items.len(), 1);
    assert_eq!(out.breakdown.base_materials.get("Iron"), 50);
    assert_eq!(out.breakdown.base_materials.len(), 1);
    assert!(out.breakdown.used_alloys.is_empty());

    let plan = plan_project(&catalog, "Launch Pad");
    assert_eq!(plan.chain, vec!["Launch Pad"]);
    assert_eq!(plan.breakdown.breakdown, out.breakdown);

    cleanup(&dir);
}

#[test]
fn cyclic_data_from_ron_terminates() {
    let dir = make_test_dir("cyclic");
    fs::write(
        dir.join("items_data.ron"),
        r#"{"X": {"Y": 1}, "Y": {"X": 1, "Iron": 2}}"#,
    )
    .unwrap();
    fs::write(dir.join("alloys_data.ron"), "{}").unwrap();
    fs::write(
        dir.join("project_data.ron"),
        r#"{
            "Alpha": (requires: {"X": 1}, prerequisites: Some(["Beta"])),
            "Beta": (requires: {"Y": 2}, prerequisites: Some(["Alpha"])),
        }"#,
    )
    .unwrap();
    fs::write(dir.join("base_materials.ron"), r#"["Iron"]"#).unwrap();

    let catalog = load_catalog(&dir).unwrap();
    let plan = plan_project(&catalog, "Alpha");

    assert_eq!(plan.chain, vec!["Beta", "Alpha"]);
    assert_eq!(plan.totals.get("X"), 1);
    assert_eq!(plan.totals.get("Y"), 2);

    // X(1) -> Y(1) -> {Iron 2, X truncated}; Y(2) -> {Iron 4, X(2) -> Y truncated}
    let b = &plan.breakdown.breakdown;
    assert_eq!(b.used_items.get("X"), 3);
    assert_eq!(b.used_items.get("Y"), 3);
    assert_eq!(b.base_materials.get("Iron"), 6);

    let truncated: Vec<&str> = plan
        .breakdown
        .trace
        .iter()
        .flat_map(|root| root.truncated_names())
        .collect();
    assert_eq!(truncated, vec!["X", "Y"]);

    cleanup(&dir);
}

#[test]
fn missing_table_is_the_only_hard_failure() {
    let dir = make_test_dir("missing");
    fs::write(dir.join("items_data.json"), "{}").unwrap();
    fs::write(dir.join("alloys_data.json"), "{}").unwrap();

    let err = load_catalog(&dir).unwrap_err();
    assert!(matches!(err, DataLoadError::MissingRequired { .. }));
    assert!(format!("{err}").contains("project_data"));

    cleanup(&dir);
}

#[test]
fn overlapping_and_zero_lines_keep_the_catalog_usable() {
    let dir = make_test_dir("imperfect");
    fs::write(
        dir.join("items_data.json"),
        r#"{"Steel Bar": {"Iron Bar": 2}, "Circuit": {"Copper Bar": 3}}"#,
    )
    .unwrap();
    fs::write(
        dir.join("alloys_data.json"),
        r#"{"Steel Bar": {"Iron": 7}, "Iron Bar": {"Iron": 0, "Coal": 1}, "Copper Bar": {"Copper": 5}}"#,
    )
    .unwrap();
    fs::write(
        dir.join("project_data.json"),
        r#"{"Launch Pad": {"requires": {"Steel Bar": 10, "Circuit": 1}}}"#,
    )
    .unwrap();
    fs::write(dir.join("base_materials.json"), r#"["Iron", "Coal", "Copper"]"#).unwrap();

    let catalog = load_catalog(&dir).unwrap();
    let plan = plan_project(&catalog, "Launch Pad");
    assert_eq!(plan.chain, vec!["Launch Pad"]);

    // Steel Bar resolves through its item recipe; Iron Bar keeps only Coal.
    let b = &plan.breakdown.breakdown;
    assert_eq!(b.used_items.get("Steel Bar"), 10);
    assert_eq!(b.used_items.get("Circuit"), 1);
    assert_eq!(b.used_alloys.get("Iron Bar"), 20);
    assert_eq!(b.used_alloys.get("Copper Bar"), 3);
    assert_eq!(b.base_materials.get("Coal"), 20);
    assert_eq!(b.base_materials.get("Copper"), 15);
    assert!(!b.base_materials.contains("Iron"));

    cleanup(&dir);
}

#[test]
fn unknown_project_is_an_empty_plan() {
    let catalog = test_utils::project_catalog();
    let plan = plan_project(&catalog, "Warp Gate");
    assert!(plan.chain.is_empty());
    assert!(plan.totals.is_empty());
    assert!(plan.breakdown.breakdown.is_empty());
}
