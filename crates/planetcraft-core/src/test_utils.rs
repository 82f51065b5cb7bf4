//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so the fixture
//! catalogs are available everywhere tests run (via the `test-utils`
//! feature).

use crate::catalog::{Catalog, ProjectEntry, Recipe};
use crate::tally::Quantity;

// ===========================================================================
// Recipe constructors
// ===========================================================================

/// Build a recipe from `(component, quantity)` pairs.
pub fn recipe(entries: &[(&str, Quantity)]) -> Recipe {
    entries
        .iter()
        .map(|(name, qty)| (name.to_string(), *qty))
        .collect()
}

/// A project entry with the given requirements and prerequisites.
pub fn project(requires: &[(&str, Quantity)], prerequisites: &[&str]) -> ProjectEntry {
    ProjectEntry::new(recipe(requires)).with_prerequisites(prerequisites.iter().copied())
}

// ===========================================================================
// Fixture catalogs
// ===========================================================================

/// The minimal end-to-end catalog: one project needing steel, steel from iron.
pub fn launch_pad_catalog() -> Catalog {
    Catalog::builder()
        .project("Launch Pad", project(&[("Steel Bar", 10)], &[]))
        .item("Steel Bar", recipe(&[("Iron", 5)]))
        .base_material("Iron")
        .build()
        .expect("launch pad catalog")
}

/// Items, alloys, base materials and one unknown component.
///
/// ```text
/// Smart Chip   (item)  = 2 Circuit + 1 Gold Bar + 3 Mystery Dust
/// Circuit      (item)  = 5 Copper Bar + 2 Silicon
/// Gold Bar     (alloy) = 10 Gold
/// Copper Bar   (alloy) = 5 Copper
/// Silicon, Gold, Copper are base materials. Mystery Dust is unknown.
/// ```
pub fn smart_chip_catalog() -> Catalog {
    Catalog::builder()
        .item(
            "Smart Chip",
            recipe(&[("Circuit", 2), ("Gold Bar", 1), ("Mystery Dust", 3)]),
        )
        .item("Circuit", recipe(&[("Copper Bar", 5), ("Silicon", 2)]))
        .alloy("Gold Bar", recipe(&[("Gold", 10)]))
        .alloy("Copper Bar", recipe(&[("Copper", 5)]))
        .base_materials(["Silicon", "Gold", "Copper"])
        .build()
        .expect("smart chip catalog")
}

/// `X = 1 Y`, `Y = 1 X + 2 Iron`. Iron is a base material.
pub fn cyclic_catalog() -> Catalog {
    Catalog::builder()
        .item("X", recipe(&[("Y", 1)]))
        .item("Y", recipe(&[("X", 1), ("Iron", 2)]))
        .base_material("Iron")
        .build()
        .expect("cyclic catalog")
}

/// A recipe that lists itself as a component.
pub fn self_referencing_catalog() -> Catalog {
    Catalog::builder()
        .alloy("Mirror Alloy", recipe(&[("Mirror Alloy", 1), ("Silver", 4)]))
        .base_material("Silver")
        .build()
        .expect("self-referencing catalog")
}

/// Projects with a linear chain, a diamond, a cycle, and a dangling
/// prerequisite.
///
/// ```text
/// Linear:   A <- B <- C
/// Diamond:  A <- B, {A, B} <- D
/// Cycle:    Loop One <-> Loop Two
/// Dangling: Orphan <- Missing (not a project)
/// ```
pub fn project_catalog() -> Catalog {
    Catalog::builder()
        .project("A", project(&[("Iron Bar", 10)], &[]))
        .project("B", project(&[("Iron Bar", 5), ("Copper Bar", 2)], &["A"]))
        .project("C", project(&[("Circuit", 1)], &["B"]))
        .project("D", project(&[("Copper Bar", 3)], &["A", "B"]))
        .project("Loop One", project(&[("Glass", 1)], &["Loop Two"]))
        .project("Loop Two", project(&[("Glass", 2)], &["Loop One"]))
        .project("Orphan", project(&[], &["Missing"]))
        .build()
        .expect("project catalog")
}

/// A straight chain of `depth` items, each needing `fan_out` of the next,
/// ending in a base material. Used for benchmarks.
pub fn deep_catalog(depth: usize, fan_out: Quantity) -> Catalog {
    let mut builder = Catalog::builder();
    for level in 0..depth {
        let next = if level + 1 == depth {
            "Ore".to_string()
        } else {
            format!("Part {}", level + 1)
        };
        builder = builder.item(format!("Part {level}"), recipe(&[(next.as_str(), fan_out)]));
    }
    builder.base_material("Ore").build().expect("deep catalog")
}

/// `width` items, each made from every one of `width` alloys, each alloy from
/// one ore. Used for benchmarks.
pub fn wide_catalog(width: usize) -> Catalog {
    let alloy_names: Vec<String> = (0..width).map(|i| format!("Alloy {i}")).collect();
    let mut builder = Catalog::builder();
    for (i, alloy) in alloy_names.iter().enumerate() {
        builder = builder
            .alloy(alloy.clone(), recipe(&[(format!("Ore {i}").as_str(), 3)]))
            .base_material(format!("Ore {i}"));
    }
    let shared: Recipe = alloy_names.iter().map(|n| (n.clone(), 2)).collect();
    for i in 0..width {
        builder = builder.item(format!("Widget {i}"), shared.clone());
    }
    builder.build().expect("wide catalog")
}
