//! Serde data file structs for catalog tables.
//!
//! These structs define the on-disk format for item recipes, alloy recipes,
//! project entries, the base material list, and the catalog manifest. They
//! are deserialized from RON, JSON, or TOML files and then assembled into a
//! [`planetcraft_core::Catalog`] by the loader.

use serde::Deserialize;
use std::collections::BTreeMap;

// ===========================================================================
// Recipes
// ===========================================================================

/// Component name to quantity, exactly as stored.
pub type RecipeData = BTreeMap<String, u64>;

/// `items_data` / `alloys_data`: product name to recipe.
pub type RecipeTable = BTreeMap<String, RecipeData>;

// ===========================================================================
// Projects
// ===========================================================================

/// One entry of `project_data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub requires: RecipeData,
    #[serde(default)]
    pub prerequisites: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `project_data`: project name to entry.
pub type ProjectTable = BTreeMap<String, ProjectData>;

// ===========================================================================
// Base materials
// ===========================================================================

/// TOML wrapper for the base material list (`materials = [...]`). RON and
/// JSON files hold a bare list.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlBaseMaterials {
    pub materials: Vec<String>,
}

// ===========================================================================
// Manifest
// ===========================================================================

/// Optional `catalog.{ron,json,toml}` in a catalog directory. Every field
/// has a default, so an absent manifest and an empty one behave the same.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogManifest {
    /// Base name of the item recipe table.
    pub items: String,
    /// Base name of the alloy recipe table.
    pub alloys: String,
    /// Base name of the project table.
    pub projects: String,
    /// Base name of the (optional) base material list.
    pub base_materials: String,
    /// Treat every recipe component with no recipe of its own as a base
    /// material.
    pub infer_base_materials: bool,
    /// Names added to the base material set on top of the list file.
    pub extra_base_materials: Vec<String>,
}

impl Default for CatalogManifest {
    fn default() -> Self {
        Self {
            items: "items_data".to_string(),
            alloys: "alloys_data".to_string(),
            projects: "project_data".to_string(),
            base_materials: "base_materials".to_string(),
            infer_base_materials: false,
            extra_base_materials: Vec::new(),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_table_from_json() {
        let table: RecipeTable =
            serde_json::from_str(r#"{"Circuit": {"Copper Bar": 5, "Silicon": 2}}"#).unwrap();
        assert_eq!(table["Circuit"]["Copper Bar"], 5);
        assert_eq!(table["Circuit"].len(), 2);
    }

    #[test]
    fn recipe_table_from_toml() {
        let table: RecipeTable = toml::from_str(
            r#"
[Circuit]
"Copper Bar" = 5
Silicon = 2
"#,
        )
        .unwrap();
        assert_eq!(table["Circuit"]["Silicon"], 2);
    }

    #[test]
    fn project_from_ron_with_all_fields() {
        let table: ProjectTable = ron::from_str(
            r#"{
                "Telescope": (
                    requires: {"Lens": 3},
                    prerequisites: Some(["Observatory"]),
                    description: Some("Finds new planets."),
                    notes: Some("Unlocks sector 2."),
                ),
            }"#,
        )
        .unwrap();
        let telescope = &table["Telescope"];
        assert_eq!(telescope.requires["Lens"], 3);
        assert_eq!(
            telescope.prerequisites.as_deref(),
            Some(&["Observatory".to_string()][..])
        );
        assert_eq!(telescope.description.as_deref(), Some("Finds new planets."));
        assert_eq!(telescope.notes.as_deref(), Some("Unlocks sector 2."));
    }

    #[test]
    fn project_from_json_with_only_requires() {
        let table: ProjectTable =
            serde_json::from_str(r#"{"Beacon": {"requires": {"Iron Bar": 20}}}"#).unwrap();
        let beacon = &table["Beacon"];
        assert!(beacon.prerequisites.is_none());
        assert!(beacon.description.is_none());
    }

    #[test]
    fn manifest_defaults_fill_missing_fields() {
        let manifest: CatalogManifest = toml::from_str("infer_base_materials = true").unwrap();
        assert!(manifest.infer_base_materials);
        assert_eq!(manifest.items, "items_data");
        assert_eq!(manifest.projects, "project_data");
        assert!(manifest.extra_base_materials.is_empty());
    }

    #[test]
    fn manifest_from_ron() {
        let manifest: CatalogManifest = ron::from_str(
            r#"(items: "crafted", alloys: "smelted", extra_base_materials: ["Iron"])"#,
        )
        .unwrap();
        assert_eq!(manifest.items, "crafted");
        assert_eq!(manifest.alloys, "smelted");
        assert_eq!(manifest.base_materials, "base_materials");
        assert_eq!(manifest.extra_base_materials, vec!["Iron"]);
    }
}
