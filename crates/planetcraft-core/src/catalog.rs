//! The read-only recipe catalog.
//!
//! A [`Catalog`] holds three independent lookup tables (item recipes, alloy
//! recipes, project entries) plus the set of names known to be base
//! materials. It is assembled once through [`CatalogBuilder`] and never
//! mutated afterwards, so it can be shared freely between threads.

use crate::tally::Quantity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

/// Component name to quantity. Ordered so expansion traces are deterministic.
pub type Recipe = BTreeMap<String, Quantity>;

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// A buildable project: its direct material cost and the projects that must
/// be completed before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Materials consumed directly by this project.
    #[serde(default)]
    pub requires: Recipe,

    /// Projects that must be built first, in the order the data lists them.
    /// Empty means no prerequisites.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ProjectEntry {
    pub fn new(requires: Recipe) -> Self {
        Self {
            requires,
            ..Self::default()
        }
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The four mutually exclusive outcomes of looking a name up in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Crafted item with a recipe.
    Item(&'a Recipe),
    /// Smelted alloy with a recipe.
    Alloy(&'a Recipe),
    /// No recipe, but a known terminal material.
    BaseMaterial,
    /// No recipe and not a known base material.
    Unresolved,
}

/// Which table a registered name belongs to. Used in builder errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Item,
    Alloy,
    Project,
    BaseMaterial,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntryKind::Item => "item",
            EntryKind::Alloy => "alloy",
            EntryKind::Project => "project",
            EntryKind::BaseMaterial => "base material",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by builder misuse. Imperfect recipe data never fails a
/// build, and resolution itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} '{name}' registered twice")]
    DuplicateName { kind: EntryKind, name: String },
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects catalog tables, then tidies and freezes them with [`build`].
///
/// [`build`]: CatalogBuilder::build
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    items: HashMap<String, Recipe>,
    alloys: HashMap<String, Recipe>,
    projects: HashMap<String, ProjectEntry>,
    base_materials: HashSet<String>,
    duplicates: Vec<(EntryKind, String)>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a crafted item's recipe.
    pub fn item(mut self, name: impl Into<String>, recipe: Recipe) -> Self {
        let name = name.into();
        if self.items.contains_key(&name) {
            self.duplicates.push((EntryKind::Item, name.clone()));
        }
        self.items.insert(name, recipe);
        self
    }

    /// Register an alloy's recipe.
    pub fn alloy(mut self, name: impl Into<String>, recipe: Recipe) -> Self {
        let name = name.into();
        if self.alloys.contains_key(&name) {
            self.duplicates.push((EntryKind::Alloy, name.clone()));
        }
        self.alloys.insert(name, recipe);
        self
    }

    /// Register a project entry.
    pub fn project(mut self, name: impl Into<String>, entry: ProjectEntry) -> Self {
        let name = name.into();
        if self.projects.contains_key(&name) {
            self.duplicates.push((EntryKind::Project, name.clone()));
        }
        self.projects.insert(name, entry);
        self
    }

    /// Mark a name as a terminal base material. Repeats are harmless.
    pub fn base_material(mut self, name: impl Into<String>) -> Self {
        self.base_materials.insert(name.into());
        self
    }

    pub fn base_materials<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_materials
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Names referenced as components by item or alloy recipes that have no
    /// recipe of their own and are not projects.
    pub fn leaf_components(&self) -> BTreeSet<String> {
        self.items
            .values()
            .chain(self.alloys.values())
            .flat_map(|recipe| recipe.keys())
            .filter(|name| {
                !self.items.contains_key(*name)
                    && !self.alloys.contains_key(*name)
                    && !self.projects.contains_key(*name)
            })
            .cloned()
            .collect()
    }

    /// Freeze the catalog.
    ///
    /// Recipe lines with quantity 0 are dropped. A name present in both the
    /// item and alloy tables is kept in both and resolves as an item. Both
    /// cases are logged at warn level and never fail the build.
    pub fn build(mut self) -> Result<Catalog, CatalogError> {
        if let Some((kind, name)) = self.duplicates.into_iter().next() {
            return Err(CatalogError::DuplicateName { kind, name });
        }

        let mut overlaps: Vec<&String> = self
            .items
            .keys()
            .filter(|n| self.alloys.contains_key(*n))
            .collect();
        overlaps.sort_unstable();
        for name in overlaps {
            tracing::warn!(name = %name, "listed as both item and alloy; item recipe wins");
        }

        let recipes = self
            .items
            .iter_mut()
            .chain(self.alloys.iter_mut())
            .chain(self.projects.iter_mut().map(|(n, p)| (n, &mut p.requires)));
        for (owner, recipe) in recipes {
            recipe.retain(|component, quantity| {
                if *quantity == 0 {
                    tracing::warn!(owner = %owner, component = %component, "dropping zero-quantity recipe line");
                }
                *quantity > 0
            });
        }

        tracing::debug!(
            items = self.items.len(),
            alloys = self.alloys.len(),
            projects = self.projects.len(),
            base_materials = self.base_materials.len(),
            "catalog built"
        );

        Ok(Catalog {
            items: self.items,
            alloys: self.alloys,
            projects: self.projects,
            base_materials: self.base_materials,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable recipe catalog. Frozen by [`CatalogBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, Recipe>,
    alloys: HashMap<String, Recipe>,
    projects: HashMap<String, ProjectEntry>,
    base_materials: HashSet<String>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Classify a name. Item recipes are consulted first, then alloy
    /// recipes, then the base material set.
    pub fn classify(&self, name: &str) -> Classification<'_> {
        if let Some(recipe) = self.items.get(name) {
            Classification::Item(recipe)
        } else if let Some(recipe) = self.alloys.get(name) {
            Classification::Alloy(recipe)
        } else if self.base_materials.contains(name) {
            Classification::BaseMaterial
        } else {
            Classification::Unresolved
        }
    }

    pub fn item_recipe(&self, name: &str) -> Option<&Recipe> {
        self.items.get(name)
    }

    pub fn alloy_recipe(&self, name: &str) -> Option<&Recipe> {
        self.alloys.get(name)
    }

    pub fn project(&self, name: &str) -> Option<&ProjectEntry> {
        self.projects.get(name)
    }

    pub fn is_base_material(&self, name: &str) -> bool {
        self.base_materials.contains(name)
    }

    /// Project names in sorted order, for selection lists.
    pub fn project_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.projects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn alloy_count(&self) -> usize {
        self.alloys.len()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn base_material_count(&self) -> usize {
        self.base_materials.len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::recipe;

    #[test]
    fn classify_covers_all_four_outcomes() {
        let catalog = Catalog::builder()
            .item("Circuit", recipe(&[("Copper Bar", 5)]))
            .alloy("Copper Bar", recipe(&[("Copper", 10)]))
            .base_material("Copper")
            .build()
            .unwrap();

        assert!(matches!(catalog.classify("Circuit"), Classification::Item(_)));
        assert!(matches!(
            catalog.classify("Copper Bar"),
            Classification::Alloy(_)
        ));
        assert_eq!(catalog.classify("Copper"), Classification::BaseMaterial);
        assert_eq!(catalog.classify("Unobtainium"), Classification::Unresolved);
    }

    #[test]
    fn recipe_beats_base_material_membership() {
        let catalog = Catalog::builder()
            .alloy("Iron Bar", recipe(&[("Iron", 5)]))
            .base_materials(["Iron", "Iron Bar"])
            .build()
            .unwrap();

        assert!(matches!(
            catalog.classify("Iron Bar"),
            Classification::Alloy(_)
        ));
    }

    #[test]
    fn project_names_are_sorted() {
        let catalog = Catalog::builder()
            .project("Telescope", ProjectEntry::default())
            .project("Asteroid Miner", ProjectEntry::default())
            .project("Beacon", ProjectEntry::default())
            .build()
            .unwrap();

        assert_eq!(
            catalog.project_names(),
            vec!["Asteroid Miner", "Beacon", "Telescope"]
        );
    }

    #[test]
    fn build_rejects_duplicate_item() {
        let result = Catalog::builder()
            .item("Battery", recipe(&[("Lead Bar", 1)]))
            .item("Battery", recipe(&[("Lead Bar", 2)]))
            .build();

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateName { kind: EntryKind::Item, ref name }) if name == "Battery"
        ));
    }

    #[test]
    fn item_alloy_overlap_builds_and_resolves_as_item() {
        let catalog = Catalog::builder()
            .item("Steel Bar", recipe(&[("Iron", 1)]))
            .alloy("Steel Bar", recipe(&[("Iron Bar", 1)]))
            .item("Circuit", recipe(&[("Steel Bar", 2)]))
            .build()
            .unwrap();

        assert_eq!(
            catalog.classify("Steel Bar"),
            Classification::Item(&recipe(&[("Iron", 1)]))
        );
        assert!(catalog.alloy_recipe("Steel Bar").is_some());
        assert!(matches!(catalog.classify("Circuit"), Classification::Item(_)));
    }

    #[test]
    fn zero_quantity_lines_are_dropped() {
        let catalog = Catalog::builder()
            .alloy("Iron Bar", recipe(&[("Iron", 0), ("Coal", 2)]))
            .project(
                "Launch Pad",
                ProjectEntry::new(recipe(&[("Steel Bar", 0), ("Circuit", 3)])),
            )
            .build()
            .unwrap();

        assert_eq!(catalog.alloy_recipe("Iron Bar"), Some(&recipe(&[("Coal", 2)])));
        assert_eq!(
            catalog.project("Launch Pad").unwrap().requires,
            recipe(&[("Circuit", 3)])
        );
    }

    #[test]
    fn leaf_components_excludes_craftables_and_projects() {
        let builder = Catalog::builder()
            .item("Circuit", recipe(&[("Copper Bar", 5), ("Silicon", 2)]))
            .alloy("Copper Bar", recipe(&[("Copper", 10)]));

        let leaves: Vec<String> = builder.leaf_components().into_iter().collect();
        assert_eq!(leaves, vec!["Copper".to_string(), "Silicon".to_string()]);
    }

    #[test]
    fn project_entry_deserializes_with_optional_fields_missing() {
        let entry: ProjectEntry =
            serde_json::from_str(r#"{"requires": {"Steel Bar": 10}}"#).unwrap();
        assert_eq!(entry.requires.get("Steel Bar"), Some(&10));
        assert!(entry.prerequisites.is_empty());
        assert!(entry.description.is_none());
        assert!(entry.notes.is_none());
    }

    #[test]
    fn error_display_messages() {
        let e = CatalogError::DuplicateName {
            kind: EntryKind::BaseMaterial,
            name: "Iron".to_string(),
        };
        assert_eq!(format!("{e}"), "base material 'Iron' registered twice");
    }
}
