//! Quantity accumulators.
//!
//! A [`Tally`] maps material names to cumulative quantities. A [`Breakdown`]
//! groups the three tallies the recipe expander produces. Both merge
//! associatively and commutatively, so partial results computed for separate
//! components can be combined in any order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count of a material. Always positive in catalog data; arithmetic saturates
/// at `u64::MAX` rather than wrapping.
pub type Quantity = u64;

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Cumulative quantities keyed by material name. Iterates in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    entries: BTreeMap<String, Quantity>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` to the running total for `name`.
    pub fn add(&mut self, name: &str, quantity: Quantity) {
        match self.entries.get_mut(name) {
            Some(total) => *total = total.saturating_add(quantity),
            None => {
                self.entries.insert(name.to_string(), quantity);
            }
        }
    }

    /// Fold every entry of `other` into `self`.
    pub fn merge(&mut self, other: Tally) {
        if self.entries.is_empty() {
            self.entries = other.entries;
            return;
        }
        for (name, quantity) in other.entries {
            let total = self.entries.entry(name).or_insert(0);
            *total = total.saturating_add(quantity);
        }
    }

    /// Total recorded for `name`, or 0 if it never appeared.
    pub fn get(&self, name: &str) -> Quantity {
        self.entries.get(name).copied().unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every entry.
    pub fn total(&self) -> Quantity {
        self.entries
            .values()
            .fold(0, |acc: Quantity, q| acc.saturating_add(*q))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.entries.iter().map(|(name, q)| (name.as_str(), *q))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, Quantity)> for Tally {
    fn from_iter<I: IntoIterator<Item = (S, Quantity)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (name, quantity) in iter {
            let name = name.into();
            tally.add(&name, quantity);
        }
        tally
    }
}

impl IntoIterator for Tally {
    type Item = (String, Quantity);
    type IntoIter = std::collections::btree_map::IntoIter<String, Quantity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Breakdown
// ---------------------------------------------------------------------------

/// The categorized totals of a recipe expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Terminal materials known to the catalog's base material set.
    pub base_materials: Tally,
    /// Intermediate crafted items.
    pub used_items: Tally,
    /// Intermediate alloys.
    pub used_alloys: Tally,
}

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `other` into `self`, category by category.
    pub fn merge(&mut self, other: Breakdown) {
        self.base_materials.merge(other.base_materials);
        self.used_items.merge(other.used_items);
        self.used_alloys.merge(other.used_alloys);
    }

    /// Combine two breakdowns by value. Convenience for reductions.
    pub fn merged(mut self, other: Breakdown) -> Breakdown {
        self.merge(other);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.base_materials.is_empty() && self.used_items.is_empty() && self.used_alloys.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
