//! Recipe expansion.
//!
//! Expands a requested item, alloy or material into its full production tree,
//! multiplying quantities through every level and tallying what was used by
//! category. Each call returns its own [`Breakdown`]; parents merge the
//! breakdowns of their children, so nothing is shared or mutated across
//! branches.
//!
//! # Cycle guard
//!
//! The expander tracks the names on the current path from the root
//! ([`ExpansionPath`]). A name that is already an ancestor is recorded as a
//! [`NodeKind::CycleTruncated`] leaf and contributes nothing to the
//! breakdown. Materials consumed inside the cyclic portion are therefore
//! under-counted; the truncation is visible in the trace.

use crate::catalog::{Catalog, Classification, Recipe};
use crate::tally::{Breakdown, Quantity};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// Trace
// ---------------------------------------------------------------------------

/// How a node in the expansion trace was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Item,
    Alloy,
    BaseMaterial,
    /// Neither a recipe nor a known base material. Counted nowhere.
    Unresolved,
    /// Already an ancestor on this path. Expansion stopped here.
    CycleTruncated,
}

/// One node of the expansion trace, suitable for hierarchical display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionNode {
    pub name: String,
    pub quantity: Quantity,
    pub kind: NodeKind,
    pub children: Vec<ExpansionNode>,
}

impl ExpansionNode {
    fn leaf(name: &str, quantity: Quantity, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            kind,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels in this subtree, counting this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Visit this node and every descendant in pre-order, with depth
    /// (0 for `self`).
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&ExpansionNode, usize),
    {
        self.walk_at(0, f);
    }

    fn walk_at<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&ExpansionNode, usize),
    {
        f(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, f);
        }
    }

    /// Distinct unresolved names in this subtree, in first-seen order.
    pub fn unresolved_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        collect_kind(self, NodeKind::Unresolved, &mut seen, &mut names);
        names
    }

    /// Distinct names where a cycle cut expansion short, in first-seen order.
    pub fn truncated_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        collect_kind(self, NodeKind::CycleTruncated, &mut seen, &mut names);
        names
    }
}

fn collect_kind<'a>(
    node: &'a ExpansionNode,
    kind: NodeKind,
    seen: &mut HashSet<&'a str>,
    out: &mut Vec<&'a str>,
) {
    if node.kind == kind && seen.insert(node.name.as_str()) {
        out.push(node.name.as_str());
    }
    for child in &node.children {
        collect_kind(child, kind, seen, out);
    }
}

// ---------------------------------------------------------------------------
// Path guard
// ---------------------------------------------------------------------------

/// The names currently on the stack between the root and the node being
/// expanded. Ordered for inspection, counted for lookups so a name pushed
/// twice stays a member until both entries are popped.
#[derive(Debug, Clone, Default)]
pub struct ExpansionPath {
    stack: Vec<String>,
    members: HashMap<String, usize>,
}

impl ExpansionPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn push(&mut self, name: &str) {
        self.stack.push(name.to_string());
        *self.members.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Remove the innermost name. Returns it, or `None` on an empty path.
    pub fn pop(&mut self) -> Option<String> {
        let name = self.stack.pop()?;
        if let Some(count) = self.members.get_mut(&name) {
            *count -= 1;
            if *count == 0 {
                self.members.remove(&name);
            }
        }
        Some(name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// The outcome of expanding one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionResult {
    pub trace: ExpansionNode,
    pub breakdown: Breakdown,
}

/// The outcome of expanding a whole requirement mapping: one trace root per
/// top-level component, in the requirement's iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementBreakdown {
    pub trace: Vec<ExpansionNode>,
    pub breakdown: Breakdown,
}

impl RequirementBreakdown {
    /// Distinct unresolved names across every root, in first-seen order.
    pub fn unresolved_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        for root in &self.trace {
            collect_kind(root, NodeKind::Unresolved, &mut seen, &mut names);
        }
        names
    }
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// Expand `name` at `quantity` below the ancestors in `path`.
///
/// `path` is restored to its original contents before returning.
pub fn expand(
    catalog: &Catalog,
    name: &str,
    quantity: Quantity,
    path: &mut ExpansionPath,
) -> ExpansionResult {
    if path.contains(name) {
        tracing::debug!(name, depth = path.len(), "cycle detected, branch truncated");
        return ExpansionResult {
            trace: ExpansionNode::leaf(name, quantity, NodeKind::CycleTruncated),
            breakdown: Breakdown::new(),
        };
    }

    tracing::trace!(name, quantity, depth = path.len(), "expanding");

    match catalog.classify(name) {
        Classification::Item(recipe) => {
            let mut result = expand_recipe(catalog, name, quantity, recipe, NodeKind::Item, path);
            result.breakdown.used_items.add(name, quantity);
            result
        }
        Classification::Alloy(recipe) => {
            let mut result =
                expand_recipe(catalog, name, quantity, recipe, NodeKind::Alloy, path);
            result.breakdown.used_alloys.add(name, quantity);
            result
        }
        Classification::BaseMaterial => {
            let mut breakdown = Breakdown::new();
            breakdown.base_materials.add(name, quantity);
            ExpansionResult {
                trace: ExpansionNode::leaf(name, quantity, NodeKind::BaseMaterial),
                breakdown,
            }
        }
        Classification::Unresolved => {
            tracing::debug!(name, "unresolved component");
            ExpansionResult {
                trace: ExpansionNode::leaf(name, quantity, NodeKind::Unresolved),
                breakdown: Breakdown::new(),
            }
        }
    }
}

fn expand_recipe(
    catalog: &Catalog,
    name: &str,
    quantity: Quantity,
    recipe: &Recipe,
    kind: NodeKind,
    path: &mut ExpansionPath,
) -> ExpansionResult {
    path.push(name);

    let mut children = Vec::with_capacity(recipe.len());
    let mut breakdown = Breakdown::new();
    for (component, per_unit) in recipe {
        let child = expand(catalog, component, quantity.saturating_mul(*per_unit), path);
        breakdown.merge(child.breakdown);
        children.push(child.trace);
    }

    path.pop();

    ExpansionResult {
        trace: ExpansionNode {
            name: name.to_string(),
            quantity,
            kind,
            children,
        },
        breakdown,
    }
}

/// Expand every `(component, quantity)` of `requirements`, each from a fresh
/// path, and merge the results.
///
/// Trace roots follow the requirement's key order whether or not the
/// `parallel` feature is enabled.
pub fn expand_requirements(catalog: &Catalog, requirements: &Recipe) -> RequirementBreakdown {
    #[cfg(feature = "parallel")]
    let results = expand_each_parallel(catalog, requirements);

    #[cfg(not(feature = "parallel"))]
    let results = expand_each(catalog, requirements);

    let mut out = RequirementBreakdown {
        trace: Vec::with_capacity(results.len()),
        breakdown: Breakdown::new(),
    };
    for result in results {
        out.breakdown.merge(result.breakdown);
        out.trace.push(result.trace);
    }
    out
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn expand_each(catalog: &Catalog, requirements: &Recipe) -> Vec<ExpansionResult> {
    requirements
        .iter()
        .map(|(name, qty)| expand(catalog, name, *qty, &mut ExpansionPath::new()))
        .collect()
}

#[cfg(feature = "parallel")]
fn expand_each_parallel(catalog: &Catalog, requirements: &Recipe) -> Vec<ExpansionResult> {
    use rayon::prelude::*;
    let entries: Vec<(&String, &Quantity)> = requirements.iter().collect();
    entries
        .into_par_iter()
        .map(|(name, qty)| expand(catalog, name, *qty, &mut ExpansionPath::new()))
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
