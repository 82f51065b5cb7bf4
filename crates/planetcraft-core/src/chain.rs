//! Prerequisite chain resolution.
//!
//! Turns a project's prerequisite graph into a linear build order: every
//! prerequisite comes before the projects that need it, each project appears
//! once, and the requested project comes last.
//!
//! Unlike the recipe expander, which guards only the current path, the
//! resolver remembers every project it has entered during the call. A project
//! reached a second time (through a diamond or a cycle) is not expanded
//! again.

use crate::catalog::Catalog;
use std::collections::HashSet;

/// Resolve the ordered, deduplicated build chain ending in `project`.
///
/// Unknown projects yield an empty chain. Unknown prerequisites are dropped.
pub fn resolve_chain(catalog: &Catalog, project: &str) -> Vec<String> {
    let mut visited = HashSet::new();
    let chain = visit(catalog, project, &mut visited);
    let chain = dedup_preserving_order(chain);
    tracing::debug!(project, len = chain.len(), "resolved prerequisite chain");
    chain
}

fn visit(catalog: &Catalog, project: &str, visited: &mut HashSet<String>) -> Vec<String> {
    let Some(entry) = catalog.project(project) else {
        return Vec::new();
    };
    if !visited.insert(project.to_string()) {
        return Vec::new();
    }

    let mut chain = Vec::new();
    for prereq in &entry.prerequisites {
        if visited.contains(prereq) {
            continue;
        }
        chain.extend(visit(catalog, prereq, visited));
    }
    chain.push(project.to_string());
    chain
}

fn dedup_preserving_order(chain: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(chain.len());
    chain
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
