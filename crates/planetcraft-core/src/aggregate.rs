//! Requirement aggregation over a project chain.
//!
//! [`aggregate`] sums the direct `requires` lines of every project in a
//! chain, one level deep. [`plan_project`] ties the pieces together: chain,
//! flat totals, and the full expansion of those totals.

use crate::catalog::{Catalog, Recipe};
use crate::chain::resolve_chain;
use crate::expand::{RequirementBreakdown, expand_requirements};
use crate::tally::Tally;
use serde::{Deserialize, Serialize};

/// Sum each project's direct requirements. Sub-recipes are not expanded.
///
/// Unknown projects contribute nothing. Order does not matter; a project
/// listed twice is counted twice.
pub fn aggregate<S: AsRef<str>>(catalog: &Catalog, chain: &[S]) -> Tally {
    let mut totals = Tally::new();
    for name in chain {
        let Some(entry) = catalog.project(name.as_ref()) else {
            continue;
        };
        for (material, qty) in &entry.requires {
            totals.add(material, *qty);
        }
    }
    totals
}

/// Everything needed to build a project from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPlan {
    pub project: String,
    /// Build order, prerequisites first, ending in `project`.
    pub chain: Vec<String>,
    /// Direct requirements summed across the chain.
    pub totals: Tally,
    /// Full multi-level expansion of `totals`.
    pub breakdown: RequirementBreakdown,
}

/// Resolve `project`'s chain, sum its requirements, and expand the sum.
/// An unknown project produces an empty plan.
pub fn plan_project(catalog: &Catalog, project: &str) -> ProjectPlan {
    let chain = resolve_chain(catalog, project);
    let totals = aggregate(catalog, &chain);
    let requirements: Recipe = totals.iter().map(|(n, q)| (n.to_string(), q)).collect();
    let breakdown = expand_requirements(catalog, &requirements);

    ProjectPlan {
        project: project.to_string(),
        chain,
        totals,
        breakdown,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
