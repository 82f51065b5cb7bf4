//! Planetcraft Core -- recipe dependency resolution for resource-production
//! games.
//!
//! Given a read-only [`catalog::Catalog`] of item recipes, alloy recipes,
//! projects and base materials, this crate answers two questions:
//!
//! 1. **What does it take to make this?** [`expand::expand_requirements`]
//!    expands a requirement mapping through every recipe level, multiplying
//!    quantities, and tallies base materials, intermediate items and
//!    intermediate alloys separately. It also returns a trace tree for
//!    display.
//! 2. **What must be built first?** [`chain::resolve_chain`] linearizes a
//!    project's prerequisites into a deduplicated build order, and
//!    [`aggregate::aggregate`] sums the direct requirements of that chain.
//!
//! Resolution never fails. Unknown names become unresolved leaves, recipe
//! cycles become truncated leaves, unknown projects become empty chains.
//!
//! ```rust,ignore
//! let plan = aggregate::plan_project(&catalog, "Launch Pad");
//! for project in &plan.chain { println!("{project}"); }
//! for (name, qty) in plan.breakdown.breakdown.base_materials.iter() { ... }
//! ```
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- Immutable lookup tables, built via
//!   [`catalog::CatalogBuilder`].
//! - [`catalog::Classification`] -- Item, Alloy, BaseMaterial or Unresolved.
//! - [`expand::ExpansionNode`] -- One node of the expansion trace.
//! - [`tally::Breakdown`] -- The three categorized tallies.
//! - [`aggregate::ProjectPlan`] -- Chain, flat totals and full expansion.
//!
//! # Features
//!
//! - `parallel` -- expand top-level requirements on the rayon thread pool.
//! - `test-utils` -- fixture catalogs for tests and benchmarks.

pub mod aggregate;
pub mod catalog;
pub mod chain;
pub mod expand;
pub mod tally;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{ProjectPlan, aggregate, plan_project};
pub use catalog::{
    Catalog, CatalogBuilder, CatalogError, Classification, EntryKind, ProjectEntry, Recipe,
};
pub use chain::resolve_chain;
pub use expand::{
    ExpansionNode, ExpansionPath, ExpansionResult, NodeKind, RequirementBreakdown, expand,
    expand_requirements,
};
pub use tally::{Breakdown, Quantity, Tally};
