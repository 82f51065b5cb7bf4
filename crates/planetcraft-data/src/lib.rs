//! Data-loading collaborator for Planetcraft.
//!
//! Reads the item, alloy and project tables (plus an optional base material
//! list and manifest) from a directory of RON, JSON or TOML files and
//! freezes them into a [`planetcraft_core::Catalog`].

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, load_catalog, load_catalog_with};
pub use schema::CatalogManifest;
