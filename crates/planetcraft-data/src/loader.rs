//! Loading pipeline: reads catalog tables from a directory and assembles an
//! immutable [`Catalog`].
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers, plus [`load_catalog`], the single entry point
//! game code calls before any resolution.

use planetcraft_core::{Catalog, CatalogError, ProjectEntry};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::schema::*;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The builder refused the assembled tables. Table rows are keyed by
    /// name, so data read from disk never triggers this.
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// On-disk encodings accepted for catalog tables and the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    /// Probe order when looking for a table. Also the set of accepted
    /// extensions.
    const ALL: [(&'static str, Format); 3] = [
        ("ron", Format::Ron),
        ("toml", Format::Toml),
        ("json", Format::Json),
    ];
}

/// Map a table path such as `items_data.toml` to its [`Format`].
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .iter()
        .find(|(known, _)| Some(*known) == ext)
        .map(|(_, format)| *format)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Locate the catalog table called `table` (for example `alloys_data`) in
/// `dir`, whichever encoding it was saved in.
///
/// `Ok(None)` means the table is absent. Two encodings of the same table
/// are a [`DataLoadError::ConflictingFormats`], since either could be stale.
pub fn find_data_file(dir: &Path, table: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut present = Format::ALL
        .iter()
        .map(|(ext, _)| dir.join(format!("{table}.{ext}")))
        .filter(|candidate| candidate.exists());

    match (present.next(), present.next()) {
        (Some(a), Some(b)) => Err(DataLoadError::ConflictingFormats { a, b }),
        (found, _) => Ok(found),
    }
}

/// Locate one of the three tables a catalog cannot be built without.
pub fn require_data_file(dir: &Path, table: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, table)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: table.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` in the given format. `origin` is only used for
/// error messages.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    origin: &Path,
) -> Result<T, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: origin.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(file = %path.display(), ?format, "reading data file");
    deserialize_str(&content, format, path)
}

/// Read the base material list. TOML files hold it under `materials`; RON
/// and JSON files hold a bare list.
pub fn deserialize_base_materials(path: &Path) -> Result<Vec<String>, DataLoadError> {
    match detect_format(path)? {
        Format::Toml => deserialize_file::<TomlBaseMaterials>(path).map(|w| w.materials),
        _ => deserialize_file(path),
    }
}

// ===========================================================================
// Catalog assembly
// ===========================================================================

/// Load the catalog stored in `dir`.
///
/// Reads the optional manifest (`catalog.{ron,json,toml}`) first, then the
/// three required tables and the optional base material list it names.
pub fn load_catalog(dir: &Path) -> Result<Catalog, DataLoadError> {
    let manifest = match find_data_file(dir, "catalog")? {
        Some(path) => deserialize_file(&path)?,
        None => CatalogManifest::default(),
    };
    load_catalog_with(dir, &manifest)
}

/// Load the catalog stored in `dir` using an explicit manifest.
pub fn load_catalog_with(dir: &Path, manifest: &CatalogManifest) -> Result<Catalog, DataLoadError> {
    let items: RecipeTable = deserialize_file(&require_data_file(dir, &manifest.items)?)?;
    let alloys: RecipeTable = deserialize_file(&require_data_file(dir, &manifest.alloys)?)?;
    let projects: ProjectTable = deserialize_file(&require_data_file(dir, &manifest.projects)?)?;

    let listed = match find_data_file(dir, &manifest.base_materials)? {
        Some(path) => deserialize_base_materials(&path)?,
        None => {
            if !manifest.infer_base_materials && manifest.extra_base_materials.is_empty() {
                tracing::warn!(
                    dir = %dir.display(),
                    file = %manifest.base_materials,
                    "no base material list; every leaf will be reported as unresolved"
                );
            }
            Vec::new()
        }
    };

    let catalog = assemble(items, alloys, projects, listed, manifest)?;

    tracing::info!(
        dir = %dir.display(),
        items = catalog.item_count(),
        alloys = catalog.alloy_count(),
        projects = catalog.project_count(),
        base_materials = catalog.base_material_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Build a catalog from already-parsed tables.
pub fn assemble(
    items: RecipeTable,
    alloys: RecipeTable,
    projects: ProjectTable,
    base_materials: Vec<String>,
    manifest: &CatalogManifest,
) -> Result<Catalog, DataLoadError> {
    let mut builder = Catalog::builder();
    for (name, recipe) in items {
        builder = builder.item(name, recipe);
    }
    for (name, recipe) in alloys {
        builder = builder.alloy(name, recipe);
    }
    for (name, data) in projects {
        builder = builder.project(name, project_entry(data));
    }

    if manifest.infer_base_materials {
        let inferred = builder.leaf_components();
        tracing::debug!(count = inferred.len(), "inferred base materials");
        builder = builder.base_materials(inferred);
    }

    let catalog = builder
        .base_materials(base_materials)
        .base_materials(manifest.extra_base_materials.iter().cloned())
        .build()?;
    Ok(catalog)
}

fn project_entry(data: ProjectData) -> ProjectEntry {
    ProjectEntry {
        requires: data.requires,
        prerequisites: data.prerequisites.unwrap_or_default(),
        description: data.description.filter(|d| !d.is_empty()),
        notes: data.notes.filter(|n| !n.is_empty()),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
