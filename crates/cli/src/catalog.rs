//! Catalog loading.
//!
//! The catalog is a JSON array of catalog entries. A copy is bundled into the
//! binary so the CLI works without any setup.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use storefront_core::{CatalogEntry, ProductId};
use thiserror::Error;

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

/// Load the catalog from `path`, or the bundled catalog when `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a catalog, or lists
/// the same product id twice.
pub fn load(path: Option<&Path>) -> Result<Vec<CatalogEntry>, CatalogError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "Loading catalog");
            parse(&raw)
        }
        None => parse(BUNDLED_CATALOG),
    }
}

/// Parse a catalog, rejecting duplicate ids.
///
/// # Errors
///
/// Returns an error if `raw` is not a catalog or repeats a product id.
pub fn parse(raw: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        if !seen.insert(&entry.id) {
            return Err(CatalogError::DuplicateId(entry.id.clone()));
        }
    }
    Ok(entries)
}
