//! Load-time data integrity failures.
//!
//! These are the only errors the catalog core produces. Filtering and facet
//! extraction are total, so everything here is raised while a catalog is
//! being loaded and never once it is in use.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog {path} failed schema validation:\n{details}")]
    Schema { path: PathBuf, details: String },

    #[error("schema_version '{found}' not in allowed set {allowed:?}")]
    UnsupportedVersion { found: String, allowed: Vec<String> },

    #[error("record #{position} ({name}) is missing required field '{field}'")]
    MissingField {
        position: usize,
        name: String,
        field: &'static str,
    },
}
