//! Catalog data model and document loading.
//!
//! A catalog is a flat list of [`CatalogRecord`]s parsed from a JSON
//! document of the form `{"data": {"products": [...]}}`. Records are built
//! once per load and never mutated by the query or statistics engines.

mod document;
mod types;

pub use document::{load_catalog, parse_catalog, save_catalog, CatalogDocument};
pub use types::*;

use thiserror::Error;

/// Errors for loading, saving and fetching catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Remote source returned a non-success status.
    #[error("Catalog source error: {status} - {message}")]
    Http { status: u16, message: String },
}
