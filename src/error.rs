//! Error types for catalog synchronization.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures that abort a synchronization run.
///
/// Stale keys are not errors; they are reported through
/// [`SyncObserver`](crate::catalog::SyncObserver) and the run continues.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A catalog file is not a JSON object of string values.
    #[error("Failed to parse catalog {}: {reason}", .path.display())]
    CatalogParse { path: PathBuf, reason: String },

    /// Two catalog files resolve to the same locale (ignoring ASCII case).
    #[error(
        "Catalogs {} and {} both map to locale '{locale}'",
        .first.display(),
        .second.display()
    )]
    LocaleCollision {
        locale: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A listed catalog path has no file name to derive a locale from.
    #[error("Cannot derive a locale from catalog path {}", .path.display())]
    InvalidCatalogName { path: PathBuf },

    #[error("Failed to list catalogs in {}: {reason}", .dir.display())]
    ListCatalogs { dir: PathBuf, reason: String },

    #[error("Failed to read catalog {}", .path.display())]
    ReadCatalog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write catalog {}", .path.display())]
    WriteCatalog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize JSON")]
    Serialize(#[from] serde_json::Error),
}
