use std::path::Path;

use serde::Serialize;

use super::Catalog;
use crate::{error::SyncError, extract::ExtractionResult};

/// Keys of `old` that extraction no longer finds, in key order.
pub fn stale_keys(old: &Catalog, extracted: &ExtractionResult) -> Vec<String> {
    old.keys()
        .filter(|key| !extracted.contains(key))
        .cloned()
        .collect()
}

/// Builds the updated catalog.
///
/// Every extracted key is present. Existing translations win over the
/// placeholder; keys that are no longer extracted are dropped.
pub fn merge(old: &Catalog, extracted: &ExtractionResult) -> Catalog {
    let mut updated = extracted.to_catalog();
    for (key, value) in old {
        if let Some(slot) = updated.get_mut(key) {
            *slot = value.clone();
        }
    }
    updated
}

/// Parses catalog file content. The root must be an object of strings.
pub fn parse_catalog(path: &Path, content: &str) -> Result<Catalog, SyncError> {
    serde_json::from_str(content).map_err(|err| SyncError::CatalogParse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Pretty-prints with two-space indentation and a trailing newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, SyncError> {
    let content = serde_json::to_string_pretty(value)?;
    Ok(format!("{}\n", content))
}

/// Derives the locale from a catalog file name.
///
/// Examples:
/// - "fr.json" -> Some("fr")
/// - "/path/to/lang/pt-BR.json" -> Some("pt-BR")
///
/// Non-UTF-8 names are converted lossily; only a path without a file name
/// yields `None`.
pub fn locale_name(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
}
