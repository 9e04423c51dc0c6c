//! Locale catalogs and their synchronization with extracted keys.
//!
//! - `merge`: pure functions over in-memory catalogs (parse, merge, stale keys)
//! - `store`: the I/O boundary, listing, reading and writing catalog files
//! - `sync`: the per-catalog pipeline and the combined report

use std::collections::BTreeMap;

mod merge;
mod store;
mod sync;

pub use merge::{locale_name, merge, parse_catalog, render_json, stale_keys};
pub use store::{CatalogStore, FsCatalogStore, MemoryCatalogStore};
pub use sync::{MergeReport, StaleKeyWarning, SyncObserver, SyncOutcome, Synchronizer};

/// Translation key to translated value (or the placeholder).
///
/// Keys are kept sorted so written files diff cleanly.
pub type Catalog = BTreeMap<String, String>;
