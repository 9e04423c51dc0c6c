use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Serialize;

use super::{Catalog, CatalogStore, locale_name, merge, parse_catalog, render_json, stale_keys};
use crate::{error::SyncError, extract::ExtractionResult};

/// Keys a catalog still holds that extraction no longer finds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleKeyWarning {
    pub path: PathBuf,
    pub keys: Vec<String>,
}

/// Merged catalogs of a run, keyed by locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergeReport {
    catalogs: BTreeMap<String, Catalog>,
}

impl MergeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locale: impl Into<String>, catalog: Catalog) -> Option<Catalog> {
        self.catalogs.insert(locale.into(), catalog)
    }

    pub fn get(&self, locale: &str) -> Option<&Catalog> {
        self.catalogs.get(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    pub fn to_json(&self) -> Result<String, SyncError> {
        render_json(self)
    }
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    pub report: MergeReport,
    pub warnings: Vec<StaleKeyWarning>,
    /// Catalog files that were overwritten. Empty on a dry run.
    pub written: Vec<PathBuf>,
}

/// Receives progress while catalogs are processed.
///
/// Callbacks fire as each catalog is handled, so output for earlier catalogs
/// is already emitted if a later one fails.
pub trait SyncObserver {
    fn stale_keys(&mut self, _warning: &StaleKeyWarning) {}

    fn catalog_synced(&mut self, _locale: &str, _path: &Path, _catalog: &Catalog, _written: bool) {
    }
}

impl SyncObserver for () {}

/// Runs list -> read -> merge -> write over every catalog of a store.
pub struct Synchronizer<'a, S: CatalogStore> {
    store: &'a mut S,
    dry_run: bool,
}

impl<'a, S: CatalogStore> Synchronizer<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// Skip writing merged catalogs back.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn sync(&mut self, extracted: &ExtractionResult) -> Result<SyncOutcome, SyncError> {
        self.sync_with(extracted, &mut ())
    }

    /// Processes catalogs one at a time, stopping at the first error.
    pub fn sync_with<O: SyncObserver>(
        &mut self,
        extracted: &ExtractionResult,
        observer: &mut O,
    ) -> Result<SyncOutcome, SyncError> {
        let catalogs = locate_catalogs(self.store.list()?)?;
        let mut outcome = SyncOutcome::default();

        for (locale, path) in catalogs {
            let content = self.store.read(&path)?;
            let old = parse_catalog(&path, &content)?;

            let stale = stale_keys(&old, extracted);
            if !stale.is_empty() {
                let warning = StaleKeyWarning {
                    path: path.clone(),
                    keys: stale,
                };
                observer.stale_keys(&warning);
                outcome.warnings.push(warning);
            }

            let updated = merge(&old, extracted);
            if !self.dry_run {
                self.store.write(&path, &render_json(&updated)?)?;
            }
            observer.catalog_synced(&locale, &path, &updated, !self.dry_run);

            if !self.dry_run {
                outcome.written.push(path);
            }
            outcome.report.insert(locale, updated);
        }

        Ok(outcome)
    }
}

/// Pairs each path with its locale, rejecting locales that differ only in
/// ASCII case.
fn locate_catalogs(mut paths: Vec<PathBuf>) -> Result<Vec<(String, PathBuf)>, SyncError> {
    paths.sort();

    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut catalogs = Vec::with_capacity(paths.len());

    for path in paths {
        let Some(locale) = locale_name(&path) else {
            return Err(SyncError::InvalidCatalogName { path });
        };
        let folded = locale.to_ascii_lowercase();
        if let Some(first) = seen.get(&folded) {
            return Err(SyncError::LocaleCollision {
                locale,
                first: first.clone(),
                second: path,
            });
        }
        seen.insert(folded, path.clone());
        catalogs.push((locale, path));
    }

    Ok(catalogs)
}
