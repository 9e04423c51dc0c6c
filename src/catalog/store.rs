use std::{
    collections::BTreeMap,
    fs, io,
    path::{Component, Path, PathBuf},
};

use glob::Pattern;

use crate::error::SyncError;

/// I/O boundary of a synchronization run.
///
/// Everything between `read` and `write` is pure; swapping the store lets the
/// pipeline run against an in-memory directory.
pub trait CatalogStore {
    /// Catalog file paths, in a stable order.
    fn list(&self) -> Result<Vec<PathBuf>, SyncError>;

    fn read(&self, path: &Path) -> Result<String, SyncError>;

    fn write(&mut self, path: &Path, contents: &str) -> Result<(), SyncError>;
}

/// Catalogs stored as `<dir>/<locale>.<extension>` files.
#[derive(Debug, Clone)]
pub struct FsCatalogStore {
    dir: PathBuf,
    extension: String,
}

impl FsCatalogStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: without_cur_dir(dir.into()),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn pattern(&self) -> String {
        let dir = Pattern::escape(&self.dir.to_string_lossy());
        let extension = Pattern::escape(&self.extension);
        format!("{}/*.{}", dir.trim_end_matches('/'), extension)
    }
}

impl CatalogStore for FsCatalogStore {
    /// A missing directory yields no catalogs.
    fn list(&self) -> Result<Vec<PathBuf>, SyncError> {
        let list_error = |reason: String| SyncError::ListCatalogs {
            dir: self.dir.clone(),
            reason,
        };

        let mut paths = Vec::new();
        for entry in glob::glob(&self.pattern()).map_err(|e| list_error(e.to_string()))? {
            let path = entry.map_err(|e| list_error(e.to_string()))?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read(&self, path: &Path) -> Result<String, SyncError> {
        fs::read_to_string(path).map_err(|source| SyncError::ReadCatalog {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<(), SyncError> {
        fs::write(path, contents).map_err(|source| SyncError::WriteCatalog {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Drops `.` segments, which `glob` would otherwise keep in every listed path.
fn without_cur_dir(dir: PathBuf) -> PathBuf {
    let cleaned: PathBuf = dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        dir
    } else {
        cleaned
    }
}

/// Catalog files kept in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogStore {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn list(&self) -> Result<Vec<PathBuf>, SyncError> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, path: &Path) -> Result<String, SyncError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SyncError::ReadCatalog {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<(), SyncError> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
