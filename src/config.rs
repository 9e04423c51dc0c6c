use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::extract::ExtractMode;

pub const CONFIG_FILE_NAME: &str = ".strsyncrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_marker_function")]
    pub marker_function: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_lang_dir")]
    pub lang_dir: String,
    #[serde(default = "default_catalog_extension")]
    pub catalog_extension: String,
    #[serde(default)]
    pub mode: ExtractMode,
}

fn default_marker_function() -> String {
    "_i".to_string()
}

fn default_placeholder() -> String {
    "==============".to_string()
}

fn default_lang_dir() -> String {
    "./lang".to_string()
}

fn default_catalog_extension() -> String {
    "json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker_function: default_marker_function(),
            placeholder: default_placeholder(),
            lang_dir: default_lang_dir(),
            catalog_extension: default_catalog_extension(),
            mode: ExtractMode::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.marker_function.trim().is_empty() {
            bail!("'markerFunction' must not be empty");
        }
        let ext = &self.catalog_extension;
        if ext.is_empty() || ext.starts_with('.') || ext.contains('/') || ext.contains('\\') {
            bail!(
                "Invalid 'catalogExtension': \"{}\" (expected a bare extension such as \"json\")",
                ext
            );
        }
        Ok(())
    }

    /// Catalog directory, with a relative `langDir` resolved against `base`.
    ///
    /// `.` segments are dropped so `./lang` lists as `<base>/lang/<file>`.
    pub fn lang_dir_from(&self, base: &Path) -> PathBuf {
        let lang_dir: PathBuf = Path::new(&self.lang_dir)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        base.join(lang_dir)
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Config file that was used, if any.
    pub path: Option<PathBuf>,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
