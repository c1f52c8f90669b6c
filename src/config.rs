//! Loader configuration.
//!
//! All knobs live in one validated struct constructed at startup and passed
//! by reference to each component. The directory structure maps a lowercase
//! canonical category key to the literal subdirectory name searched inside
//! each module; dispatch uses the lowercase key, discovery uses the literal
//! name.

use crate::error::{ModuleError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_NAMESPACE: &str = "Modules";
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_CACHE_FILE: &str = "modules.json";
pub const DEFAULT_MANIFEST_FILE: &str = "manifest.json";

/// Canonical key the route handler resolves the controller namespace with.
pub const CONTROLLERS_KEY: &str = "controllers";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Root directory under which module directories live.
    pub path: PathBuf,
    /// When true, trust the persisted file map and skip traversal entirely.
    pub cache: bool,
    /// Root segment prepended to every namespaced identifier.
    pub namespace: String,
    /// Directory holding the persisted file map.
    pub cache_dir: PathBuf,
    /// File name of the persisted file map, resolved under `cache_dir`.
    pub cache_file: String,
    /// File name expected inside each module directory.
    pub manifest_file: String,
    /// Category key (lowercase) to literal subdirectory name.
    pub dir_structure: BTreeMap<String, String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("modules"))
    }
}

impl LoaderConfig {
    /// Configuration with the standard directory structure and defaults.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: false,
            namespace: DEFAULT_NAMESPACE.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cache_file: DEFAULT_CACHE_FILE.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            dir_structure: standard_structure(),
        }
    }

    /// Read a configuration from a JSON file and validate it.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: LoaderConfig = serde_json::from_str(&data)
            .map_err(|err| ModuleError::InvalidConfig(format!("{}: {err}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the loader cannot act on.
    ///
    /// Keys of `dir_structure` must stay lowercase because dispatch lowers
    /// on-disk directory names before lookup; the `controllers` key is
    /// required because the route handler namespaces route files with it.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ModuleError::InvalidConfig("path must not be empty".into()));
        }
        if self.namespace.is_empty() {
            return Err(ModuleError::InvalidConfig(
                "namespace must not be empty".into(),
            ));
        }
        if self.manifest_file.is_empty() {
            return Err(ModuleError::InvalidConfig(
                "manifest_file must not be empty".into(),
            ));
        }
        if self.dir_structure.is_empty() {
            return Err(ModuleError::InvalidConfig(
                "dir_structure must name at least one category".into(),
            ));
        }
        for (key, dir) in &self.dir_structure {
            if key.is_empty() || dir.is_empty() {
                return Err(ModuleError::InvalidConfig(
                    "dir_structure keys and directory names must not be empty".into(),
                ));
            }
            if key.chars().any(|c| c.is_ascii_uppercase()) {
                return Err(ModuleError::InvalidConfig(format!(
                    "dir_structure key '{key}' must be lowercase"
                )));
            }
        }
        if !self.dir_structure.contains_key(CONTROLLERS_KEY) {
            return Err(ModuleError::InvalidConfig(format!(
                "dir_structure must contain the '{CONTROLLERS_KEY}' key"
            )));
        }
        Ok(())
    }

    /// Full path of the persisted file map.
    pub fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(&self.cache_file)
    }

    /// Literal subdirectory names searched inside each module, in key order.
    pub fn category_dirs(&self) -> Vec<String> {
        self.dir_structure.values().cloned().collect()
    }
}

/// The standard four-category layout.
pub fn standard_structure() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("views".to_string(), "Views".to_string()),
        ("routes".to_string(), "Routes".to_string()),
        ("entities".to_string(), "Entities".to_string()),
        ("controllers".to_string(), "Controllers".to_string()),
    ])
}
