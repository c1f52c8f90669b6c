//! Module discovery under the configured root.
//!
//! The explorer walks one level deep: immediate subdirectories of the root
//! are module candidates, and immediate files of each requested category
//! subdirectory become file map entries. Nothing is recursive and nothing is
//! cached here; the explorer rediscovers from disk on every call so the
//! loader alone decides when to trust a persisted map instead.

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::manifest::Manifest;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Discovered file layout: module name → category directory name → file
/// names. Only categories with at least one file are recorded.
pub type FileMap = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// One module candidate found under the root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Module {
    /// Directory basename, used as the module's identifier everywhere.
    pub name: String,
    pub path: PathBuf,
}

pub struct Explorer {
    root: PathBuf,
    manifest_file: String,
}

impl Explorer {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            root: config.path.clone(),
            manifest_file: config.manifest_file.clone(),
        }
    }

    /// All module directories under the root, sorted by name.
    ///
    /// An absent root is not an error: it is created and an empty list is
    /// returned, so a fresh deployment boots cleanly before any module is
    /// installed.
    pub fn list_modules(&self) -> Result<Vec<Module>> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
            debug!(root = %self.root.display(), "created absent modules root");
            return Ok(Vec::new());
        }

        let mut modules = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            modules.push(Module {
                name: name.to_string(),
                path,
            });
        }
        modules.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(modules)
    }

    /// Modules whose manifest carries `enabled: true`.
    ///
    /// A module directory without a manifest aborts the whole scan; there is
    /// no partial result. The design treats a missing manifest as a
    /// misconfiguration rather than an implicitly disabled module.
    pub fn list_enabled_modules(&self) -> Result<Vec<Module>> {
        let mut enabled = Vec::new();
        for module in self.list_modules()? {
            if self.read_manifest(&module)?.enabled {
                enabled.push(module);
            } else {
                debug!(module = %module.name, "skipping disabled module");
            }
        }
        Ok(enabled)
    }

    /// Parse the manifest inside a module directory.
    pub fn read_manifest(&self, module: &Module) -> Result<Manifest> {
        Manifest::read(&module.path, &module.name, &self.manifest_file)
    }

    /// Build the file map for the requested category directory names.
    ///
    /// For every enabled module and every requested name, the immediate
    /// files of `module/<dir>` are recorded under the literal directory
    /// name. Empty or absent category directories leave no key behind.
    pub fn collect_files(&self, category_dirs: &[String]) -> Result<FileMap> {
        let mut map = FileMap::new();
        for module in self.list_enabled_modules()? {
            for dir in category_dirs {
                let files = list_file_names(&module.path.join(dir))?;
                if !files.is_empty() {
                    map.entry(module.name.clone())
                        .or_default()
                        .insert(dir.clone(), files);
                }
            }
        }
        debug!(modules = map.len(), "collected module files");
        Ok(map)
    }
}

/// Immediate file names of `dir`, sorted; empty when the directory is
/// absent. Subdirectories are ignored.
fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn explorer_for(root: &Path) -> Explorer {
        Explorer::new(&LoaderConfig::new(root))
    }

    #[test]
    fn absent_root_is_created_and_empty() {
        let temp = TempDir::new().expect("temp dir");
        let root = temp.path().join("modules");
        let explorer = explorer_for(&root);
        let modules = explorer.list_modules().expect("list");
        assert!(modules.is_empty());
        assert!(root.is_dir());
    }

    #[test]
    fn files_at_root_level_are_not_modules() {
        let temp = TempDir::new().expect("temp dir");
        std::fs::write(temp.path().join("stray.txt"), "x").unwrap();
        std::fs::create_dir(temp.path().join("Blog")).unwrap();
        let modules = explorer_for(temp.path()).list_modules().expect("list");
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "Blog");
    }

    #[test]
    fn category_listing_skips_nested_directories() {
        let temp = TempDir::new().expect("temp dir");
        let controllers = temp.path().join("Blog").join("Controllers");
        std::fs::create_dir_all(controllers.join("Nested")).unwrap();
        std::fs::write(controllers.join("PostController.php"), "").unwrap();
        std::fs::write(controllers.join("Nested").join("Deep.php"), "").unwrap();
        std::fs::write(temp.path().join("Blog").join("manifest.json"), r#"{"enabled": true}"#)
            .unwrap();

        let map = explorer_for(temp.path())
            .collect_files(&["Controllers".to_string()])
            .expect("collect");
        assert_eq!(
            map["Blog"]["Controllers"],
            vec!["PostController.php".to_string()]
        );
    }
}
