//! Per-module manifest parsing.
//!
//! Each module directory carries a small JSON descriptor with at least an
//! `enabled` flag. Extra keys are preserved as opaque metadata so host
//! applications can hang their own settings off the same file without this
//! crate caring about them.

use crate::error::{ModuleError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct Manifest {
    pub enabled: bool,
    /// Everything besides `enabled`, passed through untouched.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl Manifest {
    /// Read and parse `<module_path>/<manifest_file>`.
    ///
    /// A missing file is `ManifestNotFound` naming the module, never an
    /// implicit "disabled". A present but unparsable file is
    /// `ManifestInvalid`.
    pub fn read(module_path: &Path, module_name: &str, manifest_file: &str) -> Result<Self> {
        let path = module_path.join(manifest_file);
        if !path.is_file() {
            return Err(ModuleError::ManifestNotFound {
                module: module_name.to_string(),
                manifest_file: manifest_file.to_string(),
            });
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|source| ModuleError::ManifestInvalid {
            module: module_name.to_string(),
            source,
        })
    }
}
