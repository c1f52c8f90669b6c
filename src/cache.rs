//! Persisted file map.
//!
//! The cache stores the explorer's output as JSON so subsequent boots can
//! skip traversal entirely. A load distinguishes two states: `Hit` when an
//! existing file parsed, `Miss` when no file existed and an empty map was
//! bootstrapped in its place. A bootstrapped cache is never repopulated
//! automatically; regenerating it is an operational action (`modmap
//! --write-cache`, or delete the file and boot with caching off).

use crate::error::{ModuleError, Result};
use crate::explorer::FileMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of a cache load. Both carry a usable map; callers that care
/// whether the map came from disk or from bootstrap can tell them apart.
#[derive(Debug)]
pub enum CacheOutcome {
    /// The cache file existed and parsed.
    Hit(FileMap),
    /// No cache file existed; an empty one was written and returned.
    Miss(FileMap),
}

impl CacheOutcome {
    pub fn into_map(self) -> FileMap {
        match self {
            CacheOutcome::Hit(map) | CacheOutcome::Miss(map) => map,
        }
    }
}

pub struct ClassMapCache {
    path: PathBuf,
}

impl ClassMapCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted map, bootstrapping an empty one when absent.
    ///
    /// Content that exists but does not parse is `CacheCorrupt`; the loader
    /// decides what to do with that (it falls back to a fresh scan).
    pub fn load(&self) -> Result<CacheOutcome> {
        if !self.path.is_file() {
            return Ok(CacheOutcome::Miss(self.create()?));
        }
        let data = fs::read_to_string(&self.path)?;
        let map = serde_json::from_str(&data).map_err(|source| ModuleError::CacheCorrupt {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "loaded file map from cache");
        Ok(CacheOutcome::Hit(map))
    }

    /// Write an empty, validly-typed map and return it.
    pub fn create(&self) -> Result<FileMap> {
        let empty = FileMap::new();
        self.store(&empty)?;
        debug!(path = %self.path.display(), "bootstrapped empty cache file");
        Ok(empty)
    }

    /// Persist a map, creating parent directories as needed.
    pub fn store(&self, map: &FileMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(map).expect("file map serializes");
        fs::write(&self.path, data)?;
        Ok(())
    }
}
