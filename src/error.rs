//! Error taxonomy for module discovery and dispatch.
//!
//! The two original conditions — a module directory without its manifest and
//! a recognized category without a registered handler — are misconfigurations
//! and abort the boot sequence. Cache corruption is surfaced as its own
//! variant so the loader can fall back to a fresh scan instead of failing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModuleError {
    /// An eligible module directory lacks its manifest file. This aborts the
    /// whole scan; a missing manifest is a misconfiguration, not absence of
    /// a module.
    #[error("the file {manifest_file} couldn't be found within the module {module} directory")]
    ManifestNotFound {
        module: String,
        manifest_file: String,
    },

    /// The manifest file exists but is not valid JSON or lacks `enabled`.
    #[error("the manifest for module {module} is not valid JSON")]
    ManifestInvalid {
        module: String,
        #[source]
        source: serde_json::Error,
    },

    /// A recognized category has no registered handler. Always fatal; this
    /// is a wiring error caught at dispatch time.
    #[error("no handler registered for category {category}")]
    DirectoryHandlerNotFound { category: String },

    /// The persisted file map exists but cannot be parsed.
    #[error("cache file {} is corrupt", .path.display())]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid loader configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModuleError>;
