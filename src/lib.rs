//! Module discovery and registration engine.
//!
//! A "module" is a directory under a configured root with a JSON manifest
//! and a fixed internal layout of category subdirectories (controllers,
//! entities, routes, views). The explorer builds a map of module → category
//! → files from enabled modules; the loader dispatches every entry of that
//! map to a category handler that registers it with an external collaborator
//! (autoloader classmap, router, view-namespace registry). An optional
//! on-disk cache of the file map skips traversal on subsequent boots.
//!
//! Discovery is synchronous and runs once per process lifetime; the file
//! map and every registration are read-only configuration afterwards.

pub mod cache;
pub mod config;
pub mod error;
pub mod explorer;
pub mod format;
pub mod handlers;
pub mod loader;
pub mod manifest;
pub mod registry;

pub use cache::{CacheOutcome, ClassMapCache};
pub use config::{LoaderConfig, standard_structure};
pub use error::{ModuleError, Result};
pub use explorer::{Explorer, FileMap, Module};
pub use format::{Formatter, NAMESPACE_SEPARATOR};
pub use handlers::{
    CategoryHandler, ControllerHandler, EntityHandler, HandlerContext, RouteHandler, ViewHandler,
};
pub use loader::Loader;
pub use manifest::Manifest;
pub use registry::{
    ClassMapRegistry, InMemoryClassMap, InMemoryViewRegistry, RecordingRouter, RouteScope, Router,
    ScopeRecord, ViewRegistry,
};

/// Loader wired to the in-memory collaborators. Hosts integrating a real
/// framework implement the registry traits instead.
pub type InMemoryLoader = Loader<InMemoryClassMap, RecordingRouter, InMemoryViewRegistry>;

/// Convenience constructor for the in-memory wiring.
pub fn in_memory_loader(config: LoaderConfig) -> Result<InMemoryLoader> {
    Loader::new(
        config,
        InMemoryClassMap::default(),
        RecordingRouter::default(),
        InMemoryViewRegistry::default(),
    )
}
