//! Orchestrates discovery and registration.
//!
//! The loader owns the configuration, the explorer, and the registration
//! collaborators for the process lifetime. Booting happens once: obtain the
//! file map (from cache when enabled, fresh scan otherwise), then walk it
//! module-then-category and route every triple to its handler. After that
//! the map and the registrations are read-only state.
//!
//! Handlers live in an explicit map keyed by lowercase category name,
//! populated at construction. A directory whose lowered name is not a
//! configured category is skipped silently; a configured category without a
//! handler is a fatal wiring error.

use crate::cache::ClassMapCache;
use crate::config::LoaderConfig;
use crate::error::{ModuleError, Result};
use crate::explorer::{Explorer, FileMap};
use crate::format::Formatter;
use crate::handlers::{
    CategoryHandler, ControllerHandler, EntityHandler, HandlerContext, RouteHandler, ViewHandler,
};
use crate::registry::{ClassMapRegistry, Router, ViewRegistry};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub struct Loader<C, R, V> {
    config: LoaderConfig,
    explorer: Explorer,
    formatter: Formatter,
    handlers: BTreeMap<String, Box<dyn CategoryHandler>>,
    class_map: C,
    router: R,
    views: V,
    file_map: FileMap,
}

impl<C, R, V> Loader<C, R, V>
where
    C: ClassMapRegistry,
    R: Router,
    V: ViewRegistry,
{
    /// Build a loader with the four built-in handlers registered.
    pub fn new(config: LoaderConfig, class_map: C, router: R, views: V) -> Result<Self> {
        config.validate()?;
        let explorer = Explorer::new(&config);
        let formatter = Formatter::new(&config.path, &config.namespace);

        let mut loader = Self {
            config,
            explorer,
            formatter,
            handlers: BTreeMap::new(),
            class_map,
            router,
            views,
            file_map: FileMap::new(),
        };
        loader.register_handler("controllers", Box::new(ControllerHandler));
        loader.register_handler("entities", Box::new(EntityHandler));
        loader.register_handler("routes", Box::new(RouteHandler));
        loader.register_handler("views", Box::new(ViewHandler));
        Ok(loader)
    }

    /// Register (or replace) the handler for a category. The key is lowered
    /// to match dispatch lookups.
    pub fn register_handler(&mut self, category: &str, handler: Box<dyn CategoryHandler>) {
        self.handlers.insert(category.to_lowercase(), handler);
    }

    /// Remove a category's handler. Dispatching that category afterwards is
    /// `DirectoryHandlerNotFound`.
    pub fn unregister_handler(&mut self, category: &str) -> bool {
        self.handlers.remove(&category.to_lowercase()).is_some()
    }

    /// Obtain the file map for this boot cycle.
    ///
    /// With caching on, the persisted map is authoritative: once populated
    /// it is never invalidated by emptiness checks or re-scans. A corrupt
    /// cache file degrades to a fresh scan with a warning. With caching
    /// off, a fresh scan always runs.
    pub fn build_file_map(&mut self) -> Result<()> {
        if self.config.cache {
            let cache = ClassMapCache::new(self.config.cache_path());
            match cache.load() {
                Ok(outcome) => {
                    self.file_map = outcome.into_map();
                    return Ok(());
                }
                Err(ModuleError::CacheCorrupt { path, source }) => {
                    warn!(
                        path = %path.display(),
                        error = %source,
                        "cache file is corrupt, falling back to a fresh scan"
                    );
                }
                Err(err) => return Err(err),
            }
        }
        self.file_map = self.explorer.collect_files(&self.config.category_dirs())?;
        Ok(())
    }

    /// Route every `(module, category, files)` triple in the file map, in
    /// module-then-category order.
    pub fn dispatch(&mut self) -> Result<()> {
        let map = std::mem::take(&mut self.file_map);
        let result = self.dispatch_map(&map);
        self.file_map = map;
        result
    }

    /// Build the file map and dispatch it in one step.
    pub fn boot(&mut self) -> Result<()> {
        self.build_file_map()?;
        self.dispatch()
    }

    fn dispatch_map(&mut self, map: &FileMap) -> Result<()> {
        for (module, directories) in map {
            for (directory, files) in directories {
                self.route_category(module, directory, files)?;
            }
        }
        Ok(())
    }

    /// Route one triple to its handler.
    ///
    /// The directory name is matched case-insensitively against the
    /// configured categories. Unconfigured directories are ignored
    /// entirely; a configured category without a handler aborts dispatch.
    pub fn route_category(&mut self, module: &str, directory: &str, files: &[String]) -> Result<()> {
        let key = directory.to_lowercase();
        if !self.config.dir_structure.contains_key(&key) {
            debug!(module, directory, "ignoring unrecognized category");
            return Ok(());
        }
        let handler = self
            .handlers
            .get_mut(&key)
            .ok_or(ModuleError::DirectoryHandlerNotFound {
                category: key.clone(),
            })?;

        debug!(module, directory, files = files.len(), "routing category");
        let mut ctx = HandlerContext {
            formatter: &self.formatter,
            dir_structure: &self.config.dir_structure,
            class_map: &mut self.class_map,
            router: &mut self.router,
            views: &mut self.views,
        };
        handler.handle(&mut ctx, module, directory, files)
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn file_map(&self) -> &FileMap {
        &self.file_map
    }

    pub fn class_map(&self) -> &C {
        &self.class_map
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn views(&self) -> &V {
        &self.views
    }
}
