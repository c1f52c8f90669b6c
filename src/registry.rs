//! Collaborator interfaces the handlers register against.
//!
//! The loader's side effects land in three external systems: an autoloader
//! classmap, a request router, and a view-template namespace registry. This
//! crate only specifies their seams; the in-memory implementations here are
//! the default wiring for tests, the CLI, and hosts that want to inspect
//! registrations before applying them to a real framework.

use crate::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Autoloader classmap: namespaced identifier → file path.
pub trait ClassMapRegistry {
    fn add_class_map(&mut self, mapping: BTreeMap<String, PathBuf>);
}

/// Registration context handed to route files inside an open scope.
pub trait RouteScope {
    /// Include one route-definition unit at its formatted path. Route files
    /// run arbitrary registration code in the host framework, so inclusion
    /// may fail.
    fn include(&mut self, path: &Path) -> Result<()>;
}

/// Request router. A scope's namespace is fixed before any file in the
/// category is processed.
pub trait Router {
    fn group(
        &mut self,
        namespace: &str,
        register: &mut dyn FnMut(&mut dyn RouteScope) -> Result<()>,
    ) -> Result<()>;
}

/// View-template namespace registry: one namespace per module, rooted at
/// the module's views directory.
pub trait ViewRegistry {
    fn add_namespace(&mut self, identifier: &str, path: &Path);
}

/// Classmap that accumulates registrations in memory.
#[derive(Debug, Default)]
pub struct InMemoryClassMap {
    entries: BTreeMap<String, PathBuf>,
}

impl InMemoryClassMap {
    pub fn entries(&self) -> &BTreeMap<String, PathBuf> {
        &self.entries
    }
}

impl ClassMapRegistry for InMemoryClassMap {
    fn add_class_map(&mut self, mapping: BTreeMap<String, PathBuf>) {
        self.entries.extend(mapping);
    }
}

/// One recorded routing scope and the files included within it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScopeRecord {
    pub namespace: String,
    pub included: Vec<PathBuf>,
}

/// Router that records scopes and inclusions instead of executing them.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    scopes: Vec<ScopeRecord>,
}

impl RecordingRouter {
    pub fn scopes(&self) -> &[ScopeRecord] {
        &self.scopes
    }
}

impl Router for RecordingRouter {
    fn group(
        &mut self,
        namespace: &str,
        register: &mut dyn FnMut(&mut dyn RouteScope) -> Result<()>,
    ) -> Result<()> {
        let mut scope = RecordingScope {
            included: Vec::new(),
        };
        register(&mut scope)?;
        self.scopes.push(ScopeRecord {
            namespace: namespace.to_string(),
            included: scope.included,
        });
        Ok(())
    }
}

struct RecordingScope {
    included: Vec<PathBuf>,
}

impl RouteScope for RecordingScope {
    fn include(&mut self, path: &Path) -> Result<()> {
        self.included.push(path.to_path_buf());
        Ok(())
    }
}

/// View registry that accumulates namespace registrations in memory.
#[derive(Debug, Default)]
pub struct InMemoryViewRegistry {
    namespaces: BTreeMap<String, PathBuf>,
}

impl InMemoryViewRegistry {
    pub fn namespaces(&self) -> &BTreeMap<String, PathBuf> {
        &self.namespaces
    }
}

impl ViewRegistry for InMemoryViewRegistry {
    fn add_namespace(&mut self, identifier: &str, path: &Path) {
        self.namespaces
            .insert(identifier.to_string(), path.to_path_buf());
    }
}
