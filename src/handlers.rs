//! Built-in category handlers.
//!
//! Each handler receives one `(module, directory, files)` triple plus a
//! context exposing the formatter and the registration collaborators. All
//! paths and identifiers go through the formatter so the naming convention
//! is enforced in exactly one place.

use crate::config::CONTROLLERS_KEY;
use crate::error::{ModuleError, Result};
use crate::format::Formatter;
use crate::registry::{ClassMapRegistry, Router, ViewRegistry};
use std::collections::BTreeMap;

/// Borrowed view of the loader state a handler may touch.
pub struct HandlerContext<'a> {
    pub formatter: &'a Formatter,
    /// Category key (lowercase) → literal subdirectory name.
    pub dir_structure: &'a BTreeMap<String, String>,
    pub class_map: &'a mut dyn ClassMapRegistry,
    pub router: &'a mut dyn Router,
    pub views: &'a mut dyn ViewRegistry,
}

/// Common capability every category handler satisfies. Handlers are looked
/// up in an explicit map keyed by lowercase category name; an unregistered
/// recognized category is a fatal wiring error raised by the dispatcher,
/// not here.
pub trait CategoryHandler {
    fn handle(
        &mut self,
        ctx: &mut HandlerContext<'_>,
        module: &str,
        directory: &str,
        files: &[String],
    ) -> Result<()>;
}

/// Registers each controller file in the autoloader classmap.
pub struct ControllerHandler;

impl CategoryHandler for ControllerHandler {
    fn handle(
        &mut self,
        ctx: &mut HandlerContext<'_>,
        module: &str,
        directory: &str,
        files: &[String],
    ) -> Result<()> {
        register_classes(ctx, module, directory, files);
        Ok(())
    }
}

/// Entities land in the same classmap as controllers; the category exists
/// for directory-structure semantics, not a different registration target.
pub struct EntityHandler;

impl CategoryHandler for EntityHandler {
    fn handle(
        &mut self,
        ctx: &mut HandlerContext<'_>,
        module: &str,
        directory: &str,
        files: &[String],
    ) -> Result<()> {
        register_classes(ctx, module, directory, files);
        Ok(())
    }
}

fn register_classes(ctx: &mut HandlerContext<'_>, module: &str, directory: &str, files: &[String]) {
    let mut mapping = BTreeMap::new();
    for file in files {
        let identifier = ctx.formatter.format_identifier(&[module, directory, file]);
        let path = ctx.formatter.format_path(&[module, directory, file]);
        mapping.insert(identifier, path);
    }
    ctx.class_map.add_class_map(mapping);
}

/// Opens one routing scope per module and includes every route file inside
/// it. The scope's namespace points at the module's controllers directory
/// so route declarations resolve controller names without qualification.
pub struct RouteHandler;

impl CategoryHandler for RouteHandler {
    fn handle(
        &mut self,
        ctx: &mut HandlerContext<'_>,
        module: &str,
        directory: &str,
        files: &[String],
    ) -> Result<()> {
        let controllers_dir = ctx.dir_structure.get(CONTROLLERS_KEY).ok_or_else(|| {
            ModuleError::InvalidConfig(format!(
                "dir_structure is missing the '{CONTROLLERS_KEY}' key"
            ))
        })?;
        let namespace = ctx.formatter.format_identifier(&[module, controllers_dir]);

        let formatter = ctx.formatter;
        ctx.router.group(&namespace, &mut |scope| {
            for file in files {
                scope.include(&formatter.format_path(&[module, directory, file]))?;
            }
            Ok(())
        })
    }
}

/// Registers the module's views directory as one template namespace. A
/// single registration per module-category pair; the individual files are
/// the template engine's business.
pub struct ViewHandler;

impl CategoryHandler for ViewHandler {
    fn handle(
        &mut self,
        ctx: &mut HandlerContext<'_>,
        module: &str,
        directory: &str,
        _files: &[String],
    ) -> Result<()> {
        let identifier = ctx.formatter.format_identifier(&[module]);
        let path = ctx.formatter.format_path(&[module, directory]);
        ctx.views.add_namespace(&identifier, &path);
        Ok(())
    }
}
