//! Type tree service
//!
//! Builds trees with the configured handler chain and renders lenses from them.

use tracing::{debug, instrument};

use crate::application::lens::{render_module, LensOptions};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    handlers_from_names, BuildOptions, Introspect, TreeArena, TypeNode, TypeNodeTree,
};

/// Service for decomposing types according to [`Settings`].
#[derive(Debug, Clone)]
pub struct TypeTreeService {
    settings: Settings,
}

impl TypeTreeService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Picks the root type: an explicit request wins over the schema's declaration.
    pub fn resolve_root(
        &self,
        requested: Option<&str>,
        declared: Option<&str>,
    ) -> ApplicationResult<String> {
        requested
            .or(declared)
            .map(str::to_string)
            .ok_or(ApplicationError::MissingRootType)
    }

    /// Builds the tree for `root` using the configured handlers and depth guard.
    #[instrument(level = "debug", skip(self, ctx))]
    pub fn build<'a>(
        &self,
        ctx: &'a dyn Introspect,
        root: &str,
    ) -> ApplicationResult<TypeNodeTree<'a>> {
        if ctx.type_symbols(root).is_empty() {
            return Err(ApplicationError::UnknownRootType(root.to_string()));
        }
        let handlers = handlers_from_names(&self.settings.handlers)?;
        debug!("handler chain: {:?}", self.settings.handlers);
        let options = BuildOptions {
            max_depth: Some(self.settings.max_depth),
        };
        let tree = TypeNodeTree::with_options(TypeNode::root(root), ctx, handlers, options)?;
        Ok(tree)
    }

    /// Lens module for a built tree.
    pub fn lenses(&self, tree: &TreeArena<TypeNode>) -> String {
        let options = LensOptions {
            id_field: self.settings.id_field.clone(),
        };
        render_module(tree, &options)
    }
}
