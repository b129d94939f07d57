//! Tree builder: recursive decomposition of a type into a [`TreeArena`].

use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeId, TreeArena};
use crate::domain::entities::Declaration;
use crate::domain::error::DomainError;
use crate::domain::handler::NodeHandler;
use crate::domain::introspect::Introspect;
use crate::domain::node::TypeNode;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Knobs for a single build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Deepest level a node may be appended at (root is level 0).
    ///
    /// `None` recurses without limit, so a self-referential type that a
    /// handler keeps decomposing never terminates.
    pub max_depth: Option<usize>,
}

/// Decomposes a root type into an ordered tree of [`TypeNode`]s.
///
/// The whole tree is built eagerly by the constructor. Each member of a node's
/// first type symbol becomes a child, produced by the first registered handler
/// that recognizes its declaration or by [`TypeNode::terminal`] otherwise.
/// Children record that symbol as their owner.
/// Only property declarations take part; methods, index signatures and
/// accessors are skipped.
pub struct TypeNodeTree<'a> {
    tree: TreeArena<TypeNode>,
    ctx: &'a dyn Introspect,
    handlers: Vec<Box<dyn NodeHandler>>,
    options: BuildOptions,
}

impl<'a> TypeNodeTree<'a> {
    /// Builds the full tree for `root`.
    pub fn new(
        root: TypeNode,
        ctx: &'a dyn Introspect,
        handlers: Vec<Box<dyn NodeHandler>>,
    ) -> TreeResult<Self> {
        Self::with_options(root, ctx, handlers, BuildOptions::default())
    }

    #[instrument(level = "debug", skip_all, fields(root = %root.name))]
    pub fn with_options(
        root: TypeNode,
        ctx: &'a dyn Introspect,
        handlers: Vec<Box<dyn NodeHandler>>,
        options: BuildOptions,
    ) -> TreeResult<Self> {
        let mut builder = Self {
            tree: TreeArena::with_root(root),
            ctx,
            handlers,
            options,
        };
        let root_idx = builder.tree.root();
        builder.build(root_idx, 0)?;
        debug!("built tree with {} nodes", builder.tree.len());
        Ok(builder)
    }

    /// Appends a handler to the registry.
    ///
    /// The tree is built by the constructor, so a handler registered here does
    /// not change it. Pass custom handlers to [`TypeNodeTree::new`] instead.
    pub fn register_handler(&mut self, handler: Box<dyn NodeHandler>) {
        debug!("registered handler '{}' after build", handler.name());
        self.handlers.push(handler);
    }

    pub fn tree(&self) -> &TreeArena<TypeNode> {
        &self.tree
    }

    pub fn into_tree(self) -> TreeArena<TypeNode> {
        self.tree
    }

    pub fn handlers(&self) -> &[Box<dyn NodeHandler>] {
        &self.handlers
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    fn build(&mut self, node_idx: NodeId, depth: usize) -> TreeResult<()> {
        let node = self.node(node_idx)?;
        let symbols = node.type_symbols(self.ctx);
        let Some(symbol) = symbols.first() else {
            trace!("'{}' has no type symbols", node.name);
            return Ok(());
        };
        if symbols.len() > 1 {
            trace!("'{}' resolves to {} symbols, using '{}'", node.name, symbols.len(), symbol.name);
        }
        let Some(members) = self.ctx.members(symbol) else {
            trace!("'{}' has no members", symbol.name);
            return Ok(());
        };

        for member in &members {
            let Some(declaration) = member.declaration.as_ref().filter(|d| d.is_property()) else {
                trace!("skipping non-property member '{}'", member.name);
                continue;
            };
            self.check_depth(node_idx, depth + 1)?;
            let mut child = self.create_node(node_idx, declaration)?;
            // Union members belong to the variant they were read from
            child.owner = Some(symbol.name.clone());
            let child_idx = self.tree.add_child(node_idx, child)?;
            self.build(child_idx, depth + 1)?;
        }
        Ok(())
    }

    fn create_node(&self, parent_idx: NodeId, declaration: &Declaration) -> TreeResult<TypeNode> {
        let parent = self.node(parent_idx)?;
        let node = match self.handlers.iter().find(|h| h.recognizes(declaration)) {
            Some(handler) => {
                trace!("'{}' handled by '{}'", declaration.name, handler.name());
                handler.create(self.ctx, parent, declaration)
            }
            None => TypeNode::terminal(parent, declaration),
        };
        Ok(node)
    }

    fn check_depth(&self, parent_idx: NodeId, depth: usize) -> TreeResult<()> {
        match self.options.max_depth {
            Some(max_depth) if depth > max_depth => Err(DomainError::DepthExceeded {
                path: self.path_label(parent_idx),
                max_depth,
            }),
            _ => Ok(()),
        }
    }

    fn node(&self, idx: NodeId) -> TreeResult<&TypeNode> {
        self.tree
            .value(idx)
            .ok_or_else(|| DomainError::NodeNotFound(format!("{idx:?}")))
    }

    fn path_label(&self, idx: NodeId) -> String {
        self.tree
            .path_to(idx)
            .into_iter()
            .filter_map(|i| self.tree.value(i))
            .map(|n| n.name.as_str())
            .join(".")
    }
}

impl fmt::Debug for TypeNodeTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeNodeTree")
            .field("tree", &self.tree)
            .field(
                "handlers",
                &self.handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .field("options", &self.options)
            .finish()
    }
}
