//! Nodes of a decomposed type.

use std::fmt;

use crate::domain::entities::{Declaration, TypeSymbol};
use crate::domain::introspect::Introspect;

/// Variant of a [`TypeNode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The type the tree was built from
    Root,
    /// A field with no further structure
    Terminal,
    /// A field whose type is itself a record
    Object,
    /// A field holding an array of records
    Array,
    /// A field holding a keyed collection of records
    Record,
    /// Produced by a handler outside this crate
    Custom(String),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Root => f.write_str("root"),
            NodeKind::Terminal => f.write_str("terminal"),
            NodeKind::Object => f.write_str("object"),
            NodeKind::Array => f.write_str("array"),
            NodeKind::Record => f.write_str("record"),
            NodeKind::Custom(name) => f.write_str(name),
        }
    }
}

/// One point in the decomposed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub kind: NodeKind,
    /// Field name; the type name for the root
    pub name: String,
    /// Name of the type that declares this field, None for the root.
    ///
    /// For a field read through a union this is the variant, not the union.
    pub owner: Option<String>,
    /// Originating field declaration, None for the root
    pub declaration: Option<Declaration>,
    /// Type whose members become this node's children
    pub target: Option<String>,
}

impl TypeNode {
    pub fn root(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            kind: NodeKind::Root,
            name: type_name.clone(),
            owner: None,
            declaration: None,
            target: Some(type_name),
        }
    }

    /// Node for `declaration`, a member of `parent`'s target type.
    pub fn from_declaration(
        kind: NodeKind,
        parent: &TypeNode,
        declaration: &Declaration,
        target: Option<String>,
    ) -> Self {
        Self {
            kind,
            name: declaration.name.clone(),
            owner: parent.target.clone(),
            declaration: Some(declaration.clone()),
            target,
        }
    }

    /// Fallback node for declarations no handler recognizes.
    pub fn terminal(parent: &TypeNode, declaration: &Declaration) -> Self {
        Self::from_declaration(NodeKind::Terminal, parent, declaration, None)
    }

    /// Type symbols this node represents; empty when it has no target type.
    pub fn type_symbols(&self, ctx: &dyn Introspect) -> Vec<TypeSymbol> {
        match &self.target {
            Some(target) => ctx.type_symbols(target),
            None => Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == NodeKind::Terminal
    }

    /// Owning type name, falling back to the node's own name for the root.
    pub fn owner_or_name(&self) -> &str {
        self.owner.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.declaration) {
            (NodeKind::Root, _) | (_, None) => write!(f, "{}", self.name),
            (kind, Some(decl)) => {
                let optional = if decl.optional { "?" } else { "" };
                write!(f, "{}{}: {} [{}]", self.name, optional, decl.type_expr, kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TypeExpr;

    #[test]
    fn given_member_of_root_when_creating_terminal_then_owner_is_root_type() {
        let root = TypeNode::root("Foo");
        let decl = Declaration::property("count", TypeExpr::Keyword("number".into()));

        let node = TypeNode::terminal(&root, &decl);

        assert_eq!(node.owner.as_deref(), Some("Foo"));
        assert_eq!(node.name, "count");
        assert!(node.target.is_none());
        assert_eq!(node.to_string(), "count: number [terminal]");
        assert_eq!(root.to_string(), "Foo");
    }
}
