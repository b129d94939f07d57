//! Terminal rendering of built type trees.

use termtree::Tree;
use tracing::instrument;

use crate::domain::{NodeId, TreeArena, TypeNode};

/// Converts a tree into a [`termtree::Tree`] of node labels for display.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeArena<TypeNode> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &TreeArena<TypeNode>, node_idx: NodeId, parent_tree: &mut Tree<String>) {
            for &child_idx in arena.children(node_idx) {
                if let Some(child) = arena.value(child_idx) {
                    let mut child_tree = Tree::new(child.to_string());
                    build_tree(arena, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        let root_idx = self.root();
        let label = self
            .value(root_idx)
            .map(|root| root.to_string())
            .unwrap_or_else(|| "Empty tree".to_string());
        let mut tree = Tree::new(label);
        build_tree(self, root_idx, &mut tree);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Declaration, NodeKind, TypeExpr};

    #[test]
    fn given_nested_tree_when_rendering_then_shows_all_levels() {
        let root = TypeNode::root("Foo");
        let bar_decl = Declaration::property("bar", TypeExpr::Reference("Baz".into()));
        let bar = TypeNode::from_declaration(NodeKind::Object, &root, &bar_decl, Some("Baz".into()));
        let label_decl = Declaration::property("label", TypeExpr::Keyword("string".into()));
        let label = TypeNode::terminal(&bar, &label_decl);

        let mut tree = TreeArena::with_root(root);
        let bar_idx = tree.add_child(tree.root(), bar).unwrap();
        tree.add_child(bar_idx, label).unwrap();

        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "Foo");
        assert!(lines[1].ends_with("bar: Baz [object]"));
        assert!(lines[2].ends_with("label: string [terminal]"));
    }
}
