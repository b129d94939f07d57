//! Arena-based ordered tree.

use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::DomainError;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Handle of a node inside a [`TreeArena`].
///
/// Carries the identity of the tree that issued it, so a handle is only
/// accepted by that tree even when another tree has a live node in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: Index,
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode<T> {
    /// Payload carried by this node
    pub data: T,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<NodeId>,
    /// Indices of child nodes in insertion order
    pub children: Vec<NodeId>,
}

/// Ordered n-ary tree backed by a generational arena.
///
/// A tree always has a root. Children are appended under any existing node and
/// keep their insertion order. Nodes are never removed, so every handle handed
/// out by [`TreeArena::add_child`] stays valid for the lifetime of the tree.
#[derive(Debug)]
pub struct TreeArena<T> {
    /// Identity stamped into every handle this tree issues
    id: u64,
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode<T>>,
    /// Index of the root node
    root: NodeId,
}

impl<T> TreeArena<T> {
    /// Creates a tree containing only `root`.
    pub fn with_root(root: T) -> Self {
        let id = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
        let mut arena = Arena::new();
        let index = arena.insert(TreeNode {
            data: root,
            parent: None,
            children: Vec::new(),
        });
        Self {
            id,
            arena,
            root: NodeId { tree: id, index },
        }
    }

    /// Appends `child` to the end of `parent`'s child list.
    ///
    /// Fails with [`DomainError::NodeNotFound`] when `parent` is not a node of
    /// this tree; the tree is left untouched in that case.
    #[instrument(level = "trace", skip(self, child))]
    pub fn add_child(&mut self, parent: NodeId, child: T) -> Result<NodeId, DomainError> {
        if !self.contains(parent) {
            return Err(DomainError::NodeNotFound(format!("{parent:?}")));
        }
        let index = self.arena.insert(TreeNode {
            data: child,
            parent: Some(parent),
            children: Vec::new(),
        });
        let node_idx = NodeId {
            tree: self.id,
            index,
        };
        if let Some(parent_node) = self.arena.get_mut(parent.index) {
            parent_node.children.push(node_idx);
        }
        Ok(node_idx)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// True when `idx` was issued by this tree and is live.
    pub fn contains(&self, idx: NodeId) -> bool {
        idx.tree == self.id && self.arena.contains(idx.index)
    }

    /// Node at `idx`; `None` for handles issued by another tree.
    pub fn get_node(&self, idx: NodeId) -> Option<&TreeNode<T>> {
        if idx.tree == self.id {
            self.arena.get(idx.index)
        } else {
            None
        }
    }

    /// Payload of the node at `idx`.
    pub fn value(&self, idx: NodeId) -> Option<&T> {
        self.get_node(idx).map(|node| &node.data)
    }

    /// Children of `idx` in insertion order; empty for unknown handles.
    pub fn children(&self, idx: NodeId) -> &[NodeId] {
        self.get_node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, idx: NodeId) -> Option<NodeId> {
        self.get_node(idx).and_then(|node| node.parent)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self)
    }

    /// Number of levels, counting the root as 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: NodeId) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf nodes (nodes with no children), left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        self.collect_leaves(self.root, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, node_idx: NodeId, leaves: &mut Vec<NodeId>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node_idx);
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }

    /// Handles from the root down to `idx`, both ends included.
    pub fn path_to(&self, idx: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(idx).filter(|&i| self.contains(i));
        while let Some(i) = current {
            path.push(i);
            current = self.parent(i);
        }
        path.reverse();
        path
    }
}

/// Depth-first pre-order iterator.
pub struct TreeIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>) -> Self {
        Self {
            arena,
            stack: vec![arena.root()],
        }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Depth-first post-order iterator.
pub struct PostOrderIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>) -> Self {
        Self {
            arena,
            stack: vec![(arena.root(), false)],
        }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      root
    //      /  \
    //     a    b
    //     |
    //     c
    fn sample() -> (TreeArena<&'static str>, NodeId, NodeId, NodeId) {
        let mut tree = TreeArena::with_root("root");
        let root = tree.root();
        let a = tree.add_child(root, "a").unwrap();
        let b = tree.add_child(root, "b").unwrap();
        let c = tree.add_child(a, "c").unwrap();
        (tree, a, b, c)
    }

    #[test]
    fn given_new_tree_when_created_then_contains_only_root() {
        let tree = TreeArena::with_root(1);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.value(tree.root()), Some(&1));
        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn given_children_when_appending_then_order_is_preserved() {
        let (tree, a, b, c) = sample();
        assert_eq!(tree.children(tree.root()), &[a, b]);
        assert_eq!(tree.children(a), &[c]);
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn given_tree_when_iterating_then_visits_preorder_and_postorder() {
        let (tree, ..) = sample();
        let pre: Vec<_> = tree.iter().map(|(_, n)| n.data).collect();
        assert_eq!(pre, vec!["root", "a", "c", "b"]);
        let post: Vec<_> = tree.iter_postorder().map(|(_, n)| n.data).collect();
        assert_eq!(post, vec!["c", "a", "b", "root"]);
    }

    #[test]
    fn given_tree_when_collecting_leaves_then_returns_left_to_right() {
        let (tree, _, b, c) = sample();
        assert_eq!(tree.leaves(), vec![c, b]);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.path_to(c), vec![tree.root(), tree.parent(c).unwrap(), c]);
    }

    #[test]
    fn given_foreign_parent_when_adding_child_then_errors_without_mutation() {
        let mut other = TreeArena::with_root("x");
        let foreign = other.add_child(other.root(), "y").unwrap();

        let mut tree = TreeArena::with_root("root");
        let result = tree.add_child(foreign, "orphan");

        assert!(matches!(result, Err(DomainError::NodeNotFound(_))));
        assert_eq!(tree.len(), 1);
        assert!(tree.children(tree.root()).is_empty());
    }

    #[test]
    fn given_other_trees_root_when_adding_child_then_errors_without_mutation() {
        let other = TreeArena::with_root("x");
        let mut tree = TreeArena::with_root("root");

        let result = tree.add_child(other.root(), "orphan");

        assert!(matches!(result, Err(DomainError::NodeNotFound(_))));
        assert_eq!(tree.len(), 1);
        assert!(tree.children(tree.root()).is_empty());
        assert!(!tree.contains(other.root()));
    }

    #[test]
    fn given_other_trees_handle_when_reading_then_nothing_is_returned() {
        let (other, a, ..) = sample();
        let (tree, ..) = sample();

        assert_eq!(tree.value(other.root()), None);
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.parent(a), None);
        assert_eq!(other.value(a), Some(&"a"));
    }
}
