//! Contains the [`SyntaxTree`], an ordered tree whose nodes live in an
//! [`Arena`] and refer to each other by [`ID`].

use std::fmt::{Display, Write};

use getset::{CopyGetters, Getters};
use sadc_arena::{Arena, ID};

/// The identifier of a [`Node`] within its [`SyntaxTree`].
pub type NodeID<L> = ID<Node<L>>;

/// A single node of a [`SyntaxTree`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Node<L> {
    /// The label the node was created with.
    #[get = "pub"]
    label: L,

    /// The node this node is a child of, [`None`] for the root.
    #[get_copy = "pub"]
    parent: Option<NodeID<L>>,

    /// The children of the node, in insertion order.
    #[get = "pub"]
    children: Vec<NodeID<L>>,
}

/// An ordered tree of labelled nodes.
///
/// A tree always has a root. Subtrees built separately are merged in with
/// [`SyntaxTree::attach`], which moves their nodes into this tree's arena, so
/// that no node is ever shared between two trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree<L> {
    nodes: Arena<Node<L>>,
    root: NodeID<L>,
}

impl<L> SyntaxTree<L> {
    /// Creates a tree consisting of a single root node.
    #[must_use]
    pub fn new(root: L) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.insert(Node {
            label: root,
            parent: None,
            children: Vec::new(),
        });

        Self { nodes, root }
    }

    /// Gets the root of the tree.
    #[must_use]
    pub const fn root(&self) -> NodeID<L> { self.root }

    /// Gets the node with the given ID.
    #[must_use]
    pub fn get(&self, id: NodeID<L>) -> Option<&Node<L>> { self.nodes.get(id) }

    /// Gets the label of the node with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID doesn't belong to this tree.
    #[must_use]
    pub fn label(&self, id: NodeID<L>) -> &L { &self.nodes[id].label }

    /// Gets the children of the node with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID doesn't belong to this tree.
    #[must_use]
    pub fn children(&self, id: NodeID<L>) -> &[NodeID<L>] {
        &self.nodes[id].children
    }

    /// Gets the parent of the node with the given ID.
    #[must_use]
    pub fn parent(&self, id: NodeID<L>) -> Option<NodeID<L>> {
        self.nodes.get(id).and_then(|x| x.parent)
    }

    /// Appends a new node labelled `label` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` doesn't belong to this tree.
    pub fn add_child(&mut self, parent: NodeID<L>, label: L) -> NodeID<L> {
        let id = self.nodes.insert(Node {
            label,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);

        id
    }

    /// Moves every node of `subtree` into this tree and makes its root the
    /// last child of `parent`. Returns the new ID of the subtree's root.
    ///
    /// # Panics
    ///
    /// Panics if `parent` doesn't belong to this tree.
    pub fn attach(&mut self, parent: NodeID<L>, subtree: Self) -> NodeID<L> {
        let offset = self.nodes.len();
        let relocate = |id: NodeID<L>| NodeID::new(id.index() + offset);
        let subtree_root = relocate(subtree.root);

        for node in subtree.nodes {
            let parent = match node.parent {
                Some(parent) => relocate(parent),
                None => parent,
            };

            self.nodes.insert(Node {
                label: node.label,
                parent: Some(parent),
                children: node.children.into_iter().map(relocate).collect(),
            });
        }

        self.nodes[parent].children.push(subtree_root);

        subtree_root
    }

    /// Gets the number of edges between the node and the root.
    #[must_use]
    pub fn depth(&self, id: NodeID<L>) -> usize {
        std::iter::successors(self.parent(id), |x| self.parent(*x)).count()
    }

    /// Iterates the tree depth-first, yielding each node with its depth.
    pub fn depth_first(&self) -> impl Iterator<Item = (NodeID<L>, usize)> + '_ {
        let mut stack = vec![(self.root, 0)];

        std::iter::from_fn(move || {
            let (id, depth) = stack.pop()?;
            stack.extend(
                self.nodes[id].children.iter().rev().map(|x| (*x, depth + 1)),
            );

            Some((id, depth))
        })
    }
}

impl<L: Display> SyntaxTree<L> {
    /// Renders the tree one node per line, each line prefixed with one `-`
    /// per level of depth.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();

        for (id, depth) in self.depth_first() {
            // writing into a `String` can't fail
            let _ = writeln!(
                output,
                "{}{}",
                "-".repeat(depth),
                self.nodes[id].label
            );
        }

        output
    }
}

#[cfg(test)]
mod test;
