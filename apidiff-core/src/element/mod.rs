//! Declaration element model.
//!
//! A unit's public surface is held in a [`DeclarationTree`]: an arena of nodes
//! addressed by [`NodeId`]. Every node owns its children through the arena and
//! stores its parent as an index, so walking up to build a dotted path never
//! implies ownership and the tree cannot form reference cycles.
//!
//! [`Element`] is a cheap, copyable handle onto one node. It exposes the keys
//! the diff engine matches on:
//!
//! - `description`: the node's own signature, children excluded
//! - `recursive_description`: the signature plus every descendant, in order
//! - `diffable_signature`: a looser key used for fallback matching
//! - `consolidatable_name`: the key used to pair additions with removals

use once_cell::sync::OnceCell;
use std::fmt;

pub mod declaration;
pub mod differences;

pub use declaration::{Declaration, DeclarationKind};

/// Index of a node inside its [`DeclarationTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    declaration: Declaration,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena holding one unit's declaration tree.
///
/// The root is always a [`Declaration::Root`] named after the unit.
#[derive(Clone, Debug)]
pub struct DeclarationTree {
    nodes: Vec<Node>,
    /// Memoized recursive descriptions, reset along the ancestor chain on mutation.
    rendered: Vec<OnceCell<String>>,
}

impl DeclarationTree {
    /// Create a tree holding only a root for `unit_name`.
    pub fn new(unit_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node {
                declaration: Declaration::Root {
                    name: unit_name.into(),
                },
                parent: None,
                children: Vec::new(),
            }],
            rendered: vec![OnceCell::new()],
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> Element<'_> {
        self.element(self.root_id())
    }

    /// Name of the unit this tree describes.
    pub fn unit_name(&self) -> &str {
        self.nodes[0].declaration.path_component_name()
    }

    /// Handle onto the node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn element(&self, id: NodeId) -> Element<'_> {
        assert!(id.0 < self.nodes.len(), "node {:?} is not part of this tree", id);
        Element { tree: self, id }
    }

    /// Append `declaration` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree or if `declaration` is a root.
    pub fn add_child(&mut self, parent: NodeId, declaration: Declaration) -> NodeId {
        assert!(
            parent.0 < self.nodes.len(),
            "parent {:?} is not part of this tree",
            parent
        );
        assert!(
            declaration.kind() != DeclarationKind::Root,
            "a root declaration cannot be nested"
        );

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            declaration,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.rendered.push(OnceCell::new());
        self.nodes[parent.0].children.push(id);
        self.invalidate(parent);
        id
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root; this reports whether the root has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    fn invalidate(&mut self, from: NodeId) {
        let mut current = Some(from);
        while let Some(id) = current {
            self.rendered[id.0].take();
            current = self.nodes[id.0].parent;
        }
    }
}

/// A handle onto one node of a [`DeclarationTree`].
#[derive(Clone, Copy)]
pub struct Element<'a> {
    tree: &'a DeclarationTree,
    id: NodeId,
}

impl<'a> Element<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    /// The owning tree's address paired with the node id. Equal only for the
    /// same node of the same tree.
    pub(crate) fn identity(&self) -> (*const DeclarationTree, NodeId) {
        (self.tree as *const DeclarationTree, self.id)
    }

    pub fn declaration(&self) -> &'a Declaration {
        &self.node().declaration
    }

    pub fn kind(&self) -> DeclarationKind {
        self.declaration().kind()
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Single-line rendering of this declaration, children excluded.
    pub fn description(&self) -> String {
        self.declaration().description()
    }

    /// This declaration followed by all of its descendants, in child order.
    ///
    /// Children are indented by two spaces per level inside a `{ }` block.
    pub fn recursive_description(&self) -> &'a str {
        let tree: &'a DeclarationTree = self.tree;
        tree.rendered[self.id.0].get_or_init(|| self.render_recursive())
    }

    fn render_recursive(&self) -> String {
        let mut out = self.description();
        let children = &self.node().children;
        if children.is_empty() {
            return out;
        }

        out.push_str(" {");
        for child in self.children() {
            for line in child.recursive_description().lines() {
                out.push_str("\n  ");
                out.push_str(line);
            }
        }
        out.push_str("\n}");
        out
    }

    pub fn path_component_name(&self) -> &'a str {
        self.declaration().path_component_name()
    }

    pub fn diffable_signature(&self) -> String {
        self.declaration().diffable_signature()
    }

    pub fn consolidatable_name(&self) -> String {
        self.declaration().consolidatable_name()
    }

    pub fn parent(&self) -> Option<Element<'a>> {
        self.node().parent.map(|id| Element {
            tree: self.tree,
            id,
        })
    }

    /// Dotted chain of ancestor path components, outermost first.
    ///
    /// `None` for the root.
    ///
    /// # Panics
    ///
    /// Panics if the parent chain is longer than the tree, which can only
    /// happen if it is cyclic.
    pub fn parent_path(&self) -> Option<String> {
        let mut components = Vec::new();
        let mut current = self.parent();
        while let Some(ancestor) = current {
            assert!(
                components.len() < self.tree.len(),
                "cyclic parent chain at {:?}",
                self.id
            );
            components.push(ancestor.path_component_name());
            current = ancestor.parent();
        }

        if components.is_empty() {
            return None;
        }
        components.reverse();
        Some(components.join("."))
    }

    pub fn children(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| Element { tree, id })
    }

    /// Whether `other` denotes the same declaration in another version.
    pub fn is_diffable(&self, other: &Element<'_>) -> bool {
        self.declaration().is_diffable_with(other.declaration())
    }

    /// Field-level differences from this element to `other`.
    pub fn differences(&self, other: &Element<'_>) -> Vec<String> {
        differences::differences(self.declaration(), other.declaration())
    }
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("description", &self.description())
            .finish()
    }
}
