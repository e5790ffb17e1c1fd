//! Caller-owned input tree.
//!
//! A [`TreeNode`] is the plain hierarchical value the data source hands to
//! the engine. The engine never mutates it; it only borrows the tree while
//! building a [`TreeIndex`](crate::index::TreeIndex).
//!
//! # Example
//!
//! ```
//! use treesel_core::TreeNode;
//!
//! let tree: TreeNode = TreeNode::new("root", "Root")
//!     .child(TreeNode::new("docs", "Documents")
//!         .child(TreeNode::new("a.txt", "a.txt")))
//!     .child(TreeNode::new("trash", "Trash").with_disabled(true));
//!
//! assert_eq!(tree.children().len(), 2);
//! assert!(tree.children()[1].is_disabled());
//! ```

/// A node in the caller's tree.
///
/// `id` must be unique across the whole tree (the structure is a tree, not a
/// DAG). `M` is an opaque metadata payload the engine carries but never
/// inspects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode<M = ()> {
    id: String,
    label: String,
    children: Vec<TreeNode<M>>,
    disabled: bool,
    metadata: Option<M>,
}

impl<M> TreeNode<M> {
    /// Create a leaf node with the given id and display label.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
            disabled: false,
            metadata: None,
        }
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: TreeNode<M>) -> Self {
        self.children.push(node);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<TreeNode<M>>) -> Self {
        self.children = nodes;
        self
    }

    /// Mark this node as disabled.
    ///
    /// Disabled is carried as data for the rendering layer; the engine does
    /// not gate any operation on it.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Attach an opaque metadata payload.
    #[must_use]
    pub fn with_metadata(mut self, metadata: M) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Get the node id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the direct children, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[TreeNode<M>] {
        &self.children
    }

    /// Whether this node is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Get the metadata payload, if any.
    #[must_use]
    pub fn metadata(&self) -> Option<&M> {
        self.metadata.as_ref()
    }

    /// Count all nodes in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}
