//! Derived tree index and traversal helpers.
//!
//! [`TreeIndex::build`] transforms a caller-owned forest of
//! [`TreeNode`] values into three lookup maps in a single depth-first pass
//! (parent before children), O(n) in node count:
//!
//! - id → [`FlatNode`] (every node, structure dropped),
//! - parent id → ordered direct child ids (absent for leaves),
//! - child id → parent id (absent for roots).
//!
//! The child→parent and parent→children maps are inverses of each other for
//! well-formed input. Duplicate child ids under one parent are deduplicated
//! before insertion; a duplicate id under a *different* parent is
//! last-write-wins and left unvalidated. Callers that want duplicate ids
//! rejected instead use [`TreeIndex::build_strict`].
//!
//! Traversal helpers ([`descendants`](TreeIndex::descendants),
//! [`ancestors`](TreeIndex::ancestors)) are pure functions of the current
//! index. Unknown ids always produce empty results rather than errors: the
//! rendering layer may legitimately hold ids during the window between a
//! data-source update and an index rebuild.

use core::fmt;
use std::collections::{HashMap, HashSet};

use crate::node::TreeNode;

/// Error from [`TreeIndex::build_strict`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The same id appeared on more than one node.
    DuplicateId {
        /// The offending id.
        id: String,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "duplicate node id: {id}"),
        }
    }
}

impl std::error::Error for IndexError {}

/// Per-id record kept by the index: the node's own data with the structure
/// dropped. Structure is queried through the index maps instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatNode<M = ()> {
    id: String,
    label: String,
    disabled: bool,
    metadata: Option<M>,
}

impl<M> FlatNode<M> {
    /// The node id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the node is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The metadata payload, if any.
    #[must_use]
    pub fn metadata(&self) -> Option<&M> {
        self.metadata.as_ref()
    }
}

impl<M: Clone> From<&TreeNode<M>> for FlatNode<M> {
    fn from(node: &TreeNode<M>) -> Self {
        Self {
            id: node.id().to_string(),
            label: node.label().to_string(),
            disabled: node.is_disabled(),
            metadata: node.metadata().cloned(),
        }
    }
}

/// The derived lookup structures for one input forest.
///
/// Rebuilt whenever the input tree changes; never mutated incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeIndex<M = ()> {
    nodes: HashMap<String, FlatNode<M>>,
    children: HashMap<String, Vec<String>>,
    parents: HashMap<String, String>,
    /// Pre-order id sequence over the whole input. Gives queries and
    /// notifications a deterministic order.
    order: Vec<String>,
    roots: Vec<String>,
}

impl<M: Clone> TreeIndex<M> {
    /// Build the index from a forest of roots in one depth-first pass.
    ///
    /// Duplicate child ids under the same parent are skipped before
    /// insertion. Duplicate ids across different parents are last-write-wins
    /// into the node and parent maps; this is observed behavior for
    /// malformed input, not a contract.
    #[must_use]
    pub fn build(roots: &[TreeNode<M>]) -> Self {
        let mut index = Self {
            nodes: HashMap::new(),
            children: HashMap::new(),
            parents: HashMap::new(),
            order: Vec::new(),
            roots: Vec::new(),
        };
        for root in roots {
            if !index.roots.iter().any(|r| r == root.id()) {
                index.roots.push(root.id().to_string());
            }
            index.insert_subtree(root, None);
        }
        index
    }

    /// Build the index, rejecting any repeated id with
    /// [`IndexError::DuplicateId`].
    pub fn build_strict(roots: &[TreeNode<M>]) -> Result<Self, IndexError> {
        fn check<M>(node: &TreeNode<M>, seen: &mut HashSet<String>) -> Result<(), IndexError> {
            if !seen.insert(node.id().to_string()) {
                return Err(IndexError::DuplicateId {
                    id: node.id().to_string(),
                });
            }
            for child in node.children() {
                check(child, seen)?;
            }
            Ok(())
        }

        let mut seen = HashSet::new();
        for root in roots {
            check(root, &mut seen)?;
        }
        Ok(Self::build(roots))
    }

    fn insert_subtree(&mut self, node: &TreeNode<M>, parent: Option<&str>) {
        let id = node.id();
        let first_visit = !self.nodes.contains_key(id);
        self.nodes.insert(id.to_string(), FlatNode::from(node));
        if first_visit {
            self.order.push(id.to_string());
        }
        if let Some(parent) = parent {
            self.parents.insert(id.to_string(), parent.to_string());
        }

        let mut kept: Vec<String> = Vec::new();
        for child in node.children() {
            // Duplicate child ids under the same parent are dropped here.
            if kept.iter().any(|k| k == child.id()) {
                continue;
            }
            kept.push(child.id().to_string());
            self.insert_subtree(child, Some(id));
        }
        if kept.is_empty() {
            self.children.remove(id);
        } else {
            self.children.insert(id.to_string(), kept);
        }
    }
}

impl<M> TreeIndex<M> {
    /// Look up the flattened node for an id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&FlatNode<M>> {
        self.nodes.get(id)
    }

    /// Whether the index knows this id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Ordered direct child ids; empty for unknown ids and leaves.
    #[must_use]
    pub fn children(&self, id: &str) -> &[String] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// Parent id; `None` for unknown ids and roots.
    #[must_use]
    pub fn parent(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    /// Root ids in input order.
    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// All known ids in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Every (parent id, ordered child ids) pair in the index.
    pub fn branches(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.children.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of known nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All ids reachable below `id`, in pre-order, excluding `id` itself.
    ///
    /// Empty for unknown ids and leaves. Malformed input (duplicate ids under
    /// different parents) can make the derived maps cyclic; a visited set
    /// keeps the walk terminating.
    #[must_use]
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(id) {
            return out;
        }
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(id);
        let mut stack: Vec<&str> = self.children(id).iter().rev().map(String::as_str).collect();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            out.push(current.to_string());
            for child in self.children(current).iter().rev() {
                stack.push(child.as_str());
            }
        }
        out
    }

    /// All ids on the path from `id` to its root, nearest ancestor first,
    /// excluding `id` itself. Empty for unknown ids and roots.
    #[must_use]
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(id) {
            return out;
        }
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(id);
        let mut current = id;
        while let Some(parent) = self.parents.get(current) {
            if !seen.insert(parent.as_str()) {
                break;
            }
            out.push(parent.clone());
            current = parent;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `root → [a → [a1, a2], b]`
    fn sample() -> TreeNode {
        TreeNode::new("root", "Root")
            .child(
                TreeNode::new("a", "A")
                    .child(TreeNode::new("a1", "A1"))
                    .child(TreeNode::new("a2", "A2")),
            )
            .child(TreeNode::new("b", "B"))
    }

    // ── Build ───────────────────────────────────────────────────────

    #[test]
    fn build_covers_every_node() {
        let index = TreeIndex::build(&[sample()]);
        assert_eq!(index.len(), 5);
        for id in ["root", "a", "a1", "a2", "b"] {
            assert!(index.contains(id), "missing {id}");
        }
        assert!(!index.is_empty());
    }

    #[test]
    fn build_preserves_preorder() {
        let index = TreeIndex::build(&[sample()]);
        let ids: Vec<&str> = index.ids().collect();
        assert_eq!(ids, vec!["root", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn build_child_and_parent_maps_are_inverses() {
        let index = TreeIndex::build(&[sample()]);
        for (parent, kids) in index.branches() {
            for kid in kids {
                assert_eq!(index.parent(kid), Some(parent));
            }
        }
        assert_eq!(index.children("root"), ["a", "b"]);
        assert_eq!(index.children("a"), ["a1", "a2"]);
    }

    #[test]
    fn leaves_have_no_children_entry() {
        let index = TreeIndex::build(&[sample()]);
        assert!(index.children("a1").is_empty());
        assert!(index.children("b").is_empty());
    }

    #[test]
    fn roots_have_no_parent() {
        let index = TreeIndex::build(&[sample()]);
        assert_eq!(index.parent("root"), None);
        assert_eq!(index.roots(), ["root"]);
    }

    #[test]
    fn build_multiple_roots() {
        let forest: Vec<TreeNode> = vec![
            TreeNode::new("r1", "R1").child(TreeNode::new("c1", "C1")),
            TreeNode::new("r2", "R2"),
        ];
        let index = TreeIndex::build(&forest);
        assert_eq!(index.roots(), ["r1", "r2"]);
        assert_eq!(index.parent("c1"), Some("r1"));
        assert_eq!(index.parent("r2"), None);
    }

    #[test]
    fn build_empty_forest() {
        let index = TreeIndex::<()>::build(&[]);
        assert!(index.is_empty());
        assert!(index.roots().is_empty());
        assert_eq!(index.ids().count(), 0);
    }

    #[test]
    fn flat_node_carries_data() {
        let tree = TreeNode::new("x", "X label")
            .with_disabled(true)
            .with_metadata("payload");
        let index = TreeIndex::build(&[tree]);
        let node = index.node("x").unwrap();
        assert_eq!(node.id(), "x");
        assert_eq!(node.label(), "X label");
        assert!(node.is_disabled());
        assert_eq!(node.metadata(), Some(&"payload"));
    }

    // ── Duplicates ──────────────────────────────────────────────────

    #[test]
    fn duplicate_child_under_same_parent_is_dropped() {
        let tree: TreeNode = TreeNode::new("p", "P")
            .child(TreeNode::new("c", "first"))
            .child(TreeNode::new("c", "second"));
        let index = TreeIndex::build(&[tree]);
        assert_eq!(index.children("p"), ["c"]);
        // First occurrence wins under one parent: the second is never visited.
        assert_eq!(index.node("c").unwrap().label(), "first");
    }

    #[test]
    fn duplicate_id_across_parents_is_last_write_wins() {
        let tree: TreeNode = TreeNode::new("root", "Root")
            .child(TreeNode::new("p1", "P1").child(TreeNode::new("dup", "under p1")))
            .child(TreeNode::new("p2", "P2").child(TreeNode::new("dup", "under p2")));
        let index = TreeIndex::build(&[tree]);
        assert_eq!(index.parent("dup"), Some("p2"));
        assert_eq!(index.node("dup").unwrap().label(), "under p2");
    }

    #[test]
    fn build_strict_rejects_duplicates() {
        let tree: TreeNode = TreeNode::new("root", "Root")
            .child(TreeNode::new("dup", "one"))
            .child(TreeNode::new("x", "X").child(TreeNode::new("dup", "two")));
        let err = TreeIndex::build_strict(&[tree]).unwrap_err();
        assert_eq!(
            err,
            IndexError::DuplicateId {
                id: "dup".to_string()
            }
        );
        assert_eq!(err.to_string(), "duplicate node id: dup");
    }

    #[test]
    fn build_strict_accepts_well_formed_input() {
        let index = TreeIndex::build_strict(&[sample()]).unwrap();
        assert_eq!(index.len(), 5);
    }

    // ── Traversal ───────────────────────────────────────────────────

    #[test]
    fn descendants_preorder_excluding_self() {
        let index = TreeIndex::build(&[sample()]);
        assert_eq!(index.descendants("root"), ["a", "a1", "a2", "b"]);
        assert_eq!(index.descendants("a"), ["a1", "a2"]);
    }

    #[test]
    fn descendants_of_leaf_and_unknown_are_empty() {
        let index = TreeIndex::build(&[sample()]);
        assert!(index.descendants("b").is_empty());
        assert!(index.descendants("nope").is_empty());
    }

    #[test]
    fn ancestors_nearest_first() {
        let index = TreeIndex::build(&[sample()]);
        assert_eq!(index.ancestors("a1"), ["a", "root"]);
        assert_eq!(index.ancestors("b"), ["root"]);
    }

    #[test]
    fn ancestors_of_root_and_unknown_are_empty() {
        let index = TreeIndex::build(&[sample()]);
        assert!(index.ancestors("root").is_empty());
        assert!(index.ancestors("nope").is_empty());
    }

    #[test]
    fn traversal_terminates_on_cyclic_maps_from_malformed_input() {
        // A duplicate id on an ancestor's own descendant leaves the derived
        // maps mutually referential: the final maps here say b → [a],
        // a → [b], and parent(a) = b, parent(b) = a.
        let tree: TreeNode = TreeNode::new("root", "Root")
            .child(TreeNode::new("b", "B").child(TreeNode::new("a", "A").child(TreeNode::new("b", "B"))));
        let index = TreeIndex::build(&[tree]);
        // Must terminate; exact contents are unspecified for malformed input.
        assert_eq!(index.descendants("root"), ["b", "a"]);
        assert_eq!(index.descendants("a"), ["b"]);
        assert_eq!(index.ancestors("a"), ["b"]);
    }
}
