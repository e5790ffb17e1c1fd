//! Expand/collapse tracking, independent of selection.
//!
//! No cascade: toggling a node's expansion never touches its descendants or
//! ancestors, and there is no cross-invariant with the selection sets.

use std::collections::HashSet;

use treesel_core::TreeIndex;

/// The expanded-id set over one [`TreeIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    /// Everything collapsed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is expanded. False for unknown ids.
    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Borrow the raw expanded set.
    #[must_use]
    pub fn expanded(&self) -> &HashSet<String> {
        &self.expanded
    }

    /// Expanded ids in the index's pre-order, stale ids dropped.
    #[must_use]
    pub fn expanded_ids<M>(&self, index: &TreeIndex<M>) -> Vec<String> {
        index
            .ids()
            .filter(|id| self.expanded.contains(*id))
            .map(str::to_string)
            .collect()
    }

    /// Replace the expanded set wholesale.
    pub(crate) fn set_expanded<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expanded = ids.into_iter().map(Into::into).collect();
    }

    /// Flip `id`'s expansion. Unknown ids are a no-op.
    pub fn toggle<M>(&mut self, index: &TreeIndex<M>, id: &str) {
        if !index.contains(id) {
            return;
        }
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Expand every id the index knows.
    pub fn expand_all<M>(&mut self, index: &TreeIndex<M>) {
        self.expanded = index.ids().map(str::to_string).collect();
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treesel_core::TreeNode;

    fn index() -> TreeIndex {
        let tree = TreeNode::new("root", "Root")
            .child(TreeNode::new("a", "A").child(TreeNode::new("a1", "A1")))
            .child(TreeNode::new("b", "B"));
        TreeIndex::build(&[tree])
    }

    #[test]
    fn toggle_flips_membership() {
        let index = index();
        let mut exp = ExpansionState::new();
        assert!(!exp.is_expanded("a"));
        exp.toggle(&index, "a");
        assert!(exp.is_expanded("a"));
        exp.toggle(&index, "a");
        assert!(!exp.is_expanded("a"));
    }

    #[test]
    fn toggle_does_not_cascade() {
        let index = index();
        let mut exp = ExpansionState::new();
        exp.toggle(&index, "root");
        assert!(exp.is_expanded("root"));
        assert!(!exp.is_expanded("a"));
        assert!(!exp.is_expanded("a1"));
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let index = index();
        let mut exp = ExpansionState::new();
        exp.toggle(&index, "ghost");
        assert!(exp.expanded().is_empty());
    }

    #[test]
    fn expand_all_then_collapse_all() {
        let index = index();
        let mut exp = ExpansionState::new();
        exp.expand_all(&index);
        assert_eq!(exp.expanded().len(), index.len());
        exp.collapse_all();
        assert!(exp.expanded().is_empty());
    }

    #[test]
    fn expanded_ids_follow_preorder_and_drop_stale() {
        let index = index();
        let mut exp = ExpansionState::new();
        exp.set_expanded(["b", "ghost", "root"]);
        assert_eq!(exp.expanded_ids(&index), ["root", "b"]);
    }
}
