//! The query/mutation facade a rendering layer talks to.
//!
//! [`TreeView`] combines one [`TreeIndex`], one [`SelectionState`], and one
//! [`ExpansionState`] behind a narrow surface. All mutations go through the
//! facade; the rendering layer only ever queries. Each view instance owns
//! its own state, so multiple trees coexist without cross-talk.
//!
//! Every query result is a snapshot valid until the next mutating call.
//! There is no concurrent mutation path: operations are synchronous and
//! recompute derived state in full before returning.

use core::fmt;

use treesel_core::{FlatNode, TreeIndex, TreeNode};

use crate::expansion::ExpansionState;
use crate::selection::SelectionState;

/// Change-notification handler: invoked after every operation that can
/// change selection, with the pre-order selected-id list and the matching
/// flattened nodes (stale ids silently dropped).
pub type ChangeHandler<M> = Box<dyn FnMut(&[String], &[&FlatNode<M>])>;

/// Tri-state selection plus expansion state over one tree.
pub struct TreeView<M = ()> {
    index: TreeIndex<M>,
    selection: SelectionState,
    expansion: ExpansionState,
    on_change: Option<ChangeHandler<M>>,
}

impl<M> fmt::Debug for TreeView<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeView")
            .field("nodes", &self.index.len())
            .field("selected", &self.selection.selected().len())
            .field("indeterminate", &self.selection.indeterminate().len())
            .field("expanded", &self.expansion.expanded().len())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<M: Clone> TreeView<M> {
    /// Build a view over the given forest. The tree stays owned by the
    /// caller; the view keeps only its derived index.
    #[must_use]
    pub fn new(roots: &[TreeNode<M>]) -> Self {
        Self {
            index: TreeIndex::build(roots),
            selection: SelectionState::new(),
            expansion: ExpansionState::new(),
            on_change: None,
        }
    }

    /// Replace the tree. Selection and expansion state are kept as-is; ids
    /// absent from the new tree become inert (never answered by queries).
    /// Indeterminate is recomputed against the new index. The change handler
    /// is not fired.
    pub fn set_tree(&mut self, roots: &[TreeNode<M>]) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("tree_view_set_tree", nodes = roots.len()).entered();

        self.index = TreeIndex::build(roots);
        self.selection.recompute_indeterminate(&self.index);
    }
}

impl<M> TreeView<M> {
    /// Seed the initial selection. Indeterminate is derived immediately —
    /// this is the one path through which a partial parent can surface as
    /// indeterminate before any interactive toggle.
    #[must_use]
    pub fn with_selected<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.set_selected(ids);
        self.selection.recompute_indeterminate(&self.index);
        self
    }

    /// Seed the initial expansion.
    #[must_use]
    pub fn with_expanded<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expansion.set_expanded(ids);
        self
    }

    /// Register the change-notification handler. Not invoked for the
    /// initial state, only after mutating operations.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(&[String], &[&FlatNode<M>]) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Select or deselect `id` with full cascade semantics
    /// (see [`SelectionState::toggle`]). Fires the change handler, also for
    /// unknown-id no-ops.
    pub fn toggle_select(&mut self, id: &str, selected: bool) {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("tree_view_toggle_select", id = %id, selected).entered();

        self.selection.toggle(&self.index, id, selected);
        self.notify();
    }

    /// Select every known node. Fires the change handler.
    pub fn select_all(&mut self) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("tree_view_select_all").entered();

        self.selection.select_all(&self.index);
        self.notify();
    }

    /// Clear the selection. Fires the change handler.
    pub fn deselect_all(&mut self) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("tree_view_deselect_all").entered();

        self.selection.clear();
        self.notify();
    }

    /// Flip `id`'s expansion; no cascade, no notification. Unknown ids are
    /// a no-op.
    pub fn toggle_expand(&mut self, id: &str) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("tree_view_toggle_expand", id = %id).entered();

        self.expansion.toggle(&self.index, id);
    }

    /// Expand every known node. No notification.
    pub fn expand_all(&mut self) {
        self.expansion.expand_all(&self.index);
    }

    /// Collapse every node. No notification.
    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// O(1) membership check; false for unknown ids.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// O(1) membership check; false for unknown ids.
    #[must_use]
    pub fn is_indeterminate(&self, id: &str) -> bool {
        self.selection.is_indeterminate(id)
    }

    /// O(1) membership check; false for unknown ids.
    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Whether the node carries the disabled flag; false for unknown ids.
    #[must_use]
    pub fn is_disabled(&self, id: &str) -> bool {
        self.index.node(id).is_some_and(FlatNode::is_disabled)
    }

    /// Look up the flattened node for an id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&FlatNode<M>> {
        self.index.node(id)
    }

    /// Current selection in pre-order, stale ids dropped.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.selected_ids(&self.index)
    }

    /// Flattened nodes for the current selection, in pre-order. Ids no
    /// longer present in the tree are silently dropped.
    #[must_use]
    pub fn selected_nodes(&self) -> Vec<&FlatNode<M>> {
        self.index
            .ids()
            .filter(|id| self.selection.is_selected(id))
            .filter_map(|id| self.index.node(id))
            .collect()
    }

    /// Pre-order ids with collapsed subtrees skipped: the rows a rendering
    /// layer would actually draw. Roots are always visible.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack: Vec<&str> = self.index.roots().iter().rev().map(String::as_str).collect();
        while let Some(id) = stack.pop() {
            out.push(id.to_string());
            if self.expansion.is_expanded(id) {
                for child in self.index.children(id).iter().rev() {
                    stack.push(child.as_str());
                }
            }
        }
        out
    }

    /// Borrow the underlying index for structural queries
    /// (children, ancestors, descendants).
    #[must_use]
    pub fn index(&self) -> &TreeIndex<M> {
        &self.index
    }

    pub(crate) fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub(crate) fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub(crate) fn restore_state<I, J, S, T>(&mut self, selected: I, expanded: J)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.selection.set_selected(selected);
        self.selection.recompute_indeterminate(&self.index);
        self.expansion.set_expanded(expanded);
    }

    fn notify(&mut self) {
        if let Some(handler) = self.on_change.as_mut() {
            let ids = self.selection.selected_ids(&self.index);
            let nodes: Vec<&FlatNode<M>> =
                ids.iter().filter_map(|id| self.index.node(id)).collect();
            handler(&ids, &nodes);
        }
    }
}
