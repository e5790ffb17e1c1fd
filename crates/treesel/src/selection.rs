//! The cascade selection engine.
//!
//! [`SelectionState`] owns the selected-id set and the derived
//! indeterminate-id set. Both are recomputed, never patched in place, on
//! every mutation, so `selected ∩ indeterminate = ∅` holds at every
//! observable point.
//!
//! # Cascade rules
//!
//! [`toggle`](SelectionState::toggle) with `selected = true`:
//!
//! 1. the node and every descendant are inserted;
//! 2. every ancestor on the path is inserted unconditionally (**ancestor
//!    promotion**) — even when its other children are unselected.
//!
//! With `selected = false`:
//!
//! 1. the node and every descendant are removed;
//! 2. each ancestor, nearest first, is removed iff none of its direct
//!    children remain selected. Nearest-first order is what lets the removal
//!    propagate transitively up an otherwise-empty path.
//!
//! # Indeterminate is rare by design
//!
//! Because promotion marks ancestors fully selected the moment any one
//! descendant is selected, a parent reachable through interactive toggling
//! is never merely indeterminate: it is selected outright until its last
//! selected descendant is cleared. Indeterminate therefore surfaces only for
//! parents whose partial selection was supplied as *initial* state and has
//! not yet been touched by a toggle. Downstream views depend on this
//! asymmetry; do not "repair" it here.
//!
//! A consequence worth knowing: toggling a node on and then off does not
//! necessarily restore the previous selected set, because promotion of an
//! ancestor is only undone once every selected descendant under it is
//! cleared.

use std::collections::HashSet;

use treesel_core::TreeIndex;

/// Selected and indeterminate id sets over one [`TreeIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: HashSet<String>,
    indeterminate: HashSet<String>,
}

impl SelectionState {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is currently selected. False for unknown ids.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Whether `id` is currently indeterminate (some but not all of its
    /// direct children selected, itself unselected). False for unknown ids.
    #[must_use]
    pub fn is_indeterminate(&self, id: &str) -> bool {
        self.indeterminate.contains(id)
    }

    /// Borrow the raw selected set.
    #[must_use]
    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Borrow the raw indeterminate set.
    #[must_use]
    pub fn indeterminate(&self) -> &HashSet<String> {
        &self.indeterminate
    }

    /// Current selection in the index's pre-order. Ids no longer present in
    /// the index (stale after a tree swap) are silently dropped.
    #[must_use]
    pub fn selected_ids<M>(&self, index: &TreeIndex<M>) -> Vec<String> {
        index
            .ids()
            .filter(|id| self.selected.contains(*id))
            .map(str::to_string)
            .collect()
    }

    /// Replace the selected set wholesale. The caller is responsible for
    /// recomputing indeterminate afterwards.
    pub(crate) fn set_selected<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = ids.into_iter().map(Into::into).collect();
    }

    /// Apply one select/deselect toggle with full cascade semantics.
    ///
    /// Unknown ids skip the cascade but still trigger the indeterminate
    /// recompute over the unchanged selected set (idempotent safety net).
    pub fn toggle<M>(&mut self, index: &TreeIndex<M>, id: &str, selected: bool) {
        let mut next = self.selected.clone();
        if index.contains(id) {
            if selected {
                next.insert(id.to_string());
                for descendant in index.descendants(id) {
                    next.insert(descendant);
                }
                // Ancestor promotion: the whole path becomes fully selected,
                // regardless of sibling state.
                for ancestor in index.ancestors(id) {
                    next.insert(ancestor);
                }
            } else {
                next.remove(id);
                for descendant in index.descendants(id) {
                    next.remove(&descendant);
                }
                // Nearest first, so a released parent is already out of the
                // set when its own parent is examined.
                for ancestor in index.ancestors(id) {
                    let any_child_selected = index
                        .children(&ancestor)
                        .iter()
                        .any(|child| next.contains(child));
                    if !any_child_selected {
                        next.remove(&ancestor);
                    }
                }
            }
        }
        self.selected = next;
        self.recompute_indeterminate(index);
    }

    /// Select every id the index knows. Indeterminate becomes empty: no
    /// partial state is possible when everything is selected.
    pub fn select_all<M>(&mut self, index: &TreeIndex<M>) {
        self.selected = index.ids().map(str::to_string).collect();
        self.indeterminate.clear();
    }

    /// Clear the selection entirely. Indeterminate becomes empty.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.indeterminate.clear();
    }

    /// Rebuild the indeterminate set from scratch: a parent is indeterminate
    /// iff its selected direct children form a non-empty strict subset of
    /// its direct children and the parent itself is not selected.
    pub fn recompute_indeterminate<M>(&mut self, index: &TreeIndex<M>) {
        self.indeterminate.clear();
        for (parent, children) in index.branches() {
            if self.selected.contains(parent) {
                continue;
            }
            let selected_children = children
                .iter()
                .filter(|child| self.selected.contains(*child))
                .count();
            if selected_children > 0 && selected_children < children.len() {
                self.indeterminate.insert(parent.to_string());
            }
        }
    }
}
