//! Versioned save/restore of view state.
//!
//! The engine itself never performs I/O; a [`ViewSnapshot`] is the value a
//! caller serializes however it likes (enable the `state-persistence`
//! feature for serde derives). Restoring a snapshot with a mismatched
//! version falls back to the empty state rather than erroring.

use crate::view::TreeView;

/// Current snapshot schema version. Bump when the serialized form changes
/// in a backwards-incompatible way.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persistable selection + expansion state, both in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ViewSnapshot {
    /// Schema version tag.
    pub version: u32,
    /// Selected ids in pre-order.
    pub selected: Vec<String>,
    /// Expanded ids in pre-order.
    pub expanded: Vec<String>,
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            selected: Vec::new(),
            expanded: Vec::new(),
        }
    }
}

impl<M> TreeView<M> {
    /// Capture the current selection and expansion. A pure read: no side
    /// effects, no derived-state changes.
    #[must_use]
    pub fn save_snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            version: SNAPSHOT_VERSION,
            selected: self.selection().selected_ids(self.index()),
            expanded: self.expansion().expanded_ids(self.index()),
        }
    }

    /// Replace selection and expansion from a snapshot and recompute
    /// indeterminate. A version mismatch restores the empty state instead.
    /// Does not fire the change handler: this is state plumbing, not a user
    /// mutation.
    pub fn restore_snapshot(&mut self, snapshot: ViewSnapshot) {
        if snapshot.version == SNAPSHOT_VERSION {
            self.restore_state(snapshot.selected, snapshot.expanded);
        } else {
            self.restore_state(Vec::<String>::new(), Vec::<String>::new());
        }
    }
}
