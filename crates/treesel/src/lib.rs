#![forbid(unsafe_code)]

//! Hierarchical tri-state selection and expansion state for tree views.
//!
//! `treesel` is the stateful piece behind checkbox trees (permission trees,
//! category pickers): selecting a node cascades down to every descendant and
//! promotes every ancestor, deselecting cascades down and releases ancestors
//! whose children are all clear, and a derived *indeterminate* set marks
//! parents with a partial selection. Expansion (expand/collapse) is tracked
//! independently, with no cascade.
//!
//! The engine is single-threaded and synchronous: every mutation fully
//! recomputes derived state before returning, so queries always observe a
//! consistent snapshot. It performs no I/O and never mutates the caller's
//! tree.
//!
//! # Example
//!
//! ```
//! use treesel::{TreeNode, TreeView};
//!
//! let tree: TreeNode = TreeNode::new("a", "A")
//!     .child(TreeNode::new("b", "B")
//!         .child(TreeNode::new("d", "D"))
//!         .child(TreeNode::new("e", "E")))
//!     .child(TreeNode::new("c", "C"));
//!
//! let mut view = TreeView::new(std::slice::from_ref(&tree));
//! view.toggle_select("d", true);
//!
//! // Selecting a leaf promotes every ancestor on the path.
//! assert!(view.is_selected("d"));
//! assert!(view.is_selected("b"));
//! assert!(view.is_selected("a"));
//! assert!(!view.is_selected("c"));
//! ```

pub mod expansion;
pub mod selection;
pub mod snapshot;
pub mod view;

pub use expansion::ExpansionState;
pub use selection::SelectionState;
pub use snapshot::{SNAPSHOT_VERSION, ViewSnapshot};
pub use treesel_core::{FlatNode, IndexError, TreeIndex, TreeNode};
pub use view::{ChangeHandler, TreeView};
