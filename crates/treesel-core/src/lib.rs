#![forbid(unsafe_code)]

//! Tree primitives for treesel: the caller-owned [`TreeNode`] input type and
//! the derived [`TreeIndex`] lookup structures (id → node, parent → ordered
//! children, child → parent) that the selection and expansion engines are
//! built on.
//!
//! Nothing in this crate is stateful beyond the index itself: building an
//! index is a pure, single-pass transformation of the input tree, and every
//! traversal helper is a pure function of the current index.

pub mod index;
pub mod node;

pub use index::{FlatNode, IndexError, TreeIndex};
pub use node::TreeNode;
