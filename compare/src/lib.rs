//! `cildiff-compare`: turns two parsed policy ASTs into a structured diff
//! tree.
//!
//! This crate owns components D through G of the comparison engine:
//!
//! - [`node`] -- the comparison node (D): wraps one AST node plus its
//!   flavor-specific derived state (child set, conditional branches) and
//!   computes full/partial hashes including children.
//! - [`set`] -- the set/subset container (E): groups sibling comparison
//!   nodes first by partial hash, then by full hash.
//! - [`strategy`] -- the subset comparator (F): per-flavor pairing
//!   strategies, including similarity matching for order-insensitive,
//!   unstable-identity containers (`optional`, `in`, `booleanif`,
//!   `tunableif`).
//! - [`diff_tree`] -- the diff tree (G): the hierarchical output the
//!   strategies write into as they recurse.
//!
//! F and G are grouped with D/E in this crate rather than with the report
//! emitters because the subset comparator writes directly into the diff
//! tree during the same recursive walk (`spec.md` §2) — only the finished,
//! read-only tree crosses into `cildiff-report` for rendering.
//!
//! # Public entry points
//!
//! - [`build_comparison_root`] -- build a comparison-node tree from a parsed
//!   AST root.
//! - [`compare_roots`] -- compare two comparison-node roots, producing a
//!   [`diff_tree::DiffTree`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diff_tree;
pub mod error;
pub mod node;
pub mod set;
pub mod strategy;

use cildiff_kernel::ast::AstNode;

pub use diff_tree::{DiffRecord, DiffTree, DiffTreeNode, Side};
pub use error::CompareError;
pub use node::ComparisonNode;

/// Build the comparison-node tree for one side's parsed AST (`spec.md`
/// §6.2's `build_comparison_root`).
pub fn build_comparison_root<N: AstNode>(ast_root: &N) -> ComparisonNode<'_, N> {
    ComparisonNode::build(ast_root)
}

/// Compare two comparison-node roots, producing a diff tree (`spec.md`
/// §6.2's `compare_roots`).
pub fn compare_roots<'a, N: AstNode>(
    left_root: &'a ComparisonNode<'a, N>,
    right_root: &'a ComparisonNode<'a, N>,
) -> Result<DiffTree<'a, N>, CompareError> {
    DiffTree::build(left_root, right_root)
}
