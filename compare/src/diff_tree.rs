//! The diff tree (component G): the hierarchical, per-side record of
//! additions and deletions the subset comparator (F) writes into as it
//! walks two comparison-node trees.
//!
//! A [`DiffTreeNode`] only ever stores plain AST references (`&'a N`) and
//! copied [`Hash32`] values, never comparison-node references — the
//! comparison-node tree and the diff tree are independent owners over the
//! same underlying AST (`spec.md` §3's ownership summary), and a
//! comparison node's `ast`/`full_hash` fields are themselves cheap to read
//! off a short-lived borrow, so nothing here needs to outlive the walk that
//! produced it.

use cildiff_kernel::ast::AstNode;
use cildiff_kernel::hash::Hash32;

use crate::error::CompareError;
use crate::node::ComparisonNode;

/// Which side a [`DiffRecord`] was observed on. `Left` = present in the
/// left input, absent on the right (a deletion when the right is regarded
/// as "new"); `Right` = present in the right, absent on the left (an
/// addition). `spec.md` §3 fixes this labelling once, here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One `(side, node, optional description)` diff record (`spec.md` §3).
pub struct DiffRecord<'a, N: AstNode> {
    side: Side,
    hash: Hash32,
    description: Option<String>,
    ast: &'a N,
}

impl<'a, N: AstNode> DiffRecord<'a, N> {
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn hash(&self) -> Hash32 {
        self.hash
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn ast(&self) -> &'a N {
        self.ast
    }
}

/// One level of diff-tree context: the paired left/right AST nodes at this
/// level (either may be absent, e.g. a pure addition has no left), the
/// diff records attached directly here, and the child levels reached by
/// single-child or similarity-matched descent (`spec.md` §4.6).
pub struct DiffTreeNode<'a, N: AstNode> {
    left: Option<&'a N>,
    right: Option<&'a N>,
    diffs: Vec<DiffRecord<'a, N>>,
    children: Vec<DiffTreeNode<'a, N>>,
}

impl<'a, N: AstNode> DiffTreeNode<'a, N> {
    pub(crate) fn new(left: Option<&'a N>, right: Option<&'a N>) -> Self {
        Self {
            left,
            right,
            diffs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn left(&self) -> Option<&'a N> {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> Option<&'a N> {
        self.right
    }

    #[must_use]
    pub fn diffs(&self) -> &[DiffRecord<'a, N>] {
        &self.diffs
    }

    #[must_use]
    pub fn children(&self) -> &[DiffTreeNode<'a, N>] {
        &self.children
    }

    /// True iff this level and every descendant level carries no diff
    /// records — used by the reflexivity property (`spec.md` §8.2).
    #[must_use]
    pub fn is_empty_subtree(&self) -> bool {
        self.diffs.is_empty() && self.children.iter().all(DiffTreeNode::is_empty_subtree)
    }

    /// Append a new child diff-tree level and return a mutable reference to
    /// it for further appends (`spec.md` §4.6's `append_child`). Used by
    /// single-child and similarity-matching descents; single-child-jump
    /// descends without calling this at all, writing into the caller's own
    /// node instead.
    pub fn append_child(&mut self, left: Option<&'a N>, right: Option<&'a N>) -> &mut Self {
        self.children.push(Self::new(left, right));
        self.children.last_mut().expect("just pushed")
    }

    /// Attach a leaf diff record at this level (`spec.md` §4.6's
    /// `append_diff`).
    pub fn append_diff(&mut self, side: Side, node: &ComparisonNode<'a, N>, description: Option<String>) {
        self.diffs.push(DiffRecord {
            side,
            hash: node.full_hash(),
            description,
            ast: node.ast(),
        });
    }
}

/// Owns the whole diff-tree result of [`crate::compare_roots`]. Destruction
/// is implicit (`Drop`) rather than an explicit `destroy_diff_tree` call —
/// idiomatic Rust ownership stands in for `spec.md` §6.2's manual-memory
/// entry point; dropping a `DiffTree` recursively frees its nodes and
/// records without touching either side's comparison-node tree, which it
/// only ever borrows.
pub struct DiffTree<'a, N: AstNode> {
    root: DiffTreeNode<'a, N>,
}

impl<'a, N: AstNode> DiffTree<'a, N> {
    pub(crate) fn build(
        left_root: &'a ComparisonNode<'a, N>,
        right_root: &'a ComparisonNode<'a, N>,
    ) -> Result<Self, CompareError> {
        let mut root = DiffTreeNode::new(Some(left_root.ast()), Some(right_root.ast()));
        left_root.compare(right_root, &mut root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &DiffTreeNode<'a, N> {
        &self.root
    }
}
