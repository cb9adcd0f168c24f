//! The comparison node (component D): wraps one AST node plus whatever
//! flavor-specific derived state it needs (a child set for containers, two
//! branch sets for conditionals), and computes full/partial hashes that
//! fold in that derived state on top of the node's own data hash.

use cildiff_kernel::ast::{AstNode, Flavor};
use cildiff_kernel::data_hash::hash_node_data;
use cildiff_kernel::hash::{sentinel, Hash32, HashState};

use crate::diff_tree::DiffTreeNode;
use crate::error::CompareError;
use crate::set::{self, Set};
use crate::strategy;

/// Flavor-specific derived state attached to a comparison node.
pub enum NodeKind<'a, N: AstNode> {
    /// No derived state beyond the node's own data hash.
    Leaf,
    /// The node's direct children, grouped into a set (`spec.md` §4.3:
    /// root, source-info, macro, class, common, map_class, block, in).
    Container(Set<'a, N>),
    /// A `booleanif`/`tunableif` node's two fixed-position branches. `None`
    /// means the branch is entirely absent from the AST (no `condfalse`/
    /// `condtrue` child at all) — distinct from a branch that is present
    /// but has no rules in it, which is `Some` wrapping an empty set.
    Conditional {
        false_branch: Option<BranchNode<'a, N>>,
        true_branch: Option<BranchNode<'a, N>>,
    },
}

/// One `condfalse`/`condtrue` wrapper child of a conditional container: the
/// AST node that tags the branch, plus the set built from its own children
/// (the branch's actual rule statements).
pub struct BranchNode<'a, N: AstNode> {
    ast: &'a N,
    set: Set<'a, N>,
    full_hash: Hash32,
}

impl<'a, N: AstNode> BranchNode<'a, N> {
    fn build(ast: &'a N) -> Self {
        let set = Set::build(ast.children());
        let (data_full, _data_partial) = hash_node_data(ast.flavor(), ast.data());
        let mut state = HashState::begin(Some(ast.flavor().as_str()));
        state.update_hash(data_full);
        state.update_hash(set.full_hash());
        let full_hash = state.finish();
        Self {
            ast,
            set,
            full_hash,
        }
    }

    #[must_use]
    pub fn ast(&self) -> &'a N {
        self.ast
    }

    #[must_use]
    pub fn set(&self) -> &Set<'a, N> {
        &self.set
    }

    #[must_use]
    pub fn full_hash(&self) -> Hash32 {
        self.full_hash
    }
}

/// The core's wrapper over one AST node (`spec.md` §3/§4.3): a non-owning
/// back-reference to the AST, the node's full/partial hash, and whatever
/// flavor-specific derived state [`NodeKind`] requires.
pub struct ComparisonNode<'a, N: AstNode> {
    ast: &'a N,
    full_hash: Hash32,
    partial_hash: Hash32,
    kind: NodeKind<'a, N>,
}

/// Container-initializer flavors (`spec.md` §4.3): build a child set from
/// the AST's direct children. `Optional` is added to the prose's literal
/// list: §4.5's similarity strategy for `optional` only makes sense if its
/// own comparison node carries a real child set to `sim`/`compare` against
/// (S4/S6 both depend on an `optional`'s `full_hash` reflecting its body).
fn is_container_flavor(flavor: Flavor) -> bool {
    matches!(
        flavor,
        Flavor::Root
            | Flavor::SourceInfo
            | Flavor::Macro
            | Flavor::Class
            | Flavor::Common
            | Flavor::MapClass
            | Flavor::Block
            | Flavor::In
            | Flavor::Optional
    )
}

/// Conditional-container-initializer flavors (`spec.md` §4.3).
fn is_conditional_flavor(flavor: Flavor) -> bool {
    matches!(flavor, Flavor::BooleanIf | Flavor::TunableIf)
}

impl<'a, N: AstNode> ComparisonNode<'a, N> {
    /// Construct a comparison node for `ast`, dispatching to the
    /// container, conditional, or default (leaf) initializer by flavor
    /// (`spec.md` §4.3).
    #[must_use]
    pub fn build(ast: &'a N) -> Self {
        let flavor = ast.flavor();
        if is_container_flavor(flavor) {
            Self::build_container(ast)
        } else if is_conditional_flavor(flavor) {
            Self::build_conditional(ast)
        } else {
            Self::build_leaf(ast)
        }
    }

    fn build_leaf(ast: &'a N) -> Self {
        let (full_hash, partial_hash) = hash_node_data(ast.flavor(), ast.data());
        Self {
            ast,
            full_hash,
            partial_hash,
            kind: NodeKind::Leaf,
        }
    }

    fn build_container(ast: &'a N) -> Self {
        let (data_full, data_partial) = hash_node_data(ast.flavor(), ast.data());
        let set = Set::build(ast.children());
        let mut state = HashState::begin(Some(ast.flavor().as_str()));
        state.update_hash(data_full);
        state.update_hash(set.full_hash());
        let full_hash = state.finish();
        Self {
            ast,
            full_hash,
            partial_hash: data_partial,
            kind: NodeKind::Container(set),
        }
    }

    fn build_conditional(ast: &'a N) -> Self {
        let (data_full, data_partial) = hash_node_data(ast.flavor(), ast.data());
        let mut false_branch = None;
        let mut true_branch = None;
        for child in ast.children() {
            match child.flavor() {
                Flavor::CondFalse => false_branch = Some(BranchNode::build(child)),
                Flavor::CondTrue => true_branch = Some(BranchNode::build(child)),
                _ => {}
            }
        }

        let mut state = HashState::begin(Some(ast.flavor().as_str()));
        state.update_hash(data_full);
        for (tag, branch) in [
            ("<cond::false>", &false_branch),
            ("<cond::true>", &true_branch),
        ] {
            state.update_string(tag);
            match branch {
                Some(b) => state.update_hash(b.full_hash()),
                None => state.update_hash(sentinel("<cond::empty>")),
            }
        }
        let full_hash = state.finish();

        Self {
            ast,
            full_hash,
            partial_hash: data_partial,
            kind: NodeKind::Conditional {
                false_branch,
                true_branch,
            },
        }
    }

    #[must_use]
    pub fn ast(&self) -> &'a N {
        self.ast
    }

    #[must_use]
    pub fn flavor(&self) -> Flavor {
        self.ast.flavor()
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.ast.line()
    }

    #[must_use]
    pub fn full_hash(&self) -> Hash32 {
        self.full_hash
    }

    #[must_use]
    pub fn partial_hash(&self) -> Hash32 {
        self.partial_hash
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind<'a, N> {
        &self.kind
    }

    /// Compare two matched comparison nodes of the same flavor, recording
    /// differences into `diff_node` (`spec.md` §4.3's `compare`). Only
    /// meaningful for container and conditional kinds — leaves carry no
    /// further structure to recurse into, and the default subset strategy
    /// never calls `compare` at all (a full-hash mismatch at leaf level is
    /// already the whole story).
    pub fn compare(&self, other: &Self, diff_node: &mut DiffTreeNode<'a, N>) -> Result<(), CompareError> {
        match (&self.kind, &other.kind) {
            (NodeKind::Container(left_set), NodeKind::Container(right_set)) => {
                strategy::compare_sets(left_set, right_set, diff_node)
            }
            (
                NodeKind::Conditional {
                    false_branch: lf,
                    true_branch: lt,
                },
                NodeKind::Conditional {
                    false_branch: rf,
                    true_branch: rt,
                },
            ) => {
                compare_branch(lf.as_ref(), rf.as_ref(), diff_node)?;
                compare_branch(lt.as_ref(), rt.as_ref(), diff_node)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Similarity of two comparison nodes, `(common, left_only,
    /// right_only)` (`spec.md` §4.3's `sim`). Container and conditional
    /// kinds delegate to their derived set/branch similarity; everything
    /// else falls back to hash equality.
    #[must_use]
    pub fn sim(&self, other: &Self) -> (u64, u64, u64) {
        match (&self.kind, &other.kind) {
            (NodeKind::Container(left_set), NodeKind::Container(right_set)) => {
                set::set_sim(left_set, right_set)
            }
            (
                NodeKind::Conditional {
                    false_branch: lf,
                    true_branch: lt,
                },
                NodeKind::Conditional {
                    false_branch: rf,
                    true_branch: rt,
                },
            ) => {
                let (c1, l1, r1) = set::branch_sim(lf.as_ref().map(BranchNode::set), rf.as_ref().map(BranchNode::set));
                let (c2, l2, r2) = set::branch_sim(lt.as_ref().map(BranchNode::set), rt.as_ref().map(BranchNode::set));
                (c1 + c2, l1 + l2, r1 + r2)
            }
            _ if self.full_hash == other.full_hash => (1, 0, 0),
            _ => (0, 1, 1),
        }
    }
}

fn compare_branch<'a, N: AstNode>(
    left: Option<&BranchNode<'a, N>>,
    right: Option<&BranchNode<'a, N>>,
    diff_node: &mut DiffTreeNode<'a, N>,
) -> Result<(), CompareError> {
    match (left, right) {
        (None, None) => {}
        (Some(l), None) => {
            let child = diff_node.append_child(Some(l.ast()), None);
            for (_, member) in l.set().subsets().flat_map(|(_, s)| s.members()) {
                child.append_diff(crate::diff_tree::Side::Left, member, None);
            }
        }
        (None, Some(r)) => {
            let child = diff_node.append_child(None, Some(r.ast()));
            for (_, member) in r.set().subsets().flat_map(|(_, s)| s.members()) {
                child.append_diff(crate::diff_tree::Side::Right, member, None);
            }
        }
        (Some(l), Some(r)) => {
            if l.full_hash() == r.full_hash() {
                return Ok(());
            }
            let child = diff_node.append_child(Some(l.ast()), Some(r.ast()));
            strategy::compare_sets(l.set(), r.set(), child)?;
        }
    }
    Ok(())
}
