//! The subset comparator (component F): per-flavor pairing strategies,
//! plus the greedy similarity-matching algorithm used by `optional`, `in`,
//! `booleanif`, and `tunableif` (`spec.md` §4.5).

use cildiff_kernel::ast::{AstNode, Flavor, NodeData};
use cildiff_kernel::error::KernelError;
use cildiff_kernel::hash::Hash32;
use tracing::trace_span;

use crate::diff_tree::{DiffTreeNode, Side};
use crate::error::CompareError;
use crate::node::ComparisonNode;
use crate::set::{Set, Subset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Default,
    SingleChild,
    SingleChildJump,
    Similarity,
}

fn strategy_for(flavor: Flavor) -> Strategy {
    match flavor {
        Flavor::Block | Flavor::Macro => Strategy::SingleChild,
        Flavor::Root | Flavor::SourceInfo => Strategy::SingleChildJump,
        Flavor::Optional | Flavor::In | Flavor::BooleanIf | Flavor::TunableIf => {
            Strategy::Similarity
        }
        _ => Strategy::Default,
    }
}

/// The set comparator (`spec.md` §4.4): if both sets hash equal, nothing to
/// do. Otherwise walk left's subsets looking up the matching partial hash
/// on the right, then walk right's subsets for partial hashes absent on
/// the left.
pub fn compare_sets<'a, N: AstNode>(
    left: &Set<'a, N>,
    right: &Set<'a, N>,
    diff_node: &mut DiffTreeNode<'a, N>,
) -> Result<(), CompareError> {
    if left.full_hash() == right.full_hash() {
        return Ok(());
    }
    let _span = trace_span!("compare_sets", left_subsets = left.subsets().count()).entered();
    for (partial, left_subset) in left.subsets() {
        let right_subset = right.subset(*partial);
        compare_subset(left_subset.flavor(), Some(left_subset), right_subset, diff_node)?;
    }
    for (partial, right_subset) in right.subsets() {
        if left.subset(*partial).is_none() {
            compare_subset(right_subset.flavor(), None, Some(right_subset), diff_node)?;
        }
    }
    Ok(())
}

/// The subset comparator (`spec.md` §4.5), dispatched by `flavor`.
fn compare_subset<'a, N: AstNode>(
    flavor: Flavor,
    left: Option<&Subset<'a, N>>,
    right: Option<&Subset<'a, N>>,
    diff_node: &mut DiffTreeNode<'a, N>,
) -> Result<(), CompareError> {
    match strategy_for(flavor) {
        Strategy::Default => {
            default_strategy(left, right, diff_node);
            Ok(())
        }
        Strategy::SingleChild => single_child_strategy(left, right, diff_node, true),
        Strategy::SingleChildJump => single_child_strategy(left, right, diff_node, false),
        Strategy::Similarity => similarity_strategy(left, right, diff_node),
    }
}

/// `spec.md` §7: two children landing in the same single-child subset with
/// different full hashes means the AST broke the uniqueness-of-declaration-
/// names contract. Detected, not silently tolerated by taking the first
/// member.
fn check_single_child_discipline<'a, N: AstNode>(subset: Option<&Subset<'a, N>>) -> Result<(), CompareError> {
    let Some(subset) = subset else {
        return Ok(());
    };
    if subset.len() <= 1 {
        return Ok(());
    }
    let (_, first) = subset.members().next().expect("len > 1 implies non-empty");
    let name = match first.ast().data() {
        NodeData::Name(name) => name.clone(),
        _ => format!("{:?}", first.ast().data()),
    };
    Err(CompareError::Kernel(KernelError::ConflictingSingleChild {
        name,
        line: first.line(),
    }))
}

/// Both subsets treated as content-addressed bags: every member present on
/// only one side becomes a record; matching full hashes need no further
/// work (`spec.md` §4.5).
fn default_strategy<'a, N: AstNode>(
    left: Option<&Subset<'a, N>>,
    right: Option<&Subset<'a, N>>,
    diff_node: &mut DiffTreeNode<'a, N>,
) {
    if let Some(left) = left {
        for (hash, member) in left.members() {
            let absent_on_right = match right {
                Some(r) => r.member(*hash).is_none(),
                None => true,
            };
            if absent_on_right {
                diff_node.append_diff(Side::Left, member, None);
            }
        }
    }
    if let Some(right) = right {
        for (hash, member) in right.members() {
            let absent_on_left = match left {
                Some(l) => l.member(*hash).is_none(),
                None => true,
            };
            if absent_on_left {
                diff_node.append_diff(Side::Right, member, None);
            }
        }
    }
}

/// `block`/`macro` (`create_child: true`) and `root`/`source-info`
/// (`create_child: false`, the "jump" variant): the subset holds at most
/// one member per side. Both present descends; one-sided emits a single
/// record (`spec.md` §4.5).
fn single_child_strategy<'a, N: AstNode>(
    left: Option<&Subset<'a, N>>,
    right: Option<&Subset<'a, N>>,
    diff_node: &mut DiffTreeNode<'a, N>,
    create_child: bool,
) -> Result<(), CompareError> {
    check_single_child_discipline(left)?;
    check_single_child_discipline(right)?;

    let left_member = left.and_then(|s| s.members().next());
    let right_member = right.and_then(|s| s.members().next());
    match (left_member, right_member) {
        (None, None) => {}
        (Some((_, l)), None) => diff_node.append_diff(Side::Left, l, None),
        (None, Some((_, r))) => diff_node.append_diff(Side::Right, r, None),
        (Some((_, l)), Some((_, r))) => {
            if create_child {
                let child = diff_node.append_child(Some(l.ast()), Some(r.ast()));
                l.compare(r, child)?;
            } else {
                l.compare(r, diff_node)?;
            }
        }
    }
    Ok(())
}

/// Similarity matching (`spec.md` §4.5): pair up order-insensitive,
/// unstable-identity members by greedy descending-rate bipartite matching,
/// falling back to the default strategy for any member that finds no
/// partner (or when one side has no unique members to pair against at
/// all).
fn similarity_strategy<'a, N: AstNode>(
    left: Option<&Subset<'a, N>>,
    right: Option<&Subset<'a, N>>,
    diff_node: &mut DiffTreeNode<'a, N>,
) -> Result<(), CompareError> {
    let empty_left: Vec<(Hash32, &ComparisonNode<'a, N>)> = Vec::new();
    let empty_right: Vec<(Hash32, &ComparisonNode<'a, N>)> = Vec::new();

    let left_members: Vec<(Hash32, &ComparisonNode<'a, N>)> = left
        .map(|s| s.members().map(|(h, m)| (*h, m)).collect())
        .unwrap_or(empty_left);
    let right_members: Vec<(Hash32, &ComparisonNode<'a, N>)> = right
        .map(|s| s.members().map(|(h, m)| (*h, m)).collect())
        .unwrap_or(empty_right);

    let unique_left: Vec<(Hash32, &ComparisonNode<'a, N>)> = left_members
        .iter()
        .filter(|(h, _)| !right_members.iter().any(|(rh, _)| rh == h))
        .copied()
        .collect();
    let unique_right: Vec<(Hash32, &ComparisonNode<'a, N>)> = right_members
        .iter()
        .filter(|(h, _)| !left_members.iter().any(|(lh, _)| lh == h))
        .copied()
        .collect();

    if unique_left.is_empty() || unique_right.is_empty() {
        for (_, member) in &unique_left {
            diff_node.append_diff(Side::Left, member, None);
        }
        for (_, member) in &unique_right {
            diff_node.append_diff(Side::Right, member, None);
        }
        return Ok(());
    }

    let mut pairs: Vec<(usize, usize, f64)> = Vec::with_capacity(unique_left.len() * unique_right.len());
    for (li, (_, l)) in unique_left.iter().enumerate() {
        for (ri, (_, r)) in unique_right.iter().enumerate() {
            let (common, l_only, r_only) = l.sim(r);
            let denom = common + l_only + r_only;
            let rate = if denom == 0 { 0.0 } else { common as f64 / denom as f64 };
            pairs.push((li, ri, rate));
        }
    }
    pairs.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    let mut left_matched = vec![false; unique_left.len()];
    let mut right_matched = vec![false; unique_right.len()];
    for (li, ri, _) in &pairs {
        if !left_matched[*li] && !right_matched[*ri] {
            left_matched[*li] = true;
            right_matched[*ri] = true;
            let (_, l) = unique_left[*li];
            let (_, r) = unique_right[*ri];
            let child = diff_node.append_child(Some(l.ast()), Some(r.ast()));
            l.compare(r, child)?;
        }
    }

    for (li, (_, member)) in unique_left.iter().enumerate() {
        if !left_matched[li] {
            diff_node.append_diff(Side::Left, member, None);
        }
    }
    for (ri, (_, member)) in unique_right.iter().enumerate() {
        if !right_matched[ri] {
            diff_node.append_diff(Side::Right, member, None);
        }
    }
    Ok(())
}
