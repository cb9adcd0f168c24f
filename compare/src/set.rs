//! The set/subset container (component E): two-level grouping of sibling
//! comparison nodes, first by partial hash (subset), then by full hash
//! (identity within the subset).

use std::collections::BTreeMap;

use cildiff_kernel::ast::{AstNode, Flavor};
use cildiff_kernel::hash::{sentinel, Hash32, HashState};

use crate::node::ComparisonNode;

/// A group of sibling comparison nodes sharing one partial hash — the
/// merge-eligible unit the subset comparator (`strategy`) operates on.
/// Every member shares `flavor` (partial hashes already fold in the flavor
/// tag, so cross-flavor collisions cannot occur).
pub struct Subset<'a, N: AstNode> {
    members: BTreeMap<Hash32, ComparisonNode<'a, N>>,
    full_hash: Hash32,
}

impl<'a, N: AstNode> Subset<'a, N> {
    /// Full hash of the subset: the digest of its members' full hashes,
    /// sorted. A single member's hash is used verbatim (`spec.md` §4.4).
    #[must_use]
    pub fn full_hash(&self) -> Hash32 {
        self.full_hash
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn member(&self, full_hash: Hash32) -> Option<&ComparisonNode<'a, N>> {
        self.members.get(&full_hash)
    }

    /// The flavor shared by every member. Panics if called on an empty
    /// subset, which never occurs: a [`Subset`] is only ever constructed
    /// with at least one member (see [`Set::build`]).
    #[must_use]
    pub fn flavor(&self) -> Flavor {
        self.members
            .values()
            .next()
            .expect("subset is never constructed empty")
            .flavor()
    }

    pub fn members(&self) -> impl Iterator<Item = (&Hash32, &ComparisonNode<'a, N>)> {
        self.members.iter()
    }

    fn finalize(members: BTreeMap<Hash32, ComparisonNode<'a, N>>) -> Self {
        let full_hash = fold_subset_members(members.keys().copied());
        Self { members, full_hash }
    }
}

/// The direct children of one container node: a collection of [`Subset`]s
/// keyed by partial hash.
pub struct Set<'a, N: AstNode> {
    subsets: BTreeMap<Hash32, Subset<'a, N>>,
    full_hash: Hash32,
}

impl<'a, N: AstNode> Set<'a, N> {
    /// Build a set from a container's direct AST children (`spec.md` §4.4):
    /// construct each child's comparison node, bucket by partial hash into a
    /// subset, bucket within the subset by full hash (silently deduplicating
    /// identical-identity children), then finalize every subset and the set
    /// itself.
    pub fn build(ast_children: impl Iterator<Item = &'a N>) -> Self {
        let mut buckets: BTreeMap<Hash32, BTreeMap<Hash32, ComparisonNode<'a, N>>> =
            BTreeMap::new();
        for child in ast_children {
            let node = ComparisonNode::build(child);
            buckets
                .entry(node.partial_hash())
                .or_default()
                .entry(node.full_hash())
                .or_insert(node);
        }
        let subsets: BTreeMap<Hash32, Subset<'a, N>> = buckets
            .into_iter()
            .map(|(partial, members)| (partial, Subset::finalize(members)))
            .collect();
        let full_hash = fold_set_subsets(subsets.values().map(Subset::full_hash));
        Self { subsets, full_hash }
    }

    /// The empty set's well-known sentinel hash (`spec.md` §4.4).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            subsets: BTreeMap::new(),
            full_hash: empty_set_sentinel(),
        }
    }

    #[must_use]
    pub fn full_hash(&self) -> Hash32 {
        self.full_hash
    }

    #[must_use]
    pub fn subset(&self, partial_hash: Hash32) -> Option<&Subset<'a, N>> {
        self.subsets.get(&partial_hash)
    }

    pub fn subsets(&self) -> impl Iterator<Item = (&Hash32, &Subset<'a, N>)> {
        self.subsets.iter()
    }

    /// Total number of members across every subset — used by [`branch_sim`]
    /// when one side of a conditional branch is entirely absent.
    #[must_use]
    pub fn member_count(&self) -> u64 {
        self.subsets.values().map(|s| s.len() as u64).sum()
    }
}

#[must_use]
pub fn empty_set_sentinel() -> Hash32 {
    sentinel("<empty-set>")
}

fn fold_subset_members(hashes: impl Iterator<Item = Hash32>) -> Hash32 {
    let mut sorted: Vec<Hash32> = hashes.collect();
    if sorted.len() == 1 {
        return sorted[0];
    }
    sorted.sort_unstable();
    let mut state = HashState::begin(Some("<subset-fold>"));
    state.update_u64_le(sorted.len() as u64);
    for h in sorted {
        state.update_hash(h);
    }
    state.finish()
}

fn fold_set_subsets(hashes: impl Iterator<Item = Hash32>) -> Hash32 {
    let mut sorted: Vec<Hash32> = hashes.collect();
    sorted.sort_unstable();
    let mut state = HashState::begin(Some("<set-fold>"));
    state.update_u64_le(sorted.len() as u64);
    for h in sorted {
        state.update_hash(h);
    }
    state.finish()
}

/// Similarity of two subsets, counted by full-hash membership (`spec.md`
/// §4.4's "set similarity totals the sims of subset pairs"). Members present
/// in both subsets (by full hash) count as `common`; members unique to one
/// side count toward that side's total. A missing subset contributes its
/// entire member count to the present side's total.
#[must_use]
pub fn subset_sim<N: AstNode>(
    left: Option<&Subset<'_, N>>,
    right: Option<&Subset<'_, N>>,
) -> (u64, u64, u64) {
    match (left, right) {
        (None, None) => (0, 0, 0),
        (Some(l), None) => (0, l.len() as u64, 0),
        (None, Some(r)) => (0, 0, r.len() as u64),
        (Some(l), Some(r)) => {
            let mut common = 0u64;
            let mut left_only = 0u64;
            for hash in l.members.keys() {
                if r.members.contains_key(hash) {
                    common += 1;
                } else {
                    left_only += 1;
                }
            }
            let right_only = r
                .members
                .keys()
                .filter(|hash| !l.members.contains_key(hash))
                .count() as u64;
            (common, left_only, right_only)
        }
    }
}

/// Similarity of two sets: the sum of `subset_sim` over the union of
/// partial hashes present in either set (`spec.md` §4.4).
#[must_use]
pub fn set_sim<N: AstNode>(left: &Set<'_, N>, right: &Set<'_, N>) -> (u64, u64, u64) {
    let mut common = 0u64;
    let mut left_only = 0u64;
    let mut right_only = 0u64;
    let mut partials: Vec<Hash32> = left
        .subsets
        .keys()
        .chain(right.subsets.keys())
        .copied()
        .collect();
    partials.sort_unstable();
    partials.dedup();
    for partial in partials {
        let (c, l, r) = subset_sim(left.subset(partial), right.subset(partial));
        common += c;
        left_only += l;
        right_only += r;
    }
    (common, left_only, right_only)
}

/// Similarity of two conditional branches (`spec.md` §4.3/§4.6): an absent
/// branch contributes its counterpart's entire member count as one-sided,
/// since there is nothing on the absent side to pair against.
#[must_use]
pub fn branch_sim<N: AstNode>(
    left: Option<&Set<'_, N>>,
    right: Option<&Set<'_, N>>,
) -> (u64, u64, u64) {
    match (left, right) {
        (None, None) => (0, 0, 0),
        (Some(l), None) => (0, l.member_count(), 0),
        (None, Some(r)) => (0, 0, r.member_count()),
        (Some(l), Some(r)) => set_sim(l, r),
    }
}
