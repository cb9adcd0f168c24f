//! A small hand-rolled randomized fuzz harness (no property-testing crate):
//! builds random small CIL trees with a fixed-seed PRNG and checks
//! determinism, reflexivity, and side symmetry across them. Deterministic
//! seeds keep the test itself reproducible without reaching for `rand`.

use cildiff_compare::{build_comparison_root, compare_roots, Side};
use cildiff_kernel::ast::{CilNode, Flavor, NodeData};

/// `xorshift64*`: tiny, dependency-free, good enough to shuffle fixture
/// shapes across seeds without any claim to cryptographic quality.
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn next_range(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

const NAMES: [&str; 6] = ["a_t", "b_t", "c_t", "d_t", "e_t", "f_t"];

fn random_node(rng: &mut Rng, depth: u32, line: &mut u32) -> CilNode {
    *line += 1;
    let this_line = *line;
    let name = NAMES[rng.next_range(NAMES.len() as u64) as usize];

    if depth == 0 {
        return CilNode::leaf(Flavor::Type, NodeData::Name(name.into()), this_line);
    }

    let child_count = rng.next_range(3) as usize;
    let children: Vec<CilNode> = (0..child_count)
        .map(|_| random_node(rng, depth - 1, line))
        .collect();

    match rng.next_range(3) {
        0 => CilNode::leaf(Flavor::Type, NodeData::Name(name.into()), this_line),
        1 => CilNode::container(Flavor::Block, NodeData::Name(name.into()), this_line, children),
        _ => CilNode::container(Flavor::Optional, NodeData::Name(name.into()), this_line, children),
    }
}

fn random_root(seed: u64) -> CilNode {
    let mut rng = Rng::new(seed);
    let mut line = 0;
    let child_count = rng.next_range(4) as usize + 1;
    let children: Vec<CilNode> = (0..child_count)
        .map(|_| random_node(&mut rng, 2, &mut line))
        .collect();
    CilNode::container(Flavor::Root, NodeData::Empty, 0, children)
}

const SEEDS: [u64; 8] = [1, 2, 3, 7, 11, 42, 100, 999];

#[test]
fn random_trees_are_reflexive() {
    for &seed in &SEEDS {
        let tree = random_root(seed);
        let a = build_comparison_root(&tree);
        let b = build_comparison_root(&tree);
        assert_eq!(a.full_hash(), b.full_hash(), "seed {seed} not reflexive on hash");

        let diff = compare_roots(&a, &b).unwrap();
        assert!(diff.root().is_empty_subtree(), "seed {seed} not reflexive on diff");
    }
}

#[test]
fn random_trees_hash_deterministically_across_rebuilds() {
    for &seed in &SEEDS {
        let tree = random_root(seed);
        let first = build_comparison_root(&tree).full_hash();
        let second = build_comparison_root(&tree).full_hash();
        assert_eq!(first, second, "seed {seed} hash not deterministic");
    }
}

#[test]
fn random_tree_pairs_are_side_symmetric() {
    for window in SEEDS.windows(2) {
        let (seed_a, seed_b) = (window[0], window[1]);
        let tree_a = random_root(seed_a);
        let tree_b = random_root(seed_b);
        let node_a = build_comparison_root(&tree_a);
        let node_b = build_comparison_root(&tree_b);

        let forward = compare_roots(&node_a, &node_b).unwrap();
        let backward = compare_roots(&node_b, &node_a).unwrap();

        let count_sides = |diffs: &[cildiff_compare::DiffRecord<'_, CilNode>]| {
            let left = diffs.iter().filter(|r| r.side() == Side::Left).count();
            let right = diffs.iter().filter(|r| r.side() == Side::Right).count();
            (left, right)
        };

        let (fwd_left, fwd_right) = count_sides(forward.root().diffs());
        let (bwd_left, bwd_right) = count_sides(backward.root().diffs());
        assert_eq!(
            (fwd_left, fwd_right),
            (bwd_right, bwd_left),
            "seeds ({seed_a}, {seed_b}) not side-symmetric at root level"
        );
    }
}
