//! End-to-end scenarios S1-S6 (`spec.md` §8).

mod common;

use cildiff_compare::{build_comparison_root, compare_roots, Side};
use cildiff_kernel::ast::{AstNode, Flavor, NodeData};

use common::{allow_rule, booleanif, optional, root, type_leaf};

#[test]
fn s1_identity_yields_equal_hashes_and_empty_diff() {
    let left = allow_rule("A", "B", "C", &["D"], 1);
    let right = allow_rule("A", "B", "C", &["D"], 1);

    let left_node = build_comparison_root(&left);
    let right_node = build_comparison_root(&right);
    assert_eq!(left_node.full_hash(), right_node.full_hash());

    let tree = compare_roots(&left_node, &right_node).unwrap();
    assert!(tree.root().is_empty_subtree());
}

#[test]
fn s2_unordered_perms_yield_equal_hashes_and_empty_diff() {
    let left = allow_rule("A", "B", "C", &["D", "E"], 1);
    let right = allow_rule("A", "B", "C", &["E", "D"], 1);

    let left_node = build_comparison_root(&left);
    let right_node = build_comparison_root(&right);
    assert_eq!(left_node.full_hash(), right_node.full_hash());

    let tree = compare_roots(&left_node, &right_node).unwrap();
    assert!(tree.root().is_empty_subtree());
}

#[test]
fn s3_pure_add_emits_one_right_record() {
    let left = root(vec![], 1);
    let right = root(vec![type_leaf("T", 2)], 1);

    let left_node = build_comparison_root(&left);
    let right_node = build_comparison_root(&right);
    let tree = compare_roots(&left_node, &right_node).unwrap();

    let diffs = tree.root().diffs();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].side(), Side::Right);
    assert_eq!(diffs[0].ast().flavor(), Flavor::Type);
    assert_eq!(diffs[0].ast().data(), &NodeData::Name("T".into()));
    assert!(tree.root().children().is_empty());
}

#[test]
fn s4_renamed_optional_is_add_plus_delete() {
    let left = root(
        vec![optional("o1", vec![allow_rule("A", "B", "C", &["D"], 2)], 1)],
        1,
    );
    let right = root(
        vec![optional("o2", vec![allow_rule("A", "B", "C", &["D"], 2)], 1)],
        1,
    );

    let left_node = build_comparison_root(&left);
    let right_node = build_comparison_root(&right);
    let tree = compare_roots(&left_node, &right_node).unwrap();

    let diffs = tree.root().diffs();
    assert_eq!(diffs.len(), 2);
    let mut sides: Vec<_> = diffs.iter().map(cildiff_compare::DiffRecord::side).collect();
    sides.sort_by_key(|s| matches!(s, Side::Right));
    assert_eq!(sides, vec![Side::Left, Side::Right]);

    for record in diffs {
        assert_eq!(record.ast().flavor(), Flavor::Optional);
    }
    assert!(tree.root().children().is_empty());
}

#[test]
fn s5_booleanif_branch_change_descends_into_true_branch() {
    let left = booleanif(
        "B",
        Some(vec![allow_rule("A", "B", "C", &["D"], 2)]),
        None,
        1,
    );
    let right = booleanif(
        "B",
        Some(vec![allow_rule("A", "B", "C", &["E"], 2)]),
        None,
        1,
    );

    let left_node = build_comparison_root(&left);
    let right_node = build_comparison_root(&right);
    let tree = compare_roots(&left_node, &right_node).unwrap();

    assert!(tree.root().diffs().is_empty());
    assert_eq!(tree.root().children().len(), 1);

    let branch = &tree.root().children()[0];
    assert_eq!(branch.diffs().len(), 2);
    let left_diff = branch.diffs().iter().find(|r| r.side() == Side::Left).unwrap();
    let right_diff = branch.diffs().iter().find(|r| r.side() == Side::Right).unwrap();
    assert_eq!(left_diff.ast(), &allow_rule("A", "B", "C", &["D"], 2));
    assert_eq!(right_diff.ast(), &allow_rule("A", "B", "C", &["E"], 2));
}

#[test]
fn s6_similarity_pairing_matches_highest_rate_pairs_first() {
    // Two `optional`s named "opt" on each side, landing in one subset:
    // left = {rule1, rule2} and {rule3}; right = {rule1} and {rule2, rule3}.
    // Pairing {rule1,rule2}<->{rule1} and {rule3}<->{rule2,rule3} both score
    // common/sum = 1/2, strictly higher than either cross-pairing (1/3 and
    // 0), and the two pairs don't share members, so greedy matching selects
    // both: every optional is paired, none appear as a root-level record.
    let left = root(
        vec![
            optional(
                "opt",
                vec![type_leaf("rule1", 2), type_leaf("rule2", 3)],
                1,
            ),
            optional("opt", vec![type_leaf("rule3", 5)], 4),
        ],
        1,
    );
    let right = root(
        vec![
            optional("opt", vec![type_leaf("rule1", 2)], 1),
            optional(
                "opt",
                vec![type_leaf("rule2", 3), type_leaf("rule3", 5)],
                4,
            ),
        ],
        1,
    );

    let left_node = build_comparison_root(&left);
    let right_node = build_comparison_root(&right);
    let tree = compare_roots(&left_node, &right_node).unwrap();

    assert!(tree.root().diffs().is_empty());
    assert_eq!(tree.root().children().len(), 2);

    let total_records: usize = tree.root().children().iter().map(|c| c.diffs().len()).sum();
    assert_eq!(total_records, 2);

    let mut rule_names: Vec<String> = tree
        .root()
        .children()
        .iter()
        .flat_map(cildiff_compare::DiffTreeNode::diffs)
        .map(|record| match record.ast().data() {
            NodeData::Name(name) => name.clone(),
            other => panic!("expected a named type leaf, got {other:?}"),
        })
        .collect();
    rule_names.sort();
    assert_eq!(rule_names, vec!["rule2".to_string(), "rule2".to_string()]);
}
