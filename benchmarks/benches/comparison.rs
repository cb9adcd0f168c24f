//! Micro-benchmarks for comparison-node construction (D/E) and set
//! comparison (F/G) over a moderately sized synthetic policy tree.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cildiff_compare::{build_comparison_root, compare_roots};
use cildiff_kernel::ast::{CilNode, Field, Flavor, NodeData};

fn allow(src: &str, tgt: &str, class: &str, perm: &str, line: u32) -> CilNode {
    let fields = vec![
        Field::Str(src.into()),
        Field::Str(tgt.into()),
        Field::Str(class.into()),
        Field::List {
            items: vec![perm.into()],
            ordered: false,
        },
    ];
    CilNode::leaf(Flavor::AllowRule, NodeData::Fields(fields), line)
}

/// A `root` containing `count` `block`s, each with a handful of allow rules.
fn synthetic_policy(count: usize) -> CilNode {
    let blocks: Vec<CilNode> = (0..count)
        .map(|i| {
            let rules: Vec<CilNode> = (0..4)
                .map(|j| allow(&format!("t{i}"), &format!("t{j}"), "file", "read", 0))
                .collect();
            CilNode::container(Flavor::Block, NodeData::Name(format!("b{i}")), 0, rules)
        })
        .collect();
    CilNode::container(Flavor::Root, NodeData::Empty, 0, blocks)
}

fn bench_build_comparison_root(c: &mut Criterion) {
    let tree = synthetic_policy(200);
    c.bench_function("build_comparison_root_200_blocks", |b| {
        b.iter(|| black_box(build_comparison_root(black_box(&tree))));
    });
}

fn bench_compare_roots_identical(c: &mut Criterion) {
    let tree = synthetic_policy(200);
    let left = build_comparison_root(&tree);
    let right = build_comparison_root(&tree);
    c.bench_function("compare_roots_200_blocks_identical", |b| {
        b.iter(|| black_box(compare_roots(black_box(&left), black_box(&right)).unwrap()));
    });
}

fn bench_compare_roots_diverged(c: &mut Criterion) {
    let left_tree = synthetic_policy(200);
    let right_tree = synthetic_policy(199);
    let left = build_comparison_root(&left_tree);
    let right = build_comparison_root(&right_tree);
    c.bench_function("compare_roots_200_vs_199_blocks", |b| {
        b.iter(|| black_box(compare_roots(black_box(&left), black_box(&right)).unwrap()));
    });
}

criterion_group!(
    comparison,
    bench_build_comparison_root,
    bench_compare_roots_identical,
    bench_compare_roots_diverged
);
criterion_main!(comparison);
