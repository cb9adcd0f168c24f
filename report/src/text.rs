//! Plain-text report emitter (component H, `spec.md` §6.3).
//!
//! Operates concretely over [`CilNode`] rather than staying generic over
//! `AstNode`: rendering a node to text needs a canonical writer, which
//! `spec.md` §6.1 treats as an external collaborator. [`CilNode::render`]
//! is this workspace's stand-in; a deployment with a real CIL writer would
//! give the emitter a small `Render` trait instead and stay generic.

use std::io::{self, Write};

use cildiff_compare::{DiffTree, DiffTreeNode, Side};
use cildiff_kernel::ast::{AstNode, CilNode};
use cildiff_kernel::hash::Hash32;

/// Emit the plain-text report: two header comment lines naming the root
/// hashes, then the diff tree walked depth-first, children before records
/// at each level (`spec.md` §6.3/§4.6).
pub fn print_text(
    tree: &DiffTree<'_, CilNode>,
    left_hash: Hash32,
    right_hash: Hash32,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "# left root hash: {}", left_hash.to_hex())?;
    writeln!(out, "# right root hash: {}", right_hash.to_hex())?;
    let mut context: Vec<(&'static str, u32)> = Vec::new();
    print_node(tree.root(), &mut context, out)
}

fn print_node(
    node: &DiffTreeNode<'_, CilNode>,
    context: &mut Vec<(&'static str, u32)>,
    out: &mut impl Write,
) -> io::Result<()> {
    for child in node.children() {
        context.push(describe(child));
        print_node(child, context, out)?;
        context.pop();
    }
    for record in node.diffs() {
        print_record(record, context, out)?;
    }
    Ok(())
}

fn describe(node: &DiffTreeNode<'_, CilNode>) -> (&'static str, u32) {
    let ast = node.left().or_else(|| node.right());
    match ast {
        Some(ast) => (ast.flavor().as_str(), ast.line()),
        None => ("?", 0),
    }
}

fn print_record(
    record: &cildiff_compare::DiffRecord<'_, CilNode>,
    context: &[(&'static str, u32)],
    out: &mut impl Write,
) -> io::Result<()> {
    let marker = match record.side() {
        Side::Left => "# - deletion",
        Side::Right => "# + addition",
    };
    match record.description() {
        Some(desc) => writeln!(out, "{marker}: {desc}")?,
        None => writeln!(out, "{marker}")?,
    }
    writeln!(out, "#   hash: {}", record.hash().to_hex())?;
    for (flavor, line) in context.iter().rev() {
        writeln!(out, "#   in: {flavor} (line {line})")?;
    }
    writeln!(out, "{}", record.ast().render())?;
    Ok(())
}
