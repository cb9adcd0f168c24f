//! Shared fixture builders for the integration tests (`spec.md` §8's
//! scenarios are all built from these few shapes). Kept intentionally small:
//! every scenario only needs type leaves, allow rules, and the handful of
//! container flavors the scenarios name.

use cildiff_kernel::ast::{CilNode, Field, Flavor, NodeData};

/// `(type NAME)`.
pub fn type_leaf(name: &str, line: u32) -> CilNode {
    CilNode::leaf(Flavor::Type, NodeData::Name(name.into()), line)
}

/// `(allow SRC TGT (CLASS (PERMS...)))`.
pub fn allow_rule(src: &str, tgt: &str, class: &str, perms: &[&str], line: u32) -> CilNode {
    let fields = vec![
        Field::Str(src.into()),
        Field::Str(tgt.into()),
        Field::Str(class.into()),
        Field::List {
            items: perms.iter().map(|p| (*p).to_string()).collect(),
            ordered: false,
        },
    ];
    CilNode::leaf(Flavor::AllowRule, NodeData::Fields(fields), line)
}

/// `(root CHILDREN...)`.
pub fn root(children: Vec<CilNode>, line: u32) -> CilNode {
    CilNode::container(Flavor::Root, NodeData::Empty, line, children)
}

/// `(block NAME CHILDREN...)`.
pub fn block(name: &str, children: Vec<CilNode>, line: u32) -> CilNode {
    CilNode::container(Flavor::Block, NodeData::Name(name.into()), line, children)
}

/// `(optional NAME CHILDREN...)`.
pub fn optional(name: &str, children: Vec<CilNode>, line: u32) -> CilNode {
    CilNode::container(Flavor::Optional, NodeData::Name(name.into()), line, children)
}

/// `(booleanif COND (condtrue TRUE_CHILDREN...) (condfalse FALSE_CHILDREN...))`.
/// Either branch list may be empty; pass `None` to omit the branch entirely.
pub fn booleanif(
    cond: &str,
    true_branch: Option<Vec<CilNode>>,
    false_branch: Option<Vec<CilNode>>,
    line: u32,
) -> CilNode {
    let mut branches = Vec::new();
    if let Some(false_children) = false_branch {
        branches.push(CilNode::container(
            Flavor::CondFalse,
            NodeData::Empty,
            line,
            false_children,
        ));
    }
    if let Some(true_children) = true_branch {
        branches.push(CilNode::container(
            Flavor::CondTrue,
            NodeData::Empty,
            line,
            true_children,
        ));
    }
    CilNode::container(
        Flavor::BooleanIf,
        NodeData::Expr(cildiff_kernel::ast::Expr::str(cond)),
        line,
        branches,
    )
}
