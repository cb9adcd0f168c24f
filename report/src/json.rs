//! JSON report emitter (component H, `spec.md` §6.3): the structured
//! `{left, right, diffs, children}` schema, serialised with `serde_json`.

use serde_json::{json, Value};

use cildiff_compare::{DiffTree, DiffTreeNode, Side};
use cildiff_kernel::ast::{AstNode, CilNode, Expr, Field, Flavor, NodeData};
use cildiff_kernel::hash::Hash32;

/// Build the top-level JSON object for one invocation (`spec.md` §6.3).
#[must_use]
pub fn diff_tree_to_json(
    tree: &DiffTree<'_, CilNode>,
    left_root: &CilNode,
    right_root: &CilNode,
    left_hash: Hash32,
    right_hash: Hash32,
) -> Value {
    json!({
        "left": side_summary(left_root, left_hash),
        "right": side_summary(right_root, right_hash),
        "diffs": diffs_json(tree.root()),
        "children": children_json(tree.root()),
    })
}

/// Serialise the given invocation, pretty-printed or compact per `pretty`.
#[must_use]
pub fn render(
    tree: &DiffTree<'_, CilNode>,
    left_root: &CilNode,
    right_root: &CilNode,
    left_hash: Hash32,
    right_hash: Hash32,
    pretty: bool,
) -> String {
    let value = diff_tree_to_json(tree, left_root, right_root, left_hash, right_hash);
    if pretty {
        serde_json::to_string_pretty(&value).expect("json values never fail to serialise")
    } else {
        serde_json::to_string(&value).expect("json values never fail to serialise")
    }
}

fn side_summary(ast: &CilNode, hash: Hash32) -> Value {
    json!({
        "flavor": ast.flavor().as_str(),
        "line": ast.line(),
        "hash": hash.to_hex(),
    })
}

fn node_json(node: &cildiff_compare::DiffTreeNode<'_, CilNode>) -> Value {
    let diffs = diffs_json(node);
    let children = children_json(node);
    json!({
        "left": node.left().map(cil_node_summary),
        "right": node.right().map(cil_node_summary),
        "diffs": diffs,
        "children": children,
    })
}

fn diffs_json(node: &cildiff_compare::DiffTreeNode<'_, CilNode>) -> Value {
    Value::Array(
        node.diffs()
            .iter()
            .map(|record| {
                json!({
                    "side": match record.side() {
                        Side::Left => "LEFT",
                        Side::Right => "RIGHT",
                    },
                    "hash": record.hash().to_hex(),
                    "description": record.description(),
                    "node": cil_node_to_json(record.ast()),
                })
            })
            .collect(),
    )
}

fn children_json(node: &cildiff_compare::DiffTreeNode<'_, CilNode>) -> Value {
    Value::Array(node.children().iter().map(node_json).collect())
}

fn cil_node_summary(ast: &CilNode) -> Value {
    json!({
        "flavor": ast.flavor().as_str(),
        "line": ast.line(),
    })
}

/// `<cil-node-obj>` of `spec.md` §6.3: `{"flavor", "line", ...per-flavor
/// fields}`. The per-flavor fields mirror [`NodeData`]'s shape directly —
/// stable, and obvious from the flavor.
fn cil_node_to_json(ast: &CilNode) -> Value {
    let mut obj = serde_json::Map::new();
    obj.insert("flavor".into(), Value::String(ast.flavor().as_str().into()));
    obj.insert("line".into(), Value::Number(ast.line().into()));
    for (key, value) in node_data_fields(ast.data()) {
        obj.insert(key, value);
    }
    Value::Object(obj)
}

fn node_data_fields(data: &NodeData) -> Vec<(String, Value)> {
    match data {
        NodeData::Empty => Vec::new(),
        NodeData::Name(name) => vec![("name".into(), Value::String(name.clone()))],
        NodeData::NameList { items, ordered } => vec![
            ("items".into(), string_array(items)),
            ("ordered".into(), Value::Bool(*ordered)),
        ],
        NodeData::AttributeSet { name, members } => vec![
            ("name".into(), Value::String(name.clone())),
            ("members".into(), string_array(members)),
        ],
        NodeData::Fields(fields) => vec![(
            "fields".into(),
            Value::Array(fields.iter().map(field_json).collect()),
        )],
        NodeData::Expr(expr) => vec![("expr".into(), expr_json(expr))],
        NodeData::ConstrainExpr { class, perms, expr } => vec![
            ("class".into(), Value::String(class.clone())),
            ("perms".into(), string_array(perms)),
            ("expr".into(), expr_json(expr)),
        ],
        NodeData::ValidateExpr { class, expr } => vec![
            ("class".into(), Value::String(class.clone())),
            ("expr".into(), expr_json(expr)),
        ],
        NodeData::MacroCall { name, args } => vec![
            ("name".into(), Value::String(name.clone())),
            (
                "args".into(),
                Value::Array(args.iter().map(field_json).collect()),
            ),
        ],
    }
}

fn field_json(field: &Field) -> Value {
    match field {
        Field::Str(s) => json!({"kind": "str", "value": s}),
        Field::List { items, ordered } => {
            json!({"kind": "list", "items": items, "ordered": ordered})
        }
        Field::Nested(flavor, data) => {
            let mut obj = serde_json::Map::new();
            obj.insert("kind".into(), Value::String("nested".into()));
            obj.insert("flavor".into(), Value::String(nested_flavor_str(*flavor).into()));
            for (key, value) in node_data_fields(data) {
                obj.insert(key, value);
            }
            Value::Object(obj)
        }
    }
}

fn nested_flavor_str(flavor: Flavor) -> &'static str {
    flavor.as_str()
}

fn expr_json(expr: &Expr) -> Value {
    match expr {
        Expr::Str(s) => json!({"kind": "str", "value": s}),
        Expr::Operator { op, operands } => json!({
            "kind": "op",
            "op": op,
            "operands": operands.iter().map(expr_json).collect::<Vec<_>>(),
        }),
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| Value::String(s.clone())).collect())
}
