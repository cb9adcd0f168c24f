//! Per-flavor data hasher rules (component C).
//!
//! [`hash_node_data`] absorbs one AST node's *own* immediate data fields
//! (never its children — that is the comparison node's job, see
//! `cildiff-compare::node`) into a fresh [`HashState`] and returns
//! `(full_hash, partial_hash)`.
//!
//! The snapshot point — where `partial_hash` is drawn off before absorption
//! continues toward `full_hash` — is documented per rule below. Flavors
//! whose only field *is* their merge key (most name-carrying containers)
//! have `partial_hash == full_hash` trivially: there is nothing left to
//! absorb after the key, so no explicit snapshot is needed.

use crate::ast::{Expr, Field, Flavor, NodeData};
use crate::hash::{Hash32, HashState};

/// Compute `(full_hash, partial_hash)` for one node's own data, dispatched
/// by flavor. Every flavor in [`Flavor`] has a rule here; [`Flavor::Other`]
/// and any flavor whose data is [`NodeData::Empty`] fall back to hashing
/// just the flavor tag.
#[must_use]
pub fn hash_node_data(flavor: Flavor, data: &NodeData) -> (Hash32, Hash32) {
    match data {
        NodeData::Empty => {
            let full = HashState::begin(Some(flavor.as_str())).finish();
            (full, full)
        }
        NodeData::Name(name) => hash_name(flavor, name),
        NodeData::NameList { items, ordered } => hash_name_list(flavor, items, *ordered),
        NodeData::AttributeSet { name, members } => hash_attribute_set(flavor, name, members),
        NodeData::Fields(fields) => hash_fields(flavor, fields),
        NodeData::Expr(expr) => hash_expr_data(flavor, expr),
        NodeData::ConstrainExpr { class, perms, expr } => {
            hash_constrain(flavor, class, perms, expr)
        }
        NodeData::ValidateExpr { class, expr } => hash_validate(flavor, class, expr),
        NodeData::MacroCall { name, args } => hash_macro_call(flavor, name, args),
    }
}

/// Name-only data: the name *is* the merge key, so `partial == full`.
fn hash_name(flavor: Flavor, name: &str) -> (Hash32, Hash32) {
    let mut state = HashState::begin(Some(flavor.as_str()));
    state.update_string(name);
    let full = state.finish();
    (full, full)
}

/// Ordered lists absorb in position order; unordered ones are sorted first
/// (`spec.md` §4.2). Either way the whole list is the merge key — there is
/// only ever one declaration of a given order flavor per policy — so
/// `partial == full`.
fn hash_name_list(flavor: Flavor, items: &[String], ordered: bool) -> (Hash32, Hash32) {
    let mut state = HashState::begin(Some(flavor.as_str()));
    absorb_string_list(&mut state, items, ordered);
    let full = state.finish();
    (full, full)
}

fn hash_attribute_set(flavor: Flavor, name: &str, members: &[String]) -> (Hash32, Hash32) {
    let mut state = HashState::begin(Some(flavor.as_str()));
    state.update_string(name);
    absorb_string_list(&mut state, members, false);
    let full = state.finish();
    (full, full)
}

/// Rule statements and labeling statements: an ordered list of fields, each
/// either a plain string, a sub-list, or a nested anonymous payload. No
/// flavor in this group has a meaningful sub-grouping key distinct from its
/// full content, so `partial == full`.
fn hash_fields(flavor: Flavor, fields: &[Field]) -> (Hash32, Hash32) {
    let mut state = HashState::begin(Some(flavor.as_str()));
    for field in fields {
        absorb_field(&mut state, field);
    }
    let full = state.finish();
    (full, full)
}

/// `booleanif`/`tunableif`: the condition expression is the node's entire
/// own data. It doubles as the merge key for similarity matching (two
/// conditionals on the same condition, but with different bodies, should be
/// considered for pairing) — so `partial == full` here too; the bodies that
/// actually vary live in the branch sets, which are hashed separately by
/// the comparison node (component D), not here.
fn hash_expr_data(flavor: Flavor, expr: &Expr) -> (Hash32, Hash32) {
    let mut state = HashState::begin(Some(flavor.as_str()));
    state.update_hash(hash_expr(expr));
    let full = state.finish();
    (full, full)
}

fn hash_constrain(flavor: Flavor, class: &str, perms: &[String], expr: &Expr) -> (Hash32, Hash32) {
    let mut state = HashState::begin(Some(flavor.as_str()));
    state.update_string(class);
    absorb_string_list(&mut state, perms, false);
    state.update_hash(hash_expr(expr));
    let full = state.finish();
    (full, full)
}

fn hash_validate(flavor: Flavor, class: &str, expr: &Expr) -> (Hash32, Hash32) {
    let mut state = HashState::begin(Some(flavor.as_str()));
    state.update_string(class);
    state.update_hash(hash_expr(expr));
    let full = state.finish();
    (full, full)
}

/// `call`: a macro name and its actuals. The name alone is drawn as the
/// partial-hash snapshot, so two calls to the same macro with different
/// arguments still land in the same subset for comparison, even though
/// `call` itself uses the default subset strategy (no pairing logic keys
/// off this beyond ordinary exact-match dedup — the snapshot is kept for
/// symmetry with the other name-keyed flavors and for future extension).
fn hash_macro_call(flavor: Flavor, name: &str, args: &[Field]) -> (Hash32, Hash32) {
    let mut state = HashState::begin(Some(flavor.as_str()));
    state.update_string(name);
    let partial = state.copy().finish();
    for arg in args {
        absorb_field(&mut state, arg);
    }
    let full = state.finish();
    (full, partial)
}

fn absorb_string_list(state: &mut HashState, items: &[String], ordered: bool) {
    state.update_u64_le(items.len() as u64);
    if ordered {
        for item in items {
            state.update_string(item);
        }
    } else {
        let mut sorted: Vec<&String> = items.iter().collect();
        sorted.sort();
        for item in sorted {
            state.update_string(item);
        }
    }
}

fn absorb_field(state: &mut HashState, field: &Field) {
    match field {
        Field::Str(s) => {
            state.update_string("<field::str>");
            state.update_string(s);
        }
        Field::List { items, ordered } => {
            state.update_string("<field::list>");
            absorb_string_list(state, items, *ordered);
        }
        Field::Nested(nested_flavor, nested_data) => {
            state.update_string("<field::nested>");
            let (nested_full, _nested_partial) = hash_node_data(*nested_flavor, nested_data);
            state.update_hash(nested_full);
        }
    }
}

/// Hash a Boolean-style expression tree. Children are hashed recursively,
/// then sorted lexicographically by hash before folding into the parent —
/// this canonicalizes sibling operands of commutative operators, and
/// (deliberately, per `spec.md` §9's open question) over-canonicalizes
/// non-commutative operators too: the core matches the original tool's
/// behavior rather than introducing a stricter variant.
#[must_use]
pub fn hash_expr(expr: &Expr) -> Hash32 {
    match expr {
        Expr::Str(s) => {
            let mut state = HashState::begin(Some("<expr::str>"));
            state.update_string(s);
            state.finish()
        }
        Expr::Operator { op, operands } => {
            let mut operand_hashes: Vec<Hash32> = operands.iter().map(hash_expr).collect();
            operand_hashes.sort_unstable();
            let mut state = HashState::begin(Some("<expr::op>"));
            state.update_string(op);
            state.update_u64_le(operand_hashes.len() as u64);
            for h in operand_hashes {
                state.update_hash(h);
            }
            state.finish()
        }
    }
}
