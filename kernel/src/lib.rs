//! `cildiff-kernel`: the read-only AST contract and content-addressed hashing
//! primitives that everything else in the workspace is built on.
//!
//! # API Surface
//!
//! - [`hash`] -- the incremental hash primitive (begin/update/copy/finish) and
//!   the `Hash32` type used everywhere a full or partial hash is stored.
//! - [`ast`] -- the `Flavor` enum, the `AstNode`/`NodeData` contract a parser
//!   must satisfy, and `CilTree`/`CilNode`, the one in-memory implementation
//!   shipped for glue code and tests.
//! - [`data_hash`] -- per-flavor rules that absorb a node's own fields into a
//!   hash state, producing `(full_hash, partial_hash)`.
//!
//! # Module dependency direction
//!
//! `hash` ← `ast` ← `data_hash`
//!
//! One-way only. No cycles. `data_hash` depends on `ast` and `hash`. `ast`
//! depends on `hash` (node identity is expressed as hashes). `hash` depends
//! on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod data_hash;
pub mod error;
pub mod hash;
