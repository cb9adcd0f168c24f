//! `cildiff-report`: the report emitters (component H) plus the CLI glue
//! around them.
//!
//! Two emitters walk a finished [`cildiff_compare::DiffTree`] and consume
//! only its public contracts (and those of `cildiff-compare`'s comparison
//! nodes), never touching the AST or hashing internals directly beyond
//! what those contracts already expose:
//!
//! - [`text::print_text`] — the plain-text report (`spec.md` §6.3).
//! - [`json::render`] — the structured JSON report (`spec.md` §6.3).
//!
//! [`error::CliError`] is the input-boundary error taxonomy (`spec.md`
//! §7); [`input`] auto-detects and decompresses bzip2 inputs for the CLI
//! (`spec.md` §6.4).

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod fixture;
pub mod input;
pub mod json;
pub mod text;

pub use error::CliError;
