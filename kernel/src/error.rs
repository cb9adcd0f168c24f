//! Structural invariant violations (`spec.md` §7). These never represent a
//! user mistake — they indicate a parser/AST contract breach — and are
//! treated as fatal by every caller: no partial diff is ever produced.

/// A violation of an invariant the core requires of its input AST or of its
/// own internal bookkeeping.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// An expression payload's operator/operand shape did not match what
    /// the data hasher expects for that operator (e.g. an operator with
    /// zero operands).
    #[error("malformed expression at line {line}: {detail}")]
    MalformedExpression { line: u32, detail: String },

    /// Two children landed in the same single-child subset (`block`,
    /// `macro`) with different full hashes — declaration names are supposed
    /// to be unique within a container, so this means the AST violated that
    /// uniqueness contract.
    #[error(
        "duplicate declaration {name:?} in single-child subset at line {line}: \
         conflicting hashes for the same name"
    )]
    ConflictingSingleChild { name: String, line: u32 },
}
