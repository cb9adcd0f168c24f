//! Errors surfaced while assembling or comparing comparison-node trees.

/// Wraps the kernel's structural-invariant errors with whatever comparison-
/// level context was available when the violation surfaced. Every variant
/// here is fatal (`spec.md` §7) — no partial diff is ever produced.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error(transparent)]
    Kernel(#[from] cildiff_kernel::error::KernelError),
}
