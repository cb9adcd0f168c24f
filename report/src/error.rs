//! Input-boundary errors (`spec.md` §7's "input error" taxonomy): bad
//! paths, decompression failures. These are reported once with the failing
//! path and cause, then the process exits non-zero — no diff is ever
//! emitted for an input error.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decompress bzip2 input {path}: {source}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Kernel(#[from] cildiff_kernel::error::KernelError),

    #[error(transparent)]
    Compare(#[from] cildiff_compare::CompareError),

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}
