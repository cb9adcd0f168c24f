//! Input loading for the CLI (`spec.md` §6.4): read a path or stdin (`-`),
//! auto-detecting bzip2-compressed input by its `BZh` magic bytes rather
//! than by file extension.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use bzip2::read::BzDecoder;

use crate::error::CliError;

const BZIP2_MAGIC: &[u8] = b"BZh";

/// Read `path` (or stdin if `path == "-"`), transparently decompressing
/// bzip2 input.
pub fn read_input(path: &str) -> Result<String, CliError> {
    let raw = if path == "-" {
        read_stdin()?
    } else {
        fs::read(path).map_err(|source| CliError::Read {
            path: PathBuf::from(path),
            source,
        })?
    };
    if raw.starts_with(BZIP2_MAGIC) {
        decompress(&raw, Path::new(path))
    } else {
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

fn read_stdin() -> Result<Vec<u8>, CliError> {
    let mut buf = Vec::new();
    io::stdin()
        .read_to_end(&mut buf)
        .map_err(|source| CliError::Read {
            path: PathBuf::from("-"),
            source,
        })?;
    Ok(buf)
}

fn decompress(raw: &[u8], path: &Path) -> Result<String, CliError> {
    let mut decoder = BzDecoder::new(raw);
    let mut out = String::new();
    decoder
        .read_to_string(&mut out)
        .map_err(|source| CliError::Decompress {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(out)
}
