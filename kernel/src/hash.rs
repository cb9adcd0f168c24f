//! The incremental hash primitive (component A).
//!
//! A fresh [`HashState`] is opened with [`HashState::begin`], optionally
//! prefixed with a flavor tag so that distinct constructs whose payloads
//! happen to coincide still produce distinct digests. Bytes are absorbed with
//! [`HashState::update`]; strings with [`HashState::update_string`], which
//! absorbs the trailing NUL so `"ab"` and `"a\0b"` cannot collide. The state
//! can be [`HashState::copy`]'d at any point — used to snapshot the
//! partial/full hash boundary (see `data_hash`) — and is sealed into a
//! [`Hash32`] with [`HashState::finish`].
//!
//! SHA-256 is the chosen digest (`spec.md` §4.1 treats any 32-byte
//! cryptographic digest as a suitable choice; collisions are treated as
//! impossible for correctness).

use sha2::{Digest, Sha256};
use std::fmt;

/// A fixed-size 32-byte digest. Two hashes are equal iff their bytes are
/// equal; ordering is lexicographic over the bytes, giving a deterministic
/// total order for sorting sibling hashes before folding them into a parent
/// digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash32([u8; 32]);

impl Hash32 {
    /// The sentinel that sorts before any non-null hash (all-zero bytes).
    /// Used for the empty-set sentinel (§4.4) and as a safe placeholder
    /// hash where a construct has no meaningful digest of its own.
    pub const NULL: Hash32 = Hash32([0u8; 32]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash32({})", self.to_hex())
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// An in-progress hash absorption. Cheap to [`clone`](Clone::clone) (the
/// underlying digest state is plain data), which is how the partial/full
/// hash snapshot point (`spec.md` §4.2) is implemented: clone the state at
/// the boundary, finish the clone for `partial_hash`, keep absorbing the
/// original for `full_hash`.
#[derive(Clone)]
pub struct HashState {
    inner: Sha256,
}

impl HashState {
    /// Open a new hash state, optionally prefixed with a flavor (or other
    /// domain-separation) tag absorbed via [`update_string`](Self::update_string).
    #[must_use]
    pub fn begin(tag: Option<&str>) -> Self {
        let mut state = Self {
            inner: Sha256::new(),
        };
        if let Some(tag) = tag {
            state.update_string(tag);
        }
        state
    }

    /// Absorb raw bytes.
    pub fn update(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    /// Absorb a string including its terminating NUL, so that `"ab"` and
    /// `"a\0b"` cannot collide and so that a short string followed by more
    /// fields can never be confused with a longer string whose prefix
    /// matches.
    pub fn update_string(&mut self, s: &str) {
        self.inner.update(s.as_bytes());
        self.inner.update([0u8]);
    }

    /// Absorb a fixed-width integer as raw little-endian bytes. Consistency
    /// within one run is sufficient — the engine produces no cross-machine
    /// output (`spec.md` §4.2).
    pub fn update_u32_le(&mut self, v: u32) {
        self.inner.update(v.to_le_bytes());
    }

    /// Absorb a fixed-width integer as raw little-endian bytes.
    pub fn update_u64_le(&mut self, v: u64) {
        self.inner.update(v.to_le_bytes());
    }

    /// Absorb another already-computed hash (used when folding a nested
    /// construct's full hash into the parent's absorption, or when folding
    /// sorted child hashes into a set/subset hash).
    pub fn update_hash(&mut self, h: Hash32) {
        self.inner.update(h.as_bytes());
    }

    /// Snapshot the current absorption state. Used to draw the
    /// partial/full hash boundary: the snapshot becomes `partial_hash`;
    /// absorption continues on the original for `full_hash`.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Seal the absorbed bytes into a 32-byte digest.
    #[must_use]
    pub fn finish(self) -> Hash32 {
        Hash32(self.inner.finalize().into())
    }
}

/// Digest of a single well-known literal, used for cross-module sentinels
/// (the empty-set hash, anonymous-payload placeholders) that must be stable
/// and collision-free against real content.
#[must_use]
pub fn sentinel(literal: &str) -> Hash32 {
    let mut state = HashState::begin(None);
    state.update_string(literal);
    state.finish()
}
