//! Streaming SHA-256 fingerprint of a function's canonical results.
//!
//! The fingerprint of a run is the digest of the concatenation of the
//! canonical text of every case's result, in generation order. Only the
//! running hash state is kept, so memory does not grow with the sequence.
//!
//! # Invariants
//!
//! - Same case sequence and same canonical texts give the same digest on any
//!   host (input bytes are the UTF-8 encoding of the text, nothing else)
//! - An expected digest may be any prefix of the full hex digest

use sha2::{Digest, Sha256};

/// Number of hex characters shown when a computed digest is printed instead
/// of judged.
pub const DISPLAY_WIDTH: usize = 50;

/// Incremental fingerprint over a sequence of canonical texts.
#[derive(Debug, Clone, Default)]
pub struct Fingerprint {
    hasher: Sha256,
    cases: usize,
}

impl Fingerprint {
    /// Start an empty fingerprint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb the canonical text of one case's result.
    pub fn absorb(&mut self, text: &str) {
        self.hasher.update(text.as_bytes());
        self.cases += 1;
    }

    /// Number of texts absorbed so far.
    pub fn cases(&self) -> usize {
        self.cases
    }

    /// Lowercase hex digest of everything absorbed so far.
    ///
    /// Does not consume the accumulator; absorbing may continue afterwards.
    pub fn hex_digest(&self) -> String {
        hex::encode(self.hasher.clone().finalize())
    }

    /// Consume the accumulator and return the lowercase hex digest.
    pub fn finalize(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

/// Fingerprint a whole sequence of canonical texts at once.
pub fn fingerprint_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> String {
    let mut fp = Fingerprint::new();
    for text in texts {
        fp.absorb(text);
    }
    fp.finalize()
}

/// Check a computed digest against an expected (possibly shortened) one.
///
/// Hex case is ignored. Returns `None` when there is nothing to judge
/// against, i.e. the expectation is absent or empty.
pub fn matches_expected(digest: &str, expected: Option<&str>) -> Option<bool> {
    let expected = expected.map(str::trim).filter(|e| !e.is_empty())?;
    let digest = digest.to_ascii_lowercase();
    Some(digest.starts_with(&expected.to_ascii_lowercase()))
}

/// The shortened form of a digest that gets printed for pinning.
pub fn display_digest(digest: &str) -> &str {
    let end = digest
        .char_indices()
        .nth(DISPLAY_WIDTH)
        .map_or(digest.len(), |(i, _)| i);
    &digest[..end]
}
