// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Content digests.
//!
//! A "proof" in this protocol is the SHA-256 digest of the payload, hex encoded.
//! It is an integrity check: two nodes holding the same bytes derive the same
//! digest, and verification is plain string equality. It carries no
//! knowledge-hiding property beyond what the hash itself gives.

use core::fmt;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::DIGEST_HEX_LEN;

/// Hex-encoded digest as it travels on the wire.
///
/// Digests received from callers are kept verbatim, including malformed ones,
/// so that [`verify`] compares exactly what was sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// True for 64 lowercase hex characters, the shape [`prove`] emits.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == DIGEST_HEX_LEN
            && self.0.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl From<String> for ContentDigest {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ContentDigest {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for ContentDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes the digest of `data`. Pure and deterministic.
pub fn prove(data: impl AsRef<[u8]>) -> ContentDigest {
    let hash = Sha256::digest(data.as_ref());
    ContentDigest(hex::encode(hash))
}

/// Exact, case-sensitive comparison of two digests.
pub fn verify(provided: &ContentDigest, expected: &ContentDigest) -> bool {
    provided.0 == expected.0
}
