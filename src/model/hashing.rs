// src/model/hashing.rs
// ============================================================================
// Module: Robometrics Hashing
// Description: Canonical JSON bytes and SHA-256 digests for deterministic artifacts.
// Purpose: Give ScenarioSet/ScoreCard a single, reusable canonicalization path.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Canonical serialization (RFC 8785 JSON Canonicalization Scheme) guarantees
//! that two semantically identical values produce byte-identical JSON, with
//! object keys sorted at every nesting level. This underlies the determinism
//! contract on `ScenarioSet`/`ScoreCard` artifacts.

use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

/// Hash algorithm identifier carried alongside a digest.
///
/// Only one algorithm is supported today; the field exists so that a future
/// algorithm can be introduced without breaking the serialized shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
}

/// The hash algorithm used when none is specified explicitly.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

/// A hash digest paired with the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct HashDigest {
    /// Algorithm used to produce `value`.
    pub algorithm: HashAlgorithm,
    /// Lowercase hex-encoded digest.
    pub value: String,
}

impl HashDigest {
    /// Builds a digest of `bytes` using `algorithm`.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm, bytes: &[u8]) -> Self {
        let value = match algorithm {
            HashAlgorithm::Sha256 => hex_encode(&Sha256::digest(bytes)),
        };
        Self { algorithm, value }
    }
}

/// Errors raised while canonicalizing a value to JSON bytes.
#[derive(Debug, Error)]
pub enum HashError {
    /// The value could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(String),
}

/// Serializes `value` to RFC 8785 canonical JSON bytes: sorted object keys at
/// every nesting level, array order preserved.
pub fn canonical_json_bytes<T>(value: &T) -> Result<Vec<u8>, HashError>
where
    T: Serialize + ?Sized,
{
    serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Hashes the canonical JSON bytes of `value`.
pub fn hash_canonical_json<T>(value: &T, algorithm: HashAlgorithm) -> Result<HashDigest, HashError>
where
    T: Serialize + ?Sized,
{
    let bytes = canonical_json_bytes(value)?;
    Ok(HashDigest::new(algorithm, &bytes))
}

/// Hashes raw bytes directly, bypassing canonicalization.
#[must_use]
pub fn hash_bytes(bytes: &[u8], algorithm: HashAlgorithm) -> HashDigest {
    HashDigest::new(algorithm, bytes)
}

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Lowercase hex-encodes `bytes`.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
