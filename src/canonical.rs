//! Canonical serialization for deterministic hashing.
//!
//! Trail documents, policy parameters, and input fingerprints all hash the
//! same way: serialize to canonical JSON bytes, then xxh64. Determinism
//! rests on struct fields in declaration order, vectors in index order,
//! and `BTreeMap` (never `HashMap`) for any map that feeds a hash.

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
///
/// Serialization of the crate's own document types cannot fail.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("canonical serialization failed")
}

/// Compute the canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// Compute the canonical hash and render it as a hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Season, SeasonId};

    #[test]
    fn test_hash_is_stable_across_calls() {
        let v = SeasonId::new(1165, Season::Spring);
        assert_eq!(canonical_hash(&v), canonical_hash(&v));
    }

    #[test]
    fn test_hash_tracks_content() {
        let a = SeasonId::new(1165, Season::Spring);
        let b = SeasonId::new(1165, Season::Summer);
        assert_ne!(canonical_hash_hex(&a), canonical_hash_hex(&b));
    }
}
