//! Content fingerprints for applied inputs.
//!
//! A fingerprint is the SHA-256 of an input's canonical serialization,
//! rendered as lowercase hex. Hashing the canonical bytes rather than the
//! source file means formatting and encoding artifacts never count as
//! content changes. The guard records the fingerprint alongside the
//! session ledger entry; an already-applied `file_id` that later presents
//! a different fingerprint is the fatal mismatch the operator has to
//! resolve by hand.

use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of raw bytes, as 64 lowercase hex chars.
pub fn fingerprint_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
