//! SipHash key derivation from a job header, via Blake2b-256.
//!
//! Resolves the Open Question in spec.md §9: keys are derived with a
//! real cryptographic hash rather than an ad hoc XOR-fold, so that two
//! jobs with similar headers don't produce correlated key material.

use blake2::digest::consts::U32;
use blake2::digest::Digest;
use blake2::Blake2b;

use crate::siphash::SipHashKeys;

type Blake2b256 = Blake2b<U32>;

/// Derive the four SipHash-2-4 keys for a job from its header bytes,
/// the way `grin_core::pow::common::create_siphash_keys` derives them:
/// hash the header with Blake2b-256, then read four little-endian u64
/// words from the digest.
pub fn derive_keys(header: &[u8]) -> SipHashKeys {
    let mut hasher = Blake2b256::new();
    hasher.update(header);
    let digest = hasher.finalize();

    let mut words = [0u64; 4];
    for (i, word) in words.iter_mut().enumerate() {
        let start = i * 8;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[start..start + 8]);
        *word = u64::from_le_bytes(bytes);
    }

    SipHashKeys::new(words)
}
