//! Bucketed edge generation (spec.md §4.B): scatter every nonce's edge
//! into one of `2^bucket_bits` buckets keyed by high bits of `node0`,
//! so later stages can work one bucket at a time without a full
//! `O(2^edge_bits)` scan.

use std::sync::Mutex;

use log::warn;

use crate::backend::ComputeBackend;
use crate::config::SolverConfig;
use crate::siphash::SipHashKeys;
use crate::types::PackedEdge;

/// Diagnostics from one generation pass: how many edges were produced,
/// and how many were dropped because their bucket was already full
/// (SPEC_FULL.md §11 — surfaced rather than silently discarded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub generated: u64,
    pub dropped: u64,
    pub overflowed_buckets: u32,
}

/// The bucketed edge set produced by one generation pass.
pub struct BucketedEdges {
    pub buckets: Vec<Vec<PackedEdge>>,
    pub stats: GenerationStats,
}

/// Which bucket a node falls into: the top `bucket_bits` bits of the
/// node value, after the mandatory parity bit is stripped.
fn bucket_of(node0: u32, bucket_bits: u32, edge_bits: u32) -> u32 {
    let shift = (edge_bits + 1).saturating_sub(bucket_bits);
    node0 >> shift
}

/// Generate all edges for `0..2^edge_bits` nonces and scatter them into
/// buckets keyed by `node0`'s high bits.
pub fn generate(
    keys: &SipHashKeys,
    config: &SolverConfig,
    backend: &dyn ComputeBackend,
) -> BucketedEdges {
    let bucket_count = config.bucket_count() as usize;
    let capacity = config.bucket_capacity() as usize;

    let buckets: Vec<Mutex<Vec<PackedEdge>>> = (0..bucket_count)
        .map(|_| Mutex::new(Vec::with_capacity(capacity)))
        .collect();
    let overflowed = std::sync::atomic::AtomicU64::new(0);
    let dropped = std::sync::atomic::AtomicU64::new(0);

    let edge_count = 1u64 << config.edge_bits;
    backend.for_each_index(edge_count, |nonce| {
        let edge = keys.edge(config.edge_bits, nonce as u32);
        let bucket_index = bucket_of(edge.even.value() as u32, config.bucket_bits, config.edge_bits);
        let mut bucket = buckets[bucket_index as usize].lock().unwrap();
        if bucket.len() >= capacity {
            dropped.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            if bucket.len() == capacity {
                overflowed.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            }
            return;
        }
        bucket.push(edge.pack());
    });

    let dropped = dropped.load(std::sync::atomic::Ordering::Relaxed);
    let overflowed_buckets = overflowed.load(std::sync::atomic::Ordering::Relaxed) as u32;
    if dropped > 0 {
        warn!(
            "edge generation dropped {dropped} edges across {overflowed_buckets} bucket(s); \
             consider raising bucket_capacity_factor"
        );
    }

    let buckets = buckets.into_iter().map(|b| b.into_inner().unwrap()).collect();

    BucketedEdges {
        buckets,
        stats: GenerationStats {
            generated: edge_count - dropped,
            dropped,
            overflowed_buckets,
        },
    }
}
