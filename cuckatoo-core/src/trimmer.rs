//! One trim step (spec.md §4.D): given the edges surviving so far and a
//! degree-counter table keyed by this round's source side, copy
//! forward every edge whose source endpoint has degree >= 2.
//!
//! A single step is two passes over the edge set: a counting pass that
//! increments each source node's degree counter, and a copy pass that
//! keeps an edge only if its source endpoint's final count is >= 2.
//! Running two passes (rather than trimming while counting) is what
//! makes Property D hold — the test is always against the fully
//! counted source set, never a partially-updated one.
//!
//! The counting pass must see every live edge, not just the edges
//! physically stored in one bucket: buckets are keyed by `node0`'s
//! high bits (spec.md §4.B), which has no relationship to the degree
//! counter's round-side endpoint on odd rounds (counting `node1`). A
//! degree counter scoped to a single bucket would see only a fraction
//! of the edges sharing a given `node1` value and systematically
//! undercount real degrees. `DegreeCounters` is therefore built once
//! per round over the full node space and the full edge set — spanning
//! every bucket — before any bucket is trimmed (spec.md §2: component
//! C builds counters "over the node space" from the buffer as a
//! whole).

use crate::backend::ComputeBackend;
use crate::degree_counter::DegreeCounters;
use crate::types::PackedEdge;

/// Count the round-side degree of every node referenced by any edge in
/// `buckets`, into one counter table spanning the full node space.
pub fn count_degrees(
    buckets: &[Vec<PackedEdge>],
    node_space: u64,
    round: u32,
    backend: &dyn ComputeBackend,
) -> DegreeCounters {
    let counters = DegreeCounters::new(node_space);
    for bucket in buckets {
        let count = bucket.len() as u64;
        backend.for_each_index(count, |i| {
            let edge = bucket[i as usize].unpack();
            let source = edge.endpoint(round).value();
            counters.increment(source);
        });
    }
    counters
}

/// Copy forward every edge in `edges` whose round-side endpoint has
/// degree >= 2 in `counters`. `counters` must already be fully built
/// (by [`count_degrees`]) over every bucket this edge slice came from.
pub fn trim_with_counters(
    edges: &[PackedEdge],
    counters: &DegreeCounters,
    round: u32,
    backend: &dyn ComputeBackend,
) -> Vec<PackedEdge> {
    let count = edges.len() as u64;
    let survivors = std::sync::Mutex::new(Vec::with_capacity(edges.len()));
    backend.for_each_index(count, |i| {
        let edge = edges[i as usize];
        let source = edge.unpack().endpoint(round).value();
        if counters.has_degree_at_least_2(source) {
            survivors.lock().unwrap().push(edge);
        }
    });
    survivors.into_inner().unwrap()
}

/// Run one trim round over a single, already-complete edge set (no
/// bucket splitting): build counters from `edges` itself, then trim
/// against them. Correct whenever `edges` is the entire live set, as
/// in the single-bucket tests below.
pub fn trim_round(
    edges: &[PackedEdge],
    node_space: u64,
    round: u32,
    backend: &dyn ComputeBackend,
) -> Vec<PackedEdge> {
    let counters = DegreeCounters::new(node_space);
    let count = edges.len() as u64;
    backend.for_each_index(count, |i| {
        let edge = edges[i as usize].unpack();
        let source = edge.endpoint(round).value();
        counters.increment(source);
    });
    trim_with_counters(edges, &counters, round, backend)
}

/// Run one trim round over every bucket, sharing a single counter
/// table built from *all* buckets' edges (spec.md §4.D/§4.E), then
/// trimming each bucket against that shared table. The destination
/// bucket index equals the source bucket index — buckets are never
/// re-partitioned between rounds.
pub fn trim_buckets(
    buckets: &[Vec<PackedEdge>],
    node_space: u64,
    round: u32,
    backend: &dyn ComputeBackend,
) -> Vec<Vec<PackedEdge>> {
    let counters = count_degrees(buckets, node_space, round, backend);
    buckets
        .iter()
        .map(|bucket| trim_with_counters(bucket, &counters, round, backend))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;
    use crate::types::UnpackedEdge;

    fn edge(even: u64, odd: u64) -> PackedEdge {
        UnpackedEdge {
            even: crate::types::Node(even),
            odd: crate::types::Node(odd),
        }
        .pack()
    }

    #[test]
    fn keeps_edges_whose_source_has_degree_at_least_2() {
        // Node 0 (even side) has degree 2: two edges share it. Node 4
        // (even side) has degree 1 and should be dropped on round 0.
        let edges = vec![edge(0, 1), edge(0, 3), edge(4, 5)];
        let survivors = trim_round(&edges, 16, 0, &CpuBackend);
        assert_eq!(survivors.len(), 2);
        for e in &survivors {
            assert_eq!(e.node0(), 0);
        }
    }

    #[test]
    fn trimming_never_increases_edge_count() {
        let edges = vec![edge(0, 1), edge(0, 3), edge(4, 5), edge(6, 7)];
        let survivors = trim_round(&edges, 16, 0, &CpuBackend);
        assert!(survivors.len() <= edges.len());
    }

    #[test]
    fn trim_buckets_preserves_bucket_boundaries() {
        let buckets = vec![vec![edge(0, 1), edge(0, 3)], vec![edge(4, 5)]];
        let result = trim_buckets(&buckets, 16, 0, &CpuBackend);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].len(), 2);
        assert_eq!(result[1].len(), 0);
    }

    #[test]
    fn degree_counting_spans_buckets_not_just_one() {
        // Node 1 (odd side) has degree 2, but its two edges are split
        // across two different buckets (buckets are keyed by node0's
        // high bits, unrelated to node1). On round 1 (odd side is the
        // source), both edges must survive: a per-bucket counter would
        // see degree 1 in each bucket and wrongly drop both.
        let buckets = vec![vec![edge(0, 1)], vec![edge(64, 1)]];
        let result = trim_buckets(&buckets, 256, 1, &CpuBackend);
        assert_eq!(result[0].len(), 1);
        assert_eq!(result[1].len(), 1);
    }
}
