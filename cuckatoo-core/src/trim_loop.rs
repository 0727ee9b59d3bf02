//! The bulk-synchronous trim loop (spec.md §4.E, §5): run `trim_round`
//! repeatedly, alternating which side is the source each round, until
//! either the configured round count is exhausted or a cancellation is
//! observed at a round boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};

use crate::backend::ComputeBackend;
use crate::config::SolverConfig;
use crate::constants::node_count;
use crate::generator::BucketedEdges;
use crate::trimmer::trim_buckets;
use crate::types::PackedEdge;

/// A cooperative cancellation flag, checked at each round boundary
/// (SPEC_FULL.md §11). Cloning shares the same underlying flag.
#[derive(Debug, Default, Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run the full trim loop over an already-generated, bucketed edge
/// set, returning the flattened surviving edges or `None` if
/// cancelled before completion.
pub fn run(
    generated: &BucketedEdges,
    config: &SolverConfig,
    backend: &dyn ComputeBackend,
    cancel: &CancelToken,
) -> Option<Vec<PackedEdge>> {
    let node_space = node_count(config.edge_bits);
    let mut current = generated.buckets.clone();

    info!(
        "trim loop starting: {} edges across {} buckets, {} rounds",
        generated.stats.generated,
        current.len(),
        config.trimming_rounds
    );

    for round in 0..config.trimming_rounds {
        if cancel.is_cancelled() {
            info!("trim loop cancelled at round {round}");
            return None;
        }

        let next = trim_buckets(&current, node_space, round, backend);
        let survivors: usize = next.iter().map(|b| b.len()).sum();
        debug!("round {round}: {survivors} edges survive");
        current = next;
    }

    let flattened: Vec<PackedEdge> = current.into_iter().flatten().collect();
    info!("trim loop finished: {} edges remain", flattened.len());
    Some(flattened)
}
