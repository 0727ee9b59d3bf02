//! The end-to-end solve pipeline (spec.md §6): derive keys from a job
//! header, generate and trim edges, search for a 42-cycle, and recover
//! its nonces.

use log::info;

use crate::backend::ComputeBackend;
use crate::config::SolverConfig;
use crate::cycle_finder::find_cycle;
use crate::error::{CuckarooError, Result};
use crate::generator::generate;
use crate::keys::derive_keys;
use crate::recovery::recover_nonces;
use crate::trim_loop::{self, CancelToken};
use crate::types::Proof42;

/// One unit of solver work: a header to derive keys from, plus the
/// config it should be solved under.
#[derive(Debug, Clone)]
pub struct SolverJob {
    pub header: Vec<u8>,
    pub config: SolverConfig,
}

impl SolverJob {
    pub fn new(header: impl Into<Vec<u8>>, config: SolverConfig) -> Self {
        Self {
            header: header.into(),
            config,
        }
    }
}

/// Drives one job through generate -> trim -> find cycle -> recover.
/// Stateless beyond the compute backend it was built with, so one
/// `Solver` can run many jobs sequentially.
pub struct Solver<'b> {
    backend: &'b dyn ComputeBackend,
}

impl<'b> Solver<'b> {
    pub fn new(backend: &'b dyn ComputeBackend) -> Self {
        Self { backend }
    }

    /// Run the full pipeline for `job`, returning a proof if a
    /// 42-cycle was found, or [`CuckarooError::NoCycle`] if trimming
    /// and cycle search completed without one.
    pub fn solve(&self, job: &SolverJob, cancel: &CancelToken) -> Result<Proof42> {
        job.config.validate()?;

        let keys = derive_keys(&job.header);
        info!(
            "solving job on backend {} (edge_bits={})",
            self.backend.name(),
            job.config.edge_bits
        );

        let generated = generate(&keys, &job.config, self.backend);
        if job.config.overflow_is_fatal && generated.stats.overflowed_buckets > 0 {
            return Err(CuckarooError::CapacityOverflow {
                dropped: generated.stats.dropped,
                buckets: generated.stats.overflowed_buckets,
            });
        }

        let trimmed = match trim_loop::run(&generated, &job.config, self.backend, cancel) {
            Some(edges) => edges,
            None => return Err(CuckarooError::Cancelled),
        };

        let cycle_indices = find_cycle(&trimmed).ok_or(CuckarooError::NoCycle)?;
        let cycle_edges: Vec<_> = cycle_indices.iter().map(|&i| trimmed[i as usize]).collect();

        recover_nonces(&keys, &job.config, &cycle_edges, self.backend)
    }
}
