//! Solver configuration: sizes, round counts and bucket tuning
//! (SPEC_FULL.md §10.C).

use crate::constants::{
    validate_edge_bits, DEFAULT_BUCKET_BITS, DEFAULT_BUCKET_CAPACITY_FACTOR,
    DEFAULT_TRIMMING_ROUNDS, EDGE_BITS,
};
use crate::error::{CuckarooError, Result};

/// Tunable parameters for one solver instance. Cheap to clone; a
/// [`crate::solver::Solver`] holds one and reuses it across jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// `log2` of the edge (and nonce) space. Cuckaroo-29 uses 29.
    pub edge_bits: u32,
    /// Number of trimming rounds to run before giving up (40-176 per
    /// spec.md §5).
    pub trimming_rounds: u32,
    /// `log2` of the bucket count the edge generator scatters into.
    pub bucket_bits: u32,
    /// Safety margin applied over the uniform per-bucket share when
    /// sizing bucket storage.
    pub bucket_capacity_factor: f64,
    /// Whether bucket overflow during generation (spec.md §4.E/§7)
    /// should surface as [`CuckarooError::CapacityOverflow`] rather
    /// than being treated as a diagnostics-only warning.
    pub overflow_is_fatal: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            edge_bits: EDGE_BITS,
            trimming_rounds: DEFAULT_TRIMMING_ROUNDS,
            bucket_bits: DEFAULT_BUCKET_BITS,
            bucket_capacity_factor: DEFAULT_BUCKET_CAPACITY_FACTOR,
            overflow_is_fatal: false,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if !validate_edge_bits(self.edge_bits) {
            return Err(CuckarooError::InvalidConfig(format!(
                "edge_bits {} out of supported range",
                self.edge_bits
            )));
        }
        if !(40..=176).contains(&self.trimming_rounds) {
            return Err(CuckarooError::InvalidConfig(format!(
                "trimming_rounds {} out of range 40..=176",
                self.trimming_rounds
            )));
        }
        if self.bucket_bits == 0 || self.bucket_bits > self.edge_bits {
            return Err(CuckarooError::InvalidConfig(format!(
                "bucket_bits {} invalid for edge_bits {}",
                self.bucket_bits, self.edge_bits
            )));
        }
        if self.bucket_capacity_factor < 1.0 {
            return Err(CuckarooError::InvalidConfig(
                "bucket_capacity_factor must be >= 1.0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bucket_count(&self) -> u32 {
        1u32 << self.bucket_bits
    }

    /// Per-bucket capacity: a uniform share of the edge space, inflated
    /// by `bucket_capacity_factor` to absorb hash skew (spec.md §4.B).
    pub fn bucket_capacity(&self) -> u64 {
        let edges = 1u64 << self.edge_bits;
        let per_bucket = edges / self.bucket_count() as u64;
        (per_bucket as f64 * self.bucket_capacity_factor).ceil() as u64
    }
}
