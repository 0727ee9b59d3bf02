//! Compute backend abstraction (SPEC_FULL.md §11): the solver pipeline
//! is written against this trait so a GPU backend can be dropped in
//! later without touching `generator`/`trimmer`/`cycle_finder`.

use rayon::prelude::*;

/// A substrate capable of running the solver's data-parallel stages.
/// The CPU backend below is the only implementation this crate ships;
/// the trait boundary is the documented extension point for a GPU
/// backend (out of scope here, per spec.md's Non-goals).
pub trait ComputeBackend: Send + Sync {
    /// Run `f` once per item in `0..count`, in parallel where the
    /// backend supports it.
    fn for_each_index(&self, count: u64, f: impl Fn(u64) + Sync + Send);

    /// Human-readable backend name, for logging.
    fn name(&self) -> &'static str;
}

/// The default backend: a `rayon` thread pool over the host CPU.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuBackend;

impl ComputeBackend for CpuBackend {
    fn for_each_index(&self, count: u64, f: impl Fn(u64) + Sync + Send) {
        (0..count).into_par_iter().for_each(f);
    }

    fn name(&self) -> &'static str {
        "cpu"
    }
}
