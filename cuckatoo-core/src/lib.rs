//! Cuckatoo Core - Core algorithms and data types for Cuckaroo-29
//! proof-of-work mining.
//!
//! This crate provides the solver pipeline end to end:
//! - SipHash-2-4 edge generation, keyed by Blake2b-256 header hashing
//! - Bucketed edge generation with capacity/overflow diagnostics
//! - Saturating-counter bucketed trimming, alternating node sides
//! - Incremental path-walk-and-splice cycle finding for exact 42-cycles
//! - Nonce recovery and proof verification
//! - Performance timing and benchmarking

pub mod backend;
pub mod config;
pub mod constants;
pub mod cycle_finder;
pub mod degree_counter;
pub mod error;
pub mod generator;
pub mod keys;
pub mod recovery;
pub mod siphash;
pub mod solver;
pub mod timing;
pub mod trim_loop;
pub mod trimmer;
pub mod types;
pub mod verification;

pub use backend::{ComputeBackend, CpuBackend};
pub use config::SolverConfig;
pub use error::{CuckarooError, Result};
pub use solver::{Solver, SolverJob};
pub use trim_loop::CancelToken;
pub use types::{Node, PackedEdge, Proof42, UnpackedEdge};
