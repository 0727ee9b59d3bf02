//! Error types for the Cuckaroo-29 solver pipeline.

use thiserror::Error;

/// Errors that can occur while preparing or running a solve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CuckarooError {
    /// A SipHash key set was malformed (currently unreachable in practice:
    /// any 4xu64 key set, including all-zero, produces a valid if
    /// degenerate graph — kept for forward compatibility with key
    /// derivation schemes that can fail).
    #[error("invalid siphash keys: {0}")]
    HashError(String),

    /// A bucket filled past `maxPerBucket` during generation and the
    /// solver was configured to treat that as fatal.
    #[error("bucket capacity exceeded: {dropped} edges dropped across {buckets} bucket(s)")]
    CapacityOverflow { dropped: u64, buckets: u32 },

    /// The compute backend failed to allocate or run a stage.
    #[error("device error: {0}")]
    DeviceError(String),

    /// Trimming and cycle finding completed without locating a cycle of
    /// length [`crate::constants::PROOF_SIZE`]. Not a failure — the caller
    /// advances to the next nonce seed.
    #[error("no 42-cycle found")]
    NoCycle,

    /// Nonce recovery scanned the full nonce space and found fewer than
    /// 42 nonces matching the cycle's edge set.
    #[error("nonce recovery found {found}/{expected} nonces")]
    RecoveryFailure { found: usize, expected: usize },

    /// The job's cancel token tripped at a round boundary.
    #[error("solve cancelled")]
    Cancelled,

    /// A [`crate::config::SolverConfig`] field was out of range.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CuckarooError>;
