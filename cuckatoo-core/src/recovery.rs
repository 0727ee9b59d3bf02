//! Nonce recovery (spec.md §4.G): the trim/cycle-finder pipeline
//! tracks edges, not the nonces that generated them, so once a cycle's
//! edge set is known the full nonce space is rescanned to find which
//! nonces reproduce those exact edges.

use std::collections::HashSet;

use crate::backend::ComputeBackend;
use crate::config::SolverConfig;
use crate::constants::PROOF_SIZE;
use crate::error::{CuckarooError, Result};
use crate::siphash::SipHashKeys;
use crate::types::{PackedEdge, Proof42};

/// Recover the 42 nonces whose generated edges match `cycle_edges`, by
/// rehashing every nonce and checking membership.
pub fn recover_nonces(
    keys: &SipHashKeys,
    config: &SolverConfig,
    cycle_edges: &[PackedEdge],
    backend: &dyn ComputeBackend,
) -> Result<Proof42> {
    let wanted: HashSet<PackedEdge> = cycle_edges.iter().copied().collect();
    let found = std::sync::Mutex::new(Vec::with_capacity(PROOF_SIZE));

    let edge_count = 1u64 << config.edge_bits;
    backend.for_each_index(edge_count, |nonce| {
        let edge = keys.edge(config.edge_bits, nonce as u32).pack();
        if wanted.contains(&edge) {
            found.lock().unwrap().push(nonce as u32);
        }
    });

    let mut nonces = found.into_inner().unwrap();
    nonces.sort_unstable();

    if nonces.len() != PROOF_SIZE {
        return Err(CuckarooError::RecoveryFailure {
            found: nonces.len(),
            expected: PROOF_SIZE,
        });
    }

    let mut array = [0u32; PROOF_SIZE];
    array.copy_from_slice(&nonces);
    Ok(Proof42::from_nonces(array))
}
