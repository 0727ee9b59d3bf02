//! Proof verification (spec.md §8, Property E): given a candidate
//! [`Proof42`] and the job's SipHash keys, check that it really is a
//! connected, 2-regular, 42-edge cycle with all-distinct nonces.

use crate::config::SolverConfig;
use crate::constants::PROOF_SIZE;
use crate::error::{CuckarooError, Result};
use crate::siphash::SipHashKeys;
use crate::types::{Node, Proof42};
use std::collections::HashMap;

/// Verify a proof against the job it claims to solve. Independent of
/// the solver pipeline: this only needs the keys, `edge_bits` and the
/// 42 nonces, so it can validate proofs produced elsewhere.
pub fn verify(keys: &SipHashKeys, config: &SolverConfig, proof: &Proof42) -> Result<()> {
    if !proof.all_distinct() {
        return Err(CuckarooError::InvalidConfig(
            "proof contains duplicate nonces".to_string(),
        ));
    }
    if !proof.is_sorted() {
        return Err(CuckarooError::InvalidConfig(
            "proof nonces are not sorted ascending".to_string(),
        ));
    }

    let mut degree: HashMap<Node, u32> = HashMap::new();
    let mut endpoints = Vec::with_capacity(PROOF_SIZE);
    for &nonce in proof.nonces() {
        let edge = keys.edge(config.edge_bits, nonce);
        *degree.entry(edge.even).or_insert(0) += 1;
        *degree.entry(edge.odd).or_insert(0) += 1;
        endpoints.push((edge.even, edge.odd));
    }

    if degree.values().any(|&d| d != 2) {
        return Err(CuckarooError::InvalidConfig(
            "proof is not 2-regular: some node has degree != 2".to_string(),
        ));
    }

    if !is_single_cycle(&endpoints) {
        return Err(CuckarooError::InvalidConfig(
            "proof edges do not form a single connected cycle".to_string(),
        ));
    }

    Ok(())
}

/// A 2-regular graph is a union of disjoint cycles; it is a single
/// 42-cycle only if walking from any edge visits every other edge
/// before returning to the start.
fn is_single_cycle(endpoints: &[(Node, Node)]) -> bool {
    let mut adjacency: HashMap<Node, Vec<usize>> = HashMap::new();
    for (index, (even, odd)) in endpoints.iter().enumerate() {
        adjacency.entry(*even).or_default().push(index);
        adjacency.entry(*odd).or_default().push(index);
    }

    let mut visited = vec![false; endpoints.len()];
    let start = endpoints[0].0;
    let mut current = start;
    let mut came_from: Option<usize> = None;
    let mut steps = 0;

    loop {
        let Some(links) = adjacency.get(&current) else {
            return false;
        };
        if links.len() != 2 {
            return false;
        }
        let next_edge = *links.iter().find(|&&e| Some(e) != came_from).unwrap_or(&links[0]);
        if visited[next_edge] {
            break;
        }
        visited[next_edge] = true;
        steps += 1;
        came_from = Some(next_edge);
        let (even, odd) = endpoints[next_edge];
        current = if current == even { odd } else { even };

        if current == start {
            break;
        }
    }

    steps == endpoints.len() && visited.iter().all(|&v| v)
}
