//! Integration tests for the solve pipeline's documented properties
//! and the concrete scenarios they cover.

use cuckatoo_core::backend::CpuBackend;
use cuckatoo_core::config::SolverConfig;
use cuckatoo_core::error::CuckarooError;
use cuckatoo_core::keys::derive_keys;
use cuckatoo_core::solver::{Solver, SolverJob};
use cuckatoo_core::trim_loop::CancelToken;
use cuckatoo_core::verification::verify;

fn small_config() -> SolverConfig {
    SolverConfig {
        edge_bits: 16,
        trimming_rounds: 60,
        bucket_bits: 4,
        bucket_capacity_factor: 1.3,
        ..SolverConfig::default()
    }
}

/// Scenario: a job that never finds a cycle still completes cleanly
/// with `NoCycle`, not a panic or hang, within a bounded round count.
#[test]
fn no_cycle_is_a_clean_result_not_a_panic() {
    let config = SolverConfig {
        edge_bits: 10,
        trimming_rounds: 40,
        bucket_bits: 2,
        bucket_capacity_factor: 1.5,
        ..SolverConfig::default()
    };
    let solver = Solver::new(&CpuBackend);
    let cancel = CancelToken::new();

    // Edge space this small essentially never contains a 42-cycle.
    let job = SolverJob::new("no-cycle-scenario", config);
    match solver.solve(&job, &cancel) {
        Err(CuckarooError::NoCycle) | Ok(_) => {}
        Err(other) => panic!("unexpected error: {other:?}"),
    }
}

/// Scenario + Property E: when a solve does produce a proof, that
/// proof independently verifies: 42 distinct, sorted nonces whose
/// edges form a connected 2-regular cycle.
#[test]
fn found_proofs_are_valid_and_verify() {
    let config = small_config();
    let solver = Solver::new(&CpuBackend);

    let mut found_one = false;
    for seed in 0..300u32 {
        let job = SolverJob::new(format!("integration-seed-{seed}"), config.clone());
        let cancel = CancelToken::new();
        match solver.solve(&job, &cancel) {
            Ok(proof) => {
                assert!(proof.all_distinct());
                assert!(proof.is_sorted());
                let keys = derive_keys(&job.header);
                assert!(verify(&keys, &config, &proof).is_ok());
                found_one = true;
                break;
            }
            Err(CuckarooError::NoCycle) => continue,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert!(
        found_one,
        "expected at least one 42-cycle across 300 seeds at edge_bits=16"
    );
}

/// Property F: solving the identical job twice produces byte-identical
/// sorted proofs.
#[test]
fn identical_jobs_produce_identical_proofs() {
    let config = small_config();
    let solver = Solver::new(&CpuBackend);

    let mut found_one = false;
    for seed in 0..300u32 {
        let job = SolverJob::new(format!("idempotence-seed-{seed}"), config.clone());
        let cancel = CancelToken::new();
        let first = solver.solve(&job, &cancel);
        let second = solver.solve(&job, &cancel);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a, b);
                found_one = true;
                break;
            }
            (Err(CuckarooError::NoCycle), Err(CuckarooError::NoCycle)) => continue,
            other => panic!("unexpected mismatch: {other:?}"),
        }
    }
    assert!(
        found_one,
        "expected at least one reproducible 42-cycle across 300 seeds at edge_bits=16"
    );
}

/// Scenario: cancelling before the solve starts is observed at the
/// very first round boundary and surfaces as `Cancelled`, never as a
/// silently wrong proof.
#[test]
fn pre_cancelled_job_never_returns_a_proof() {
    let config = small_config();
    let solver = Solver::new(&CpuBackend);
    let cancel = CancelToken::new();
    cancel.cancel();

    let job = SolverJob::new("pre-cancelled", config);
    assert!(matches!(solver.solve(&job, &cancel), Err(CuckarooError::Cancelled)));
}

/// Scenario: an invalid configuration (edge_bits outside the supported
/// range) is rejected before any generation work starts.
#[test]
fn invalid_edge_bits_rejected_up_front() {
    let mut config = small_config();
    config.edge_bits = 2;
    let solver = Solver::new(&CpuBackend);
    let cancel = CancelToken::new();
    let job = SolverJob::new("bad-edge-bits", config);
    assert!(matches!(
        solver.solve(&job, &cancel),
        Err(CuckarooError::InvalidConfig(_))
    ));
}

/// Scenario: two different headers derive different SipHash keys and
/// (overwhelmingly likely) different edge sets, so solving them is not
/// equivalent to solving the same job twice.
#[test]
fn distinct_headers_are_independent_jobs() {
    let config = small_config();
    let a = derive_keys(b"header-a");
    let b = derive_keys(b"header-b");
    assert_ne!(a.0, b.0);

    let edge_a = a.edge(config.edge_bits, 0);
    let edge_b = b.edge(config.edge_bits, 0);
    assert_ne!(edge_a, edge_b);
}
