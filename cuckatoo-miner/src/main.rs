//! Benchmark / tuning CLI front end for the Cuckaroo-29 solver.
//!
//! This is a standalone runner for exercising the solver pipeline and
//! measuring its throughput; it is not a Stratum or pool client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use clap::Parser;
use log::{error, info, warn};
use rand::Rng;

use cuckatoo_core::backend::CpuBackend;
use cuckatoo_core::config::SolverConfig;
use cuckatoo_core::cycle_finder::find_cycle;
use cuckatoo_core::error::CuckarooError;
use cuckatoo_core::generator::generate;
use cuckatoo_core::keys::derive_keys;
use cuckatoo_core::solver::{Solver, SolverJob};
use cuckatoo_core::timing::{BenchmarkRunner, PerformanceTimer};
use cuckatoo_core::trim_loop::{self, CancelToken};

#[derive(Parser, Debug)]
#[command(name = "cuckatoo-miner", version, about = "Cuckaroo-29 solver benchmark CLI")]
struct Args {
    /// log2 of the edge space (29 for full Cuckaroo-29; use a smaller
    /// value for fast local runs)
    #[arg(long, default_value_t = 16)]
    edge_bits: u32,

    /// Number of trim rounds to run before giving up
    #[arg(long, default_value_t = 60)]
    rounds: u32,

    /// log2 of the bucket count used by the edge generator
    #[arg(long, default_value_t = 4)]
    buckets: u32,

    /// Header string used to derive this run's SipHash keys
    #[arg(long, default_value = "cuckatoo-miner-cli")]
    header: String,

    /// Starting nonce seed; the CLI retries with header+seed on NoCycle
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of seeds to try before giving up
    #[arg(long, default_value_t = 16)]
    attempts: u64,

    /// Only the CPU backend is implemented; reserved for a future
    /// `--backend gpu`.
    #[arg(long, default_value = "cpu")]
    backend: String,

    /// Instead of solving one job, run `--benchmark-iterations` solves
    /// against random headers and report survivor-curve and timing
    /// stats.
    #[arg(long)]
    benchmark: bool,

    /// Number of solves to run when `--benchmark` is set.
    #[arg(long, default_value_t = 20)]
    benchmark_iterations: usize,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CuckarooError> {
    if args.backend != "cpu" {
        return Err(CuckarooError::InvalidConfig(format!(
            "unsupported backend '{}' (only 'cpu' is implemented)",
            args.backend
        )));
    }

    let config = SolverConfig {
        edge_bits: args.edge_bits,
        trimming_rounds: args.rounds,
        bucket_bits: args.buckets,
        ..SolverConfig::default()
    };
    config.validate()?;

    if args.benchmark {
        return run_benchmark(&args, &config);
    }

    info!(
        "starting solve: edge_bits={} rounds={} buckets={}",
        config.edge_bits, config.trimming_rounds, config.bucket_count()
    );

    let backend = CpuBackend;
    let solver = Solver::new(&backend);
    let cancel = CancelToken::new();

    for attempt in 0..args.attempts {
        let seed = args.seed + attempt;
        let header = format!("{}:{}", args.header, seed);
        let job = SolverJob::new(header, config.clone());

        let start = std::time::Instant::now();
        match solver.solve(&job, &cancel) {
            Ok(proof) => {
                info!("found 42-cycle after {:?}: {}", start.elapsed(), proof);
                return Ok(());
            }
            Err(CuckarooError::NoCycle) => {
                info!("seed {seed}: no cycle in {:?}, trying next seed", start.elapsed());
                continue;
            }
            Err(err) => return Err(err),
        }
    }

    info!("no 42-cycle found after {} attempts", args.attempts);
    Ok(())
}

/// Run `args.benchmark_iterations` solves against random headers,
/// reporting both a survivor curve (the trimmed edge count each run
/// bottoms out at) and overall timing stats. Each iteration re-runs the
/// same generate -> trim -> cycle-search pipeline [`Solver::solve`]
/// drives, but inline, so a [`PerformanceTimer`] can record the three
/// phases separately rather than only the end-to-end result.
fn run_benchmark(args: &Args, config: &SolverConfig) -> Result<(), CuckarooError> {
    info!(
        "benchmarking {} solves: edge_bits={} rounds={} buckets={}",
        args.benchmark_iterations,
        config.edge_bits,
        config.trimming_rounds,
        config.bucket_count()
    );

    let backend = CpuBackend;
    let survivors: Mutex<Vec<usize>> = Mutex::new(Vec::with_capacity(args.benchmark_iterations));
    let cycles_found = AtomicU64::new(0);

    let mut runner = BenchmarkRunner::new();
    runner.run_benchmark("solve", args.benchmark_iterations, || {
        let header: [u8; 16] = rand::thread_rng().gen();
        let keys = derive_keys(&header);

        let mut timer = PerformanceTimer::new();

        timer.start_phase("generate");
        let generated = generate(&keys, config, &backend);
        let generation_time = timer.end_phase("generate").expect("phase was started");
        timer.set_generation_time(generation_time);
        if generated.stats.overflowed_buckets > 0 {
            warn!(
                "benchmark iteration dropped {} edges across {} bucket(s)",
                generated.stats.dropped, generated.stats.overflowed_buckets
            );
        }

        let cancel = CancelToken::new();
        timer.start_phase("trim");
        let trimmed = trim_loop::run(&generated, config, &backend, &cancel).unwrap_or_default();
        let trimming_time = timer.end_phase("trim").expect("phase was started");
        timer.set_trimming_time(trimming_time);

        timer.start_phase("cycle_search");
        let found = find_cycle(&trimmed).is_some();
        let cycle_search_time = timer.end_phase("cycle_search").expect("phase was started");
        timer.set_cycle_search_time(cycle_search_time);

        survivors.lock().unwrap().push(trimmed.len());
        if found {
            cycles_found.fetch_add(1, Ordering::Relaxed);
        }
    });
    runner.log_results();

    let survivors = survivors.into_inner().unwrap();
    let min = survivors.iter().min().copied().unwrap_or(0);
    let max = survivors.iter().max().copied().unwrap_or(0);
    let avg = survivors.iter().sum::<usize>() as f64 / survivors.len().max(1) as f64;
    let found = cycles_found.load(Ordering::Relaxed);

    info!(
        "survivor curve over {} runs: min={min} avg={avg:.1} max={max} final edges remaining"
    );
    info!(
        "cycles found: {found}/{} ({:.1}%)",
        args.benchmark_iterations,
        100.0 * found as f64 / args.benchmark_iterations.max(1) as f64
    );

    Ok(())
}
