//! Timing and performance measurement for the solve pipeline.
//!
//! Provides a phase timer for the solver's own stages, plus a generic
//! benchmark runner used by the `cuckatoo-miner` CLI to compare
//! backends or tunings.

use log::{debug, info};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::{CuckarooError, Result};

/// Accumulated timing and throughput figures for one solve run.
#[derive(Debug, Clone, Default)]
pub struct PerformanceMetrics {
    pub generation_time: f64,
    pub trimming_time: f64,
    pub cycle_search_time: f64,
    pub graphs_processed: u64,
    pub cycles_found: u64,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_time(&self) -> f64 {
        self.generation_time + self.trimming_time + self.cycle_search_time
    }

    pub fn graphs_per_second(&self) -> f64 {
        let total = self.total_time();
        if total > 0.0 {
            self.graphs_processed as f64 / total
        } else {
            0.0
        }
    }
}

/// Timer for measuring the phases of a single solve.
pub struct PerformanceTimer {
    start_time: Instant,
    checkpoints: HashMap<String, Instant>,
    metrics: PerformanceMetrics,
}

impl PerformanceTimer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            checkpoints: HashMap::new(),
            metrics: PerformanceMetrics::new(),
        }
    }

    pub fn start_phase(&mut self, phase: &str) {
        self.checkpoints.insert(phase.to_string(), Instant::now());
    }

    pub fn end_phase(&mut self, phase: &str) -> Result<Duration> {
        if let Some(start_time) = self.checkpoints.get(phase) {
            let duration = start_time.elapsed();
            debug!("phase '{phase}' completed in {duration:?}");
            Ok(duration)
        } else {
            Err(CuckarooError::InvalidConfig(format!(
                "phase '{phase}' was not started"
            )))
        }
    }

    pub fn get_phase_duration(&self, phase: &str) -> Option<Duration> {
        self.checkpoints.get(phase).map(|start| start.elapsed())
    }

    pub fn total_elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn set_generation_time(&mut self, duration: Duration) {
        self.metrics.generation_time = duration.as_secs_f64();
    }

    pub fn set_trimming_time(&mut self, duration: Duration) {
        self.metrics.trimming_time = duration.as_secs_f64();
    }

    pub fn set_cycle_search_time(&mut self, duration: Duration) {
        self.metrics.cycle_search_time = duration.as_secs_f64();
    }

    pub fn set_graphs_processed(&mut self, count: u64) {
        self.metrics.graphs_processed = count;
    }

    pub fn set_cycles_found(&mut self, count: u64) {
        self.metrics.cycles_found = count;
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut PerformanceMetrics {
        &mut self.metrics
    }

    pub fn reset(&mut self) {
        self.start_time = Instant::now();
        self.checkpoints.clear();
        self.metrics = PerformanceMetrics::new();
    }
}

impl Default for PerformanceTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one named benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub name: String,
    pub iterations: usize,
    pub min_time: Duration,
    pub max_time: Duration,
    pub avg_time: Duration,
    pub median_time: Duration,
    pub total_time: Duration,
}

/// Comparison between two named benchmark results.
#[derive(Debug)]
pub struct BenchmarkComparison {
    pub baseline: BenchmarkResult,
    pub comparison: BenchmarkResult,
    pub speedup: f64,
    pub improvement: String,
}

/// Runs and records named benchmarks, for comparing backends or
/// tunings from the CLI.
#[derive(Default)]
pub struct BenchmarkRunner {
    results: HashMap<String, BenchmarkResult>,
}

impl BenchmarkRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_benchmark<F, R>(&mut self, name: &str, iterations: usize, benchmark_fn: F) -> BenchmarkResult
    where
        F: Fn() -> R,
    {
        let mut times = Vec::with_capacity(iterations);
        let mut total_time = Duration::ZERO;

        for _ in 0..iterations / 10 {
            benchmark_fn();
        }

        for _ in 0..iterations {
            let start = Instant::now();
            benchmark_fn();
            let duration = start.elapsed();
            times.push(duration);
            total_time += duration;
        }

        times.sort();
        let min_time = times[0];
        let max_time = times[iterations - 1];
        let avg_time = total_time / iterations as u32;
        let median_time = times[iterations / 2];

        let result = BenchmarkResult {
            name: name.to_string(),
            iterations,
            min_time,
            max_time,
            avg_time,
            median_time,
            total_time,
        };

        self.results.insert(name.to_string(), result.clone());
        result
    }

    pub fn compare(&self, name1: &str, name2: &str) -> Option<BenchmarkComparison> {
        let result1 = self.results.get(name1)?;
        let result2 = self.results.get(name2)?;

        let speedup = result1.avg_time.as_secs_f64() / result2.avg_time.as_secs_f64();
        let improvement = if speedup > 1.0 {
            format!("{speedup:.2}x faster")
        } else {
            format!("{:.2}x slower", 1.0 / speedup)
        };

        Some(BenchmarkComparison {
            baseline: result1.clone(),
            comparison: result2.clone(),
            speedup,
            improvement,
        })
    }

    pub fn log_results(&self) {
        for (name, result) in &self.results {
            info!(
                "{name}: avg={:?} median={:?} min={:?} max={:?} over {} iterations",
                result.avg_time, result.median_time, result.min_time, result.max_time, result.iterations
            );
        }
    }
}

pub fn measure_time<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
