//! # probsim-bench: Benchmarks for probsim
//!
//! Shared setup for the Criterion benches in `benches/`.
//!
//! ## Benchmarks
//!
//! - **modes**: the same experiment under each execution mode
//! - **trials**: cost of a single trial per generator
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p probsim-bench
//!
//! # Save baseline for comparison
//! cargo bench -p probsim-bench --bench modes -- --save-baseline main
//!
//! # Compare against baseline
//! cargo bench -p probsim-bench --bench modes -- --baseline main
//! ```

use std::num::NonZeroUsize;

use probsim::{ExecutionMode, SimError, SimulationRunner};

/// Seed every bench starts from, so runs compare like for like.
pub const BENCH_SEED: u64 = 0x5EED;

/// Worker count for the parallel modes: available parallelism, at least 2.
pub fn bench_workers() -> usize {
    std::thread::available_parallelism()
        .map_or(2, NonZeroUsize::get)
        .max(2)
}

/// Every execution mode, labelled for use as a benchmark id.
pub fn execution_modes(workers: usize) -> [(&'static str, ExecutionMode); 3] {
    [
        ("sequential", ExecutionMode::Sequential),
        ("forked", ExecutionMode::Forked { workers }),
        ("shared", ExecutionMode::Shared { workers }),
    ]
}

/// Runner for `num_trials` trials in the given mode.
pub fn runner(num_trials: u64, mode: ExecutionMode) -> Result<SimulationRunner, SimError> {
    Ok(SimulationRunner::new(num_trials)?.with_mode(mode))
}
