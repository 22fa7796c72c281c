//! Simulation runner: repeats a trial and aggregates its outcomes.
//!
//! Three execution modes are available:
//!
//! - **Sequential**: one thread draws from the caller's source.
//! - **Forked**: trials are split into contiguous chunks on a worker pool.
//!   Each chunk gets its own source forked from the caller's, and the partial
//!   tallies are merged at the end. Reproducible for a fixed seed and worker
//!   count.
//! - **Shared**: trials run on a worker pool but every trial holds a lock on
//!   the caller's source for its whole duration. Each trial therefore sees
//!   the same contiguous run of draws it would see sequentially, and the final
//!   tally matches a sequential run over the same source exactly.
//!
//! Aggregation never races: workers fill private tallies that are merged once
//! they finish.

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tally::{FrequencyTable, Tally};
use crate::trials::Trial;
use crate::{RandomSource, SimError};

// ============================================================================
// Execution Mode
// ============================================================================

/// How trials are scheduled across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ExecutionMode {
    /// Single thread, single source.
    #[default]
    Sequential,
    /// One forked source per worker chunk.
    Forked { workers: usize },
    /// One shared source, locked per trial.
    Shared { workers: usize },
}

impl ExecutionMode {
    /// Number of worker threads this mode uses.
    pub fn workers(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Forked { workers } | Self::Shared { workers } => *workers,
        }
    }

    fn validate(self) -> Result<Self, SimError> {
        SimError::require_positive("workers", self.workers() as u64)?;
        Ok(self)
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Repeats a [`Trial`] a fixed number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationRunner {
    num_trials: u64,
    mode: ExecutionMode,
}

impl SimulationRunner {
    /// Creates a sequential runner for `num_trials` trials.
    pub fn new(num_trials: u64) -> Result<Self, SimError> {
        Ok(Self {
            num_trials: SimError::require_positive("num_trials", num_trials)?,
            mode: ExecutionMode::Sequential,
        })
    }

    /// Sets the execution mode. Worker counts are checked when the run starts.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn num_trials(&self) -> u64 {
        self.num_trials
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Runs the trial `num_trials` times and returns the merged tally.
    pub fn run<T, R>(&self, trial: &T, rng: &mut R) -> Result<T::Tally, SimError>
    where
        T: Trial + Sync,
        R: RandomSource + Send,
    {
        let mode = self.mode.validate()?;
        let start = Instant::now();

        tracing::debug!(
            trial = trial.name(),
            num_trials = self.num_trials,
            ?mode,
            "starting simulation run"
        );

        let tally = match mode {
            ExecutionMode::Sequential => run_sequential(trial, rng, self.num_trials),
            ExecutionMode::Forked { workers } => {
                run_forked(trial, rng, self.num_trials, workers)?
            }
            ExecutionMode::Shared { workers } => {
                run_shared(trial, rng, self.num_trials, workers)?
            }
        };

        debug_assert_eq!(tally.total(), self.num_trials, "every trial is recorded");

        tracing::debug!(
            trial = trial.name(),
            num_trials = self.num_trials,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "simulation run complete"
        );

        Ok(tally)
    }
}

/// Runs an arbitrary categorical trial function `num_trials` times.
pub fn run_trials<K, R, F>(
    rng: &mut R,
    num_trials: u64,
    mut trial: F,
) -> Result<FrequencyTable<K>, SimError>
where
    K: Ord + Copy,
    R: RandomSource + ?Sized,
    F: FnMut(&mut R) -> K,
{
    let num_trials = SimError::require_positive("num_trials", num_trials)?;
    Ok((0..num_trials).map(|_| trial(rng)).collect())
}

// ============================================================================
// Execution Strategies
// ============================================================================

fn run_sequential<T, R>(trial: &T, rng: &mut R, num_trials: u64) -> T::Tally
where
    T: Trial,
    R: RandomSource + ?Sized,
{
    let mut tally = T::Tally::default();
    for _ in 0..num_trials {
        tally.record(trial.run(rng));
    }
    tally
}

fn run_forked<T, R>(
    trial: &T,
    rng: &mut R,
    num_trials: u64,
    workers: usize,
) -> Result<T::Tally, SimError>
where
    T: Trial + Sync,
    R: RandomSource + Send,
{
    let sizes = chunk_sizes(num_trials, workers);
    let sources: Vec<R> = sizes.iter().map(|_| rng.fork()).collect();
    let pool = worker_pool(sizes.len())?;

    let tally = pool.install(|| {
        sources
            .into_par_iter()
            .zip(sizes)
            .enumerate()
            .map(|(chunk, (mut source, size))| {
                let partial = run_sequential(trial, &mut source, size);
                tracing::trace!(chunk, size, "chunk complete");
                partial
            })
            .reduce(T::Tally::default, merge::<T::Outcome, _>)
    });

    Ok(tally)
}

fn run_shared<T, R>(
    trial: &T,
    rng: &mut R,
    num_trials: u64,
    workers: usize,
) -> Result<T::Tally, SimError>
where
    T: Trial + Sync,
    R: RandomSource + Send,
{
    let shared = Mutex::new(rng);
    let pool = worker_pool(pool_threads(num_trials, workers))?;

    let tally = pool.install(|| {
        (0..num_trials)
            .into_par_iter()
            .fold(T::Tally::default, |mut tally, _| {
                let outcome = {
                    let mut source = shared.lock().unwrap_or_else(PoisonError::into_inner);
                    trial.run(&mut **source)
                };
                tally.record(outcome);
                tally
            })
            .reduce(T::Tally::default, merge::<T::Outcome, _>)
    });

    Ok(tally)
}

fn merge<O, T: Tally<O>>(mut left: T, right: T) -> T {
    left.merge(right);
    left
}

fn worker_pool(threads: usize) -> Result<rayon::ThreadPool, SimError> {
    Ok(rayon::ThreadPoolBuilder::new().num_threads(threads).build()?)
}

/// Threads worth spawning: never more than there are trials.
fn pool_threads(num_trials: u64, workers: usize) -> usize {
    usize::try_from(num_trials).map_or(workers, |trials| workers.min(trials))
}

/// Splits `num_trials` into at most `workers` non-empty contiguous chunks.
///
/// The first `num_trials % chunks` chunks take one extra trial.
fn chunk_sizes(num_trials: u64, workers: usize) -> Vec<u64> {
    let chunks = (workers as u64).min(num_trials);
    if chunks == 0 {
        return Vec::new();
    }
    let base = num_trials / chunks;
    let remainder = num_trials % chunks;
    (0..chunks)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
