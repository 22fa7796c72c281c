//! # probsim: Monte Carlo Estimation of Classical Probability Puzzles
//!
//! This crate estimates probabilities by repeating random trials and counting
//! outcomes, rather than by closed-form computation. Every result is a
//! statistical estimate whose accuracy grows with the number of trials.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────────┐   ┌──────────┐
//! │ RandomSource │──▶│ Trial          │──▶│ SimulationRunner │──▶│ Estimate │
//! │ (SimRng,     │   │ Birthday, Dice │   │ sequential /     │   │ fraction │
//! │  Scripted)   │   │ MontyHall, ... │   │ forked / shared  │   │ precision│
//! └──────────────┘   └────────────────┘   └──────────────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use probsim::{Birthday, SimRng, SimulationRunner, experiments};
//!
//! let runner = SimulationRunner::new(10_000)?;
//! let trial = Birthday::new(23)?;
//! let mut rng = SimRng::new(12345);
//!
//! let estimate = experiments::birthday_collision(&runner, &trial, &mut rng)?;
//! assert!(estimate.value() > 0.4 && estimate.value() < 0.6);
//! # Ok::<(), probsim::SimError>(())
//! ```
//!
//! ## Key Concepts
//!
//! - **`RandomSource`**: uniform integers in `[0, bound)`, passed explicitly
//! - **`Trial`**: one independent simulated event
//! - **`FrequencyTable`** / **`PairedTable`**: outcome counts
//! - **`Estimate`**: fraction of trials plus its sample size

#![cfg_attr(test, allow(clippy::float_cmp))] // Test assertions use exact float comparisons

mod error;
pub mod estimate;
pub mod experiments;
mod rng;
pub mod runner;
pub mod tally;
pub mod trials;

pub use error::SimError;
pub use estimate::{Estimate, precision, to_fraction};
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use runner::{ExecutionMode, SimulationRunner, run_trials};
pub use tally::{FrequencyTable, PairedOutcome, PairedTable, Tally};
pub use trials::{
    Birthday, DiagnosticTest, Diagnosis, Dice, MontyHall, MontyHallOutcome, Trial,
    is_positive_event,
};
