//! Trial generators.
//!
//! A trial is one independent simulated event: a group of people comparing
//! birthdays, a roll of two dice, a game of Monty Hall, a patient taking a
//! diagnostic test. Each generator draws only from the source it is handed
//! and writes only to its own outcome, so trials can run in any order or on
//! any worker.

mod birthday;
mod diagnostic;
mod dice;
mod monty_hall;

pub use birthday::{Birthday, DAYS_IN_YEAR, has_duplicates};
pub use diagnostic::{
    DEFAULT_FALSE_POSITIVE_ONE_IN, DEFAULT_PREVALENCE_ONE_IN, DiagnosticTest, Diagnosis,
    is_positive_event,
};
pub use dice::{DIE_SIDES, Dice};
pub use monty_hall::{DOORS, MontyHall, MontyHallOutcome};

use crate::RandomSource;
use crate::tally::Tally;

/// A probabilistic experiment the runner can repeat.
pub trait Trial {
    /// Result of a single trial.
    type Outcome: Send;

    /// Accumulator the runner records outcomes into.
    type Tally: Tally<Self::Outcome>;

    /// Runs one trial, drawing from `rng`.
    fn run<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Self::Outcome;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
