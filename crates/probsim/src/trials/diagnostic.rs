//! Diagnostic-test precision trial.
//!
//! A rare condition and an imperfect test: most positive diagnoses come from
//! healthy people. The test never misses a sick person, so every sick person
//! is also diagnosed.

use serde::Serialize;

use super::Trial;
use crate::tally::{PairedOutcome, PairedTable};
use crate::{RandomSource, SimError};

/// One person in this many is sick.
pub const DEFAULT_PREVALENCE_ONE_IN: u64 = 1000;

/// One healthy person in this many is diagnosed sick anyway (5%).
pub const DEFAULT_FALSE_POSITIVE_ONE_IN: u64 = 20;

/// Test result for one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub sick: bool,
    pub diagnosed: bool,
}

impl Diagnosis {
    /// Diagnosed without being sick.
    pub fn is_false_positive(&self) -> bool {
        self.diagnosed && !self.sick
    }
}

impl PairedOutcome for Diagnosis {
    fn pair(&self) -> (bool, bool) {
        (self.sick, self.diagnosed)
    }
}

/// Returns true one time in `population_size`.
///
/// Implemented as `draw == 1` over `[0, population_size)`, which has
/// probability exactly `1 / population_size` for a uniform source. A
/// population of one never produces a positive event.
pub fn is_positive_event<R: RandomSource + ?Sized>(
    rng: &mut R,
    population_size: u64,
) -> Result<bool, SimError> {
    let population_size = SimError::require_positive("population_size", population_size)?;
    Ok(one_chance_in(rng, population_size))
}

#[inline]
fn one_chance_in<R: RandomSource + ?Sized>(rng: &mut R, n: u64) -> bool {
    rng.next_uniform(n) == 1
}

/// Samples one person and runs the test on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticTest {
    prevalence_one_in: u64,
    false_positive_one_in: u64,
}

impl Default for DiagnosticTest {
    fn default() -> Self {
        Self {
            prevalence_one_in: DEFAULT_PREVALENCE_ONE_IN,
            false_positive_one_in: DEFAULT_FALSE_POSITIVE_ONE_IN,
        }
    }
}

impl DiagnosticTest {
    /// Creates a test with custom base and false-positive rates.
    pub fn new(prevalence_one_in: u64, false_positive_one_in: u64) -> Result<Self, SimError> {
        Ok(Self {
            prevalence_one_in: SimError::require_positive("prevalence_one_in", prevalence_one_in)?,
            false_positive_one_in: SimError::require_positive(
                "false_positive_one_in",
                false_positive_one_in,
            )?,
        })
    }

    pub fn prevalence_one_in(&self) -> u64 {
        self.prevalence_one_in
    }

    pub fn false_positive_one_in(&self) -> u64 {
        self.false_positive_one_in
    }

    /// Draws whether the person is sick, then whether they test positive.
    ///
    /// Sick people are always diagnosed and consume a single draw.
    pub fn examine<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Diagnosis {
        let sick = one_chance_in(rng, self.prevalence_one_in);
        let diagnosed = sick || one_chance_in(rng, self.false_positive_one_in);
        Diagnosis { sick, diagnosed }
    }
}

impl Trial for DiagnosticTest {
    type Outcome = Diagnosis;
    type Tally = PairedTable;

    #[inline]
    fn run<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Diagnosis {
        self.examine(rng)
    }

    fn name(&self) -> &'static str {
        "diagnostic"
    }
}
