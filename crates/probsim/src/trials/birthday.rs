//! Shared-birthday collision trial.
//!
//! See <https://en.wikipedia.org/wiki/Birthday_problem>.

use std::collections::HashSet;

use super::Trial;
use crate::tally::FrequencyTable;
use crate::{RandomSource, SimError};

/// Days in a non-leap year.
pub const DAYS_IN_YEAR: u64 = 365;

/// Draws a random group and reports whether two members share a birthday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday {
    group_size: u64,
    days_in_year: u64,
}

impl Birthday {
    /// Creates a trial for groups of `group_size` over a 365-day year.
    pub fn new(group_size: u64) -> Result<Self, SimError> {
        Self::with_days_in_year(group_size, DAYS_IN_YEAR)
    }

    /// Creates a trial with a custom year length.
    pub fn with_days_in_year(group_size: u64, days_in_year: u64) -> Result<Self, SimError> {
        Ok(Self {
            group_size: SimError::require_positive("group_size", group_size)?,
            days_in_year: SimError::require_positive("days_in_year", days_in_year)?,
        })
    }

    pub fn group_size(&self) -> u64 {
        self.group_size
    }

    pub fn days_in_year(&self) -> u64 {
        self.days_in_year
    }

    /// Returns true as soon as a drawn day repeats.
    ///
    /// Remaining members are not drawn once a collision is found.
    pub fn has_collision<R: RandomSource + ?Sized>(&self, rng: &mut R) -> bool {
        let mut seen = HashSet::new();
        for _ in 0..self.group_size {
            let day = rng.next_uniform(self.days_in_year);
            if !seen.insert(day) {
                return true;
            }
        }
        false
    }

    /// Draws a birthday for every member of the group.
    pub fn draw_group<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<u64> {
        (0..self.group_size)
            .map(|_| rng.next_uniform(self.days_in_year))
            .collect()
    }

    /// Draws the whole group first, then checks for a repeated day.
    ///
    /// Same answer as [`Birthday::has_collision`] for the same draws, but
    /// always consumes `group_size` values.
    pub fn has_collision_exhaustive<R: RandomSource + ?Sized>(&self, rng: &mut R) -> bool {
        has_duplicates(&self.draw_group(rng))
    }
}

impl Trial for Birthday {
    type Outcome = bool;
    type Tally = FrequencyTable<bool>;

    #[inline]
    fn run<R: RandomSource + ?Sized>(&self, rng: &mut R) -> bool {
        self.has_collision(rng)
    }

    fn name(&self) -> &'static str {
        "birthday"
    }
}

/// Returns true if any value appears more than once.
pub fn has_duplicates(values: &[u64]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().any(|value| !seen.insert(*value))
}
