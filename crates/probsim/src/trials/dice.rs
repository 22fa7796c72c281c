//! Two-dice sum trial.

use super::Trial;
use crate::RandomSource;
use crate::tally::FrequencyTable;

/// Faces on a standard die.
pub const DIE_SIDES: u64 = 6;

/// Rolls two fair dice and reports their sum, in `2..=12`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dice;

impl Dice {
    pub fn new() -> Self {
        Self
    }

    /// One die, uniform over `1..=6`.
    #[inline]
    pub fn roll_die<R: RandomSource + ?Sized>(rng: &mut R) -> u8 {
        (rng.next_uniform(DIE_SIDES) + 1) as u8
    }

    /// Sum of two independent dice.
    pub fn roll_sum<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u8 {
        let first = Self::roll_die(rng);
        let second = Self::roll_die(rng);
        first + second
    }
}

impl Trial for Dice {
    type Outcome = u8;
    type Tally = FrequencyTable<u8>;

    #[inline]
    fn run<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u8 {
        self.roll_sum(rng)
    }

    fn name(&self) -> &'static str {
        "dice"
    }
}
