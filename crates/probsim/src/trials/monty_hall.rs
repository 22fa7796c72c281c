//! Monty Hall stay-versus-switch trial.
//!
//! See <https://en.wikipedia.org/wiki/Monty_Hall_problem>. The host opening a
//! goat door never changes which strategy wins: staying wins exactly when the
//! first pick was the car, and switching wins otherwise. Only the two draws
//! are modelled.

use serde::Serialize;

use super::Trial;
use crate::RandomSource;
use crate::tally::{PairedOutcome, PairedTable};

/// Number of doors on stage.
pub const DOORS: u64 = 3;

/// Which strategy won a single game. Exactly one field is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MontyHallOutcome {
    pub stay_wins: bool,
    pub switch_wins: bool,
}

impl MontyHallOutcome {
    /// Outcome of a game where the car hides behind `car_door` and the
    /// player first picks `player_door`.
    pub fn from_doors(car_door: u64, player_door: u64) -> Self {
        let stay_wins = car_door == player_door;
        Self {
            stay_wins,
            switch_wins: !stay_wins,
        }
    }
}

impl PairedOutcome for MontyHallOutcome {
    fn pair(&self) -> (bool, bool) {
        (self.stay_wins, self.switch_wins)
    }
}

/// Plays one game: car door first, then the player's pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MontyHall;

impl MontyHall {
    pub fn new() -> Self {
        Self
    }

    pub fn play_game<R: RandomSource + ?Sized>(&self, rng: &mut R) -> MontyHallOutcome {
        let car_door = rng.next_uniform(DOORS);
        let player_door = rng.next_uniform(DOORS);
        MontyHallOutcome::from_doors(car_door, player_door)
    }
}

impl Trial for MontyHall {
    type Outcome = MontyHallOutcome;
    type Tally = PairedTable;

    #[inline]
    fn run<R: RandomSource + ?Sized>(&self, rng: &mut R) -> MontyHallOutcome {
        self.play_game(rng)
    }

    fn name(&self) -> &'static str {
        "monty_hall"
    }
}
