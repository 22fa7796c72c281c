//! End-to-end experiments: run a generator, then reduce its tally.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::estimate::{Estimate, precision};
use crate::runner::SimulationRunner;
use crate::trials::{Birthday, Dice, DiagnosticTest, MontyHall};
use crate::{RandomSource, SimError};

/// Smallest and largest sum of two dice.
pub const DICE_SUMS: std::ops::RangeInclusive<u8> = 2..=12;

/// Fraction of groups containing a shared birthday.
pub fn birthday_collision<R>(
    runner: &SimulationRunner,
    trial: &Birthday,
    rng: &mut R,
) -> Result<Estimate, SimError>
where
    R: RandomSource + Send,
{
    let table = runner.run(trial, rng)?;
    Estimate::from_counts(table.count(&true), table.total())
}

/// Fraction of rolls landing on each sum in `2..=12`.
///
/// Sums that never came up are reported with an estimate of 0.
pub fn dice_distribution<R>(
    runner: &SimulationRunner,
    rng: &mut R,
) -> Result<BTreeMap<u8, Estimate>, SimError>
where
    R: RandomSource + Send,
{
    let table = runner.run(&Dice, rng)?;
    let total = table.total();
    DICE_SUMS
        .map(|sum| {
            Estimate::from_counts(table.count(&sum), total).map(|estimate| (sum, estimate))
        })
        .collect()
}

/// Win rates of the two Monty Hall strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MontyHallEstimate {
    pub stay: Estimate,
    pub switch: Estimate,
}

/// Plays `num_trials` games and reports how often each strategy wins.
pub fn monty_hall<R>(
    runner: &SimulationRunner,
    rng: &mut R,
) -> Result<MontyHallEstimate, SimError>
where
    R: RandomSource + Send,
{
    let table = runner.run(&MontyHall, rng)?;
    Ok(MontyHallEstimate {
        stay: Estimate::from_counts(table.first_hits(), table.total())?,
        switch: Estimate::from_counts(table.second_hits(), table.total())?,
    })
}

/// Precision of a diagnostic test over a sampled population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagnosticEstimate {
    pub precision: Estimate,
    pub num_sick: u64,
    pub num_diagnosed: u64,
}

/// Samples `num_trials` people and reports the fraction of diagnosed people
/// who are actually sick.
pub fn diagnostic_precision<R>(
    runner: &SimulationRunner,
    test: &DiagnosticTest,
    rng: &mut R,
) -> Result<DiagnosticEstimate, SimError>
where
    R: RandomSource + Send,
{
    let table = runner.run(test, rng)?;
    let num_sick = table.first_hits();
    let num_diagnosed = table.second_hits();
    debug_assert!(num_diagnosed >= num_sick, "every sick person is diagnosed");

    if num_diagnosed == 0 {
        tracing::warn!(
            num_trials = runner.num_trials(),
            "no diagnosed cases sampled, precision is undefined"
        );
    }

    Ok(DiagnosticEstimate {
        precision: precision(num_sick, num_diagnosed)?,
        num_sick,
        num_diagnosed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScriptedRng, SimRng};

    #[test]
    fn dice_distribution_covers_every_sum() {
        let runner = SimulationRunner::new(100).expect("valid");
        let distribution = dice_distribution(&runner, &mut SimRng::new(4)).expect("run");

        assert_eq!(distribution.len(), 11);
        assert_eq!(
            distribution.keys().copied().collect::<Vec<_>>(),
            DICE_SUMS.collect::<Vec<_>>()
        );
        let total: f64 = distribution.values().map(Estimate::value).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unrolled_sums_report_zero() {
        let runner = SimulationRunner::new(10).expect("valid");
        let mut rng = ScriptedRng::new(vec![2, 3]);

        let distribution = dice_distribution(&runner, &mut rng).expect("run");

        assert_eq!(distribution[&7].value(), 1.0);
        assert_eq!(distribution[&2].value(), 0.0);
    }

    #[test]
    fn monty_hall_fractions_sum_to_one() {
        let runner = SimulationRunner::new(1_000).expect("valid");
        let estimate = monty_hall(&runner, &mut SimRng::new(8)).expect("run");

        assert!((estimate.stay.value() + estimate.switch.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn diagnostic_without_positives_is_undefined() {
        let runner = SimulationRunner::new(50).expect("valid");
        let mut rng = ScriptedRng::new(vec![0]);

        let result = diagnostic_precision(&runner, &DiagnosticTest::default(), &mut rng);

        assert!(matches!(
            result,
            Err(SimError::UndefinedEstimate {
                estimate: "precision",
                ..
            })
        ));
    }

    #[test]
    fn diagnostic_scripted_precision() {
        // Person 1 sick (draw 1); person 2 healthy (0) then false positive (1);
        // person 3 healthy (0) then negative (0).
        let runner = SimulationRunner::new(3).expect("valid");
        let mut rng = ScriptedRng::new(vec![1, 0, 1, 0, 0]);

        let estimate =
            diagnostic_precision(&runner, &DiagnosticTest::default(), &mut rng).expect("run");

        assert_eq!(estimate.num_sick, 1);
        assert_eq!(estimate.num_diagnosed, 2);
        assert_eq!(estimate.precision.value(), 0.5);
    }

    #[test]
    fn birthday_estimate_carries_sample_count() {
        let runner = SimulationRunner::new(250).expect("valid");
        let trial = Birthday::new(30).expect("valid");

        let estimate = birthday_collision(&runner, &trial, &mut SimRng::new(1)).expect("run");

        assert_eq!(estimate.samples(), 250);
        assert!((0.0..=1.0).contains(&estimate.value()));
    }
}
