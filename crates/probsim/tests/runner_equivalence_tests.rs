//! Execution-mode equivalence and counting invariants.
//!
//! Sequential and shared-source runs over the same deterministic source must
//! produce identical tables. Forked runs must be reproducible and must record
//! every trial.

use probsim::{
    Birthday, DiagnosticTest, Dice, ExecutionMode, MontyHall, RandomSource, ScriptedRng, SimRng,
    SimulationRunner, Trial, run_trials,
};
use proptest::prelude::*;

fn modes() -> [ExecutionMode; 3] {
    [
        ExecutionMode::Sequential,
        ExecutionMode::Forked { workers: 3 },
        ExecutionMode::Shared { workers: 3 },
    ]
}

fn assert_shared_matches_sequential<T>(trial: &T, script: &[u64], num_trials: u64)
where
    T: Trial + Sync,
    T::Tally: PartialEq + std::fmt::Debug,
{
    let sequential = SimulationRunner::new(num_trials).expect("valid");
    let shared = sequential.with_mode(ExecutionMode::Shared { workers: 4 });

    let expected = sequential
        .run(trial, &mut ScriptedRng::new(script.to_vec()))
        .expect("run");
    let actual = shared
        .run(trial, &mut ScriptedRng::new(script.to_vec()))
        .expect("run");

    assert_eq!(expected, actual);
}

// ============================================================================
// Stub Source Equivalence
// ============================================================================

#[test]
fn shared_matches_sequential_for_dice() {
    assert_shared_matches_sequential(&Dice, &[0, 5, 3, 3, 1, 4, 2, 2, 5, 0, 1], 997);
}

#[test]
fn shared_matches_sequential_for_birthday() {
    // Variable draws per trial because of the early exit on collision.
    let trial = Birthday::with_days_in_year(4, 10).expect("valid");
    assert_shared_matches_sequential(&trial, &[1, 2, 1, 3, 4, 5, 6, 7, 8, 9, 0], 1_000);
}

#[test]
fn shared_matches_sequential_for_monty_hall() {
    assert_shared_matches_sequential(&MontyHall, &[0, 0, 1, 2, 2, 1, 0, 2], 1_001);
}

#[test]
fn shared_matches_sequential_for_diagnostic() {
    let test = DiagnosticTest::new(3, 2).expect("valid");
    assert_shared_matches_sequential(&test, &[1, 0, 1, 2, 0, 0, 1], 1_000);
}

#[test]
fn forked_matches_sequential_for_constant_trials() {
    // Every dice trial sees the same two draws, so all three modes agree.
    for mode in modes() {
        let runner = SimulationRunner::new(600).expect("valid").with_mode(mode);
        let table = runner
            .run(&Dice, &mut ScriptedRng::new(vec![2, 3]))
            .expect("run");
        assert_eq!(table.count(&7), 600, "mode {mode:?}");
        assert_eq!(table.len(), 1);
    }
}

#[test]
fn seeded_shared_run_matches_sequential() {
    let sequential = SimulationRunner::new(50_000).expect("valid");
    let shared = sequential.with_mode(ExecutionMode::Shared { workers: 8 });

    let expected = sequential.run(&Dice, &mut SimRng::new(11)).expect("run");
    let actual = shared.run(&Dice, &mut SimRng::new(11)).expect("run");

    assert_eq!(expected, actual);
}

#[test]
fn closure_trials_count_every_call() {
    let mut rng = SimRng::new(0);
    let mut calls = 0_u64;
    let table = run_trials(&mut rng, 1_234, |rng| {
        calls += 1;
        rng.next_uniform(3)
    })
    .expect("run");

    assert_eq!(calls, 1_234);
    assert_eq!(table.total(), 1_234);
    assert!(table.iter().all(|(category, _)| category < 3));
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn totals_equal_trial_count(
        num_trials in 1u64..2_000,
        seed in any::<u64>(),
        mode_index in 0usize..3,
    ) {
        let mode = modes()[mode_index];
        let runner = SimulationRunner::new(num_trials).expect("valid").with_mode(mode);

        let dice = runner.run(&Dice, &mut SimRng::new(seed)).expect("run");
        prop_assert_eq!(dice.total(), num_trials);

        let birthday = runner
            .run(&Birthday::new(23).expect("valid"), &mut SimRng::new(seed))
            .expect("run");
        prop_assert_eq!(birthday.total(), num_trials);

        let monty = runner.run(&MontyHall, &mut SimRng::new(seed)).expect("run");
        prop_assert_eq!(monty.total(), num_trials);
        prop_assert_eq!(monty.first_hits() + monty.second_hits(), num_trials);

        let diagnostic = runner
            .run(&DiagnosticTest::default(), &mut SimRng::new(seed))
            .expect("run");
        prop_assert_eq!(diagnostic.total(), num_trials);
        prop_assert!(diagnostic.second_hits() >= diagnostic.first_hits());
    }

    #[test]
    fn dice_sums_stay_in_range(script in prop::collection::vec(0u64..6, 2..40)) {
        let mut rng = ScriptedRng::new(script);
        for _ in 0..50 {
            let sum = Dice.roll_sum(&mut rng);
            prop_assert!((2..=12).contains(&sum));
        }
    }

    #[test]
    fn pigeonhole_forces_collision(days in 1u64..50, extra in 1u64..10, seed in any::<u64>()) {
        let trial = Birthday::with_days_in_year(days + extra, days).expect("valid");
        prop_assert!(trial.has_collision(&mut SimRng::new(seed)));
    }
}
