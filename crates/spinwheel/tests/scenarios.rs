#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]

//! End-to-end spin scenarios driven through the public API.

use std::time::Duration;

use spinwheel::prelude::*;

const NAMES: [&str; 4] = ["Ann", "Bo", "Cat", "Dee"];

fn engine() -> SpinEngine {
    SpinEngine::with_seed(SpinConfig::default(), 2024).unwrap()
}

/// Feeds ~60 fps timestamps until the spin completes.
fn drive<R: rand::Rng>(engine: &mut SpinEngine<R>) -> Winner {
    let mut clock = FrameClock::new();
    let mut now = 10_000.0;
    for _ in 0..10_000 {
        if let Some(SpinEvent::Completed(winner)) = engine.tick(clock.delta(now)) {
            return winner;
        }
        now += 1000.0 / 60.0;
    }
    panic!("spin never completed");
}

// =============================================================================
// Scenario A: five exact clockwise turns land on the first sector
// =============================================================================

#[test]
fn scenario_a_five_turns_clockwise() {
    let mut engine = engine();
    assert_eq!(engine.direction(), Direction::Clockwise);

    engine.start_spin_with_turns(&NAMES, 5.0).unwrap();
    let winner = drive(&mut engine);

    assert_eq!(engine.rotation(), -1800.0);
    assert_eq!(engine.normalized_rotation(), 0.0);
    assert_eq!(
        winner,
        Winner {
            index: 0,
            name: "Ann".into(),
        }
    );
    assert_eq!(engine.winner(), Some(&winner));
}

// =============================================================================
// Scenario B: five and a half turns stop halfway round
// =============================================================================

#[test]
fn scenario_b_five_and_a_half_turns() {
    let mut engine = engine();
    engine.start_spin_with_turns(&NAMES, 5.5).unwrap();
    let winner = drive(&mut engine);

    assert_eq!(engine.rotation(), -1980.0);
    assert_eq!(engine.normalized_rotation(), 180.0);
    assert_eq!(winner.index, 2);
    assert_eq!(winner.name, "Cat");
}

// =============================================================================
// Scenario C: an empty wheel never spins
// =============================================================================

#[test]
fn scenario_c_no_participants() {
    let mut engine = engine();
    let empty: [&str; 0] = [];

    assert!(!engine.can_spin(0));
    assert_eq!(engine.start_spin(&empty), Err(SpinError::NoParticipants));
    assert_eq!(
        engine.start_spin_with_turns(&empty, 5.0),
        Err(SpinError::NoParticipants)
    );
    assert_eq!(engine.phase(), SpinPhase::Idle);

    for _ in 0..10 {
        assert!(engine.tick(Duration::from_secs(1)).is_none());
    }
    assert!(engine.winner().is_none());
    assert_eq!(engine.rotation(), 0.0);
}

// =============================================================================
// Scenario D: dismiss, then spin again from the resting angle
// =============================================================================

#[test]
fn scenario_d_dismiss_and_continue() {
    let mut engine = engine();
    // 5.75 clockwise turns end at -2070°, which normalizes to 90°: sector 1.
    engine.start_spin_with_turns(&NAMES, 5.75).unwrap();
    let first = drive(&mut engine);
    assert_eq!(first.name, "Bo");

    let resting = engine.rotation();
    assert!(engine.dismiss());
    assert_eq!(engine.phase(), SpinPhase::Idle);
    assert!(engine.winner().is_none());
    assert_eq!(engine.rotation(), resting);

    engine.start_spin_with_turns(&NAMES, 5.0).unwrap();
    // The first frame of the new spin starts from where the wheel rested.
    engine.tick(Duration::ZERO);
    assert_eq!(engine.rotation(), resting);

    drive(&mut engine);
    assert_eq!(engine.rotation(), resting - 1800.0);
}

// =============================================================================
// Lifecycle details
// =============================================================================

#[test]
fn dismiss_is_idempotent() {
    let mut engine = engine();
    engine.start_spin(&NAMES).unwrap();
    drive(&mut engine);

    assert!(engine.dismiss());
    assert!(!engine.dismiss());
    assert_eq!(engine.phase(), SpinPhase::Idle);
}

#[test]
fn dismiss_outside_completed_does_nothing() {
    let mut engine = engine();
    assert!(!engine.dismiss());

    engine.start_spin(&NAMES).unwrap();
    assert!(!engine.dismiss());
    assert!(engine.is_spinning());
}

#[test]
fn new_spin_from_completed_clears_winner() {
    let mut engine = engine();
    engine.start_spin(&NAMES).unwrap();
    drive(&mut engine);
    assert!(engine.winner().is_some());

    engine.start_spin(&NAMES).unwrap();
    assert_eq!(engine.phase(), SpinPhase::Spinning);
    assert!(engine.winner().is_none());
}

#[test]
fn toggling_twice_restores_direction() {
    let mut engine = engine();
    let original = engine.direction();
    engine.toggle_direction().unwrap();
    assert_ne!(engine.direction(), original);
    engine.toggle_direction().unwrap();
    assert_eq!(engine.direction(), original);
}

#[test]
fn winner_present_only_when_completed() {
    let mut engine = engine();
    let check = |engine: &SpinEngine| {
        assert_eq!(
            engine.winner().is_some(),
            engine.phase() == SpinPhase::Completed
        );
    };

    check(&engine);
    engine.start_spin(&NAMES).unwrap();
    let mut clock = FrameClock::new();
    let mut now = 0.0;
    while engine.is_spinning() {
        check(&engine);
        engine.tick(clock.delta(now));
        now += 33.0;
    }
    check(&engine);
    engine.dismiss();
    check(&engine);
}

#[test]
fn frame_sampling_does_not_change_outcome() {
    let coarse = {
        let mut engine = engine();
        engine.start_spin_with_turns(&NAMES, 7.3).unwrap();
        engine.tick(Duration::from_millis(5999));
        engine.tick(Duration::from_millis(1));
        (engine.rotation(), engine.winner().cloned())
    };
    let fine = {
        let mut engine = engine();
        engine.start_spin_with_turns(&NAMES, 7.3).unwrap();
        drive(&mut engine);
        (engine.rotation(), engine.winner().cloned())
    };
    assert_eq!(coarse, fine);
}

#[test]
fn many_spins_keep_animation_and_result_consistent() {
    let mut engine = engine();
    for round in 0..50 {
        if round % 3 == 0 && engine.phase() == SpinPhase::Idle {
            engine.toggle_direction().unwrap();
        }
        engine.start_spin(&NAMES).unwrap();
        let winner = drive(&mut engine);
        assert_eq!(
            engine.sector_under_pointer(NAMES.len()),
            Some(winner.index),
            "round {round}: pointer and winner disagree"
        );
        engine.dismiss();
    }
}
