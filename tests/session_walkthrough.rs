//! End-to-end session behavior driven through the public API, including the
//! step timer on a simulated clock.

use proptest::prelude::*;
use std::time::{Duration, Instant};
use voxelnav_core::{sample_route, LocationCatalog, NavPhase, NavSession, StepTimer};

fn started_session(destination: &str) -> NavSession {
    let mut session = NavSession::default();
    session
        .start(destination, sample_route(destination))
        .expect("session starts");
    session
}

#[test]
fn progress_climbs_in_quarters_over_a_five_step_route() {
    let mut session = started_session("Cafeteria");
    assert_eq!(session.steps().len(), 5);

    let mut observed = vec![session.progress_percent()];
    while session.tick() {
        observed.push(session.progress_percent());
        if session.is_arrived() {
            break;
        }
    }
    assert_eq!(observed, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
}

#[test]
fn the_final_instruction_names_the_destination() {
    let mut session = started_session("Executive Office");
    while !session.is_arrived() {
        session.tick();
    }
    let last = session.current_step().expect("arrived sessions keep a step");
    assert!(last.instruction.contains("Executive Office"));
}

#[test]
fn timer_driven_session_advances_once_per_interval() {
    let interval = Duration::from_millis(5000);
    let start = Instant::now();
    let mut timer = StepTimer::new_at(start, interval);
    let mut session = started_session("Cafeteria");

    // Just shy of the deadline nothing fires.
    assert_eq!(timer.poll(start + Duration::from_millis(4999)), 0);
    assert!(matches!(session.phase(), NavPhase::Navigating { step: 0 }));

    for n in 1..=4u32 {
        let fires = timer.poll(start + interval * n);
        assert_eq!(fires, 1);
        session.tick();
    }
    assert!(session.is_arrived());
}

#[test]
fn a_stalled_clock_catches_up_without_overshooting() {
    let interval = Duration::from_millis(5000);
    let start = Instant::now();
    let mut timer = StepTimer::new_at(start, interval);
    let mut session = started_session("Cafeteria");

    // One long stall worth three intervals: three fires, three ticks.
    let fires = timer.poll(start + interval * 3);
    assert_eq!(fires, 3);
    for _ in 0..fires {
        session.tick();
    }
    assert!(matches!(session.phase(), NavPhase::Navigating { step: 3 }));

    // Extra ticks past arrival stay put.
    for _ in 0..10 {
        session.tick();
    }
    assert!(session.is_arrived());
    assert_eq!(session.progress_percent(), 100.0);
}

#[test]
fn stopping_midway_discards_all_progress() {
    let mut session = started_session("IT Department");
    session.tick();
    session.tick();
    session.stop();

    assert!(matches!(session.phase(), NavPhase::Browsing));
    assert_eq!(session.progress_percent(), 0.0);
    assert!(session.destination().is_empty());
    assert!(session.steps().is_empty());
    assert!(session.current_step().is_none());
}

#[test]
fn restarting_replaces_the_previous_route() {
    let mut session = started_session("Cafeteria");
    session.tick();

    session
        .start("Lobby", sample_route("Lobby"))
        .expect("restart succeeds");
    assert!(matches!(session.phase(), NavPhase::Navigating { step: 0 }));
    assert_eq!(session.destination(), "Lobby");
}

proptest! {
    #[test]
    fn filter_results_are_substring_matches(query in "[a-zA-Z ]{0,12}") {
        let catalog = LocationCatalog::sample();
        let needle = query.trim().to_lowercase();
        for name in catalog.filter(&query) {
            prop_assert!(name.to_lowercase().contains(&needle));
            prop_assert!(catalog.contains(name));
        }
    }
}
