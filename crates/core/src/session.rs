//! Session state machine for simulated turn-by-turn progress.
//!
//! The machine is deliberately tiny: a session browses, navigates through a
//! fixed step sequence one tick at a time, and terminates in an explicit
//! arrived phase. Transitions are pure functions so they can be exercised
//! without a window or a clock.

use crate::catalog::ORIGIN;
use crate::error::NavError;
use crate::step::NavStep;

/// Phase of the navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    /// No active session.
    Browsing,
    /// Mid-route, at the given step index.
    Navigating {
        /// Current index into the step sequence. Always `< step_count`.
        step: usize,
    },
    /// Terminal phase: the final step has been completed.
    Arrived,
}

/// Events that drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// A destination was confirmed.
    Start,
    /// The step cadence fired.
    Tick,
    /// The user cancelled.
    Stop,
}

/// Pure transition function.
///
/// `step_count` must be at least 1; callers validate sequences before a
/// session ever reaches this point. `Start` from any phase restarts at step 0
/// (starting over an active session replaces it).
pub fn transition(phase: NavPhase, event: NavEvent, step_count: usize) -> NavPhase {
    match (phase, event) {
        (_, NavEvent::Start) => NavPhase::Navigating { step: 0 },
        (_, NavEvent::Stop) => NavPhase::Browsing,
        (NavPhase::Navigating { step }, NavEvent::Tick) => {
            if step + 1 < step_count {
                NavPhase::Navigating { step: step + 1 }
            } else {
                NavPhase::Arrived
            }
        }
        // Ticks are no-ops outside an active route.
        (NavPhase::Browsing, NavEvent::Tick) => NavPhase::Browsing,
        (NavPhase::Arrived, NavEvent::Tick) => NavPhase::Arrived,
    }
}

/// One user attempt to navigate from the origin to a chosen destination.
#[derive(Debug, Clone)]
pub struct NavSession {
    origin: String,
    destination: String,
    steps: Vec<NavStep>,
    phase: NavPhase,
}

impl Default for NavSession {
    fn default() -> Self {
        Self::new(ORIGIN)
    }
}

impl NavSession {
    /// Create an idle session anchored at `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: String::new(),
            steps: Vec::new(),
            phase: NavPhase::Browsing,
        }
    }

    /// Begin navigating to `destination` through `steps`.
    ///
    /// An empty step sequence is rejected. If a session is already active it
    /// is replaced wholesale: new destination, step index 0.
    pub fn start(
        &mut self,
        destination: impl Into<String>,
        steps: Vec<NavStep>,
    ) -> Result<(), NavError> {
        let destination = destination.into();
        if destination.is_empty() {
            return Err(NavError::InvalidSelection);
        }
        if steps.is_empty() {
            return Err(NavError::EmptySteps);
        }
        self.destination = destination;
        self.steps = steps;
        self.phase = transition(self.phase, NavEvent::Start, self.steps.len());
        Ok(())
    }

    /// Advance one step on the cadence. Returns `true` if the phase changed.
    pub fn tick(&mut self) -> bool {
        let next = transition(self.phase, NavEvent::Tick, self.steps.len());
        let changed = next != self.phase;
        self.phase = next;
        changed
    }

    /// Cancel the session and discard all progress.
    pub fn stop(&mut self) {
        self.phase = transition(self.phase, NavEvent::Stop, self.steps.len());
        self.destination.clear();
        self.steps.clear();
    }

    /// Current phase.
    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    /// Whether a route is being shown (navigating or arrived).
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, NavPhase::Browsing)
    }

    /// Whether the session reached its terminal phase.
    pub fn is_arrived(&self) -> bool {
        matches!(self.phase, NavPhase::Arrived)
    }

    /// The fixed starting location.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The chosen destination; empty while browsing.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The full step sequence of the active session.
    pub fn steps(&self) -> &[NavStep] {
        &self.steps
    }

    /// The step currently shown. While arrived this stays on the final step.
    pub fn current_step(&self) -> Option<&NavStep> {
        match self.phase {
            NavPhase::Browsing => None,
            NavPhase::Navigating { step } => self.steps.get(step),
            NavPhase::Arrived => self.steps.last(),
        }
    }

    /// Index of the step currently shown.
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            NavPhase::Browsing => None,
            NavPhase::Navigating { step } => Some(step),
            NavPhase::Arrived => Some(self.steps.len().saturating_sub(1)),
        }
    }

    /// Steps still ahead of the current one.
    pub fn upcoming_steps(&self) -> &[NavStep] {
        match self.phase {
            NavPhase::Navigating { step } if step + 1 < self.steps.len() => &self.steps[step + 1..],
            _ => &[],
        }
    }

    /// Completion percentage in `0.0..=100.0`.
    ///
    /// Single-step routes report 100 immediately rather than dividing by
    /// zero.
    pub fn progress_percent(&self) -> f32 {
        match self.phase {
            NavPhase::Browsing => 0.0,
            NavPhase::Arrived => 100.0,
            NavPhase::Navigating { step } => {
                if self.steps.len() <= 1 {
                    100.0
                } else {
                    step as f32 / (self.steps.len() - 1) as f32 * 100.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{sample_route, NavStep, StepKind};
    use proptest::prelude::*;

    fn three_step_route(dest: &str) -> Vec<NavStep> {
        vec![
            NavStep::new("Walk straight", StepKind::Walk, "10m", "15s"),
            NavStep::new("Turn right", StepKind::TurnRight, "4m", "5s"),
            NavStep::new(format!("Arrive at {dest}"), StepKind::Arrive, "0m", "0s"),
        ]
    }

    #[test]
    fn each_tick_advances_exactly_one_step() {
        let mut session = NavSession::default();
        session.start("Lobby", sample_route("Lobby")).unwrap();
        let n = session.steps().len();
        for k in 1..n {
            assert!(session.tick());
            assert_eq!(session.current_index(), Some(k));
            let expected = k as f32 / (n - 1) as f32 * 100.0;
            assert!((session.progress_percent() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn route_completion_is_terminal() {
        let mut session = NavSession::default();
        session.start("Lobby", three_step_route("Lobby")).unwrap();
        session.tick();
        session.tick();
        assert!(session.tick(), "final tick should enter the arrived phase");
        assert!(session.is_arrived());
        assert!(!session.tick(), "ticks after arrival are no-ops");
        assert_eq!(session.phase(), NavPhase::Arrived);
        assert_eq!(session.progress_percent(), 100.0);
        assert_eq!(
            session.current_step().map(|s| s.kind),
            Some(StepKind::Arrive)
        );
    }

    #[test]
    fn single_step_route_reports_full_progress() {
        let mut session = NavSession::default();
        let only = vec![NavStep::new("Arrive at Lobby", StepKind::Arrive, "0m", "0s")];
        session.start("Lobby", only).unwrap();
        assert_eq!(session.progress_percent(), 100.0);
        assert!(session.tick());
        assert!(session.is_arrived());
    }

    #[test]
    fn stop_resets_and_restart_begins_at_zero() {
        let mut session = NavSession::default();
        session.start("Cafeteria", sample_route("Cafeteria")).unwrap();
        session.tick();
        session.tick();
        session.stop();
        assert_eq!(session.phase(), NavPhase::Browsing);
        assert_eq!(session.destination(), "");
        assert!(session.steps().is_empty());
        assert_eq!(session.current_index(), None);

        session.start("Elevator", sample_route("Elevator")).unwrap();
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn restart_while_active_replaces_the_session() {
        let mut session = NavSession::default();
        session.start("Cafeteria", sample_route("Cafeteria")).unwrap();
        session.tick();
        session.start("Lobby", sample_route("Lobby")).unwrap();
        assert_eq!(session.destination(), "Lobby");
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.progress_percent(), 0.0);
    }

    #[test]
    fn empty_steps_are_rejected() {
        let mut session = NavSession::default();
        assert_eq!(
            session.start("Lobby", Vec::new()),
            Err(NavError::EmptySteps)
        );
        assert_eq!(session.phase(), NavPhase::Browsing);
    }

    #[test]
    fn empty_destination_is_rejected() {
        let mut session = NavSession::default();
        assert_eq!(
            session.start("", sample_route("")),
            Err(NavError::InvalidSelection)
        );
    }

    #[test]
    fn three_step_walkthrough() {
        let mut session = NavSession::default();
        session.start("X", three_step_route("X")).unwrap();
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.current_step().unwrap().instruction, "Walk straight");
        assert_eq!(session.progress_percent(), 0.0);

        session.tick();
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(session.progress_percent(), 50.0);

        session.tick();
        assert!(session.is_arrived());
        assert_eq!(session.current_step().unwrap().instruction, "Arrive at X");
        assert_eq!(session.progress_percent(), 100.0);

        session.tick();
        assert!(session.is_arrived());
        assert_eq!(session.progress_percent(), 100.0);
    }

    proptest! {
        #[test]
        fn ticks_never_overshoot_or_wrap(step_count in 1usize..32, ticks in 0usize..128) {
            let mut phase = transition(NavPhase::Browsing, NavEvent::Start, step_count);
            for _ in 0..ticks {
                phase = transition(phase, NavEvent::Tick, step_count);
            }
            match phase {
                NavPhase::Navigating { step } => {
                    prop_assert!(ticks < step_count);
                    prop_assert_eq!(step, ticks);
                }
                NavPhase::Arrived => prop_assert!(ticks >= step_count),
                NavPhase::Browsing => prop_assert!(false, "tick can never return to browsing"),
            }
        }

        #[test]
        fn stop_is_reachable_from_any_phase(step_count in 1usize..32, ticks in 0usize..64) {
            let mut phase = transition(NavPhase::Browsing, NavEvent::Start, step_count);
            for _ in 0..ticks {
                phase = transition(phase, NavEvent::Tick, step_count);
            }
            prop_assert_eq!(
                transition(phase, NavEvent::Stop, step_count),
                NavPhase::Browsing
            );
        }
    }
}
