//! Turn-by-turn instruction steps.

use serde::{Deserialize, Serialize};

/// Kind of maneuver a step represents.
///
/// This is deliberately decoupled from any icon set; the rendering layer maps
/// each kind to a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Continue on foot.
    Walk,
    /// Turn left.
    TurnLeft,
    /// Turn right.
    TurnRight,
    /// Take stairs up or down.
    Stairs,
    /// Final approach to the destination.
    Arrive,
}

/// One atomic instruction unit.
///
/// Distance and time are display strings, not measurements; the demo has no
/// positioning system to derive them from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavStep {
    /// Human-readable instruction text.
    pub instruction: String,
    /// Maneuver kind, mapped to a glyph by the presentation layer.
    pub kind: StepKind,
    /// Display distance, e.g. "15m".
    pub distance: String,
    /// Display duration, e.g. "20s".
    pub time: String,
}

impl NavStep {
    /// Convenience constructor.
    pub fn new(
        instruction: impl Into<String>,
        kind: StepKind,
        distance: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            kind,
            distance: distance.into(),
            time: time.into(),
        }
    }
}

/// The fixed demo route, with the final step interpolated with the chosen
/// destination name.
pub fn sample_route(destination: &str) -> Vec<NavStep> {
    vec![
        NavStep::new("Walk straight ahead", StepKind::Walk, "15m", "20s"),
        NavStep::new(
            "Turn right at the water fountain",
            StepKind::TurnRight,
            "5m",
            "10s",
        ),
        NavStep::new(
            "Take the stairs to the 2nd floor",
            StepKind::Stairs,
            "10m",
            "30s",
        ),
        NavStep::new("Turn left at the hallway", StepKind::TurnLeft, "8m", "15s"),
        NavStep::new(
            format!("Arrive at {destination}"),
            StepKind::Arrive,
            "0m",
            "0s",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_route_interpolates_destination_into_last_step() {
        let steps = sample_route("Cafeteria");
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].kind, StepKind::Walk);
        assert_eq!(steps.last().unwrap().instruction, "Arrive at Cafeteria");
        assert_eq!(steps.last().unwrap().kind, StepKind::Arrive);
    }
}
