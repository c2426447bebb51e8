use serde::{Deserialize, Serialize};

/// One screen/state within the challenge-creation wizard
///
/// The visible sequence of steps depends on the chosen mode and challenge
/// type. `Success` is terminal: it is reached only through a completed
/// submission and is never part of the computed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Solo goal vs. social challenge
    Mode,
    /// Which activity is being tracked
    Type,
    /// Workout sub-type selection (workouts type only)
    WorkoutPicker,
    /// Name, goal, duration, start and the remaining form fields
    Details,
    /// Friend selection (social mode only)
    Invite,
    /// Summary plus the submit action
    Review,
    /// Challenge created; only exit is the done action
    Success,
}

impl Step {
    /// Short identifier used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Mode => "mode",
            Step::Type => "type",
            Step::WorkoutPicker => "workout_picker",
            Step::Details => "details",
            Step::Invite => "invite",
            Step::Review => "review",
            Step::Success => "success",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
