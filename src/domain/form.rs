//! Wizard form data

use chrono::{DateTime, Utc};

use super::{DurationChoice, WinCondition, WorkoutKind};

/// When the challenge should begin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartChoice {
    /// Start immediately (with a small buffer against server-side checks)
    #[default]
    Now,
    /// Start at a user-chosen instant, which must lie in the future
    Scheduled(DateTime<Utc>),
}

/// Everything the wizard collects before submission
///
/// Numeric inputs (`goal`, `daily_target`) are kept as the raw strings the
/// user typed; parsing happens in the validation gate and at submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChallengeForm {
    pub name: String,
    pub description: String,
    /// Goal value as typed (must parse to a positive integer)
    pub goal: String,
    /// Unit for custom challenges (at least 2 characters after trimming)
    pub custom_unit: String,
    /// Optional per-day target as typed; empty means none
    pub daily_target: String,
    pub duration: DurationChoice,
    pub start: StartChoice,
    /// Required for social challenges
    pub win_condition: Option<WinCondition>,
    /// Selected workout sub-types, in selection order (workouts type only)
    pub workout_kinds: Vec<WorkoutKind>,
}

impl ChallengeForm {
    /// Goal parsed as a strictly positive integer
    pub fn parsed_goal(&self) -> Option<i64> {
        self.goal.trim().parse::<i64>().ok().filter(|g| *g > 0)
    }

    /// Daily target parsed as a strictly positive integer; `None` when the
    /// field is empty or does not parse (it is omitted, never rejected)
    pub fn parsed_daily_target(&self) -> Option<i64> {
        self.daily_target
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|t| *t > 0)
    }

    /// Toggle a workout sub-type in the ordered selection
    pub fn toggle_workout(&mut self, kind: WorkoutKind) {
        if let Some(pos) = self.workout_kinds.iter().position(|k| *k == kind) {
            self.workout_kinds.remove(pos);
        } else {
            self.workout_kinds.push(kind);
        }
    }

    /// Clear the fields that only make sense for the previously chosen
    /// type; called when the user navigates back and picks a different one
    pub fn reset_type_specific(&mut self) {
        self.goal.clear();
        self.custom_unit.clear();
        self.workout_kinds.clear();
    }

    /// Whether the user has entered anything worth a discard prompt
    pub fn is_touched(&self) -> bool {
        *self != ChallengeForm::default()
    }
}
