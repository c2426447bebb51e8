//! Primary-action button labels

use crate::domain::{ChallengeMode, Step};

/// Label for the step's primary action, if the step has a sticky one
///
/// Mode and type selection advance on tap and the success screen has a
/// dedicated done button, so those return `None`.
pub fn cta_label(step: Step, mode: Option<ChallengeMode>, selected_friends: usize) -> Option<String> {
    match step {
        Step::WorkoutPicker | Step::Details => Some("Continue".to_string()),
        Step::Invite => Some(match selected_friends {
            0 => "Skip — invite later".to_string(),
            1 => "Continue with 1 friend".to_string(),
            n => format!("Continue with {n} friends"),
        }),
        Step::Review => Some(if mode == Some(ChallengeMode::Solo) {
            "Start Goal".to_string()
        } else {
            "Create Challenge".to_string()
        }),
        Step::Mode | Step::Type | Step::Success => None,
    }
}
