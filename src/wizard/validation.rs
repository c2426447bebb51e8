//! Per-step validation gating the primary action

use crate::domain::{ChallengeForm, ChallengeType, Step};

use super::state::WizardState;

/// Minimum length of a custom unit after trimming
const MIN_CUSTOM_UNIT_LEN: usize = 2;

/// Whether the details form is complete enough to continue
///
/// Requires a non-blank name, a strictly positive integer goal, and, for
/// custom challenges, a unit of at least two characters.
pub fn details_ready(form: &ChallengeForm, challenge_type: Option<ChallengeType>) -> bool {
    if form.name.trim().is_empty() {
        return false;
    }
    if form.parsed_goal().is_none() {
        return false;
    }
    if challenge_type == Some(ChallengeType::Custom)
        && form.custom_unit.trim().chars().count() < MIN_CUSTOM_UNIT_LEN
    {
        return false;
    }
    true
}

/// Whether the current step's primary action is disabled
///
/// Only `Details` and `Review` ever gate the action: details until the form
/// is complete, review while a submission is in flight (which prevents a
/// double submit). Everywhere else selection itself is the action.
pub fn is_cta_disabled(state: &WizardState) -> bool {
    match state.current_step {
        Step::Details => !details_ready(&state.form, state.challenge_type),
        Step::Review => state.is_submitting,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChallengeMode;
    use crate::wizard::state::WizardEvent;

    fn details_state(name: &str, goal: &str, ty: ChallengeType, unit: &str) -> WizardState {
        WizardState::new()
            .apply(WizardEvent::ModeSelected(ChallengeMode::Solo))
            .apply(WizardEvent::TypeSelected(ty))
            .apply(WizardEvent::ContinuePressed) // through the picker for workouts
            .apply(WizardEvent::NameChanged(name.to_string()))
            .apply(WizardEvent::GoalChanged(goal.to_string()))
            .apply(WizardEvent::CustomUnitChanged(unit.to_string()))
    }

    #[test]
    fn details_cta_disabled_for_incomplete_forms() {
        assert!(is_cta_disabled(&details_state(
            "",
            "100",
            ChallengeType::Steps,
            ""
        )));
        assert!(is_cta_disabled(&details_state(
            "X",
            "0",
            ChallengeType::Steps,
            ""
        )));
        assert!(is_cta_disabled(&details_state(
            "X",
            "-5",
            ChallengeType::Steps,
            ""
        )));
        assert!(is_cta_disabled(&details_state(
            "X",
            "10",
            ChallengeType::Custom,
            "a"
        )));
    }

    #[test]
    fn details_cta_enabled_for_complete_forms() {
        assert!(!is_cta_disabled(&details_state(
            "Goal",
            "100",
            ChallengeType::Steps,
            ""
        )));
        assert!(!is_cta_disabled(&details_state(
            "X",
            "10",
            ChallengeType::Custom,
            "ab"
        )));
    }

    #[test]
    fn whitespace_only_input_does_not_pass() {
        assert!(is_cta_disabled(&details_state(
            "   ",
            "100",
            ChallengeType::Steps,
            ""
        )));
        assert!(is_cta_disabled(&details_state(
            "X",
            "10",
            ChallengeType::Custom,
            " a "
        )));
    }

    #[test]
    fn review_cta_disabled_only_while_submitting() {
        let review = details_state("Goal", "100", ChallengeType::Steps, "")
            .apply(WizardEvent::ContinuePressed);
        assert_eq!(review.current_step, Step::Review);
        assert!(!is_cta_disabled(&review));

        let submitting = review.apply(WizardEvent::SubmissionStarted);
        assert!(is_cta_disabled(&submitting));
    }

    #[test]
    fn selection_steps_never_gate() {
        let state = WizardState::new();
        assert!(!is_cta_disabled(&state));

        let invite = WizardState::new()
            .apply(WizardEvent::ModeSelected(ChallengeMode::Social))
            .apply(WizardEvent::TypeSelected(ChallengeType::Steps))
            .apply(WizardEvent::NameChanged("X".to_string()))
            .apply(WizardEvent::GoalChanged("10".to_string()))
            .apply(WizardEvent::ContinuePressed);
        assert_eq!(invite.current_step, Step::Invite);
        assert!(!is_cta_disabled(&invite));
    }
}
