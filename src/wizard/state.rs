//! Wizard state record and the pure transition function

use crate::domain::{
    ChallengeForm, ChallengeMode, ChallengeType, DurationChoice, FriendId, StartChoice, Step,
    WinCondition, WorkoutKind,
};

use super::steps::{back_target, visible_steps, BackTarget};
use super::validation;

/// Complete state of one wizard run
///
/// Replaced wholesale on every transition; all state is created fresh when
/// the wizard opens and discarded when it closes. Nothing survives a run.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub current_step: Step,
    pub mode: Option<ChallengeMode>,
    pub challenge_type: Option<ChallengeType>,
    pub form: ChallengeForm,
    /// Selected friends in selection order (social mode only)
    pub selected_friends: Vec<FriendId>,
    /// True while a submission is in flight; gates the review CTA
    pub is_submitting: bool,
    /// Message from the last failed submission, shown on review
    pub submit_error: Option<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: Step::Mode,
            mode: None,
            challenge_type: None,
            form: ChallengeForm::default(),
            selected_friends: Vec::new(),
            is_submitting: false,
            submit_error: None,
        }
    }
}

/// Every interaction the wizard reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// Mode picked on the first step; advances immediately
    ModeSelected(ChallengeMode),
    /// Type picked on the second step; advances immediately
    TypeSelected(ChallengeType),
    NameChanged(String),
    DescriptionChanged(String),
    GoalChanged(String),
    CustomUnitChanged(String),
    DailyTargetChanged(String),
    DurationChanged(DurationChoice),
    StartChanged(StartChoice),
    WinConditionChanged(WinCondition),
    WorkoutToggled(WorkoutKind),
    FriendToggled(FriendId),
    /// Primary action on the steps that need an explicit press
    ContinuePressed,
    BackPressed,
    SubmissionStarted,
    SubmissionFailed(String),
    SubmissionSucceeded,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The step sequence for the current choices (never contains success)
    pub fn visible_steps(&self) -> Vec<Step> {
        visible_steps(self.mode, self.challenge_type)
    }

    /// Whether closing the wizard should ask for a discard confirmation
    pub fn is_dirty(&self) -> bool {
        self.mode.is_some()
            || self.challenge_type.is_some()
            || self.form.is_touched()
            || !self.selected_friends.is_empty()
    }

    /// Apply one event, producing the next state
    ///
    /// Events that do not apply to the current step leave the state
    /// unchanged, as does a continue press while the validation gate is
    /// closed. A back press on the first step is also a no-op here: the
    /// host interprets it as a close request (see the controller).
    pub fn apply(&self, event: WizardEvent) -> WizardState {
        let mut next = self.clone();

        match event {
            WizardEvent::ModeSelected(mode) => {
                if self.current_step != Step::Mode {
                    return next;
                }
                next.mode = Some(mode);
                match mode {
                    ChallengeMode::Social => {
                        if next.form.win_condition.is_none() {
                            next.form.win_condition = Some(WinCondition::FirstToGoal);
                        }
                    }
                    ChallengeMode::Solo => {
                        next.form.win_condition = None;
                        next.selected_friends.clear();
                    }
                }
                next.current_step = Step::Type;
            }

            WizardEvent::TypeSelected(challenge_type) => {
                if self.current_step != Step::Type {
                    return next;
                }
                // Re-selecting a different type after navigating back
                // restarts the type-dependent form fields only.
                if self
                    .challenge_type
                    .is_some_and(|previous| previous != challenge_type)
                {
                    next.form.reset_type_specific();
                }
                next.challenge_type = Some(challenge_type);
                next.current_step = if challenge_type == ChallengeType::Workouts {
                    Step::WorkoutPicker
                } else {
                    Step::Details
                };
            }

            WizardEvent::NameChanged(name) => next.form.name = name,
            WizardEvent::DescriptionChanged(description) => next.form.description = description,
            WizardEvent::GoalChanged(goal) => next.form.goal = goal,
            WizardEvent::CustomUnitChanged(unit) => next.form.custom_unit = unit,
            WizardEvent::DailyTargetChanged(target) => next.form.daily_target = target,
            WizardEvent::DurationChanged(duration) => next.form.duration = duration,
            WizardEvent::StartChanged(start) => next.form.start = start,
            WizardEvent::WinConditionChanged(win) => next.form.win_condition = Some(win),

            WizardEvent::WorkoutToggled(kind) => next.form.toggle_workout(kind),

            WizardEvent::FriendToggled(friend_id) => {
                if self.mode != Some(ChallengeMode::Social) {
                    return next;
                }
                if let Some(pos) = next.selected_friends.iter().position(|f| *f == friend_id) {
                    next.selected_friends.remove(pos);
                } else {
                    next.selected_friends.push(friend_id);
                }
            }

            WizardEvent::ContinuePressed => match self.current_step {
                Step::WorkoutPicker => next.current_step = Step::Details,
                Step::Details => {
                    if validation::details_ready(&self.form, self.challenge_type) {
                        next.current_step = if self.mode == Some(ChallengeMode::Social) {
                            Step::Invite
                        } else {
                            Step::Review
                        };
                    }
                }
                Step::Invite => next.current_step = Step::Review,
                // Review advances through submission, not through here.
                _ => {}
            },

            WizardEvent::BackPressed => {
                if let BackTarget::Step(step) =
                    back_target(self.current_step, self.mode, self.challenge_type)
                {
                    next.current_step = step;
                }
            }

            WizardEvent::SubmissionStarted => {
                if self.current_step == Step::Review && !self.is_submitting {
                    next.is_submitting = true;
                    next.submit_error = None;
                }
            }

            WizardEvent::SubmissionFailed(message) => {
                if self.is_submitting {
                    next.is_submitting = false;
                    next.submit_error = Some(message);
                }
            }

            WizardEvent::SubmissionSucceeded => {
                if self.is_submitting {
                    next.is_submitting = false;
                    next.current_step = Step::Success;
                }
            }
        }

        next
    }
}
