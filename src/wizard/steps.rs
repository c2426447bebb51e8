//! Computed step sequence and backward-navigation targets

use crate::domain::{ChallengeMode, ChallengeType, Step};

/// Where a back press from a given step lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackTarget {
    /// Move to the given earlier step
    Step(Step),
    /// Leave the wizard (back on the first step, done on success)
    Close,
}

/// Compute the visible step sequence for the given choices
///
/// The sequence always starts `[Mode, Type]` and ends with `Review`;
/// `WorkoutPicker` appears only for workout challenges and `Invite` only in
/// social mode. Callable before either choice is made, in which case it
/// returns the fixed prefix. `Success` is never part of the sequence.
pub fn visible_steps(mode: Option<ChallengeMode>, challenge_type: Option<ChallengeType>) -> Vec<Step> {
    let mut steps = vec![Step::Mode, Step::Type];

    if challenge_type == Some(ChallengeType::Workouts) {
        steps.push(Step::WorkoutPicker);
    }
    steps.push(Step::Details);

    if mode == Some(ChallengeMode::Social) {
        steps.push(Step::Invite);
    }
    steps.push(Step::Review);

    steps
}

/// Backward-navigation target for a step, keyed by the step alone
///
/// Independent of the forward path taken; must agree with the step's
/// predecessor in [`visible_steps`] for every reachable combination.
pub fn back_target(
    current: Step,
    mode: Option<ChallengeMode>,
    challenge_type: Option<ChallengeType>,
) -> BackTarget {
    match current {
        Step::Mode => BackTarget::Close,
        Step::Type => BackTarget::Step(Step::Mode),
        Step::WorkoutPicker => BackTarget::Step(Step::Type),
        Step::Details => {
            if challenge_type == Some(ChallengeType::Workouts) {
                BackTarget::Step(Step::WorkoutPicker)
            } else {
                BackTarget::Step(Step::Type)
            }
        }
        Step::Invite => BackTarget::Step(Step::Details),
        Step::Review => {
            if mode == Some(ChallengeMode::Social) {
                BackTarget::Step(Step::Invite)
            } else {
                BackTarget::Step(Step::Details)
            }
        }
        Step::Success => BackTarget::Close,
    }
}
