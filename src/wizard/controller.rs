//! Host-facing wizard controller

use std::sync::Arc;

use tracing::debug;

use crate::backend::{ChallengeBackend, PushRegistrar, ServerClock};
use crate::domain::{CreatedChallenge, Step};

use super::cta;
use super::state::{WizardEvent, WizardState};
use super::steps::{back_target, BackTarget};
use super::submit::{submit_challenge, SubmitError};
use super::validation;

/// What the host should do after a back press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Navigation moved to an earlier step
    Moved(Step),
    /// The wizard wants to close; ask for a discard confirmation first
    /// when `confirm_discard` is set
    CloseRequested { confirm_discard: bool },
}

/// One wizard run: state plus the collaborators submission needs
///
/// Owned by a single host screen; all mutation happens through serialized
/// calls on this instance. Dropping the controller (or calling [`done`])
/// discards everything a run entered.
///
/// [`done`]: WizardController::done
pub struct WizardController {
    state: WizardState,
    backend: Arc<dyn ChallengeBackend>,
    clock: ServerClock,
    push: Arc<dyn PushRegistrar>,
}

impl WizardController {
    pub fn new(
        backend: Arc<dyn ChallengeBackend>,
        clock: ServerClock,
        push: Arc<dyn PushRegistrar>,
    ) -> Self {
        Self {
            state: WizardState::new(),
            backend,
            clock,
            push,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Apply a user interaction
    pub fn dispatch(&mut self, event: WizardEvent) {
        self.state = self.state.apply(event);
        debug!(step = %self.state.current_step, "wizard state advanced");
    }

    /// The step sequence for the current choices
    pub fn visible_steps(&self) -> Vec<Step> {
        self.state.visible_steps()
    }

    /// Label for the current step's primary action, if it has one
    pub fn cta_label(&self) -> Option<String> {
        cta::cta_label(
            self.state.current_step,
            self.state.mode,
            self.state.selected_friends.len(),
        )
    }

    /// Whether the current step's primary action is disabled
    pub fn is_cta_disabled(&self) -> bool {
        validation::is_cta_disabled(&self.state)
    }

    /// Navigate backwards, or request a close from the first step
    ///
    /// The discard confirmation is requested once anything has been
    /// entered; closing from the success step never asks.
    pub fn back(&mut self) -> BackOutcome {
        match back_target(
            self.state.current_step,
            self.state.mode,
            self.state.challenge_type,
        ) {
            BackTarget::Step(_) => {
                self.dispatch(WizardEvent::BackPressed);
                BackOutcome::Moved(self.state.current_step)
            }
            BackTarget::Close => BackOutcome::CloseRequested {
                confirm_discard: self.state.current_step != Step::Success && self.state.is_dirty(),
            },
        }
    }

    /// Run the submission from the review step
    ///
    /// On success the wizard lands on the success step; on failure the
    /// submitting flag resets, the error message is recorded, and the
    /// wizard stays on review with all entered data intact.
    pub async fn submit(&mut self) -> Result<CreatedChallenge, SubmitError> {
        if self.state.current_step != Step::Review || self.state.is_submitting {
            return Err(SubmitError::NotOnReview);
        }

        self.dispatch(WizardEvent::SubmissionStarted);
        let result = submit_challenge(&self.state, &self.backend, &self.clock, &self.push).await;
        match &result {
            Ok(created) => {
                debug!(challenge_id = %created.id, "wizard submission finished");
                self.dispatch(WizardEvent::SubmissionSucceeded);
            }
            Err(e) => self.dispatch(WizardEvent::SubmissionFailed(e.to_string())),
        }
        result
    }

    /// Close the wizard from the success step, discarding all state
    pub fn done(self) {}
}
