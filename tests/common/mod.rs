//! Shared test doubles for the wizard flow tests

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use rally::backend::{BackendError, ChallengeBackend, PushRegistrar, ServerClock};
use rally::domain::{
    ChallengeInvite, ChallengeMode, ChallengeType, CreatedChallenge, Friend, NewChallenge,
};
use rally::wizard::{WizardController, WizardEvent};

/// A backend call, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create,
    Invite(String),
}

/// Backend double that records every call and can inject failures
#[derive(Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    created: Mutex<Vec<NewChallenge>>,
    invites: Mutex<Vec<ChallengeInvite>>,
    reject_create: Mutex<Option<String>>,
    failing_invites: Mutex<Vec<String>>,
}

impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next create call fail with the given message
    pub async fn reject_next_create(&self, message: &str) {
        *self.reject_create.lock().await = Some(message.to_string());
    }

    /// Make invitations for the given user fail
    pub async fn fail_invites_for(&self, user_id: &str) {
        self.failing_invites.lock().await.push(user_id.to_string());
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn created(&self) -> Vec<NewChallenge> {
        self.created.lock().await.clone()
    }

    pub async fn invites(&self) -> Vec<ChallengeInvite> {
        self.invites.lock().await.clone()
    }
}

#[async_trait]
impl ChallengeBackend for RecordingBackend {
    async fn create_challenge(
        &self,
        input: &NewChallenge,
    ) -> Result<CreatedChallenge, BackendError> {
        self.calls.lock().await.push(Call::Create);

        if let Some(message) = self.reject_create.lock().await.take() {
            return Err(BackendError::Rejected(message));
        }

        let mut created = self.created.lock().await;
        created.push(input.clone());
        Ok(CreatedChallenge {
            id: format!("ch-{}", created.len()),
        })
    }

    async fn invite_user(&self, invite: &ChallengeInvite) -> Result<(), BackendError> {
        self.calls
            .lock()
            .await
            .push(Call::Invite(invite.user_id.clone()));

        if self.failing_invites.lock().await.contains(&invite.user_id) {
            return Err(BackendError::Rejected("invite failed".to_string()));
        }

        self.invites.lock().await.push(invite.clone());
        Ok(())
    }

    async fn friends(&self) -> Result<Vec<Friend>, BackendError> {
        Ok(vec![
            Friend {
                id: "f1".to_string(),
                name: "Ada Lovelace".to_string(),
                handle: Some("@ada".to_string()),
            },
            Friend {
                id: "f2".to_string(),
                name: "Grace Hopper".to_string(),
                handle: Some("@grace".to_string()),
            },
        ])
    }
}

/// Push double that signals when the fire-and-forget request lands
#[derive(Default)]
pub struct RecordingPush {
    pub notify: Notify,
    requests: Mutex<usize>,
}

impl RecordingPush {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn requests(&self) -> usize {
        *self.requests.lock().await
    }
}

#[async_trait]
impl PushRegistrar for RecordingPush {
    async fn request_registration(&self) -> Result<(), BackendError> {
        *self.requests.lock().await += 1;
        self.notify.notify_one();
        Ok(())
    }
}

/// Controller wired to the recording doubles
pub fn controller_with(
    backend: Arc<RecordingBackend>,
    clock: ServerClock,
    push: Arc<RecordingPush>,
) -> WizardController {
    WizardController::new(backend, clock, push)
}

/// Drive a fresh wizard to the details step with a complete form
pub fn fill_details(
    controller: &mut WizardController,
    mode: ChallengeMode,
    challenge_type: ChallengeType,
    name: &str,
    goal: &str,
) {
    controller.dispatch(WizardEvent::ModeSelected(mode));
    controller.dispatch(WizardEvent::TypeSelected(challenge_type));
    if challenge_type == ChallengeType::Workouts {
        controller.dispatch(WizardEvent::ContinuePressed);
    }
    controller.dispatch(WizardEvent::NameChanged(name.to_string()));
    controller.dispatch(WizardEvent::GoalChanged(goal.to_string()));
}
