//! Collaborator contracts for the challenge backend

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{ChallengeInvite, CreatedChallenge, Friend, NewChallenge};

/// Errors surfaced by backend collaborators
///
/// Messages are human-readable; the wizard shows rejection messages to the
/// user verbatim.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The server refused the request (validation or business rule)
    #[error("{0}")]
    Rejected(String),

    /// Non-success HTTP response that carried no structured rejection
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never reached the server
    #[error("network error: {0}")]
    Transport(String),
}

/// Remote operations the wizard depends on
#[async_trait]
pub trait ChallengeBackend: Send + Sync {
    /// Create a challenge; fails loudly on any server-side validation error
    async fn create_challenge(&self, input: &NewChallenge)
        -> Result<CreatedChallenge, BackendError>;

    /// Invite a single user to an existing challenge
    ///
    /// Assumed idempotent or tolerant of duplicate invites. The wizard
    /// treats failures as best-effort and never surfaces them.
    async fn invite_user(&self, invite: &ChallengeInvite) -> Result<(), BackendError>;

    /// Candidate friends for the invite step
    async fn friends(&self) -> Result<Vec<Friend>, BackendError>;
}

/// Source of the backend's notion of "now"
///
/// Feeds the periodically refreshed [`ServerClock`](super::ServerClock);
/// never called on the submission path itself.
#[async_trait]
pub trait TimeSource: Send + Sync {
    async fn server_time(&self) -> Result<DateTime<Utc>, BackendError>;
}

/// Push-notification permission/registration request
///
/// Fire-and-forget: the wizard spawns it after a successful creation and
/// never consumes the outcome.
#[async_trait]
pub trait PushRegistrar: Send + Sync {
    async fn request_registration(&self) -> Result<(), BackendError>;
}
