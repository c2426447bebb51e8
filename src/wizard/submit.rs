//! Submission orchestrator

use std::sync::Arc;

use chrono::Duration;
use futures::future;
use thiserror::Error;
use tracing::{info, warn};

use crate::backend::{BackendError, ChallengeBackend, PushRegistrar, ServerClock};
use crate::domain::{
    ChallengeInvite, ChallengeMode, ChallengeType, CreatedChallenge, NewChallenge, StartChoice,
    WorkoutKind,
};

use super::state::WizardState;

/// Why a submission did not go through
///
/// Backend rejections carry the server's message and are shown verbatim.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Submission was requested from a step other than review, or while
    /// another submission was already in flight
    #[error("submission is only available from the review step")]
    NotOnReview,

    /// A required choice or field is missing; the details gate normally
    /// prevents this from being reachable through the UI
    #[error("challenge details are incomplete")]
    IncompleteForm,

    /// The chosen start instant is not strictly after server-now
    #[error("the scheduled start must be in the future")]
    ScheduledStartInPast,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Outcome of an operation whose failure is tolerated
///
/// `Ignored` marks a swallowed error: the failure was logged and dropped
/// on purpose, not forgotten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestEffort<T> {
    Done(T),
    Ignored,
}

/// Run a best-effort result through the log-and-drop policy
pub fn best_effort<T, E: std::fmt::Display>(what: &str, result: Result<T, E>) -> BestEffort<T> {
    match result {
        Ok(value) => BestEffort::Done(value),
        Err(e) => {
            warn!("{what} failed (ignored): {e}");
            BestEffort::Ignored
        }
    }
}

/// Create the challenge, then fan out the best-effort side effects
///
/// Creation must succeed before anything else happens. Invitations fire
/// concurrently once the challenge id exists and individual failures are
/// absorbed; push registration is spawned and never awaited.
pub async fn submit_challenge(
    state: &WizardState,
    backend: &Arc<dyn ChallengeBackend>,
    clock: &ServerClock,
    push: &Arc<dyn PushRegistrar>,
) -> Result<CreatedChallenge, SubmitError> {
    let mode = state.mode.ok_or(SubmitError::IncompleteForm)?;
    let challenge_type = state.challenge_type.ok_or(SubmitError::IncompleteForm)?;
    let form = &state.form;

    if mode.is_social() && form.win_condition.is_none() {
        return Err(SubmitError::IncompleteForm);
    }

    let duration_days = i64::from(form.duration.days());
    let server_now = clock.now();
    let starts_at = match form.start {
        // One minute of headroom so the server's own "has it started"
        // check cannot race the request.
        StartChoice::Now => server_now + Duration::minutes(1),
        StartChoice::Scheduled(instant) if instant > server_now => instant,
        StartChoice::Scheduled(_) => return Err(SubmitError::ScheduledStartInPast),
    };
    let ends_at = starts_at + Duration::days(duration_days);

    let goal_value = form.parsed_goal().ok_or(SubmitError::IncompleteForm)?;
    let custom_unit = form.custom_unit.trim();
    let goal_unit = match challenge_type.default_unit() {
        Some(unit) => unit.to_string(),
        None => custom_unit.to_string(),
    };

    let input = NewChallenge {
        title: form.name.trim().to_string(),
        description: Some(form.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        challenge_type,
        custom_activity: (challenge_type == ChallengeType::Custom)
            .then(|| custom_unit.to_string()),
        goal_value,
        goal_unit,
        starts_at,
        ends_at,
        win_condition: if mode.is_social() {
            form.win_condition
        } else {
            None
        },
        daily_target: form.parsed_daily_target(),
        allowed_workouts: allowed_workout_subset(challenge_type, &form.workout_kinds),
    };

    let created = backend.create_challenge(&input).await?;
    info!(challenge_id = %created.id, "challenge created");

    if mode == ChallengeMode::Social && !state.selected_friends.is_empty() {
        let invites = state.selected_friends.iter().map(|friend_id| {
            let backend = Arc::clone(backend);
            let invite = ChallengeInvite {
                challenge_id: created.id.clone(),
                user_id: friend_id.clone(),
            };
            async move {
                let result = backend.invite_user(&invite).await;
                (invite.user_id, result)
            }
        });

        // All invitations fire together; none of them can fail the
        // submission or each other.
        for (user_id, result) in future::join_all(invites).await {
            best_effort(&format!("invitation for {user_id}"), result);
        }
    }

    let push = Arc::clone(push);
    tokio::spawn(async move {
        best_effort("push registration", push.request_registration().await);
    });

    Ok(created)
}

/// Workout kinds to send, or `None` when the selection means "all allowed"
///
/// Empty and full selections are both omitted; only a strict, non-empty
/// subset restricts the challenge.
fn allowed_workout_subset(
    challenge_type: ChallengeType,
    kinds: &[WorkoutKind],
) -> Option<Vec<WorkoutKind>> {
    if challenge_type != ChallengeType::Workouts {
        return None;
    }
    if kinds.is_empty() || kinds.len() == WorkoutKind::ALL.len() {
        return None;
    }
    Some(kinds.to_vec())
}
