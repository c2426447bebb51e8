//! End-to-end wizard flows against a recording backend

mod common;

use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use common::{controller_with, fill_details, Call, RecordingBackend, RecordingPush};
use rally::backend::ServerClock;
use rally::domain::{ChallengeMode, ChallengeType, Step, StartChoice, WinCondition, WorkoutKind};
use rally::wizard::{BackOutcome, SubmitError, WizardEvent};

#[tokio::test]
async fn solo_steps_challenge_submits_directly_from_review() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    // Server runs half an hour ahead of the local clock.
    let clock = ServerClock::with_offset(Duration::minutes(30));
    let mut controller = controller_with(backend.clone(), clock.clone(), push);

    fill_details(
        &mut controller,
        ChallengeMode::Solo,
        ChallengeType::Steps,
        "Daily steps",
        "70000",
    );
    controller.dispatch(WizardEvent::ContinuePressed);
    // Solo mode goes straight to review; the invite step is never visited.
    assert_eq!(controller.state().current_step, Step::Review);
    assert!(!controller.visible_steps().contains(&Step::Invite));

    let before = clock.now();
    controller.submit().await.unwrap();
    let after = clock.now();

    assert_eq!(controller.state().current_step, Step::Success);

    let created = backend.created().await;
    assert_eq!(created.len(), 1);
    let input = &created[0];

    assert_eq!(input.title, "Daily steps");
    assert_eq!(input.goal_value, 70000);
    assert_eq!(input.goal_unit, "steps");
    assert_eq!(input.win_condition, None);

    // Start is server-now plus the one-minute race buffer.
    assert!(input.starts_at >= before + Duration::minutes(1));
    assert!(input.starts_at <= after + Duration::minutes(1));
    assert_eq!(input.ends_at, input.starts_at + Duration::days(7));

    // No invitations for a solo goal.
    assert_eq!(backend.calls().await, vec![Call::Create]);
}

#[tokio::test]
async fn social_workout_challenge_invites_after_creation() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let mut controller = controller_with(backend.clone(), ServerClock::new(), push);

    fill_details(
        &mut controller,
        ChallengeMode::Social,
        ChallengeType::Workouts,
        "Sweat squad",
        "20",
    );
    // Selecting every workout kind means "all allowed".
    for kind in WorkoutKind::ALL {
        controller.dispatch(WizardEvent::WorkoutToggled(kind));
    }
    controller.dispatch(WizardEvent::ContinuePressed);
    assert_eq!(controller.state().current_step, Step::Invite);

    controller.dispatch(WizardEvent::FriendToggled("f1".to_string()));
    controller.dispatch(WizardEvent::FriendToggled("f2".to_string()));
    controller.dispatch(WizardEvent::ContinuePressed);
    assert_eq!(controller.state().current_step, Step::Review);

    controller.submit().await.unwrap();
    assert_eq!(controller.state().current_step, Step::Success);

    let calls = backend.calls().await;
    assert_eq!(calls.len(), 3);
    // Creation strictly precedes every invitation; the two invitations
    // run concurrently and may land in either order.
    assert_eq!(calls[0], Call::Create);
    assert!(calls[1..].contains(&Call::Invite("f1".to_string())));
    assert!(calls[1..].contains(&Call::Invite("f2".to_string())));

    let input = &backend.created().await[0];
    assert_eq!(input.allowed_workouts, None);
    assert_eq!(input.win_condition, Some(WinCondition::FirstToGoal));
}

#[tokio::test]
async fn strict_workout_subset_is_sent() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let mut controller = controller_with(backend.clone(), ServerClock::new(), push);

    fill_details(
        &mut controller,
        ChallengeMode::Solo,
        ChallengeType::Workouts,
        "Swim and run",
        "12",
    );
    controller.dispatch(WizardEvent::WorkoutToggled(WorkoutKind::Run));
    controller.dispatch(WizardEvent::WorkoutToggled(WorkoutKind::Swim));
    controller.dispatch(WizardEvent::ContinuePressed);

    controller.submit().await.unwrap();

    let input = &backend.created().await[0];
    assert_eq!(
        input.allowed_workouts,
        Some(vec![WorkoutKind::Run, WorkoutKind::Swim])
    );
}

#[tokio::test]
async fn custom_type_uses_the_trimmed_unit() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let mut controller = controller_with(backend.clone(), ServerClock::new(), push);

    fill_details(
        &mut controller,
        ChallengeMode::Solo,
        ChallengeType::Custom,
        "Pool month",
        "40",
    );
    controller.dispatch(WizardEvent::CustomUnitChanged(" laps ".to_string()));
    controller.dispatch(WizardEvent::ContinuePressed);

    controller.submit().await.unwrap();

    let input = &backend.created().await[0];
    assert_eq!(input.goal_unit, "laps");
    assert_eq!(input.custom_activity.as_deref(), Some("laps"));
}

#[tokio::test]
async fn scheduled_start_in_the_past_aborts_before_the_backend() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let clock = ServerClock::new();
    let mut controller = controller_with(backend.clone(), clock.clone(), push);

    fill_details(
        &mut controller,
        ChallengeMode::Solo,
        ChallengeType::Steps,
        "Too late",
        "1000",
    );
    controller.dispatch(WizardEvent::StartChanged(StartChoice::Scheduled(
        clock.now() - Duration::hours(1),
    )));
    controller.dispatch(WizardEvent::ContinuePressed);

    let result = controller.submit().await;
    assert!(matches!(result, Err(SubmitError::ScheduledStartInPast)));

    let state = controller.state();
    assert_eq!(state.current_step, Step::Review);
    assert!(!state.is_submitting);
    assert!(state.submit_error.is_some());
    assert!(backend.calls().await.is_empty());
}

#[tokio::test]
async fn scheduled_start_in_the_future_is_used_verbatim() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let clock = ServerClock::new();
    let mut controller = controller_with(backend.clone(), clock.clone(), push);

    let start = Utc::now() + Duration::hours(2);
    fill_details(
        &mut controller,
        ChallengeMode::Solo,
        ChallengeType::Distance,
        "Evening ride",
        "120",
    );
    controller.dispatch(WizardEvent::StartChanged(StartChoice::Scheduled(start)));
    controller.dispatch(WizardEvent::ContinuePressed);

    controller.submit().await.unwrap();

    let input = &backend.created().await[0];
    assert_eq!(input.starts_at, start);
    assert_eq!(input.ends_at, start + Duration::days(7));
    assert_eq!(input.goal_unit, "km");
}

#[tokio::test]
async fn creation_rejection_keeps_the_form_for_retry() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let mut controller = controller_with(backend.clone(), ServerClock::new(), push);

    fill_details(
        &mut controller,
        ChallengeMode::Solo,
        ChallengeType::Steps,
        "Daily steps",
        "70000",
    );
    controller.dispatch(WizardEvent::ContinuePressed);

    backend.reject_next_create("goal too high").await;
    let form_before = controller.state().form.clone();

    let result = controller.submit().await;
    assert_eq!(result.unwrap_err().to_string(), "goal too high");

    let state = controller.state();
    assert_eq!(state.current_step, Step::Review);
    assert!(!state.is_submitting);
    assert_eq!(state.submit_error.as_deref(), Some("goal too high"));
    assert_eq!(state.form, form_before);

    // Retry with the same data goes through once the backend accepts.
    controller.submit().await.unwrap();
    assert_eq!(controller.state().current_step, Step::Success);
    assert_eq!(backend.created().await[0].title, "Daily steps");
}

#[tokio::test]
async fn failed_invitations_never_fail_the_submission() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let mut controller = controller_with(backend.clone(), ServerClock::new(), push);

    fill_details(
        &mut controller,
        ChallengeMode::Social,
        ChallengeType::Steps,
        "Step-off",
        "50000",
    );
    controller.dispatch(WizardEvent::FriendToggled("f1".to_string()));
    controller.dispatch(WizardEvent::FriendToggled("f2".to_string()));
    controller.dispatch(WizardEvent::ContinuePressed);
    controller.dispatch(WizardEvent::ContinuePressed);

    backend.fail_invites_for("f1").await;

    controller.submit().await.unwrap();
    assert_eq!(controller.state().current_step, Step::Success);

    // Both invitations were attempted; only the healthy one landed.
    let calls = backend.calls().await;
    assert!(calls.contains(&Call::Invite("f1".to_string())));
    assert!(calls.contains(&Call::Invite("f2".to_string())));
    assert_eq!(backend.invites().await.len(), 1);
    assert_eq!(backend.invites().await[0].user_id, "f2");
}

#[tokio::test]
async fn push_registration_fires_after_success() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let mut controller = controller_with(backend, ServerClock::new(), push.clone());

    fill_details(
        &mut controller,
        ChallengeMode::Solo,
        ChallengeType::Steps,
        "Daily steps",
        "70000",
    );
    controller.dispatch(WizardEvent::ContinuePressed);
    controller.submit().await.unwrap();

    // The request is spawned, not awaited; give it a moment to land.
    tokio::time::timeout(StdDuration::from_secs(1), push.notify.notified())
        .await
        .expect("push registration was never requested");
    assert_eq!(push.requests().await, 1);
}

#[tokio::test]
async fn submission_is_only_available_from_review() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let mut controller = controller_with(backend.clone(), ServerClock::new(), push);

    fill_details(
        &mut controller,
        ChallengeMode::Solo,
        ChallengeType::Steps,
        "Daily steps",
        "70000",
    );
    // Still on details.
    let result = controller.submit().await;
    assert!(matches!(result, Err(SubmitError::NotOnReview)));
    assert!(backend.calls().await.is_empty());
}

#[tokio::test]
async fn back_from_the_first_step_asks_to_discard_only_when_dirty() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let mut controller = controller_with(backend, ServerClock::new(), push);

    assert_eq!(
        controller.back(),
        BackOutcome::CloseRequested {
            confirm_discard: false
        }
    );

    controller.dispatch(WizardEvent::ModeSelected(ChallengeMode::Solo));
    assert_eq!(controller.back(), BackOutcome::Moved(Step::Mode));
    assert_eq!(
        controller.back(),
        BackOutcome::CloseRequested {
            confirm_discard: true
        }
    );
}

#[tokio::test]
async fn back_retraces_the_computed_sequence() {
    let backend = RecordingBackend::new();
    let push = RecordingPush::new();
    let mut controller = controller_with(backend, ServerClock::new(), push);

    fill_details(
        &mut controller,
        ChallengeMode::Social,
        ChallengeType::Workouts,
        "Sweat squad",
        "20",
    );
    controller.dispatch(WizardEvent::ContinuePressed);
    controller.dispatch(WizardEvent::ContinuePressed);
    assert_eq!(controller.state().current_step, Step::Review);

    assert_eq!(controller.back(), BackOutcome::Moved(Step::Invite));
    assert_eq!(controller.back(), BackOutcome::Moved(Step::Details));
    assert_eq!(controller.back(), BackOutcome::Moved(Step::WorkoutPicker));
    assert_eq!(controller.back(), BackOutcome::Moved(Step::Type));
    assert_eq!(controller.back(), BackOutcome::Moved(Step::Mode));
}
