//! Create command: the interactive wizard host
//!
//! A line-oriented driver for the creation wizard. The controller owns all
//! wizard state; this host only renders the current step and turns input
//! lines into wizard events.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use tracing::warn;

use rally::config::Config;
use rally::domain::{
    preset_by_id, search_friends, ChallengeMode, ChallengeType, DurationChoice, Friend,
    StartChoice, Step, WinCondition, WorkoutKind, DURATION_PRESETS,
};
use rally::wizard::{BackOutcome, WizardController, WizardEvent};

use super::host;

const TYPES: [ChallengeType; 5] = [
    ChallengeType::Steps,
    ChallengeType::ActiveMinutes,
    ChallengeType::Workouts,
    ChallengeType::Distance,
    ChallengeType::Custom,
];

/// Run the creation wizard interactively
pub async fn create_command(config: &Config) -> Result<()> {
    let collab = host::connect(config);

    // Friends load up-front; the invite step renders whatever arrived.
    let friends = match collab.backend.friends().await {
        Ok(friends) => friends,
        Err(e) => {
            warn!("failed to load friends: {e}");
            Vec::new()
        }
    };

    let mut controller = WizardController::new(collab.backend, collab.clock, collab.push);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let search_limit = config.settings.friend_search_limit;

    loop {
        let keep_going = match controller.state().current_step {
            Step::Mode => step_mode(&mut controller, &mut input)?,
            Step::Type => step_type(&mut controller, &mut input)?,
            Step::WorkoutPicker => step_workout_picker(&mut controller, &mut input)?,
            Step::Details => step_details(&mut controller, &mut input)?,
            Step::Invite => step_invite(&mut controller, &mut input, &friends, search_limit)?,
            Step::Review => step_review(&mut controller, &mut input).await?,
            Step::Success => {
                println!("\nChallenge created! Press Enter to finish.");
                prompt(&mut input, "")?;
                controller.done();
                return Ok(());
            }
        };

        if !keep_going {
            return Ok(());
        }
    }
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

/// Back press shared by every step; returns false when the wizard closes
fn handle_back(controller: &mut WizardController, input: &mut impl BufRead) -> Result<bool> {
    match controller.back() {
        BackOutcome::Moved(_) => Ok(true),
        BackOutcome::CloseRequested { confirm_discard } => {
            if !confirm_discard {
                return Ok(false);
            }
            let answer = prompt(input, "Discard this challenge? [y/N] ")?;
            Ok(!answer.eq_ignore_ascii_case("y"))
        }
    }
}

fn step_mode(controller: &mut WizardController, input: &mut impl BufRead) -> Result<bool> {
    println!("\n== Create a challenge ==");
    println!("  1) Solo goal");
    println!("  2) Social challenge");

    match prompt(input, "Pick a mode (b to leave): ")?.as_str() {
        "1" => controller.dispatch(WizardEvent::ModeSelected(ChallengeMode::Solo)),
        "2" => controller.dispatch(WizardEvent::ModeSelected(ChallengeMode::Social)),
        "b" | "q" => return handle_back(controller, input),
        other => println!("Unknown choice: {other}"),
    }
    Ok(true)
}

fn step_type(controller: &mut WizardController, input: &mut impl BufRead) -> Result<bool> {
    println!("\n== What are you tracking? ==");
    for (i, ty) in TYPES.iter().enumerate() {
        println!("  {}) {}", i + 1, ty.label());
    }

    let answer = prompt(input, "Pick a type (b to go back): ")?;
    if answer == "b" {
        return handle_back(controller, input);
    }
    match answer.parse::<usize>().ok().and_then(|n| TYPES.get(n - 1)) {
        Some(ty) => controller.dispatch(WizardEvent::TypeSelected(*ty)),
        None => println!("Unknown choice: {answer}"),
    }
    Ok(true)
}

fn step_workout_picker(
    controller: &mut WizardController,
    input: &mut impl BufRead,
) -> Result<bool> {
    println!("\n== Which workouts count? (none selected = all) ==");
    for (i, kind) in WorkoutKind::ALL.iter().enumerate() {
        let mark = if controller.state().form.workout_kinds.contains(kind) {
            "x"
        } else {
            " "
        };
        println!("  {}) [{mark}] {}", i + 1, kind.label());
    }

    let cta = controller.cta_label().unwrap_or_default();
    let answer = prompt(input, &format!("Toggle a number, or c = {cta}, b = back: "))?;
    match answer.as_str() {
        "c" => controller.dispatch(WizardEvent::ContinuePressed),
        "b" => return handle_back(controller, input),
        _ => match answer
            .parse::<usize>()
            .ok()
            .and_then(|n| WorkoutKind::ALL.get(n - 1))
        {
            Some(kind) => controller.dispatch(WizardEvent::WorkoutToggled(*kind)),
            None => println!("Unknown choice: {answer}"),
        },
    }
    Ok(true)
}

fn step_details(controller: &mut WizardController, input: &mut impl BufRead) -> Result<bool> {
    let state = controller.state();
    let form = &state.form;
    let is_custom = state.challenge_type == Some(ChallengeType::Custom);
    let is_social = state.mode.is_some_and(|m| m.is_social());

    println!("\n== Challenge details ==");
    println!("  n) Name:         {}", form.name);
    println!("  g) Goal:         {}", form.goal);
    if is_custom {
        println!("  u) Unit:         {}", form.custom_unit);
    }
    println!("  d) Description:  {}", form.description);
    println!("  t) Daily target: {}", form.daily_target);
    println!("  l) Duration:     {} days", form.duration.days());
    match form.start {
        StartChoice::Now => println!("  s) Start:        right away"),
        StartChoice::Scheduled(at) => println!("  s) Start:        {at}"),
    }
    if is_social {
        let win = form
            .win_condition
            .map(|w| w.label())
            .unwrap_or("not chosen");
        println!("  w) Win rule:     {win}");
    }

    let answer = prompt(input, "Edit a field, or c = Continue, b = back: ")?;
    match answer.as_str() {
        "n" => {
            let name = prompt(input, "Name: ")?;
            controller.dispatch(WizardEvent::NameChanged(name));
        }
        "g" => {
            let goal = prompt(input, "Goal (a positive number): ")?;
            controller.dispatch(WizardEvent::GoalChanged(goal));
        }
        "u" if is_custom => {
            let unit = prompt(input, "Unit (e.g. laps): ")?;
            controller.dispatch(WizardEvent::CustomUnitChanged(unit));
        }
        "d" => {
            let description = prompt(input, "Description: ")?;
            controller.dispatch(WizardEvent::DescriptionChanged(description));
        }
        "t" => {
            let target = prompt(input, "Daily target (empty for none): ")?;
            controller.dispatch(WizardEvent::DailyTargetChanged(target));
        }
        "l" => {
            let ids: Vec<&str> = DURATION_PRESETS.iter().map(|p| p.id).collect();
            let raw = prompt(input, &format!("Duration ({} or days): ", ids.join("/")))?;
            if let Some(preset) = preset_by_id(&raw) {
                controller.dispatch(WizardEvent::DurationChanged(DurationChoice::Preset(preset)));
            } else if let Ok(days) = raw.parse::<u32>() {
                if days > 0 {
                    controller.dispatch(WizardEvent::DurationChanged(DurationChoice::Custom(days)));
                } else {
                    println!("Duration must be at least one day");
                }
            } else {
                println!("Unknown duration: {raw}");
            }
        }
        "s" => {
            let raw = prompt(input, "Start (\"now\" or an RFC3339 instant): ")?;
            if raw.eq_ignore_ascii_case("now") {
                controller.dispatch(WizardEvent::StartChanged(StartChoice::Now));
            } else {
                match DateTime::parse_from_rfc3339(&raw) {
                    Ok(at) => controller.dispatch(WizardEvent::StartChanged(
                        StartChoice::Scheduled(at.with_timezone(&Utc)),
                    )),
                    Err(e) => println!("Not a valid instant: {e}"),
                }
            }
        }
        "w" if is_social => {
            println!("  1) {}", WinCondition::FirstToGoal.label());
            println!("  2) {}", WinCondition::HighestTotal.label());
            match prompt(input, "Win rule: ")?.as_str() {
                "1" => controller
                    .dispatch(WizardEvent::WinConditionChanged(WinCondition::FirstToGoal)),
                "2" => controller
                    .dispatch(WizardEvent::WinConditionChanged(WinCondition::HighestTotal)),
                other => println!("Unknown choice: {other}"),
            }
        }
        "c" => {
            if controller.is_cta_disabled() {
                println!("Name and a positive goal are required first");
            } else {
                controller.dispatch(WizardEvent::ContinuePressed);
            }
        }
        "b" => return handle_back(controller, input),
        other => println!("Unknown choice: {other}"),
    }
    Ok(true)
}

fn step_invite(
    controller: &mut WizardController,
    input: &mut impl BufRead,
    friends: &[Friend],
    search_limit: usize,
) -> Result<bool> {
    println!("\n== Invite friends ==");
    if friends.is_empty() {
        println!("  (no friends available)");
    }
    for (i, friend) in friends.iter().enumerate() {
        let mark = if controller
            .state()
            .selected_friends
            .contains(&friend.id)
        {
            "x"
        } else {
            " "
        };
        println!("  {}) [{mark}] {}", i + 1, friend.name);
    }

    let cta = controller.cta_label().unwrap_or_default();
    let answer = prompt(
        input,
        &format!("Toggle a number, /name to search, c = {cta}, b = back: "),
    )?;
    match answer.as_str() {
        "c" => controller.dispatch(WizardEvent::ContinuePressed),
        "b" => return handle_back(controller, input),
        _ if answer.starts_with('/') => {
            let matches = search_friends(friends, &answer[1..], search_limit);
            if matches.is_empty() {
                println!("No matches");
            }
            for friend in matches {
                println!("  {}", friend.name);
            }
        }
        _ => match answer.parse::<usize>().ok().and_then(|n| friends.get(n - 1)) {
            Some(friend) => controller.dispatch(WizardEvent::FriendToggled(friend.id.clone())),
            None => println!("Unknown choice: {answer}"),
        },
    }
    Ok(true)
}

async fn step_review(
    controller: &mut WizardController,
    input: &mut impl BufRead,
) -> Result<bool> {
    let state = controller.state();
    let form = &state.form;

    println!("\n== Review ==");
    println!("  Name:     {}", form.name);
    if let Some(ty) = state.challenge_type {
        let unit = ty.default_unit().unwrap_or(form.custom_unit.trim());
        println!("  Goal:     {} {} ({})", form.goal.trim(), unit, ty.label());
    }
    println!("  Duration: {} days", form.duration.days());
    match form.start {
        StartChoice::Now => println!("  Start:    right away"),
        StartChoice::Scheduled(at) => println!("  Start:    {at}"),
    }
    if state.mode.is_some_and(|m| m.is_social()) {
        println!("  Friends:  {} invited", state.selected_friends.len());
    }
    if let Some(error) = &state.submit_error {
        println!("  Last attempt failed: {error}");
    }

    let cta = controller.cta_label().unwrap_or_default();
    match prompt(input, &format!("c = {cta}, b = back: "))?.as_str() {
        "c" => {
            if let Err(e) = controller.submit().await {
                println!("Could not create the challenge: {e}");
            }
        }
        "b" => return handle_back(controller, input),
        other => println!("Unknown choice: {other}"),
    }
    Ok(true)
}
