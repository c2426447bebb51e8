use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a challenge (assigned by the backend)
pub type ChallengeId = String;

/// Whether a challenge is a personal goal or competed with friends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeMode {
    /// Competed with invited friends
    Social,
    /// Personal goal, no invitees
    Solo,
}

impl ChallengeMode {
    pub fn is_social(&self) -> bool {
        matches!(self, ChallengeMode::Social)
    }
}

/// The activity a challenge tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    Steps,
    ActiveMinutes,
    Workouts,
    Distance,
    /// User-defined activity with a user-supplied unit
    Custom,
}

impl ChallengeType {
    /// Default goal unit for the type; custom challenges carry their own
    pub fn default_unit(&self) -> Option<&'static str> {
        match self {
            ChallengeType::Steps => Some("steps"),
            ChallengeType::ActiveMinutes => Some("minutes"),
            ChallengeType::Workouts => Some("workouts"),
            ChallengeType::Distance => Some("km"),
            ChallengeType::Custom => None,
        }
    }

    /// Human-readable label for pickers and summaries
    pub fn label(&self) -> &'static str {
        match self {
            ChallengeType::Steps => "Steps",
            ChallengeType::ActiveMinutes => "Active minutes",
            ChallengeType::Workouts => "Workouts",
            ChallengeType::Distance => "Distance",
            ChallengeType::Custom => "Custom activity",
        }
    }
}

/// Workout sub-types offered by the workout picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Run,
    Ride,
    Swim,
    Strength,
    Yoga,
    Walk,
}

impl WorkoutKind {
    /// The full client-side catalog, in picker order
    pub const ALL: [WorkoutKind; 6] = [
        WorkoutKind::Run,
        WorkoutKind::Ride,
        WorkoutKind::Swim,
        WorkoutKind::Strength,
        WorkoutKind::Yoga,
        WorkoutKind::Walk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Run => "Run",
            WorkoutKind::Ride => "Ride",
            WorkoutKind::Swim => "Swim",
            WorkoutKind::Strength => "Strength",
            WorkoutKind::Yoga => "Yoga",
            WorkoutKind::Walk => "Walk",
        }
    }
}

/// How a social challenge is won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// First participant to reach the goal wins
    FirstToGoal,
    /// Highest total when the challenge ends wins
    HighestTotal,
}

impl WinCondition {
    pub fn label(&self) -> &'static str {
        match self {
            WinCondition::FirstToGoal => "First to goal",
            WinCondition::HighestTotal => "Highest total",
        }
    }
}

/// Creation payload sent to the backend
///
/// `allowed_workouts` is present only when a strict, non-empty subset of
/// the workout catalog was picked; an empty or full selection means "all
/// allowed" and is omitted rather than sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChallenge {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub challenge_type: ChallengeType,
    /// Activity name for custom challenges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_activity: Option<String>,
    pub goal_value: i64,
    pub goal_unit: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Required for social challenges, absent for solo goals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_condition: Option<WinCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_target: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_workouts: Option<Vec<WorkoutKind>>,
}

/// Backend acknowledgement of a created challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedChallenge {
    pub id: ChallengeId,
}

/// Invitation of a single friend to an existing challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeInvite {
    pub challenge_id: ChallengeId,
    pub user_id: super::FriendId,
}
