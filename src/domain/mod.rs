//! Core domain types for Rally

mod challenge;
mod duration;
mod form;
mod friend;
mod step;

pub use challenge::{
    ChallengeId, ChallengeInvite, ChallengeMode, ChallengeType, CreatedChallenge, NewChallenge,
    WinCondition, WorkoutKind,
};
pub use duration::{preset_by_id, DurationChoice, DurationPreset, DURATION_PRESETS};
pub use form::{ChallengeForm, StartChoice};
pub use friend::{search_friends, Friend, FriendId};
pub use step::Step;
