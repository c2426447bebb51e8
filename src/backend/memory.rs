//! In-memory backend for offline use

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{ChallengeId, ChallengeInvite, CreatedChallenge, Friend, NewChallenge};

use super::api::{BackendError, ChallengeBackend, TimeSource};

/// Backend that keeps everything in memory
///
/// Used by the CLI host when no API is configured. Applies the same
/// validation rules a real server would, so the wizard's error paths can
/// be exercised offline.
pub struct MemoryBackend {
    challenges: Mutex<Vec<(ChallengeId, NewChallenge)>>,
    invites: Mutex<Vec<ChallengeInvite>>,
    friends: Vec<Friend>,
}

impl MemoryBackend {
    /// Backend seeded with a demo friends list
    pub fn new() -> Self {
        Self::with_friends(demo_friends())
    }

    pub fn with_friends(friends: Vec<Friend>) -> Self {
        Self {
            challenges: Mutex::new(Vec::new()),
            invites: Mutex::new(Vec::new()),
            friends,
        }
    }

    /// Challenges created so far
    pub async fn challenges(&self) -> Vec<(ChallengeId, NewChallenge)> {
        self.challenges.lock().await.clone()
    }

    /// Invitations recorded so far
    pub async fn invites(&self) -> Vec<ChallengeInvite> {
        self.invites.lock().await.clone()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn demo_friends() -> Vec<Friend> {
    [
        ("f-ada", "Ada Lovelace", "@ada"),
        ("f-grace", "Grace Hopper", "@grace"),
        ("f-edsger", "Edsger Dijkstra", "@edsger"),
        ("f-barbara", "Barbara Liskov", "@barbara"),
        ("f-alan", "Alan Kay", "@alan"),
    ]
    .into_iter()
    .map(|(id, name, handle)| Friend {
        id: id.to_string(),
        name: name.to_string(),
        handle: Some(handle.to_string()),
    })
    .collect()
}

#[async_trait]
impl ChallengeBackend for MemoryBackend {
    async fn create_challenge(
        &self,
        input: &NewChallenge,
    ) -> Result<CreatedChallenge, BackendError> {
        if input.title.trim().is_empty() {
            return Err(BackendError::Rejected(
                "challenge title is required".to_string(),
            ));
        }
        if input.goal_value <= 0 {
            return Err(BackendError::Rejected(
                "goal must be a positive number".to_string(),
            ));
        }
        if input.ends_at <= input.starts_at {
            return Err(BackendError::Rejected(
                "challenge must end after it starts".to_string(),
            ));
        }

        let id = Uuid::new_v4().to_string();
        self.challenges.lock().await.push((id.clone(), input.clone()));
        Ok(CreatedChallenge { id })
    }

    async fn invite_user(&self, invite: &ChallengeInvite) -> Result<(), BackendError> {
        let challenges = self.challenges.lock().await;
        if !challenges.iter().any(|(id, _)| *id == invite.challenge_id) {
            return Err(BackendError::Rejected(format!(
                "unknown challenge: {}",
                invite.challenge_id
            )));
        }
        drop(challenges);

        let mut invites = self.invites.lock().await;
        // Duplicate invites are tolerated, not recorded twice.
        if !invites.contains(invite) {
            invites.push(invite.clone());
        }
        Ok(())
    }

    async fn friends(&self) -> Result<Vec<Friend>, BackendError> {
        Ok(self.friends.clone())
    }
}

#[async_trait]
impl TimeSource for MemoryBackend {
    async fn server_time(&self) -> Result<DateTime<Utc>, BackendError> {
        Ok(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::domain::ChallengeType;

    fn valid_input() -> NewChallenge {
        let starts_at = Utc::now() + Duration::minutes(1);
        NewChallenge {
            title: "Daily steps".to_string(),
            description: None,
            challenge_type: ChallengeType::Steps,
            custom_activity: None,
            goal_value: 70000,
            goal_unit: "steps".to_string(),
            starts_at,
            ends_at: starts_at + Duration::days(7),
            win_condition: None,
            daily_target: None,
            allowed_workouts: None,
        }
    }

    #[tokio::test]
    async fn create_and_invite_round_trip() {
        let backend = MemoryBackend::new();
        let created = backend.create_challenge(&valid_input()).await.unwrap();

        let invite = ChallengeInvite {
            challenge_id: created.id.clone(),
            user_id: "f-ada".to_string(),
        };
        backend.invite_user(&invite).await.unwrap();
        backend.invite_user(&invite).await.unwrap();

        assert_eq!(backend.invites().await.len(), 1);
    }

    #[tokio::test]
    async fn rejects_blank_titles_and_bad_windows() {
        let backend = MemoryBackend::new();

        let mut input = valid_input();
        input.title = "  ".to_string();
        assert!(backend.create_challenge(&input).await.is_err());

        let mut input = valid_input();
        input.ends_at = input.starts_at;
        assert!(backend.create_challenge(&input).await.is_err());
    }

    #[tokio::test]
    async fn invite_requires_an_existing_challenge() {
        let backend = MemoryBackend::new();
        let invite = ChallengeInvite {
            challenge_id: "nope".to_string(),
            user_id: "f-ada".to_string(),
        };
        assert!(backend.invite_user(&invite).await.is_err());
    }
}
