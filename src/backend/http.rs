//! HTTP client for the Rally API

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{ChallengeInvite, CreatedChallenge, Friend, NewChallenge};

use super::api::{BackendError, ChallengeBackend, PushRegistrar, TimeSource};

/// JSON client for a remote Rally API
///
/// `ureq` is a blocking client, so every request runs on the blocking pool
/// and the async trait methods await the result.
pub struct HttpBackend {
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, token }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, BackendError> {
        let url = self.url(path);
        let token = self.token.clone();
        run_blocking(move || {
            let resp = with_auth(ureq::post(&url), token.as_deref())
                .send_json(body)
                .map_err(request_error)?;
            parse_body(resp)
        })
        .await
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, BackendError> {
        let url = self.url(path);
        let token = self.token.clone();
        run_blocking(move || {
            let resp = with_auth(ureq::get(&url), token.as_deref())
                .call()
                .map_err(request_error)?;
            parse_body(resp)
        })
        .await
    }
}

fn with_auth(mut req: ureq::Request, token: Option<&str>) -> ureq::Request {
    if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
        req = req.set("Authorization", &format!("Bearer {token}"));
    }
    req
}

/// Map a ureq error to a backend error, preferring the server's own message
fn request_error(e: ureq::Error) -> BackendError {
    match e {
        ureq::Error::Status(status, resp) => {
            let body = resp.into_string().unwrap_or_default();
            status_error(status, &body)
        }
        ureq::Error::Transport(t) => BackendError::Transport(t.to_string()),
    }
}

fn status_error(status: u16, body: &str) -> BackendError {
    let body = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
            return BackendError::Rejected(message.to_string());
        }
        if let Some(error) = value.get("error").and_then(|v| v.as_str()) {
            return BackendError::Rejected(error.to_string());
        }
    }

    let message = if body.is_empty() {
        "no response body".to_string()
    } else {
        body.to_string()
    };
    BackendError::Http { status, message }
}

fn parse_body(resp: ureq::Response) -> Result<serde_json::Value, BackendError> {
    resp.into_json()
        .map_err(|e| BackendError::Transport(e.to_string()))
}

async fn run_blocking<T>(
    f: impl FnOnce() -> Result<T, BackendError> + Send + 'static,
) -> Result<T, BackendError>
where
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?
}

#[async_trait]
impl ChallengeBackend for HttpBackend {
    async fn create_challenge(
        &self,
        input: &NewChallenge,
    ) -> Result<CreatedChallenge, BackendError> {
        let body =
            serde_json::to_value(input).map_err(|e| BackendError::Transport(e.to_string()))?;
        let value = self.post_json("/challenges", body).await?;
        serde_json::from_value(value).map_err(|e| BackendError::Transport(e.to_string()))
    }

    async fn invite_user(&self, invite: &ChallengeInvite) -> Result<(), BackendError> {
        let path = format!("/challenges/{}/invites", invite.challenge_id);
        let body = serde_json::json!({ "user_id": invite.user_id });
        self.post_json(&path, body).await?;
        Ok(())
    }

    async fn friends(&self) -> Result<Vec<Friend>, BackendError> {
        let value = self.get_json("/friends").await?;
        serde_json::from_value(value).map_err(|e| BackendError::Transport(e.to_string()))
    }
}

/// Wire shape of `GET /time`
#[derive(Debug, Deserialize)]
struct ServerTime {
    now: DateTime<Utc>,
}

#[async_trait]
impl TimeSource for HttpBackend {
    async fn server_time(&self) -> Result<DateTime<Utc>, BackendError> {
        let value = self.get_json("/time").await?;
        let time: ServerTime =
            serde_json::from_value(value).map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(time.now)
    }
}

#[async_trait]
impl PushRegistrar for HttpBackend {
    async fn request_registration(&self) -> Result<(), BackendError> {
        self.post_json("/push/register", serde_json::json!({})).await?;
        Ok(())
    }
}
