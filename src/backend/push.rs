//! Push-registration collaborators

use async_trait::async_trait;
use tracing::debug;

use super::api::{BackendError, PushRegistrar};

/// Registrar for hosts without push support (CLI, tests)
///
/// Accepts every request and does nothing, so the wizard's fire-and-forget
/// registration step behaves the same with or without a push transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPushRegistrar;

#[async_trait]
impl PushRegistrar for NoopPushRegistrar {
    async fn request_registration(&self) -> Result<(), BackendError> {
        debug!("push registration requested (noop)");
        Ok(())
    }
}
