//! Collaborator wiring shared by the CLI commands

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use rally::backend::{
    ChallengeBackend, HttpBackend, MemoryBackend, NoopPushRegistrar, PushRegistrar, ServerClock,
    TimeSource,
};
use rally::config::Config;

/// Everything the wizard needs from the outside world
pub(crate) struct Collaborators {
    pub backend: Arc<dyn ChallengeBackend>,
    pub clock: ServerClock,
    pub push: Arc<dyn PushRegistrar>,
}

/// Build the collaborators for the configured backend
///
/// With no API configured the in-memory backend stands in, so the wizard
/// can be exercised offline. Either way the server clock starts its
/// background sync immediately.
pub(crate) fn connect(config: &Config) -> Collaborators {
    let clock = ServerClock::new();
    let interval = Duration::from_secs(config.settings.time_sync_secs);

    if config.api.is_offline() {
        info!("no API configured, using the in-memory backend");
        let backend = Arc::new(MemoryBackend::new());
        let time: Arc<dyn TimeSource> = backend.clone();
        // The sync task runs detached for the life of the process.
        let _ = clock.spawn_sync(time, interval);

        Collaborators {
            backend,
            clock,
            push: Arc::new(NoopPushRegistrar),
        }
    } else {
        let backend = Arc::new(HttpBackend::new(
            config.api.base_url.trim(),
            config.api.token(),
        ));
        let time: Arc<dyn TimeSource> = backend.clone();
        let _ = clock.spawn_sync(time, interval);

        Collaborators {
            backend: backend.clone(),
            clock,
            push: backend,
        }
    }
}
