//! Server-synchronized clock

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::api::TimeSource;

/// Clock that tracks the backend's notion of "now"
///
/// Holds the offset between server time and the local clock, refreshed in
/// the background from a [`TimeSource`]. `now()` is synchronous and never
/// performs a round-trip, so the submission path can read it directly.
#[derive(Debug, Clone, Default)]
pub struct ServerClock {
    /// Server time minus local time, in milliseconds
    offset_ms: Arc<AtomicI64>,
}

impl ServerClock {
    /// Clock with no offset (server time assumed equal to local time)
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock with a fixed initial offset
    pub fn with_offset(offset: Duration) -> Self {
        let clock = Self::new();
        clock.offset_ms
            .store(offset.num_milliseconds(), Ordering::Relaxed);
        clock
    }

    /// The current instant as the server knows it
    pub fn now(&self) -> DateTime<Utc> {
        Utc::now() + Duration::milliseconds(self.offset_ms.load(Ordering::Relaxed))
    }

    /// Record a freshly observed server instant
    pub fn observe(&self, server_now: DateTime<Utc>) {
        let offset = server_now.signed_duration_since(Utc::now());
        self.offset_ms
            .store(offset.num_milliseconds(), Ordering::Relaxed);
        debug!(offset_ms = offset.num_milliseconds(), "server clock synced");
    }

    /// Spawn a background task that keeps the clock synced
    ///
    /// Fetches immediately, then on the given interval. Fetch failures are
    /// logged and the previous offset stays in effect until the next tick.
    pub fn spawn_sync(
        &self,
        source: Arc<dyn TimeSource>,
        interval: StdDuration,
    ) -> tokio::task::JoinHandle<()> {
        let clock = self.clone();
        tokio::spawn(async move {
            loop {
                match source.server_time().await {
                    Ok(server_now) => clock.observe(server_now),
                    Err(e) => warn!("server time sync failed: {e}"),
                }
                tokio::time::sleep(interval).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsynced_clock_tracks_local_time() {
        let clock = ServerClock::new();
        let drift = clock.now().signed_duration_since(Utc::now());
        assert!(drift.num_seconds().abs() < 2);
    }

    #[test]
    fn observed_server_time_shifts_now() {
        let clock = ServerClock::new();
        clock.observe(Utc::now() + Duration::minutes(10));

        let drift = clock.now().signed_duration_since(Utc::now());
        assert!(drift >= Duration::minutes(9));
        assert!(drift <= Duration::minutes(11));
    }

    #[test]
    fn fixed_offset_constructor() {
        let clock = ServerClock::with_offset(Duration::hours(-1));
        let drift = clock.now().signed_duration_since(Utc::now());
        assert!(drift.num_minutes() <= -59);
    }
}
