//! Settings configuration types

use serde::{Deserialize, Serialize};

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds between server-time refreshes
    #[serde(default = "default_time_sync_secs")]
    pub time_sync_secs: u64,

    /// Maximum number of results shown by friend search
    #[serde(default = "default_friend_search_limit")]
    pub friend_search_limit: usize,
}

fn default_time_sync_secs() -> u64 {
    300
}

fn default_friend_search_limit() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_sync_secs: default_time_sync_secs(),
            friend_search_limit: default_friend_search_limit(),
        }
    }
}
