//! Friends command implementation

use anyhow::{Context, Result};

use rally::config::Config;
use rally::domain::search_friends;

use super::host;

/// List (or fuzzy-search) the friends available for invitations
pub async fn friends_command(config: &Config, query: Option<&str>) -> Result<()> {
    let collab = host::connect(config);
    let friends = collab
        .backend
        .friends()
        .await
        .context("Failed to load friends")?;

    let shown = match query {
        Some(q) => search_friends(&friends, q, config.settings.friend_search_limit),
        None => friends.iter().collect(),
    };

    if shown.is_empty() {
        println!("No friends found");
        return Ok(());
    }

    for friend in shown {
        match &friend.handle {
            Some(handle) => println!("{}  {} ({})", friend.id, friend.name, handle),
            None => println!("{}  {}", friend.id, friend.name),
        }
    }

    Ok(())
}
