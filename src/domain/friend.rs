//! Friends eligible for challenge invitations

use serde::{Deserialize, Serialize};

/// Unique identifier for a friend (assigned by the backend)
pub type FriendId = String;

/// A candidate invitee shown on the invite step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    /// Handle shown next to the name (e.g. "@ada")
    #[serde(default)]
    pub handle: Option<String>,
}

/// Search friends by name with fuzzy matching
///
/// Combines substring matching with Jaro-Winkler similarity so typos
/// still find the intended friend. Results are scored and sorted by
/// relevance; an empty query returns the list unfiltered (up to `limit`).
pub fn search_friends<'a>(friends: &'a [Friend], query: &str, limit: usize) -> Vec<&'a Friend> {
    use strsim::jaro_winkler;

    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return friends.iter().take(limit).collect();
    }

    // Minimum fuzzy similarity threshold (0.0 - 1.0)
    const FUZZY_THRESHOLD: f64 = 0.75;

    let mut results: Vec<(&Friend, u32)> = friends
        .iter()
        .filter_map(|friend| {
            let name_lower = friend.name.to_lowercase();
            let handle_lower = friend
                .handle
                .as_deref()
                .map(|h| h.trim_start_matches('@').to_lowercase())
                .unwrap_or_default();

            let mut score: u32 = 0;

            if name_lower == query_lower || handle_lower == query_lower {
                score += 1000;
            } else if name_lower.starts_with(&query_lower) || handle_lower.starts_with(&query_lower)
            {
                score += 500;
            } else if name_lower.contains(&query_lower) || handle_lower.contains(&query_lower) {
                score += 200;
            } else {
                let similarity = jaro_winkler(&name_lower, &query_lower);
                if similarity >= FUZZY_THRESHOLD {
                    score += (similarity * 100.0) as u32;
                }
            }

            if score > 0 {
                Some((friend, score))
            } else {
                None
            }
        })
        .collect();

    results.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name)));
    results.into_iter().take(limit).map(|(f, _)| f).collect()
}
