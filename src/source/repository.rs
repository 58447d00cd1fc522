//! The repository record shared by every part of the feed pipeline.
//!
//! `RepositorySummary` is one public project as returned by the hosting API.
//! Sources decode their wire format into this struct; filtering, ordering,
//! caching and card rendering all work on it without knowing where it came
//! from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single public repository, normalised from the listing endpoint.
///
/// Ordering and pinning are applied by [`crate::feed`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Repository name, unique within the account.
    pub name: String,

    /// Free-text description; `None` when the owner left it blank.
    #[serde(default)]
    pub description: Option<String>,

    /// Primary language label as detected by the host.
    #[serde(default)]
    pub language: Option<String>,

    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,

    #[serde(rename = "forks_count", default)]
    pub forks: u64,

    /// Last update, used for recency ordering and "time ago" display.
    pub updated_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    /// Live deployment URL.  The API reports "no homepage" as either `null`
    /// or `""`; both decode to `None`.
    #[serde(default, deserialize_with = "non_empty")]
    pub homepage: Option<String>,

    /// Link to the repository page itself.
    pub html_url: String,

    /// Forks are never displayed.
    #[serde(default)]
    pub fork: bool,
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
