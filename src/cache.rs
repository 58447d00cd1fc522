//! Feed cache stores.
//!
//! A cache entry holds the filtered, ordered listing together with the moment
//! it was fetched.  Entries are replaced whole on every write; there is no
//! merging of old and new listings.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::source::RepositorySummary;

/// Fixed key the project feed is stored under.
pub const FEED_CACHE_KEY: &str = "github_projects_cache";

/// A cached, already filtered and ordered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedFeedEntry {
    pub fetched_at: DateTime<Utc>,
    /// Settings that shaped `items`; see [`crate::config::FeedConfig::fingerprint`].
    /// Files written without one never match.
    #[serde(default)]
    pub fingerprint: String,
    pub items: Vec<RepositorySummary>,
}

impl CachedFeedEntry {
    /// `true` while `0 <= now - fetched_at < ttl`.  A zero TTL is never
    /// valid, and neither is an entry stamped in the future.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let elapsed = now.signed_duration_since(self.fetched_at);
        elapsed >= Duration::zero() && elapsed < ttl
    }
}

/// Key/value storage for cache entries.
pub trait CacheStore: Send {
    fn get(&self, key: &str) -> Option<CachedFeedEntry>;

    /// Overwrite whatever is stored under `key`.
    fn put(&mut self, key: &str, entry: CachedFeedEntry);
}

/// Entries live for as long as the process does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, CachedFeedEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<CachedFeedEntry> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, entry: CachedFeedEntry) {
        self.entries.insert(key.to_string(), entry);
    }
}

/// One JSON file per key under a directory, so a cached listing survives
/// restarts.
///
/// Read problems are treated as a miss and write problems are logged; the
/// cache is an optimisation and must never fail a load.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn write(&self, path: &Path, entry: &CachedFeedEntry) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(path, serde_json::to_vec(entry)?)?;
        Ok(())
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<CachedFeedEntry> {
        let path = self.path_for(key);
        let content = fs::read(&path).ok()?;
        match serde_json::from_slice(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt cache file");
                None
            }
        }
    }

    fn put(&mut self, key: &str, entry: CachedFeedEntry) {
        let path = self.path_for(key);
        if let Err(e) = self.write(&path, &entry) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write cache file");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
