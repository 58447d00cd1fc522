//! The project feed pipeline.
//!
//! ```text
//! cache hit? ──yes──────────────────────────────┐
//!     │ no                                      ▼
//!  fetch ─► filter ─► order ─► cache write ─► FeedOutcome ─► page(n) ─► cards
//! ```
//!
//! [`load_feed`] produces the full filtered and ordered sequence; each view
//! then takes its own prefix with [`FeedOutcome::page`], so one fetch serves
//! every presentation context.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::cache::{CacheStore, CachedFeedEntry, FEED_CACHE_KEY};
use crate::config::FeedConfig;
use crate::source::{RepoSource, RepositorySummary};

/// The listing could not be obtained or decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("feed unavailable: {reason}")]
pub struct FeedUnavailable {
    pub reason: String,
}

/// Result of a feed load, as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// At least one qualifying project, filtered and ordered.
    Ready(Vec<RepositorySummary>),
    /// The listing loaded but nothing survived filtering.
    Empty,
    Unavailable(FeedUnavailable),
}

impl FeedOutcome {
    fn from_items(items: Vec<RepositorySummary>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Ready(items)
        }
    }

    /// The full ordered sequence; empty unless `Ready`.
    pub fn items(&self) -> &[RepositorySummary] {
        match self {
            Self::Ready(items) => items,
            Self::Empty | Self::Unavailable(_) => &[],
        }
    }

    /// The first `max_items` entries.  Always a prefix of the full sequence.
    pub fn page(&self, max_items: usize) -> &[RepositorySummary] {
        let items = self.items();
        &items[..items.len().min(max_items)]
    }
}

/// A finished load and whether it was served without touching the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLoad {
    pub outcome: FeedOutcome,
    pub from_cache: bool,
}

/// Load the account's projects, consulting `cache` first.
///
/// Never fails: network, status and decoding problems all surface as
/// [`FeedOutcome::Unavailable`].  Failures are not cached.
pub fn load_feed(
    config: &FeedConfig,
    source: &dyn RepoSource,
    cache: &mut dyn CacheStore,
    now: DateTime<Utc>,
) -> FeedLoad {
    let ttl = config.cache_ttl();
    let fingerprint = config.fingerprint();

    if let Some(entry) = cache.get(FEED_CACHE_KEY) {
        if entry.fingerprint != fingerprint {
            tracing::debug!("cached projects were built under different settings, refetching");
        } else if entry.is_fresh(now, ttl) {
            tracing::debug!(count = entry.items.len(), fetched_at = %entry.fetched_at, "loaded projects from cache");
            return FeedLoad {
                outcome: FeedOutcome::from_items(entry.items),
                from_cache: true,
            };
        }
    }

    let repos = match source.fetch() {
        Ok(repos) => repos,
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "failed to fetch repositories");
            return FeedLoad {
                outcome: FeedOutcome::Unavailable(FeedUnavailable { reason: e.to_string() }),
                from_cache: false,
            };
        }
    };

    let fetched = repos.len();
    let items = arrange(repos, config);
    tracing::info!(source = source.name(), fetched, kept = items.len(), "fetched repositories");

    if ttl > chrono::Duration::zero() {
        cache.put(
            FEED_CACHE_KEY,
            CachedFeedEntry {
                fetched_at: now,
                fingerprint,
                items: items.clone(),
            },
        );
    }

    FeedLoad {
        outcome: FeedOutcome::from_items(items),
        from_cache: false,
    }
}

/// Drop forks and excluded names, then order pinned first and most recently
/// updated first within each group.
pub fn arrange(repos: Vec<RepositorySummary>, config: &FeedConfig) -> Vec<RepositorySummary> {
    let mut kept: Vec<RepositorySummary> = repos
        .into_iter()
        .filter(|r| !r.fork && !config.exclude.contains(&r.name))
        .collect();

    // Stable sort: equal timestamps keep the host's order.
    kept.sort_by_key(|r| (Reverse(config.is_pinned(&r.name)), Reverse(r.updated_at)));
    kept
}

/// Distinct primary languages, alphabetically.
pub fn languages(items: &[RepositorySummary]) -> Vec<String> {
    let mut langs: Vec<String> = items.iter().filter_map(|r| r.language.clone()).collect();
    langs.sort();
    langs.dedup();
    langs
}

/// Items whose primary language is `language`; `None` keeps everything.
/// Order is preserved, so the result is still pinned-then-recent.
pub fn filter_language<'a>(items: &'a [RepositorySummary], language: Option<&str>) -> Vec<&'a RepositorySummary> {
    items
        .iter()
        .filter(|r| language.is_none() || r.language.as_deref() == language)
        .collect()
}

/// One bar of the language chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub language: String,
    pub count: usize,
    /// Share of the charted total, rounded to one decimal.
    pub percent: f64,
}

/// The `top` most used languages, most common first (ties alphabetical).
///
/// Percentages are relative to the charted languages only, so the bars
/// always add up to roughly 100.
pub fn language_breakdown(items: &[RepositorySummary], top: usize) -> Vec<LanguageShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for lang in items.iter().filter_map(|r| r.language.as_deref()) {
        *counts.entry(lang).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // BTreeMap iteration is alphabetical and the sort is stable.
    ranked.sort_by_key(|&(_, count)| Reverse(count));
    ranked.truncate(top);

    let total: usize = ranked.iter().map(|&(_, c)| c).sum();
    ranked
        .into_iter()
        .map(|(language, count)| LanguageShare {
            language: language.to_string(),
            count,
            percent: (count as f64 / total as f64 * 1000.0).round() / 10.0,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
