//! Repository source abstraction layer.
//!
//! This module defines the [`RepoSource`] trait, the shared
//! [`RepositorySummary`] type and the [`FetchError`] taxonomy.  The concrete
//! GitHub implementation lives in [`github`].
//!
//! ## For contributors: adding a new host
//!
//! 1. Create a new file in this directory (e.g. `gitlab.rs`).
//! 2. Define a struct and implement [`RepoSource`] for it, decoding the host's
//!    listing format into [`RepositorySummary`] values.
//! 3. Add `mod gitlab;` below and re-export the struct.
//! 4. Construct it in `main.rs` instead of (or next to) `GithubSource`.
//!
//! Filtering, ordering, caching and rendering are all host-agnostic.

mod github;
mod repository;

pub use github::GithubSource;
pub use repository::RepositorySummary;

#[cfg(test)]
pub(crate) use repository::tests as fixtures;

use reqwest::StatusCode;

/// Everything that can go wrong while fetching a listing.
///
/// The feed layer folds every variant into a single "unavailable" outcome;
/// the distinction only matters for logs and the status line.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("malformed listing: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Trait that every repository source must implement.
///
/// The loader thread calls [`fetch()`](RepoSource::fetch) at most once per
/// load, so implementations must be [`Send`].
pub trait RepoSource: Send {
    /// Human-readable label used in logs.
    fn name(&self) -> &str;

    /// Fetch one page of the account's repositories, in whatever order the
    /// host returns them.
    fn fetch(&self) -> Result<Vec<RepositorySummary>, FetchError>;
}
