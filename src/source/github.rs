//! GitHub REST listing source.
//!
//! Issues `GET {api_base}/users/{account}/repos?sort=updated&per_page={n}` and
//! decodes the JSON array into [`RepositorySummary`] values.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};

use super::{FetchError, RepoSource, RepositorySummary};

/// GitHub rejects requests without a user agent.
const AGENT: &str = concat!("folio-feed/", env!("CARGO_PKG_VERSION"));

/// Upper bound the API accepts for `per_page`.
const MAX_PER_PAGE: u32 = 100;

/// Public repositories of a single GitHub account.
pub struct GithubSource {
    client: Client,
    api_base: String,
    account: String,
    per_page: u32,
}

impl GithubSource {
    /// Create a new source.
    ///
    /// `per_page` is clamped to the API's accepted range; it should be large
    /// enough that filtering never under-fills the biggest view.
    pub fn new(api_base: &str, account: impl Into<String>, per_page: u32) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            account: account.into(),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// The listing URL this source requests.
    pub fn listing_url(&self) -> String {
        format!(
            "{}/users/{}/repos?sort=updated&per_page={}",
            self.api_base, self.account, self.per_page
        )
    }

    /// Decode a listing body.
    ///
    /// Pure (no I/O) so tests can exercise decoding without the network.  A
    /// body that is not an array of repository records fails as a whole; no
    /// partial list is returned.
    pub fn parse_listing(body: &[u8]) -> Result<Vec<RepositorySummary>, FetchError> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl RepoSource for GithubSource {
    fn name(&self) -> &str {
        &self.account
    }

    fn fetch(&self) -> Result<Vec<RepositorySummary>, FetchError> {
        let url = self.listing_url();
        tracing::debug!(%url, "requesting repository listing");

        let resp = self
            .client
            .get(&url)
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, "application/vnd.github+json")
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = resp.bytes()?;
        Self::parse_listing(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_url_uses_account_and_page_size() {
        let src = GithubSource::new("https://api.github.com/", "octocat", 50);
        assert_eq!(
            src.listing_url(),
            "https://api.github.com/users/octocat/repos?sort=updated&per_page=50"
        );
    }

    #[test]
    fn page_size_is_clamped() {
        let src = GithubSource::new("https://api.github.com", "octocat", 500);
        assert!(src.listing_url().ends_with("per_page=100"));

        let src = GithubSource::new("https://api.github.com", "octocat", 0);
        assert!(src.listing_url().ends_with("per_page=1"));
    }

    #[test]
    fn parse_listing_extracts_records() {
        let body = br#"[
          {
            "name": "first",
            "description": "First repo",
            "language": "Rust",
            "stargazers_count": 3,
            "forks_count": 0,
            "updated_at": "2024-01-03T00:00:00Z",
            "created_at": "2023-01-01T00:00:00Z",
            "homepage": null,
            "html_url": "https://github.com/octocat/first",
            "fork": false
          },
          {
            "name": "second",
            "description": null,
            "language": null,
            "stargazers_count": 0,
            "forks_count": 2,
            "updated_at": "2024-01-01T00:00:00Z",
            "created_at": "2023-01-01T00:00:00Z",
            "homepage": "https://second.dev",
            "html_url": "https://github.com/octocat/second",
            "fork": true
          }
        ]"#;

        let repos = GithubSource::parse_listing(body).unwrap();

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "first");
        assert_eq!(repos[0].language.as_deref(), Some("Rust"));
        assert_eq!(repos[1].homepage.as_deref(), Some("https://second.dev"));
        assert!(repos[1].fork);
    }

    #[test]
    fn non_array_body_is_malformed() {
        let body = br#"{ "message": "API rate limit exceeded" }"#;
        let err = GithubSource::parse_listing(body).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn one_bad_record_rejects_the_whole_listing() {
        let body = br#"[
          {
            "name": "ok",
            "updated_at": "2024-01-03T00:00:00Z",
            "created_at": "2024-01-03T00:00:00Z",
            "html_url": "https://github.com/octocat/ok"
          },
          { "name": "broken" }
        ]"#;
        assert!(GithubSource::parse_listing(body).is_err());
    }

    #[test]
    fn name_returns_account() {
        let src = GithubSource::new("https://api.github.com", "octocat", 30);
        assert_eq!(src.name(), "octocat");
    }
}
