use anyhow::{Context, Result};
use chrono::Duration;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "folio.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

/// Whose repositories to show and how to pick them.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FeedConfig {
    pub account: String,
    pub exclude: HashSet<String>,
    /// Names floated to the front regardless of recency.
    pub pinned: Vec<String>,
    pub per_page: u32,
    /// Zero disables caching.
    pub cache_ttl_secs: u64,
    pub api_base: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            account: "octocat".into(),
            exclude: HashSet::new(),
            pinned: Vec::new(),
            per_page: 50,
            cache_ttl_secs: 0,
            api_base: "https://api.github.com".into(),
        }
    }
}

impl FeedConfig {
    pub fn cache_ttl(&self) -> Duration {
        i64::try_from(self.cache_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }

    pub fn is_pinned(&self, name: &str) -> bool {
        self.pinned.iter().any(|p| p == name)
    }

    /// Stable summary of every setting that changes what a fetch keeps and
    /// how it is ordered.  A cached listing is only reused under the same
    /// fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut exclude: Vec<&str> = self.exclude.iter().map(String::as_str).collect();
        exclude.sort_unstable();
        format!(
            "{}|{}|{}|exclude={}|pinned={}",
            self.api_base.trim_end_matches('/'),
            self.account,
            self.per_page,
            exclude.join(","),
            self.pinned.join(","),
        )
    }

    /// Where users are sent when the listing cannot be loaded.
    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.account)
    }
}

/// Item caps for each presentation context.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ViewsConfig {
    pub home_max_items: usize,
    pub grid_max_items: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            home_max_items: 8,
            grid_max_items: 12,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).with_context(|| "Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, or fall back to defaults when the default path is simply
    /// absent.  An explicitly named file that is missing is an error.
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed.account.trim().is_empty() {
            anyhow::bail!("feed.account cannot be empty");
        }
        if self.views.home_max_items == 0 || self.views.grid_max_items == 0 {
            anyhow::bail!("views.*_max_items must be positive");
        }
        Ok(())
    }
}
