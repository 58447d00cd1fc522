//! Project card presentation.
//!
//! [`render_card`] turns a [`RepositorySummary`] into the display strings a
//! card needs.  It is a pure function of its inputs; the current time is
//! passed in so "time ago" labels are testable.

use chrono::{DateTime, Utc};

use crate::source::RepositorySummary;

/// Descriptions longer than this many characters are cut.
pub const DESCRIPTION_LIMIT: usize = 85;

pub const ELLIPSIS: &str = "...";
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";
pub const LANGUAGE_PLACEHOLDER: &str = "Code";

/// How repository names are turned into card titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    /// `my-cool-repo` → `my cool repo`
    Spaced,
    /// `my-cool-repo` → `My Cool Repo`
    TitleCase,
}

/// Everything a card shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub updated: String,
    pub code_url: String,
    pub live_url: Option<String>,
    pub pinned: bool,
}

pub fn render_card(item: &RepositorySummary, style: NameStyle, pinned: bool, now: DateTime<Utc>) -> ProjectCard {
    ProjectCard {
        title: display_name(&item.name, style),
        description: item
            .description
            .as_deref()
            .map(truncate_description)
            .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string()),
        language: item.language.clone().unwrap_or_else(|| LANGUAGE_PLACEHOLDER.to_string()),
        stars: item.stars,
        forks: item.forks,
        updated: time_ago(item.updated_at, now),
        code_url: item.html_url.clone(),
        live_url: item.homepage.clone(),
        pinned,
    }
}

pub fn display_name(name: &str, style: NameStyle) -> String {
    let spaced = name.replace('-', " ");
    match style {
        NameStyle::Spaced => spaced,
        NameStyle::TitleCase => spaced
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Cut to [`DESCRIPTION_LIMIT`] characters plus [`ELLIPSIS`].
pub fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

const UNITS: [(&str, i64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// Relative age such as `3 days ago`, or `just now` under a minute.
///
/// Timestamps in the future (clock skew) also read `just now`.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds();

    for (unit, size) in UNITS {
        let count = seconds / size;
        if count >= 1 {
            let plural = if count > 1 { "s" } else { "" };
            return format!("{count} {unit}{plural} ago");
        }
    }

    "just now".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixtures::{day, make_repo};
    use chrono::Duration;

    fn ago(secs: i64) -> String {
        let now = day(20);
        time_ago(now - Duration::seconds(secs), now)
    }

    // -- time_ago ------------------------------------------------------------

    #[test]
    fn time_ago_table() {
        assert_eq!(ago(45), "just now");
        assert_eq!(ago(3600), "1 hour ago");
        assert_eq!(ago(90_000), "1 day ago");
        assert_eq!(ago(31_536_000), "1 year ago");
        assert_eq!(ago(40_000_000), "1 year ago");
    }

    #[test]
    fn time_ago_pluralises() {
        assert_eq!(ago(120), "2 minutes ago");
        assert_eq!(ago(3 * 604_800), "3 weeks ago");
        assert_eq!(ago(2 * 2_592_000), "2 months ago");
    }

    #[test]
    fn time_ago_future_is_just_now() {
        let now = day(20);
        assert_eq!(time_ago(now + Duration::hours(3), now), "just now");
    }

    // -- description ---------------------------------------------------------

    #[test]
    fn long_description_is_truncated() {
        let text = "x".repeat(90);
        let out = truncate_description(&text);
        assert_eq!(out, format!("{}...", "x".repeat(85)));
    }

    #[test]
    fn short_description_is_unchanged() {
        let text = "y".repeat(85);
        assert_eq!(truncate_description(&text), text);
        assert_eq!(truncate_description("short"), "short");
    }

    #[test]
    fn truncation_counts_characters() {
        let text = "é".repeat(90);
        let out = truncate_description(&text);
        assert_eq!(out.chars().count(), 85 + ELLIPSIS.len());
    }

    // -- names ---------------------------------------------------------------

    #[test]
    fn display_name_styles() {
        assert_eq!(display_name("sales-forecast-model", NameStyle::Spaced), "sales forecast model");
        assert_eq!(display_name("sales-forecast-model", NameStyle::TitleCase), "Sales Forecast Model");
        assert_eq!(display_name("a--b", NameStyle::TitleCase), "A  B");
    }

    // -- render_card ---------------------------------------------------------

    #[test]
    fn card_uses_placeholders() {
        let repo = make_repo("bare-repo", day(19));
        let card = render_card(&repo, NameStyle::Spaced, false, day(20));

        assert_eq!(card.title, "bare repo");
        assert_eq!(card.description, DESCRIPTION_PLACEHOLDER);
        assert_eq!(card.language, LANGUAGE_PLACEHOLDER);
        assert_eq!(card.updated, "1 day ago");
        assert!(card.live_url.is_none());
        assert!(!card.pinned);
    }

    #[test]
    fn card_carries_repo_fields() {
        let repo = RepositorySummary {
            description: Some("Forecasting".into()),
            language: Some("Python".into()),
            stars: 7,
            forks: 2,
            homepage: Some("https://demo.example".into()),
            ..make_repo("forecast", day(13))
        };
        let card = render_card(&repo, NameStyle::TitleCase, true, day(20));

        assert_eq!(card.title, "Forecast");
        assert_eq!(card.description, "Forecasting");
        assert_eq!(card.language, "Python");
        assert_eq!((card.stars, card.forks), (7, 2));
        assert_eq!(card.updated, "1 week ago");
        assert_eq!(card.code_url, "https://github.com/octocat/forecast");
        assert_eq!(card.live_url.as_deref(), Some("https://demo.example"));
        assert!(card.pinned);
    }
}
