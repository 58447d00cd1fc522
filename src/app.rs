use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;

use crate::card::{render_card, NameStyle, ProjectCard};
use crate::config::Config;
use crate::feed::{self, FeedLoad, FeedOutcome};
use crate::reveal::RevealTracker;
use crate::source::RepositorySummary;
use crate::theme::Theme;

/// Presentation contexts.  Both page the same loaded sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Short "featured" strip of the most relevant projects.
    Home,
    /// Full projects grid with language filter and chart.
    Grid,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => " Featured projects ",
            Self::Grid => " All projects ",
        }
    }

    fn name_style(self) -> NameStyle {
        match self {
            Self::Home => NameStyle::Spaced,
            Self::Grid => NameStyle::TitleCase,
        }
    }
}

pub struct App {
    pub config: Config,
    /// `None` until the first load finishes.
    pub outcome: Option<FeedOutcome>,
    pub view: View,
    /// Grid-only language filter; `None` shows every language.
    pub language: Option<String>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    pub reveal: RevealTracker,
    pub theme: Theme,
    /// Set by input, drained by the main loop.
    pub reload_requested: bool,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last load status message.
    pub status: String,
}

impl App {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            config,
            outcome: None,
            view: View::Home,
            language: None,
            list_state: ListState::default(),
            reveal: RevealTracker::new(),
            theme,
            reload_requested: false,
            quit: false,
            status: "Loading projects…".into(),
        }
    }

    /// Replace the current listing with a finished load.
    pub fn apply_load(&mut self, load: FeedLoad) {
        self.status = match &load.outcome {
            FeedOutcome::Ready(items) if load.from_cache => format!("Loaded {} projects from cache", items.len()),
            FeedOutcome::Ready(items) => format!("Fetched {} projects", items.len()),
            FeedOutcome::Empty => "No projects found".into(),
            FeedOutcome::Unavailable(_) => format!(
                "Unable to load projects. Visit {} directly.",
                self.config.feed.profile_url()
            ),
        };

        // A language that no longer exists would leave the grid blank.
        if let Some(lang) = &self.language {
            if !feed::languages(load.outcome.items()).contains(lang) {
                self.language = None;
            }
        }

        self.outcome = Some(load.outcome);
        self.reveal.reset();
        self.list_state.select(None);
        *self.list_state.offset_mut() = 0;
    }

    /// Full filtered and ordered sequence, before paging.
    pub fn all_items(&self) -> &[RepositorySummary] {
        match &self.outcome {
            Some(outcome) => outcome.items(),
            None => &[],
        }
    }

    pub fn max_items(&self) -> usize {
        match self.view {
            View::Home => self.config.views.home_max_items,
            View::Grid => self.config.views.grid_max_items,
        }
    }

    /// Items the current view shows, in display order.
    pub fn visible_items(&self) -> Vec<&RepositorySummary> {
        let max = self.max_items();
        match (self.view, self.language.as_deref()) {
            (View::Grid, Some(language)) => {
                let mut items = feed::filter_language(self.all_items(), Some(language));
                items.truncate(max);
                items
            }
            _ => self
                .outcome
                .as_ref()
                .map(|outcome| outcome.page(max).iter().collect())
                .unwrap_or_default(),
        }
    }

    pub fn cards(&self, now: DateTime<Utc>) -> Vec<ProjectCard> {
        let style = self.view.name_style();
        self.visible_items()
            .into_iter()
            .map(|item| render_card(item, style, self.config.feed.is_pinned(&item.name), now))
            .collect()
    }

    /// Languages offered by the grid filter.
    pub fn languages(&self) -> Vec<String> {
        feed::languages(self.all_items())
    }

    // -- actions -------------------------------------------------------------

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            View::Home => View::Grid,
            View::Grid => View::Home,
        };
        self.list_state.select(None);
        *self.list_state.offset_mut() = 0;
    }

    /// all → first language → … → last language → all.  Grid only.
    pub fn cycle_language(&mut self) {
        if self.view != View::Grid {
            return;
        }
        let langs = self.languages();
        self.language = match &self.language {
            None => langs.first().cloned(),
            Some(current) => langs
                .iter()
                .position(|l| l == current)
                .and_then(|i| langs.get(i + 1).cloned()),
        };
        self.list_state.select(None);
        *self.list_state.offset_mut() = 0;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn request_reload(&mut self) {
        self.reload_requested = true;
        self.status = "Reloading…".into();
    }

    // -- navigation ----------------------------------------------------------

    fn len(&self) -> usize {
        self.visible_items().len()
    }

    pub fn select_next(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.len() > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }
}
