//! folio-feed, a portfolio project feed for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌────────────┐  LoadMsg   ┌──────────┐  draw()  ┌──────────┐
//! │ loader.rs  │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (thread)   │ ◄───────── │ (state)  │          │ (render) │
//! └────────────┘ LoadRequest└──────────┘          └──────────┘
//!       │                        ▲
//!   feed::load_feed              │ handle_key_event()
//!   (source + cache)        ┌──────────┐
//!                           │ input.rs │
//!                           └──────────┘
//! ```
//!
//! * **`source/`**: the `RepoSource` trait and the GitHub implementation.
//! * **`feed`**: fetch → filter → order → cache pipeline and paging.
//! * **`cache`**: in-memory and on-disk cache stores.
//! * **`card`**: turns a repository into display strings.
//! * **`reveal`**: one-shot fade-in state for cards.
//! * **`loader`**: runs loads on a background thread.
//! * **`app`** / **`ui`** / **`input`** / **`theme`**: the terminal front-end.
//! * **`main`**: wires everything together: parse args, load config, set
//!   up logging and the terminal, and run the event loop.

mod app;
mod cache;
mod card;
mod config;
mod feed;
mod input;
mod loader;
mod reveal;
mod source;
mod theme;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, Timelike, Utc};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use app::App;
use cache::{CacheStore, FileStore, MemoryStore};
use config::{Config, DEFAULT_CONFIG_PATH};
use loader::{LoadMsg, LoadRequest};
use source::GithubSource;
use theme::Theme;

const LOG_FILE: &str = "folio-feed.log";

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the panic message is printed.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// `folio-feed [CONFIG] [--cache-dir DIR]`
#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--cache-dir" => {
                    let dir = args.next().context("--cache-dir needs a directory")?;
                    parsed.cache_dir = Some(dir.into());
                }
                flag if flag.starts_with("--") => anyhow::bail!("unknown option: {flag}"),
                _ if parsed.config.is_some() => anyhow::bail!("unexpected argument: {arg}"),
                _ => parsed.config = Some(PathBuf::from(&arg)),
            }
        }
        Ok(parsed)
    }
}

fn init_logging() -> Result<()> {
    // The TUI owns stdout, so logs go to a file.
    let log_file = std::fs::File::create(LOG_FILE).with_context(|| format!("Failed to create {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio_feed=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    init_logging()?;

    let config_path = args.config.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());
    let config = Config::load_or_default(&config_path, args.config.is_some())?;
    tracing::info!(account = %config.feed.account, "starting");

    let source = GithubSource::new(&config.feed.api_base, config.feed.account.clone(), config.feed.per_page);
    let cache: Box<dyn CacheStore> = match &args.cache_dir {
        Some(dir) => Box::new(FileStore::new(dir)),
        None => Box::new(MemoryStore::new()),
    };
    let loader = loader::spawn(config.feed.clone(), Box::new(source), cache);

    install_panic_hook();
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(config, Theme::for_hour(Local::now().hour()));

    // Each iteration drains loader results, renders, then polls for input
    // for up to one tick.  Frames come faster while cards are fading in.
    let idle_tick = Duration::from_millis(250);
    let animation_tick = Duration::from_millis(80);

    loop {
        while let Ok(LoadMsg::Loaded(load)) = loader.results.try_recv() {
            app.apply_load(load);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f, Utc::now()))?;

        let tick_rate = if app.reveal.animating() { animation_tick } else { idle_tick };
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.reload_requested {
            app.reload_requested = false;
            if loader.requests.send(LoadRequest::Reload).is_err() {
                app.status = "Loader stopped; restart to reload".into();
            }
        }

        if app.quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_args_uses_defaults() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn config_and_cache_dir() {
        let args = parse(&["site.toml", "--cache-dir", "/tmp/folio"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("site.toml")));
        assert_eq!(args.cache_dir, Some(PathBuf::from("/tmp/folio")));
    }

    #[test]
    fn cache_dir_needs_value() {
        assert!(parse(&["--cache-dir"]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse(&["--verbose"]).is_err());
    }

    #[test]
    fn second_config_path_is_rejected() {
        let err = parse(&["site.toml", "other.toml"]).unwrap_err();
        assert!(err.to_string().contains("other.toml"));
    }
}
