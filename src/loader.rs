//! Background feed loading.
//!
//! A dedicated thread owns the repository source and the cache.  It loads the
//! feed once at start-up and again whenever the UI sends
//! [`LoadRequest::Reload`], reporting each result over an [`mpsc`] channel.
//! Requests are handled one at a time, so at most one load is in flight.

use std::sync::mpsc;
use std::thread;

use chrono::Utc;

use crate::cache::CacheStore;
use crate::config::FeedConfig;
use crate::feed::{load_feed, FeedLoad};
use crate::source::RepoSource;

/// Messages sent from the UI thread to the loader.
pub enum LoadRequest {
    Reload,
}

/// Messages sent from the loader thread to the UI thread.
pub enum LoadMsg {
    Loaded(FeedLoad),
}

/// Handles the UI keeps to talk to the loader.
pub struct Loader {
    pub requests: mpsc::Sender<LoadRequest>,
    pub results: mpsc::Receiver<LoadMsg>,
}

/// Spawn the loader thread and queue the initial load.
///
/// The thread exits when either side of the channel pair is dropped.
pub fn spawn(
    config: FeedConfig,
    source: Box<dyn RepoSource>,
    mut cache: Box<dyn CacheStore>,
) -> Loader {
    let (req_tx, req_rx) = mpsc::channel();
    let (tx, rx) = mpsc::channel();

    // Initial load.  The receiver is alive, so this cannot fail.
    let _ = req_tx.send(LoadRequest::Reload);

    thread::spawn(move || {
        while let Ok(LoadRequest::Reload) = req_rx.recv() {
            let load = load_feed(&config, source.as_ref(), cache.as_mut(), Utc::now());
            if tx.send(LoadMsg::Loaded(load)).is_err() {
                return;
            }
        }
        tracing::debug!("loader stopped");
    });

    Loader {
        requests: req_tx,
        results: rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::feed::FeedOutcome;
    use crate::source::fixtures::{day, make_repo};
    use crate::source::{FetchError, RepositorySummary};
    use std::time::Duration;

    struct StaticSource(Vec<RepositorySummary>);

    impl RepoSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        fn fetch(&self) -> Result<Vec<RepositorySummary>, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn recv(loader: &Loader) -> FeedLoad {
        match loader.results.recv_timeout(Duration::from_secs(5)).unwrap() {
            LoadMsg::Loaded(load) => load,
        }
    }

    #[test]
    fn loads_once_on_spawn_and_again_on_reload() {
        let config = FeedConfig { cache_ttl_secs: 3600, ..FeedConfig::default() };
        let loader = spawn(
            config,
            Box::new(StaticSource(vec![make_repo("a", day(1))])),
            Box::new(MemoryStore::new()),
        );

        let first = recv(&loader);
        assert!(!first.from_cache);
        assert!(matches!(first.outcome, FeedOutcome::Ready(ref items) if items.len() == 1));

        loader.requests.send(LoadRequest::Reload).unwrap();
        let second = recv(&loader);
        assert!(second.from_cache, "reload inside the TTL is served from cache");
    }
}
