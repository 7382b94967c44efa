// src/engine/mod.rs

//! Concurrent crawl engine.
//!
//! Seeds are admitted to the frontier at depth 0, then workers fetch
//! pages, extract and resolve links, and feed newly discovered URLs
//! back in. The run ends only when the frontier is empty and no task
//! is outstanding.

mod dispatcher;
mod frontier;
mod task;

use std::sync::Arc;

use chrono::Utc;
use url::Url;

pub use dispatcher::Dispatcher;
pub use frontier::Frontier;
pub use task::CrawlContext;

use crate::config::CrawlerConfig;
use crate::error::{AppError, Result};
use crate::models::{CrawlCounters, CrawlStats};
use crate::services::{Extractor, Fetcher, Resolver};
use crate::storage::Sink;

/// A configured crawl run over a set of collaborators.
pub struct CrawlEngine {
    ctx: Arc<CrawlContext>,
    workers: usize,
}

impl CrawlEngine {
    /// Create an engine from configuration and collaborators.
    pub fn new(
        config: &CrawlerConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        resolver: Arc<dyn Resolver>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            ctx: Arc::new(CrawlContext {
                frontier: Frontier::new(),
                fetcher,
                extractor,
                resolver,
                sink,
                max_depth: config.max_depth,
                counters: CrawlCounters::default(),
            }),
            workers: config.workers,
        }
    }

    /// The engine's frontier, for inspection after a run.
    pub fn frontier(&self) -> &Frontier {
        &self.ctx.frontier
    }

    /// Seed the frontier and crawl to exhaustion.
    pub async fn run(&self, seeds: &[String]) -> Result<CrawlStats> {
        if seeds.is_empty() {
            return Err(AppError::config("at least one seed URL is required"));
        }
        let started_at = Utc::now();

        for seed in seeds {
            let mut url = Url::parse(seed)
                .map_err(|e| AppError::config(format!("invalid seed URL '{seed}': {e}")))?;
            url.set_fragment(None);
            if !self.ctx.frontier.try_enqueue(&url, 0) {
                log::debug!("Duplicate seed ignored: {url}");
            }
        }

        let mut dispatcher = Dispatcher::new(self.workers);
        loop {
            while let Some(item) = self.ctx.frontier.dequeue() {
                dispatcher.submit(task::crawl(Arc::clone(&self.ctx), item));
            }
            dispatcher.drain().await;

            // A task finishing during drain may have fed the frontier
            // again; only an empty queue with nothing outstanding ends
            // the run.
            if self.ctx.frontier.is_empty() {
                break;
            }
        }

        let finished_at = Utc::now();
        Ok(CrawlStats {
            started_at,
            finished_at,
            workers: self.workers,
            max_depth: self.ctx.max_depth,
            urls_discovered: self.ctx.frontier.visited_count(),
            pages_fetched: self.ctx.counters.pages_fetched(),
            fetch_failures: self.ctx.counters.fetch_failures(),
            links_discovered: self.ctx.counters.links_discovered(),
            links_skipped: self.ctx.counters.links_skipped(),
            store_failures: self.ctx.counters.store_failures(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::error::FetchError;
    use crate::services::{HtmlExtractor, UrlResolver};
    use crate::storage::NullSink;

    /// Serves a fixed link graph and records every fetch attempt.
    #[derive(Default)]
    struct MockFetcher {
        pages: HashMap<String, String>,
        failures: HashSet<String>,
        fetch_count: AtomicUsize,
        fetched: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        fn with_page(mut self, url: &str, links: &[&str]) -> Self {
            self.pages.insert(url.to_string(), page(links));
            self
        }

        fn with_failure(mut self, url: &str) -> Self {
            self.failures.insert(url.to_string());
            self
        }

        fn fetch_count(&self) -> usize {
            self.fetch_count.load(Ordering::SeqCst)
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
            self.fetch_count.fetch_add(1, Ordering::SeqCst);
            self.fetched.lock().unwrap().push(url.to_string());

            if self.failures.contains(url) {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: 500,
                });
            }
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn page(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!("<a href=\"{href}\">link</a>"))
            .collect();
        format!("<html><body>{anchors}</body></html>")
    }

    fn engine(fetcher: Arc<MockFetcher>, workers: usize, max_depth: usize) -> CrawlEngine {
        let config = CrawlerConfig {
            workers,
            max_depth,
            ..CrawlerConfig::default()
        };
        CrawlEngine::new(
            &config,
            fetcher,
            Arc::new(HtmlExtractor::new().unwrap()),
            Arc::new(UrlResolver),
            Arc::new(NullSink),
        )
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_scenario_single_page_with_two_children() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_page("http://a/", &["/b", "/c"])
                .with_page("http://a/b", &[])
                .with_page("http://a/c", &[]),
        );
        let engine = engine(Arc::clone(&fetcher), 4, 1);

        let stats = engine.run(&["http://a".to_string()]).await.unwrap();

        assert_eq!(
            engine.frontier().visited_snapshot(),
            vec!["http://a/", "http://a/b", "http://a/c"]
        );
        assert_eq!(fetcher.fetch_count(), 3);
        assert_eq!(stats.pages_fetched, 3);
        assert_eq!(stats.urls_discovered, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_scenario_depth_zero_follows_no_links() {
        let fetcher = Arc::new(
            MockFetcher::default().with_page("http://a/", &["/b", "/c"]),
        );
        let engine = engine(Arc::clone(&fetcher), 4, 0);

        let stats = engine.run(&["http://a".to_string()]).await.unwrap();

        assert_eq!(engine.frontier().visited_snapshot(), vec!["http://a/"]);
        assert_eq!(fetcher.fetch_count(), 1);
        assert_eq!(stats.links_discovered, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_scenario_shared_child_fetched_once() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_page("http://a/", &["http://x/"])
                .with_page("http://b/", &["http://x/"])
                .with_page("http://x/", &[]),
        );
        let engine = engine(Arc::clone(&fetcher), 4, 1);

        engine
            .run(&["http://a".to_string(), "http://b".to_string()])
            .await
            .unwrap();

        assert_eq!(fetcher.fetch_count(), 3);
        let x_fetches = fetcher
            .fetched()
            .iter()
            .filter(|u| u.as_str() == "http://x/")
            .count();
        assert_eq!(x_fetches, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_scenario_fetch_failure_spares_siblings() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_page("http://a/", &["/b", "/c"])
                .with_failure("http://a/b")
                .with_page("http://a/c", &[]),
        );
        let engine = engine(Arc::clone(&fetcher), 4, 1);

        let stats = engine.run(&["http://a".to_string()]).await.unwrap();

        assert_eq!(fetcher.fetch_count(), 3);
        assert_eq!(stats.pages_fetched, 2);
        assert_eq!(stats.fetch_failures, 1);
        assert!(fetcher.fetched().contains(&"http://a/c".to_string()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cyclic_graph_terminates() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_page("http://a/", &["http://b/"])
                .with_page("http://b/", &["http://a/"]),
        );
        let engine = engine(Arc::clone(&fetcher), 2, 10);

        let stats = engine.run(&["http://a".to_string()]).await.unwrap();

        assert_eq!(fetcher.fetch_count(), 2);
        assert_eq!(stats.urls_discovered, 2);
        assert!(engine.frontier().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_depth_bound_stops_expansion() {
        // Chain a -> b -> c -> d; bound 2 admits a, b, c only.
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_page("http://a/", &["http://b/"])
                .with_page("http://b/", &["http://c/"])
                .with_page("http://c/", &["http://d/"])
                .with_page("http://d/", &[]),
        );
        let engine = engine(Arc::clone(&fetcher), 2, 2);

        engine.run(&["http://a".to_string()]).await.unwrap();

        assert_eq!(
            engine.frontier().visited_snapshot(),
            vec!["http://a/", "http://b/", "http://c/"]
        );
        assert!(!fetcher.fetched().contains(&"http://d/".to_string()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_visited_set_invariant_to_pool_size() {
        fn graph() -> MockFetcher {
            MockFetcher::default()
                .with_page("http://s/", &["/1", "/2", "/3"])
                .with_page("http://s/1", &["/4", "/2"])
                .with_page("http://s/2", &["/5"])
                .with_page("http://s/3", &["/5", "/1"])
                .with_page("http://s/4", &["/6"])
                .with_page("http://s/5", &[])
                .with_page("http://s/6", &[])
        }

        let solo = engine(Arc::new(graph()), 1, 3);
        solo.run(&["http://s".to_string()]).await.unwrap();

        let pooled = engine(Arc::new(graph()), 8, 3);
        pooled.run(&["http://s".to_string()]).await.unwrap();

        assert_eq!(
            solo.frontier().visited_snapshot(),
            pooled.frontier().visited_snapshot()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_duplicate_seeds_admitted_once() {
        let fetcher = Arc::new(MockFetcher::default().with_page("http://a/", &[]));
        let engine = engine(Arc::clone(&fetcher), 2, 1);

        engine
            .run(&["http://a".to_string(), "http://a/".to_string()])
            .await
            .unwrap();

        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_no_seeds_is_fatal() {
        let engine = engine(Arc::new(MockFetcher::default()), 2, 1);
        assert!(matches!(
            engine.run(&[]).await,
            Err(AppError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_seed_is_fatal() {
        let engine = engine(Arc::new(MockFetcher::default()), 2, 1);
        assert!(engine.run(&["not a url".to_string()]).await.is_err());
    }
}
