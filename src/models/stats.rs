// src/models/stats.rs

//! Crawl run statistics.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Live counters mutated by crawl tasks while the run is in flight.
///
/// Plain atomics; tasks touch these outside any lock.
#[derive(Debug, Default)]
pub struct CrawlCounters {
    pages_fetched: AtomicUsize,
    fetch_failures: AtomicUsize,
    links_discovered: AtomicUsize,
    links_skipped: AtomicUsize,
    store_failures: AtomicUsize,
}

impl CrawlCounters {
    pub fn record_fetch(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_link_discovered(&self) {
        self.links_discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_link_skipped(&self) {
        self.links_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched.load(Ordering::Relaxed)
    }

    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    pub fn links_discovered(&self) -> usize {
        self.links_discovered.load(Ordering::Relaxed)
    }

    pub fn links_skipped(&self) -> usize {
        self.links_skipped.load(Ordering::Relaxed)
    }

    pub fn store_failures(&self) -> usize {
        self.store_failures.load(Ordering::Relaxed)
    }
}

/// Summary of a completed crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Worker pool size used for the run
    pub workers: usize,
    /// Depth bound the run was launched with
    pub max_depth: usize,
    /// Distinct URLs ever admitted to the frontier
    pub urls_discovered: usize,
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    /// Links that survived resolution and were newly enqueued
    pub links_discovered: usize,
    /// Links dropped during resolution (anchors, bad hrefs, foreign schemes)
    pub links_skipped: usize,
    pub store_failures: usize,
}

impl CrawlStats {
    /// Wall-clock duration of the run in seconds.
    pub fn duration_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}
