//! Persistence for fetched page content.
//!
//! The engine only knows the `Sink` trait; what a "store" means is up to
//! the backend. The bundled `FileSink` writes one file per page plus a
//! JSON manifest describing the run.
//!
//! ## Output Layout
//!
//! ```text
//! {out_dir}/
//! ├── manifest.json         # Run stats + one record per stored page
//! └── pages/
//!     ├── 3f2a9c11d0b44e7f.html
//!     └── ...
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::CrawlStats;

// Re-export for convenience
pub use local::FileSink;

/// Persists the content of one fetched page.
///
/// Failures are logged by the caller and never affect traversal.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn store(&self, url: &str, content: &str) -> Result<(), StoreError>;
}

/// Sink that discards content, for traversal-only runs.
pub struct NullSink;

#[async_trait]
impl Sink for NullSink {
    async fn store(&self, _url: &str, _content: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// One stored page in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    /// Path of the stored file, relative to the output directory
    pub file: String,
    pub bytes: usize,
    pub fetched_at: DateTime<Utc>,
}

/// Top-level manifest written after a crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlManifest {
    pub generated_at: DateTime<Utc>,
    pub stats: CrawlStats,
    pub pages: Vec<PageRecord>,
}

impl CrawlManifest {
    pub fn new(stats: CrawlStats, pages: Vec<PageRecord>) -> Self {
        Self {
            generated_at: Utc::now(),
            stats,
            pages,
        }
    }
}
