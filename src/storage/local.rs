//! Local filesystem sink.
//!
//! Each page lands under `pages/` with a content-addressed filename
//! derived from its URL, so concurrent workers never collide on paths
//! and re-runs overwrite rather than accumulate.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::error::{Result, StoreError};
use crate::models::CrawlStats;
use crate::storage::{CrawlManifest, PageRecord, Sink};

/// Filesystem-backed sink rooted at the output directory.
pub struct FileSink {
    root: PathBuf,
    pages: Mutex<Vec<PageRecord>>,
}

impl FileSink {
    /// Create a sink rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pages: Mutex::new(Vec::new()),
        }
    }

    fn pages_locked(&self) -> MutexGuard<'_, Vec<PageRecord>> {
        self.pages.lock().expect("page record lock poisoned")
    }

    /// Stable filename for a URL: first 8 bytes of its SHA-256, hex-encoded.
    fn page_file_name(url: &str) -> String {
        let digest = Sha256::digest(url.as_bytes());
        format!("{}.html", hex::encode(&digest[..8]))
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await
    }

    /// Number of pages stored so far.
    pub fn page_count(&self) -> usize {
        self.pages_locked().len()
    }

    /// Write `manifest.json` for a completed run and return its path.
    pub async fn write_manifest(&self, stats: &CrawlStats) -> Result<PathBuf> {
        let mut pages = self.pages_locked().clone();
        pages.sort_by(|a, b| a.url.cmp(&b.url));

        let manifest = CrawlManifest::new(stats.clone(), pages);
        let bytes = serde_json::to_vec_pretty(&manifest)?;

        let path = self.root.join("manifest.json");
        Self::write_bytes(&path, &bytes).await?;
        Ok(path)
    }
}

#[async_trait]
impl Sink for FileSink {
    async fn store(&self, url: &str, content: &str) -> std::result::Result<(), StoreError> {
        let file = Self::page_file_name(url);
        let path = self.root.join("pages").join(&file);

        Self::write_bytes(&path, content.as_bytes())
            .await
            .map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })?;

        self.pages_locked().push(PageRecord {
            url: url.to_string(),
            file: format!("pages/{file}"),
            bytes: content.len(),
            fetched_at: chrono::Utc::now(),
        });
        Ok(())
    }
}
