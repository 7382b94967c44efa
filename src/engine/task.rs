// src/engine/task.rs

//! One crawl task: fetch, extract, resolve, re-feed the frontier.

use std::sync::Arc;

use crate::engine::Frontier;
use crate::models::{CrawlCounters, FrontierItem};
use crate::services::{Extractor, Fetcher, Resolver};
use crate::storage::Sink;

/// Shared state handed to every crawl task.
pub struct CrawlContext {
    pub frontier: Frontier,
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn Extractor>,
    pub resolver: Arc<dyn Resolver>,
    pub sink: Arc<dyn Sink>,
    pub max_depth: usize,
    pub counters: CrawlCounters,
}

/// Process one dequeued frontier item.
///
/// Any failure here is contained to this task: a failed fetch ends it,
/// an unresolvable link is skipped, a store failure is logged. The
/// frontier lock is never held across the fetch, extraction or store.
pub async fn crawl(ctx: Arc<CrawlContext>, item: FrontierItem) {
    log::info!("Fetching {} (depth {})", item.url, item.depth);

    let content = match ctx.fetcher.fetch(item.url.as_str()).await {
        Ok(content) => content,
        Err(err) => {
            ctx.counters.record_fetch_failure();
            log::warn!("{err}");
            return;
        }
    };
    ctx.counters.record_fetch();

    // Pages at the depth bound are fetched but never expanded.
    if item.depth < ctx.max_depth {
        for href in ctx.extractor.extract_links(&content) {
            let resolved = match ctx.resolver.resolve(&item.url, &href) {
                Ok(resolved) => resolved,
                Err(err) => {
                    ctx.counters.record_link_skipped();
                    log::debug!("{err}");
                    continue;
                }
            };

            if ctx.frontier.try_enqueue(&resolved, item.depth + 1) {
                ctx.counters.record_link_discovered();
                log::debug!("Discovered {} (depth {})", resolved, item.depth + 1);
            }
        }
    }

    if let Err(err) = ctx.sink.store(item.url.as_str(), &content).await {
        ctx.counters.record_store_failure();
        log::warn!("{err}");
    }
}
