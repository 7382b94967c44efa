// src/main.rs

//! webcrawl CLI entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use webcrawl::config::Config;
use webcrawl::engine::CrawlEngine;
use webcrawl::error::{AppError, Result};
use webcrawl::services::{Extractor, HtmlExtractor, HttpFetcher, RegexExtractor, UrlResolver};
use webcrawl::storage::{FileSink, NullSink, Sink};

/// webcrawl - Depth-limited concurrent web crawler
#[derive(Parser, Debug)]
#[command(
    name = "webcrawl",
    version,
    about = "Crawls the web breadth-first from one or more seed URLs"
)]
struct Cli {
    /// Seed URLs to start crawling from
    seeds: Vec<String>,

    /// Number of concurrent workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Maximum crawl depth (seeds are depth 0)
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,

    /// Directory for fetched pages and the crawl manifest
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Link extraction strategy
    #[arg(long, value_enum, default_value = "html")]
    extractor: ExtractorKind,

    /// Traverse only, do not persist page content
    #[arg(long)]
    no_store: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExtractorKind {
    /// CSS-selector pass over the parsed document
    Html,
    /// Raw href attribute scan
    Regex,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.seeds.is_empty() {
        log::error!("No seed URL supplied. Usage: webcrawl <url> [<url> ...]");
        return Err(AppError::config("at least one seed URL is required"));
    }

    let mut config = Config::load_or_default(&cli.config);
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(output) = cli.output {
        config.output.dir = output;
    }
    config.validate()?;

    log::info!(
        "Starting crawl: {} seed(s), {} workers, max depth {}",
        cli.seeds.len(),
        config.crawler.workers,
        config.crawler.max_depth
    );

    let fetcher = Arc::new(HttpFetcher::new(&config.crawler)?);
    let extractor: Arc<dyn Extractor> = match cli.extractor {
        ExtractorKind::Html => Arc::new(HtmlExtractor::new()?),
        ExtractorKind::Regex => Arc::new(RegexExtractor::new()?),
    };

    let file_sink = if cli.no_store {
        None
    } else {
        Some(Arc::new(FileSink::new(&config.output.dir)))
    };
    let sink: Arc<dyn Sink> = match &file_sink {
        Some(sink) => Arc::clone(sink) as Arc<dyn Sink>,
        None => Arc::new(NullSink),
    };

    let engine = CrawlEngine::new(
        &config.crawler,
        fetcher,
        extractor,
        Arc::new(UrlResolver),
        sink,
    );
    let stats = engine.run(&cli.seeds).await?;

    if let Some(sink) = file_sink {
        if config.output.write_manifest {
            let path = sink.write_manifest(&stats).await?;
            log::info!("Manifest written to {}", path.display());
        }
    }

    log::info!(
        "Crawl complete: {} URLs discovered, {} pages fetched ({} failed) in {:.1}s",
        stats.urls_discovered,
        stats.pages_fetched,
        stats.fetch_failures,
        stats.duration_secs()
    );

    Ok(())
}
