// src/error.rs

//! Unified error handling for the crawler.
//!
//! Collaborator failures (`FetchError`, `ResolveError`, `StoreError`) are
//! contained at task granularity: a failed fetch ends that task, a failed
//! resolution skips that link, a failed store is logged. Only startup
//! configuration problems abort the crawl.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Regular expression compilation failed
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a pattern compilation error.
    pub fn pattern(pattern: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// A page fetch failed. Ends the task for that URL, never the crawl.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// The request never produced a usable response.
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

impl FetchError {
    /// Create a transport-level fetch error.
    pub fn transport(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

/// A discovered link could not be resolved to a crawlable absolute URL.
/// Skips that link only; sibling links on the page are unaffected.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Anchor, mailto, javascript and similar non-page links.
    #[error("Non-crawlable link '{0}'")]
    NotCrawlable(String),

    /// Resolved to a scheme the crawler does not fetch.
    #[error("Unsupported scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    /// The href could not be joined against the page URL.
    #[error("Cannot resolve '{href}' against {base}: {source}")]
    Join {
        base: String,
        href: String,
        source: url::ParseError,
    },
}

/// Content persistence failed. Logged, never affects traversal.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Writing the page file failed
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
