// src/services/resolver.rs

//! Resolution of raw extracted links to crawlable absolute URLs.

use url::Url;

use crate::error::ResolveError;

/// Resolves a raw link string against the URL of the page it came from.
pub trait Resolver: Send + Sync {
    fn resolve(&self, base: &Url, href: &str) -> Result<Url, ResolveError>;
}

/// Standard resolver: joins via `Url`, keeps http(s) only, strips
/// fragments so that dedup keys on the page, not the anchor.
pub struct UrlResolver;

impl Resolver for UrlResolver {
    fn resolve(&self, base: &Url, href: &str) -> Result<Url, ResolveError> {
        let href = href.trim();
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("mailto:")
            || href.starts_with("javascript:")
            || href.starts_with("tel:")
        {
            return Err(ResolveError::NotCrawlable(href.to_string()));
        }

        let mut resolved = base.join(href).map_err(|source| ResolveError::Join {
            base: base.to_string(),
            href: href.to_string(),
            source,
        })?;

        match resolved.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ResolveError::UnsupportedScheme {
                    url: resolved.to_string(),
                    scheme: other.to_string(),
                });
            }
        }

        resolved.set_fragment(None);
        Ok(resolved)
    }
}
