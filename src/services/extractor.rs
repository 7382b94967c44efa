// src/services/extractor.rs

//! Link extraction from fetched HTML.
//!
//! Two strategies: a CSS-selector pass over the parsed document, and a
//! raw regex scan for `href` attributes. Both return raw link strings;
//! resolution and filtering happen in the resolver.

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};

/// Extracts raw link strings from page content.
///
/// Synchronous: the parsed document never crosses an await point.
pub trait Extractor: Send + Sync {
    fn extract_links(&self, html: &str) -> Vec<String>;
}

/// Selector-based extraction over the parsed document.
pub struct HtmlExtractor {
    anchor: Selector,
}

impl HtmlExtractor {
    pub fn new() -> Result<Self> {
        let anchor =
            Selector::parse("a[href]").map_err(|e| AppError::selector("a[href]", format!("{e:?}")))?;
        Ok(Self { anchor })
    }
}

impl Extractor for HtmlExtractor {
    fn extract_links(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.anchor)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

/// Raw `href` attribute scan.
///
/// Cheaper than a full parse and tolerant of broken markup, at the cost
/// of occasionally picking up hrefs inside comments or scripts.
pub struct RegexExtractor {
    href: Regex,
}

const HREF_PATTERN: &str = r#"href=["']?([^"'>\s]+)"#;

impl RegexExtractor {
    pub fn new() -> Result<Self> {
        let href = Regex::new(HREF_PATTERN).map_err(|e| AppError::pattern(HREF_PATTERN, e))?;
        Ok(Self { href })
    }
}

impl Extractor for RegexExtractor {
    fn extract_links(&self, html: &str) -> Vec<String> {
        self.href
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
