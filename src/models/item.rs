// src/models/item.rs

//! Frontier work items.

use url::Url;

/// A discovered URL paired with its BFS depth from the seeds.
///
/// Immutable once created. The frontier owns an item until `dequeue`
/// hands it to a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    /// Normalized absolute URL.
    pub url: Url,
    /// Link distance from the nearest seed (seeds are depth 0).
    pub depth: usize,
}

impl FrontierItem {
    pub fn new(url: Url, depth: usize) -> Self {
        Self { url, depth }
    }
}
