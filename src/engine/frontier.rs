// src/engine/frontier.rs

//! The URL frontier: a FIFO queue of discovered items plus the visited
//! set that guards admission.
//!
//! Both live behind a single mutex so the membership check and the
//! enqueue it guards are one atomic step. The lock is only ever held
//! for queue/set operations, never across fetches.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

use url::Url;

use crate::models::FrontierItem;

#[derive(Default)]
struct Inner {
    queue: VecDeque<FrontierItem>,
    visited: HashSet<String>,
    dequeued: usize,
}

/// Shared crawl frontier.
///
/// A URL is admitted at most once for the lifetime of a crawl; the
/// first sighting wins, including its depth. Once dequeued, an item is
/// owned by the worker that received it.
pub struct Frontier {
    inner: Mutex<Inner>,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("frontier lock poisoned")
    }

    /// Admit a URL if it has never been seen, enqueueing it at the tail.
    ///
    /// Returns `false` with no other effect for an already-visited URL.
    pub fn try_enqueue(&self, url: &Url, depth: usize) -> bool {
        let mut inner = self.locked();
        if inner.visited.insert(url.as_str().to_owned()) {
            inner.queue.push_back(FrontierItem::new(url.clone(), depth));
            true
        } else {
            false
        }
    }

    /// Pop the head of the queue, transferring ownership to the caller.
    pub fn dequeue(&self) -> Option<FrontierItem> {
        let mut inner = self.locked();
        let item = inner.queue.pop_front();
        if item.is_some() {
            inner.dequeued += 1;
        }
        item
    }

    pub fn is_empty(&self) -> bool {
        self.locked().queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.locked().queue.len()
    }

    /// Distinct URLs ever admitted; equals the number of successful
    /// `try_enqueue` calls.
    pub fn visited_count(&self) -> usize {
        self.locked().visited.len()
    }

    /// Items handed out so far.
    pub fn dequeued_count(&self) -> usize {
        self.locked().dequeued
    }

    /// Sorted snapshot of every URL ever admitted.
    pub fn visited_snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.locked().visited.iter().cloned().collect();
        urls.sort();
        urls
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
