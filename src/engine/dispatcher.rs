// src/engine/dispatcher.rs

//! Bounded worker pool.
//!
//! Submission never blocks the orchestrator: every task is spawned
//! immediately and parks on a semaphore permit until one of the N
//! worker slots frees up. `drain` joins everything submitted so far.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fixed-size pool of concurrent crawl workers.
pub struct Dispatcher {
    slots: Arc<Semaphore>,
    tasks: JoinSet<()>,
}

impl Dispatcher {
    /// Create a pool with `workers` concurrent slots.
    pub fn new(workers: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(workers)),
            tasks: JoinSet::new(),
        }
    }

    /// Hand one task to the pool. Runs once a worker slot is free.
    pub fn submit<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let slots = Arc::clone(&self.slots);
        self.tasks.spawn(async move {
            // Never closed, so acquisition only fails on shutdown bugs.
            let _slot = slots.acquire_owned().await.expect("worker slots closed");
            task.await;
        });
    }

    /// Block until every submitted task has completed.
    ///
    /// A panicked task is logged and discarded; the pool survives.
    pub async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(err) = joined {
                log::error!("Crawl task aborted: {err}");
            }
        }
    }

    /// Tasks submitted but not yet completed.
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }
}
