//! Task feed
//!
//! A hot broadcast of the latest task snapshot. New subscribers immediately
//! observe the most recent value; every later publish reaches all
//! subscribers in publish order. A failure closes the feed permanently:
//! the error replaces the snapshot and nothing else is ever delivered for
//! the lifetime of the feed.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::error::SyncError;
use crate::models::Task;

/// The value carried by the feed
#[derive(Debug, Clone)]
pub enum FeedState {
    /// The full task list as of the most recent successful load
    Snapshot(Vec<Task>),
    /// Terminal error; no further snapshots will follow
    Failed(SyncError),
}

impl FeedState {
    /// The snapshot, if the feed has not failed
    pub fn tasks(&self) -> Option<&[Task]> {
        match self {
            FeedState::Snapshot(tasks) => Some(tasks),
            FeedState::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FeedState::Failed(_))
    }
}

/// Replay-latest broadcast with a permanent terminal error state
pub struct TaskFeed {
    tx: watch::Sender<FeedState>,
    closed: AtomicBool,
}

impl TaskFeed {
    /// Create a feed holding an empty snapshot
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FeedState::Snapshot(Vec::new()));
        Self {
            tx,
            closed: AtomicBool::new(false),
        }
    }

    /// Register a subscriber; it sees the latest value immediately
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.tx.subscribe()
    }

    /// The most recently published value
    pub fn latest(&self) -> FeedState {
        self.tx.borrow().clone()
    }

    /// Publish a new snapshot; ignored once the feed has failed
    ///
    /// `send_replace` keeps the latest value even while no subscriber is
    /// registered, so late subscribers still get it.
    pub fn publish(&self, tasks: Vec<Task>) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        self.tx.send_replace(FeedState::Snapshot(tasks));
    }

    /// Fail the feed permanently
    ///
    /// The first failure wins; later calls are ignored.
    pub fn fail(&self, error: SyncError) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.tx.send_replace(FeedState::Failed(error));
    }

    /// True once `fail` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Default for TaskFeed {
    fn default() -> Self {
        Self::new()
    }
}
