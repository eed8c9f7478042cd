//! Task synchronization service
//!
//! The service owns the canonical task list and mediates every access to
//! the remote store. All reads go through full-snapshot reloads; every
//! mutation is one remote write followed by a reload, so the published
//! snapshot never contains client-side patches.
//!
//! ## Lifecycle
//!
//! `Uninitialized -> Initializing -> Ready`, with a terminal failure path
//! when the connectivity probe or a load fails: the feed closes with the
//! error and a fresh service instance is required to retry. Write failures
//! are transient and surface only to the caller of that operation.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Arc::new(RestStore::new(&url, &key)?);
//! let service = TaskSyncService::new(store);
//! let mut feed = service.subscribe();
//!
//! service.initialize().await?;
//! service.add_task("Write report").await?;
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{SyncError, WriteOp};
use crate::feed::{FeedState, TaskFeed};
use crate::models::Task;
use crate::remote::RemoteStore;

/// Owns the canonical task snapshot and every remote interaction
pub struct TaskSyncService {
    /// Remote capability; `None` means remote access is unavailable
    store: Option<Arc<dyn RemoteStore>>,
    /// Published state stream
    feed: TaskFeed,
    /// Set once initialization has fully succeeded
    ready: AtomicBool,
}

impl TaskSyncService {
    /// Create a service backed by a remote store
    ///
    /// The service starts uninitialized; call [`initialize`](Self::initialize)
    /// before anything else.
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store: Some(store),
            feed: TaskFeed::new(),
            ready: AtomicBool::new(false),
        }
    }

    /// Create a service without remote access
    ///
    /// Starts ready with an empty snapshot and never performs a remote
    /// call; mutating operations fail with the connectivity kind.
    pub fn detached() -> Self {
        Self {
            store: None,
            feed: TaskFeed::new(),
            ready: AtomicBool::new(true),
        }
    }

    /// Probe the store, bootstrap the table if missing, load all tasks
    ///
    /// Idempotent: a no-op once it has succeeded. A probe failure is fatal
    /// for the instance - the feed closes with the connectivity error and
    /// no automatic retry happens. Bootstrap is best-effort: only a
    /// missing-table rejection triggers the creation RPC, and any bootstrap
    /// failure is logged and skipped so the load still runs.
    pub async fn initialize(&self) -> Result<(), SyncError> {
        if self.ready.load(Ordering::Acquire) {
            return Ok(());
        }
        if let FeedState::Failed(err) = self.feed.latest() {
            // A previous attempt already closed the feed
            return Err(err);
        }

        let Some(store) = self.store.clone() else {
            self.ready.store(true, Ordering::Release);
            return Ok(());
        };

        if let Err(e) = store.probe().await {
            warn!("connectivity probe failed: {}", e);
            let err = SyncError::connectivity(&e);
            self.feed.fail(err.clone());
            return Err(err);
        }
        debug!("remote store reachable");

        self.ensure_table(store.as_ref()).await;
        self.reload().await?;

        self.ready.store(true, Ordering::Release);
        info!("task service ready");
        Ok(())
    }

    /// Create the tasks table if the store reports it missing
    ///
    /// Best-effort schema setup: every failure here is logged, never
    /// returned, and the caller proceeds to the load regardless.
    async fn ensure_table(&self, store: &dyn RemoteStore) {
        match store.probe().await {
            Ok(()) => {}
            Err(e) if e.missing_table() => {
                info!("tasks table missing, creating it");
                if let Err(e) = store.create_table().await {
                    warn!("table bootstrap failed: {}", e);
                }
            }
            Err(e) => {
                warn!("skipping table bootstrap: {}", e);
            }
        }
    }

    /// Re-fetch the full task set and publish it
    ///
    /// On failure the feed closes with the load error; the service has no
    /// notion of stale-but-valid data once a reload has been attempted.
    pub async fn reload(&self) -> Result<(), SyncError> {
        let store = self.remote()?;
        match store.fetch_all().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks");
                self.feed.publish(tasks);
                Ok(())
            }
            Err(e) => {
                warn!("task load failed: {}", e);
                let err = SyncError::load(&e);
                self.feed.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Insert a new task, then reload
    ///
    /// The description is trimmed and must be non-empty; validation happens
    /// before any remote call. If the insert succeeds but the follow-up
    /// reload fails, the load error propagates even though the write is
    /// durable remotely.
    pub async fn add_task(&self, description: &str) -> Result<(), SyncError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(SyncError::EmptyDescription);
        }

        let store = self.remote()?;
        store
            .insert(description)
            .await
            .map_err(|e| SyncError::write(WriteOp::Create, &e))?;
        debug!("task created");
        self.reload().await
    }

    /// Set a task's completed flag, then reload
    ///
    /// The caller supplies the target value (typically the inversion of
    /// what it last saw); the store applies an unconditional set, so
    /// concurrent toggles are last-write-wins on this field.
    pub async fn toggle_task(&self, id: Uuid, completed: bool) -> Result<(), SyncError> {
        let store = self.remote()?;
        store
            .set_completed(id, completed)
            .await
            .map_err(|e| SyncError::write(WriteOp::Update, &e))?;
        debug!(%id, completed, "task updated");
        self.reload().await
    }

    /// Remove a task, then reload
    pub async fn delete_task(&self, id: Uuid) -> Result<(), SyncError> {
        let store = self.remote()?;
        store
            .delete(id)
            .await
            .map_err(|e| SyncError::write(WriteOp::Delete, &e))?;
        debug!(%id, "task deleted");
        self.reload().await
    }

    /// Subscribe to snapshot updates; the latest value is replayed
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.feed.subscribe()
    }

    /// The most recently published feed value
    pub fn latest(&self) -> FeedState {
        self.feed.latest()
    }

    /// The latest published task list (empty if the feed has failed)
    pub fn snapshot(&self) -> Vec<Task> {
        match self.feed.latest() {
            FeedState::Snapshot(tasks) => tasks,
            FeedState::Failed(_) => Vec::new(),
        }
    }

    /// True once initialization has fully succeeded
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// True when the service was constructed with remote access
    pub fn has_remote(&self) -> bool {
        self.store.is_some()
    }

    fn remote(&self) -> Result<&Arc<dyn RemoteStore>, SyncError> {
        self.store
            .as_ref()
            .ok_or_else(|| SyncError::Connectivity("remote access is disabled".to_string()))
    }
}
