//! taskdeck core library
//!
//! Task synchronization against a hosted relational store. The service
//! owns the canonical task list, republishes it to subscribers after every
//! change, and the hosted store stays the source of truth; a local JSON
//! cache gives consumers something to render when the store is unreachable.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let store = Arc::new(RestStore::new(&url, &key)?);
//! let service = TaskSyncService::new(store);
//!
//! let mut feed = service.subscribe();
//! service.initialize().await?;
//! service.add_task("Write report").await?;
//! ```
//!
//! # Modules
//!
//! - `service`: the task synchronization service (main entry point)
//! - `feed`: replay-latest broadcast of task snapshots
//! - `remote`: remote store contract and HTTP implementation
//! - `models`: the task data structure
//! - `cache`: local snapshot cache for offline rendering
//! - `config`: application configuration
//! - `error`: service error kinds

pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod remote;
pub mod service;

pub use cache::SnapshotCache;
pub use config::Config;
pub use error::{SyncError, WriteOp};
pub use feed::{FeedState, TaskFeed};
pub use models::Task;
pub use remote::{RemoteError, RemoteStore, RestStore};
pub use service::TaskSyncService;
