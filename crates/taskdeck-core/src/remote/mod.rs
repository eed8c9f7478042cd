//! Remote store access
//!
//! The hosted store is the source of truth for tasks. This module defines
//! the capability the service consumes (`RemoteStore`) and the HTTP
//! implementation that speaks the store's REST dialect (`RestStore`).
//!
//! The contract is deliberately narrow: one table, full-snapshot reads,
//! row-level writes, and an idempotent table-creation RPC for first-run
//! bootstrap.

mod error;
mod http;

pub use error::RemoteError;
pub use http::RestStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Task;

/// Capability contract for the hosted tasks table
///
/// All operations are request/response; any timeout is the implementation's
/// concern, not the caller's.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Cheap zero-row query against the tasks table; connectivity check
    async fn probe(&self) -> Result<(), RemoteError>;

    /// Idempotent RPC that creates the tasks table if absent
    async fn create_table(&self) -> Result<(), RemoteError>;

    /// Fetch every task, ordered by `created_at` descending
    async fn fetch_all(&self) -> Result<Vec<Task>, RemoteError>;

    /// Insert a new task with `completed = false`
    ///
    /// Returns the stored row with the store-assigned id and timestamp.
    async fn insert(&self, description: &str) -> Result<Task, RemoteError>;

    /// Unconditionally set `completed` on the matching row
    async fn set_completed(&self, id: Uuid, completed: bool) -> Result<(), RemoteError>;

    /// Remove the matching row
    async fn delete(&self, id: Uuid) -> Result<(), RemoteError>;
}
