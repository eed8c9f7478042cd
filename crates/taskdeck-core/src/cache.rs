//! Local snapshot cache
//!
//! A non-authoritative copy of the last successfully loaded snapshot,
//! written by the view layer on every update it observes and read back
//! only as a rendering fallback when the feed has failed. The cache never
//! feeds data back into the service.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::Task;

/// Durable snapshot cache at a fixed path
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Serialize the snapshot, creating parent directories as needed
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create cache directory: {:?}", parent))?;
        }

        let json = serde_json::to_string(tasks).context("Failed to serialize task snapshot")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write task cache: {:?}", self.path))?;
        Ok(())
    }

    /// Load the cached snapshot, `None` when no cache has been written yet
    pub fn load(&self) -> Result<Option<Vec<Task>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read task cache: {:?}", self.path))?;
        let tasks = serde_json::from_str(&json)
            .with_context(|| format!("Task cache is corrupt: {:?}", self.path))?;
        Ok(Some(tasks))
    }
}
