//! Task command handlers
//!
//! Each handler plays the view-layer role: build the service for this
//! invocation, run the operation, persist the snapshot cache on every
//! update it observes, and fall back to the cached snapshot when the feed
//! reports a fatal error.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::warn;
use uuid::Uuid;

use taskdeck_core::{
    Config, FeedState, RestStore, SnapshotCache, SyncError, Task, TaskSyncService, WriteOp,
};

use crate::output::Output;

/// Shortest description the form accepts
const MIN_DESCRIPTION_LEN: usize = 3;

/// List all tasks
pub async fn list(config: &Config, output: &Output) -> Result<()> {
    let (service, cache) = start(config, output).await?;
    render_current(&service, &cache, output);
    Ok(())
}

/// Add a new task
pub async fn add(config: &Config, description: &str, output: &Output) -> Result<()> {
    let (service, cache) = start(config, output).await?;

    let description = match validate_description(description, &service.snapshot()) {
        Ok(description) => description,
        Err(message) => {
            output.error(&message);
            bail!(message);
        }
    };

    if let Err(err) = service.add_task(&description).await {
        report_failure(&err, &cache, output);
        bail!(err);
    }

    output.success("Task created");
    render_current(&service, &cache, output);
    Ok(())
}

/// Toggle a task between done and not done
///
/// The new value is the inversion of what this invocation last saw;
/// concurrent toggles are last-write-wins.
pub async fn toggle(config: &Config, id: &str, output: &Output) -> Result<()> {
    let (service, cache) = start(config, output).await?;

    let snapshot = service.snapshot();
    let task = find_task(&snapshot, id)?;

    if let Err(err) = service.toggle_task(task.id, !task.completed).await {
        report_failure(&err, &cache, output);
        bail!(err);
    }

    output.success("Task updated");
    render_current(&service, &cache, output);
    Ok(())
}

/// Delete a task
pub async fn delete(config: &Config, id: &str, output: &Output) -> Result<()> {
    let (service, cache) = start(config, output).await?;

    let snapshot = service.snapshot();
    let task = find_task(&snapshot, id)?;

    if let Err(err) = service.delete_task(task.id).await {
        report_failure(&err, &cache, output);
        bail!(err);
    }

    output.success("Task deleted");
    render_current(&service, &cache, output);
    Ok(())
}

/// Build and initialize the service for this invocation
async fn start(config: &Config, output: &Output) -> Result<(TaskSyncService, SnapshotCache)> {
    let cache = SnapshotCache::new(config.cache_path());
    let service = build_service(config)?;

    if let Err(err) = service.initialize().await {
        report_failure(&err, &cache, output);
        bail!(err);
    }

    Ok((service, cache))
}

fn build_service(config: &Config) -> Result<TaskSyncService> {
    let url = match config.remote_url.as_deref() {
        Some(url) if config.remote_available() => url,
        _ => {
            warn!("remote access disabled, starting detached");
            return Ok(TaskSyncService::detached());
        }
    };
    let key = config.api_key.as_deref().unwrap_or_default();

    let store = RestStore::new(url, key).context("Failed to build remote store client")?;
    Ok(TaskSyncService::new(Arc::new(store)))
}

/// Save and print whatever the feed currently holds
///
/// Without remote access there is no live snapshot; the cached one is the
/// best available render and must not be overwritten.
fn render_current(service: &TaskSyncService, cache: &SnapshotCache, output: &Output) {
    if !service.has_remote() {
        if !render_cached(cache, output) {
            output.print_task_list(&[]);
        }
        return;
    }

    if let FeedState::Snapshot(tasks) = service.latest() {
        if let Err(e) = cache.save(&tasks) {
            warn!("failed to write task cache: {:#}", e);
        }
        output.print_task_list(&tasks);
    }
}

/// Show the category message; on fatal errors also render the cached list
fn report_failure(err: &SyncError, cache: &SnapshotCache, output: &Output) {
    output.error(failure_message(err));

    if err.is_fatal() {
        render_cached(cache, output);
    }
}

/// Print the cached snapshot if one exists
fn render_cached(cache: &SnapshotCache, output: &Output) -> bool {
    match cache.load() {
        Ok(Some(tasks)) => {
            output.message("Showing cached tasks (may be out of date):");
            output.print_task_list(&tasks);
            true
        }
        Ok(None) => false,
        Err(e) => {
            warn!("failed to read task cache: {:#}", e);
            false
        }
    }
}

/// One short line per failure category
fn failure_message(err: &SyncError) -> &'static str {
    match err {
        SyncError::EmptyDescription => "The task description cannot be empty.",
        SyncError::Connectivity(_) => "Could not reach the task store. Please try again.",
        SyncError::Load(_) => "Could not load your tasks. Please try again.",
        SyncError::Write {
            op: WriteOp::Create,
            ..
        } => "Could not create the task. Please try again.",
        SyncError::Write {
            op: WriteOp::Update,
            ..
        } => "Could not update the task. Please try again.",
        SyncError::Write {
            op: WriteOp::Delete,
            ..
        } => "Could not delete the task. Please try again.",
    }
}

/// Form-level validation, applied before the service sees the input
fn validate_description(description: &str, existing: &[Task]) -> Result<String, String> {
    let trimmed = description.trim();

    if trimmed.is_empty() {
        return Err("The task description cannot be empty.".to_string());
    }

    if trimmed.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(format!(
            "The task description must be at least {} characters long.",
            MIN_DESCRIPTION_LEN
        ));
    }

    let lowered = trimmed.to_lowercase();
    if existing
        .iter()
        .any(|t| t.description.trim().to_lowercase() == lowered)
    {
        return Err("A task with this description already exists.".to_string());
    }

    Ok(trimmed.to_string())
}

/// Resolve a full UUID or an unambiguous prefix against the snapshot
fn find_task<'a>(tasks: &'a [Task], id: &str) -> Result<&'a Task> {
    if let Ok(uuid) = Uuid::parse_str(id) {
        if let Some(task) = tasks.iter().find(|t| t.id == uuid) {
            return Ok(task);
        }
        bail!("No task with id '{}'", id);
    }

    let matches: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.id.to_string().starts_with(id))
        .collect();

    match matches.as_slice() {
        [task] => Ok(task),
        [] => bail!("No task with id '{}'", id),
        _ => bail!("Task id '{}' is ambiguous, use more characters", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, description: &str) -> Task {
        Task::from_row(
            Uuid::parse_str(id).unwrap(),
            description,
            false,
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        )
    }

    #[test]
    fn test_validate_description_trims() {
        let result = validate_description("  Buy milk  ", &[]).unwrap();
        assert_eq!(result, "Buy milk");
    }

    #[test]
    fn test_validate_description_rejects_empty_and_short() {
        assert!(validate_description("", &[]).is_err());
        assert!(validate_description("   ", &[]).is_err());
        assert!(validate_description("ab", &[]).is_err());
        assert!(validate_description("abc", &[]).is_ok());
    }

    #[test]
    fn test_validate_description_rejects_duplicates_case_insensitively() {
        let existing = vec![task(
            "7f4df1f0-9f4e-4f5a-bb1e-0a8f4f1d2c3b",
            "Buy milk",
        )];

        assert!(validate_description("buy MILK", &existing).is_err());
        assert!(validate_description("  Buy milk ", &existing).is_err());
        assert!(validate_description("Buy bread", &existing).is_ok());
    }

    #[test]
    fn test_find_task_by_full_uuid() {
        let tasks = vec![
            task("7f4df1f0-9f4e-4f5a-bb1e-0a8f4f1d2c3b", "one"),
            task("11111111-2222-4333-8444-555555555555", "two"),
        ];

        let found = find_task(&tasks, "11111111-2222-4333-8444-555555555555").unwrap();
        assert_eq!(found.description, "two");
    }

    #[test]
    fn test_find_task_by_prefix() {
        let tasks = vec![
            task("7f4df1f0-9f4e-4f5a-bb1e-0a8f4f1d2c3b", "one"),
            task("11111111-2222-4333-8444-555555555555", "two"),
        ];

        let found = find_task(&tasks, "7f4d").unwrap();
        assert_eq!(found.description, "one");
    }

    #[test]
    fn test_find_task_missing_or_ambiguous() {
        let tasks = vec![
            task("11111111-2222-4333-8444-555555555555", "one"),
            task("11111111-aaaa-4bbb-8ccc-dddddddddddd", "two"),
        ];

        assert!(find_task(&tasks, "9999").is_err());
        assert!(find_task(&tasks, "11111111").is_err());
        assert!(find_task(&tasks, "11111111-2").is_ok());
    }

    #[test]
    fn test_failure_messages_by_category() {
        assert!(failure_message(&SyncError::Load("x".into())).contains("load"));
        assert!(failure_message(&SyncError::Connectivity("x".into())).contains("reach"));
        assert!(failure_message(&SyncError::Write {
            op: WriteOp::Delete,
            message: "x".into()
        })
        .contains("delete"));
    }
}
