//! Data model for taskdeck
//!
//! A single entity: the `Task`. Tasks are created by the remote store,
//! which assigns both `id` and `created_at`; clients never fabricate
//! either field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A short text task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier, assigned by the remote store
    pub id: Uuid,
    /// What needs doing
    pub description: String,
    /// Whether the task is done
    pub completed: bool,
    /// When the remote store created the row; the sole sort key
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a task from fields already assigned by the store
    ///
    /// Used when decoding store rows and in tests. Application code never
    /// invents ids or timestamps.
    pub fn from_row(
        id: Uuid,
        description: impl Into<String>,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            completed,
            created_at,
        }
    }
}

/// Sort tasks newest first, the only ordering the app ever shows
///
/// Ties on `created_at` keep their relative order (pass-through from the
/// store).
pub fn newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task_at(description: &str, secs: i64) -> Task {
        Task::from_row(
            Uuid::new_v4(),
            description,
            false,
            Utc.timestamp_opt(secs, 0).unwrap(),
        )
    }

    #[test]
    fn test_from_row() {
        let id = Uuid::new_v4();
        let when = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let task = Task::from_row(id, "Buy milk", false, when);

        assert_eq!(task.id, id);
        assert_eq!(task.description, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.created_at, when);
    }

    #[test]
    fn test_newest_first() {
        let mut tasks = vec![task_at("old", 100), task_at("new", 300), task_at("mid", 200)];
        newest_first(&mut tasks);

        let order: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_newest_first_stable_on_ties() {
        let mut tasks = vec![task_at("first", 100), task_at("second", 100)];
        newest_first(&mut tasks);

        assert_eq!(tasks[0].description, "first");
        assert_eq!(tasks[1].description, "second");
    }

    #[test]
    fn test_serialization_round_trip() {
        let task = task_at("Write report", 1_700_000_000);
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task, back);
    }

    #[test]
    fn test_deserializes_store_row() {
        let json = r#"{
            "id": "7f4df1f0-9f4e-4f5a-bb1e-0a8f4f1d2c3b",
            "description": "Water the plants",
            "completed": true,
            "created_at": "2025-03-04T12:30:00Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "Water the plants");
        assert!(task.completed);
    }
}
