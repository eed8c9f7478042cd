//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use taskdeck_core::Task;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print an informational message (suppressed in quiet and JSON modes)
    pub fn message(&self, message: &str) {
        if matches!(self.format, OutputFormat::Human) {
            println!("{}", message);
        }
    }

    /// Print a success confirmation
    pub fn success(&self, message: &str) {
        if matches!(self.format, OutputFormat::Human) {
            println!("✓ {}", message);
        }
    }

    /// Print an error message (always shown, stderr)
    pub fn error(&self, message: &str) {
        eprintln!("{}", message);
    }

    /// Print the task list
    pub fn print_task_list(&self, tasks: &[Task]) {
        match self.format {
            OutputFormat::Human => {
                if tasks.is_empty() {
                    println!("No tasks yet.");
                    return;
                }
                for task in tasks {
                    println!("{}", task_line(task));
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(tasks).unwrap_or_else(|_| "[]".to_string())
                );
            }
            OutputFormat::Quiet => {
                for task in tasks {
                    println!("{}\t{}", task.id, task.description);
                }
            }
        }
    }
}

/// One human-readable row per task
fn task_line(task: &Task) -> String {
    format!(
        "[{}] {}  {}  ({})",
        if task.completed { "x" } else { " " },
        short_id(task),
        task.description,
        task.created_at.format("%Y-%m-%d %H:%M")
    )
}

/// Leading UUID segment, enough to address a task from the shell
fn short_id(task: &Task) -> String {
    task.id.to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_from_flags_precedence() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        // Quiet wins over JSON
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_task_line() {
        let task = Task::from_row(
            Uuid::parse_str("7f4df1f0-9f4e-4f5a-bb1e-0a8f4f1d2c3b").unwrap(),
            "Buy milk",
            true,
            Utc.with_ymd_and_hms(2025, 3, 4, 12, 30, 0).unwrap(),
        );

        let line = task_line(&task);
        assert!(line.starts_with("[x] 7f4df1f0"));
        assert!(line.contains("Buy milk"));
        assert!(line.contains("2025-03-04 12:30"));
    }
}
