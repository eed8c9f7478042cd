//! Service error handling
//!
//! `SyncError` is what callers and feed subscribers see. Every failure maps
//! to one of four kinds so the view layer can pick a message without
//! inspecting error internals. Remote sources are flattened to their
//! display strings at this boundary, which keeps the type cheap to clone
//! into the feed.

use thiserror::Error;

use crate::remote::RemoteError;

/// Which mutating operation a write error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOp::Create => write!(f, "create"),
            WriteOp::Update => write!(f, "update"),
            WriteOp::Delete => write!(f, "delete"),
        }
    }
}

/// Errors surfaced by the task synchronization service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Task description was empty after trimming; no remote call was made
    #[error("task description cannot be empty")]
    EmptyDescription,

    /// The connectivity probe failed; initialization cannot proceed
    #[error("could not reach the remote store: {0}")]
    Connectivity(String),

    /// A full reload failed; the feed is terminally failed for this instance
    #[error("failed to load tasks: {0}")]
    Load(String),

    /// The store rejected an insert, update, or delete
    ///
    /// Surfaces to the immediate caller only; the feed keeps working.
    #[error("failed to {op} task: {message}")]
    Write { op: WriteOp, message: String },
}

impl SyncError {
    pub(crate) fn connectivity(source: &RemoteError) -> Self {
        SyncError::Connectivity(source.to_string())
    }

    pub(crate) fn load(source: &RemoteError) -> Self {
        SyncError::Load(source.to_string())
    }

    pub(crate) fn write(op: WriteOp, source: &RemoteError) -> Self {
        SyncError::Write {
            op,
            message: source.to_string(),
        }
    }

    /// True when this error terminates the feed for the service instance
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Connectivity(_) | SyncError::Load(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_op_display() {
        assert_eq!(WriteOp::Create.to_string(), "create");
        assert_eq!(WriteOp::Update.to_string(), "update");
        assert_eq!(WriteOp::Delete.to_string(), "delete");
    }

    #[test]
    fn test_write_error_message_names_operation() {
        let err = SyncError::Write {
            op: WriteOp::Delete,
            message: "row is locked".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("delete"));
        assert!(msg.contains("row is locked"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(SyncError::Connectivity("down".into()).is_fatal());
        assert!(SyncError::Load("timeout".into()).is_fatal());
        assert!(!SyncError::EmptyDescription.is_fatal());
        assert!(!SyncError::Write {
            op: WriteOp::Create,
            message: "nope".into()
        }
        .is_fatal());
    }
}
