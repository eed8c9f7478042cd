//! Remote store errors

use thiserror::Error;

/// Postgres error code for "relation does not exist"
///
/// The store reports this on the first probe of a fresh project, before the
/// tasks table has been bootstrapped.
const UNDEFINED_TABLE: &str = "42P01";

/// Errors from the remote store
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The request never completed (DNS, TLS, timeout, connection refused)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with an error body
    #[error("remote store rejected the request ({status}): {message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The response body could not be decoded
    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RemoteError {
    /// True when the rejection means the tasks table has not been created yet
    pub fn missing_table(&self) -> bool {
        matches!(
            self,
            RemoteError::Rejected { code: Some(code), .. } if code == UNDEFINED_TABLE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_detection() {
        let err = RemoteError::Rejected {
            status: 404,
            code: Some("42P01".to_string()),
            message: "relation \"public.tasks\" does not exist".to_string(),
        };
        assert!(err.missing_table());
    }

    #[test]
    fn test_other_rejections_are_not_missing_table() {
        let err = RemoteError::Rejected {
            status: 401,
            code: Some("PGRST301".to_string()),
            message: "JWT expired".to_string(),
        };
        assert!(!err.missing_table());

        let err = RemoteError::Rejected {
            status: 500,
            code: None,
            message: "internal error".to_string(),
        };
        assert!(!err.missing_table());
    }

    #[test]
    fn test_rejected_display() {
        let err = RemoteError::Rejected {
            status: 403,
            code: None,
            message: "permission denied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("permission denied"));
    }
}
