//! HTTP implementation of the remote store
//!
//! Speaks the PostgREST dialect exposed by the hosted database service:
//! query-string filters (`id=eq.<uuid>`), `select`/`order` projections, a
//! `Prefer: return=representation` header to get inserted rows back, and
//! `/rpc/<fn>` endpoints for remote procedures.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{RemoteError, RemoteStore};
use crate::models::Task;

/// Name of the hosted table holding tasks
const TASKS_TABLE: &str = "tasks";

/// Remote procedure that creates the tasks table if absent
const CREATE_TABLE_RPC: &str = "create_tasks_table";

/// Request timeout for every store call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body the store attaches to rejected requests
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the hosted tasks table
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// Build a store client for the given project URL and API key
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("taskdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TASKS_TABLE)
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Pass successful responses through, turn everything else into `Rejected`
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(parse_rejection(status.as_u16(), &body))
    }
}

/// Decode a store error body, keeping the raw text when it is not JSON
fn parse_rejection(status: u16, body: &str) -> RemoteError {
    match serde_json::from_str::<ApiError>(body) {
        Ok(api) => RemoteError::Rejected {
            status,
            code: api.code,
            message: api
                .message
                .unwrap_or_else(|| format!("status {}", status)),
        },
        Err(_) => RemoteError::Rejected {
            status,
            code: None,
            message: if body.is_empty() {
                format!("status {}", status)
            } else {
                body.to_string()
            },
        },
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn probe(&self) -> Result<(), RemoteError> {
        let url = format!("{}?select=id&limit=0", self.table_url());
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn create_table(&self) -> Result<(), RemoteError> {
        let url = self.rpc_url(CREATE_TABLE_RPC);
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&json!({}))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Task>, RemoteError> {
        let url = format!(
            "{}?select=id,description,completed,created_at&order=created_at.desc",
            self.table_url()
        );
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        let body = Self::check(response).await?.text().await?;
        let tasks = serde_json::from_str(&body)?;
        Ok(tasks)
    }

    async fn insert(&self, description: &str) -> Result<Task, RemoteError> {
        let response = self
            .request(reqwest::Method::POST, &self.table_url())
            .header("Prefer", "return=representation")
            .json(&json!([{ "description": description, "completed": false }]))
            .send()
            .await?;
        let body = Self::check(response).await?.text().await?;
        let mut rows: Vec<Task> = serde_json::from_str(&body)?;

        rows.pop().ok_or(RemoteError::Rejected {
            status: 200,
            code: None,
            message: "insert returned no representation".to_string(),
        })
    }

    async fn set_completed(&self, id: Uuid, completed: bool) -> Result<(), RemoteError> {
        let url = format!("{}?id=eq.{}", self.table_url(), id);
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(&json!({ "completed": completed }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RemoteError> {
        let url = format!("{}?id=eq.{}", self.table_url(), id);
        let response = self.request(reqwest::Method::DELETE, &url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let store = RestStore::new("https://example.supabase.co/", "key").unwrap();
        assert_eq!(
            store.table_url(),
            "https://example.supabase.co/rest/v1/tasks"
        );
        assert_eq!(
            store.rpc_url("create_tasks_table"),
            "https://example.supabase.co/rest/v1/rpc/create_tasks_table"
        );
    }

    #[test]
    fn test_parse_rejection_json_body() {
        let body = r#"{"code":"42P01","message":"relation \"public.tasks\" does not exist"}"#;
        let err = parse_rejection(404, body);

        assert!(err.missing_table());
        match err {
            RemoteError::Rejected { status, message, .. } => {
                assert_eq!(status, 404);
                assert!(message.contains("does not exist"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejection_plain_body() {
        let err = parse_rejection(502, "Bad Gateway");
        match err {
            RemoteError::Rejected {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 502);
                assert!(code.is_none());
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejection_empty_body() {
        let err = parse_rejection(500, "");
        match err {
            RemoteError::Rejected { message, .. } => {
                assert_eq!(message, "status 500");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
