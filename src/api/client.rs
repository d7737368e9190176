use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::time::Duration;

use super::models::{RemoteTask, TaskDraft, TaskPatch};

/// Environment variable holding the task store base URL.
pub const SERVICE_URL_ENV: &str = "OCEAN_TASKS_URL";
/// Environment variable holding the task store service key.
pub const SERVICE_KEY_ENV: &str = "OCEAN_TASKS_KEY";

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Failure of a remote call, already reduced to something displayable.
/// The client converts every transport, auth, and store-side failure into
/// one of these; nothing below this boundary panics or unwinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached at all.
    Transport(String),
    /// The store answered with a non-success status.
    Service { status: u16, message: String },
    /// The response body was not the expected shape.
    Decode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "cannot reach the task store: {message}"),
            Self::Service { status, message } => {
                write!(f, "task store error ({status}): {message}")
            }
            Self::Decode(message) => {
                write!(f, "unexpected response from the task store: {message}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// The four operations the screen needs from the task store.
///
/// `list` returns tasks in the store's own order (newest first); the client
/// never re-sorts. `update` may answer without a body, in which case `None`
/// is returned and the caller keeps its optimistic state.
pub trait TaskStore: Send + Sync {
    fn list(&self) -> Result<Vec<RemoteTask>, StoreError>;
    fn create(&self, draft: &TaskDraft) -> Result<RemoteTask, StoreError>;
    fn update(&self, id: &str, patch: &TaskPatch) -> Result<Option<RemoteTask>, StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Connection settings, read once at process startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub url: String,
    pub key: String,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        let url = env::var(SERVICE_URL_ENV)
            .map_err(|_| anyhow!("{SERVICE_URL_ENV} is not set (task store base URL)"))?;
        let key = env::var(SERVICE_KEY_ENV)
            .map_err(|_| anyhow!("{SERVICE_KEY_ENV} is not set (task store service key)"))?;
        Ok(Self { url, key })
    }
}

/// Shape of an error body the store may send alongside a failure status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// JSON-over-HTTP implementation of [`TaskStore`].
pub struct HttpTaskStore {
    client: reqwest::blocking::Client,
    base_url: String,
    key: String,
}

impl HttpTaskStore {
    pub fn new(config: &ServiceConfig) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("ocean-tasks/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
        })
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }

    /// Attaches auth headers, sends, and turns any failure status into a
    /// `StoreError` with whatever message the store put in the body.
    fn send(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::Response, StoreError> {
        let response = request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(StoreError::Service {
            status: status.as_u16(),
            message: service_message(&body, status),
        })
    }
}

/// Best-effort extraction of a readable message from a failure body.
fn service_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && let Some(message) = parsed.error.or(parsed.message)
        && !message.trim().is_empty()
    {
        return message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

impl TaskStore for HttpTaskStore {
    fn list(&self) -> Result<Vec<RemoteTask>, StoreError> {
        let response = self.send(self.client.get(self.tasks_url()))?;
        response
            .json::<Vec<RemoteTask>>()
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn create(&self, draft: &TaskDraft) -> Result<RemoteTask, StoreError> {
        let response = self.send(self.client.post(self.tasks_url()).json(draft))?;
        response
            .json::<RemoteTask>()
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn update(&self, id: &str, patch: &TaskPatch) -> Result<Option<RemoteTask>, StoreError> {
        let response = self.send(self.client.patch(self.task_url(id)).json(patch))?;

        // Some stores answer a PATCH with 204 and no body; the caller then
        // keeps its optimistic copy of the record.
        let body = response
            .text()
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<RemoteTask>(&body)
            .map(Some)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.send(self.client.delete(self.task_url(id)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config() -> ServiceConfig {
        ServiceConfig {
            url: "https://store.example.com/".to_string(),
            key: "secret".to_string(),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = HttpTaskStore::new(&config()).unwrap();
        assert_eq!(store.tasks_url(), "https://store.example.com/tasks");
        assert_eq!(store.task_url("42"), "https://store.example.com/tasks/42");
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Service {
            status: 503,
            message: "maintenance window".to_string(),
        };
        assert_eq!(err.to_string(), "task store error (503): maintenance window");

        let err = StoreError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "cannot reach the task store: connection refused");
    }

    #[test]
    fn test_service_message_prefers_error_field() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            service_message(r#"{"error":"title required"}"#, status),
            "title required"
        );
        assert_eq!(
            service_message(r#"{"message":"nope"}"#, status),
            "nope"
        );
        assert_eq!(service_message("plain text failure", status), "plain text failure");
        assert_eq!(service_message("", status), "Bad Request");
    }

    #[test]
    #[serial]
    fn test_service_config_from_env() {
        unsafe {
            env::set_var(SERVICE_URL_ENV, "https://store.example.com");
            env::set_var(SERVICE_KEY_ENV, "secret");
        }
        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.url, "https://store.example.com");
        assert_eq!(config.key, "secret");
    }

    #[test]
    #[serial]
    fn test_service_config_names_missing_var() {
        unsafe {
            env::remove_var(SERVICE_URL_ENV);
            env::set_var(SERVICE_KEY_ENV, "secret");
        }
        let err = ServiceConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(SERVICE_URL_ENV));
    }
}
