//! HTTP adapter for the task store port.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use super::payload::{self, StatusUpdatePayload};
use crate::board::{
    domain::{ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use crate::config::StoreConfig;

/// Non-success answer from the task store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("task store answered {status}: {message}")]
pub struct HttpStatusError {
    /// HTTP status code.
    pub status: u16,
    /// Message extracted from the response body.
    pub message: String,
}

/// The configured base URL cannot be extended with path segments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("base URL '{0}' cannot carry a path")]
pub struct InvalidBaseUrl(pub String);

/// Task store reached over HTTP with JSON payloads.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    base_url: Url,
}

impl HttpTaskStore {
    /// Creates a store client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Network`] when the underlying HTTP client
    /// cannot be built.
    pub fn new(config: &StoreConfig) -> TaskStoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("taskboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TaskStoreError::network)?;
        Ok(Self::with_client(client, config.base_url().clone()))
    }

    /// Creates a store client around an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> TaskStoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TaskStoreError::network(InvalidBaseUrl(self.base_url.to_string())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Tries the `message` field of a JSON body, then falls back to the raw text.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.to_owned())
}

async fn read_body(response: Response) -> TaskStoreResult<(StatusCode, String)> {
    let status = response.status();
    let body = response.text().await.map_err(TaskStoreError::network)?;
    Ok((status, body))
}

fn status_error(status: StatusCode, body: &str) -> HttpStatusError {
    HttpStatusError {
        status: status.as_u16(),
        message: extract_error_message(body),
    }
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_tasks(&self, project_id: ProjectId) -> TaskStoreResult<Vec<Task>> {
        let mut url = self.endpoint(&["tasks"])?;
        url.query_pairs_mut()
            .append_pair("projectId", &project_id.to_string());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TaskStoreError::network)?;
        let (status, body) = read_body(response).await?;

        match status {
            code if code.is_success() => {
                let tasks = payload::parse_task_list(&body)?;
                debug!(count = tasks.len(), "fetched tasks");
                Ok(tasks)
            }
            StatusCode::NOT_FOUND => Err(TaskStoreError::NotFound(project_id)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(TaskStoreError::validation(extract_error_message(&body)))
            }
            code => {
                let err = status_error(code, &body);
                warn!(%err, "task fetch failed");
                Err(TaskStoreError::network(err))
            }
        }
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn set_task_status(&self, task_id: TaskId, status: TaskStatus) -> TaskStoreResult<Task> {
        let url = self.endpoint(&["tasks", &task_id.to_string(), "status"])?;
        let response = self
            .client
            .patch(url)
            .json(&StatusUpdatePayload::new(task_id, status))
            .send()
            .await
            .map_err(TaskStoreError::network)?;
        let (http_status, body) = read_body(response).await?;

        match http_status {
            code if code.is_success() => {
                let task = payload::parse_task(&body)?;
                if task.id() != task_id {
                    return Err(TaskStoreError::validation(format!(
                        "status update for task {task_id} returned task {}",
                        task.id()
                    )));
                }
                debug!(returned_status = %task.status(), "task status updated");
                Ok(task)
            }
            StatusCode::NOT_FOUND | StatusCode::CONFLICT => Err(TaskStoreError::Conflict(task_id)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(TaskStoreError::validation(extract_error_message(&body)))
            }
            code => {
                let err = status_error(code, &body);
                warn!(%err, "task status update failed");
                Err(TaskStoreError::network(err))
            }
        }
    }
}
