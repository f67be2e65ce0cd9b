//! Client for the remote task service.
//!
//! The service exposes a small REST surface under a base URL:
//!
//! | Operation | Request              |
//! |-----------|----------------------|
//! | list      | `GET /tasks`         |
//! | get       | `GET /tasks/{id}`    |
//! | create    | `POST /tasks`        |
//! | update    | `PUT /tasks/{id}`    |
//! | delete    | `DELETE /tasks/{id}` |
//!
//! Every call is a single attempt; there are no retries.

use std::time::Duration;
use reqwest::blocking::{Client, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use crate::error::{ApiError, ApiResult};
use crate::models::{Task, TaskFormData, TaskPatch};

/// Operations the views need from the task service.
///
/// Implemented over HTTP by [`HttpTaskApi`]; tests substitute an in-memory fake.
pub trait TaskApi {
    fn list_tasks(&self) -> ApiResult<Vec<Task>>;
    fn get_task(&self, id: u64) -> ApiResult<Task>;
    fn create_task(&self, data: &TaskFormData) -> ApiResult<Task>;
    fn update_task(&self, id: u64, patch: &TaskPatch) -> ApiResult<Task>;
    fn delete_task(&self, id: u64) -> ApiResult<()>;
}

/// Blocking HTTP implementation of [`TaskApi`].
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: Client,
    base_url: Url,
}

impl HttpTaskApi {
    pub fn new(base_url: Url, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("todoust/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(HttpTaskApi { http, base_url })
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn send<B: Serialize>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<Response> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "sending request");
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(ApiError::Status { status, body })
        }
    }

    fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let text = self.send(method, path, body)?.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl TaskApi for HttpTaskApi {
    fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        self.request(Method::GET, "tasks", None::<&()>)
    }

    fn get_task(&self, id: u64) -> ApiResult<Task> {
        self.request(Method::GET, &format!("tasks/{}", id), None::<&()>)
    }

    fn create_task(&self, data: &TaskFormData) -> ApiResult<Task> {
        self.request(Method::POST, "tasks", Some(data))
    }

    fn update_task(&self, id: u64, patch: &TaskPatch) -> ApiResult<Task> {
        self.request(Method::PUT, &format!("tasks/{}", id), Some(patch))
    }

    fn delete_task(&self, id: u64) -> ApiResult<()> {
        // The response body, if any, carries nothing we use.
        self.send(Method::DELETE, &format!("tasks/{}", id), None::<&()>)?;
        Ok(())
    }
}
