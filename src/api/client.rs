use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use crate::api::dto::{self, CreateTaskBody, UpdateTaskBody};
use crate::api::envelope;
use crate::api::error::ApiError;
use crate::model::{Category, Task, TaskId};

/// Authenticated HTTP gateway to the Zelvo backend. One instance is shared
/// by every operation; it owns the base URL and the bearer token and unwraps
/// response envelopes so callers only ever see model types.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer header. Auth endpoints skip this via `public_post`.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// POST without the bearer header, for `/auth/login` and `/auth/register`
    pub(crate) async fn public_post(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<Value, ApiError> {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        debug!(path, "GET");
        let resp = self.authed(self.http.get(self.url(path))).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// `GET /tasks`: all tasks for the authenticated user, envelope
    /// normalized to a flat list
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let body = self.get_json("/tasks").await?;
        Ok(envelope::decode_task_list(body))
    }

    /// `GET /tasks/{id}`: a single task, nested refs flattened
    pub async fn get_task(&self, id: TaskId) -> Result<Task, ApiError> {
        let body = self.get_json(&format!("/tasks/{}", id)).await?;
        let data = envelope::unwrap_data(body)?;
        dto::task_from_value(data).map_err(|e| ApiError::Shape(e.to_string()))
    }

    /// `POST /tasks`: create, returning the persisted task with its
    /// server-assigned id and timestamps
    pub async fn create_task(&self, body: &CreateTaskBody) -> Result<Task, ApiError> {
        debug!(title = %body.title, "POST /tasks");
        let resp = self
            .authed(self.http.post(self.url("/tasks")).json(body))
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let data = envelope::unwrap_data(resp.json().await?)?;
        dto::task_from_value(data).map_err(|e| ApiError::Shape(e.to_string()))
    }

    /// `PUT /tasks/{id}`: full update, returning the updated task
    pub async fn update_task(
        &self,
        id: TaskId,
        body: &UpdateTaskBody,
    ) -> Result<Task, ApiError> {
        debug!(id, "PUT /tasks");
        let resp = self
            .authed(self.http.put(self.url(&format!("/tasks/{}", id))).json(body))
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let data = envelope::unwrap_data(resp.json().await?)?;
        dto::task_from_value(data).map_err(|e| ApiError::Shape(e.to_string()))
    }

    /// `DELETE /tasks/{id}`: success is any 2xx, no body expected
    pub async fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        debug!(id, "DELETE /tasks");
        let resp = self
            .authed(self.http.delete(self.url(&format!("/tasks/{}", id))))
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// `GET /categories`: all categories for the authenticated user
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.get_json("/categories").await?;
        let data = envelope::unwrap_data(body)?;
        serde_json::from_value(data).map_err(|e| ApiError::Shape(e.to_string()))
    }
}

/// Convert non-2xx responses into `ApiError::Status`, pulling the server's
/// `message` field out of the body when present.
async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let fallback = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();
    let message = match resp.json::<Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(fallback),
        Err(_) => fallback,
    };
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
