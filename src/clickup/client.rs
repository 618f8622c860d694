use super::types::*;
use crate::error::ClickUpError;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.clickup.com/api/v2";

#[derive(Debug, Clone)]
pub struct ClickUpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ClickUpClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header("Authorization", &self.token)
    }

    /// Sends a mutation and echoes the upstream status and JSON body.
    async fn forward(&self, request: RequestBuilder) -> Result<UpstreamResponse, ClickUpError> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(UpstreamResponse {
                status: status.as_u16(),
                body: Value::Null,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ClickUpError::Decode(e.to_string()))?;
        Ok(UpstreamResponse {
            status: status.as_u16(),
            body,
        })
    }

    /// GET returning one array field of the response object.
    async fn fetch_array(&self, path: &str, field: &str) -> Result<Vec<Value>, ClickUpError> {
        let response = self.request(Method::GET, path).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClickUpError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut data = response
            .json::<Value>()
            .await
            .map_err(|e| ClickUpError::Decode(e.to_string()))?;
        match data.get_mut(field).map(Value::take) {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(ClickUpError::Decode(format!(
                "expected '{}' to be an array, got {}",
                field, other
            ))),
        }
    }

    async fn fetch_named(&self, path: &str, field: &str) -> Result<Vec<NamedItem>, ClickUpError> {
        self.fetch_array(path, field)
            .await?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| ClickUpError::Decode(e.to_string())))
            .collect()
    }

    pub async fn create_task(&self, list_id: &str, payload: &Value) -> Result<UpstreamResponse, ClickUpError> {
        let request = self
            .request(Method::POST, &format!("/list/{}/task", list_id))
            .json(payload);
        self.forward(request).await
    }

    pub async fn update_task(&self, task_id: &str, payload: &Value) -> Result<UpstreamResponse, ClickUpError> {
        let request = self
            .request(Method::PUT, &format!("/task/{}", task_id))
            .json(payload);
        self.forward(request).await
    }

    /// A `204 No Content` answer is reported as `200 {"ok": true}`.
    pub async fn delete_task(&self, task_id: &str) -> Result<UpstreamResponse, ClickUpError> {
        let request = self.request(Method::DELETE, &format!("/task/{}", task_id));
        let response = self.forward(request).await?;
        if response.status == StatusCode::NO_CONTENT.as_u16() {
            return Ok(UpstreamResponse {
                status: StatusCode::OK.as_u16(),
                body: json!({ "ok": true }),
            });
        }
        Ok(response)
    }

    /// Tasks of one list, in the upstream API shape.
    pub async fn list_tasks(&self, list_id: &str) -> Result<Vec<Value>, ClickUpError> {
        self.fetch_array(&format!("/list/{}/task", list_id), "tasks").await
    }

    pub async fn teams(&self) -> Result<Vec<NamedItem>, ClickUpError> {
        self.fetch_named("/team", "teams").await
    }

    pub async fn spaces(&self, team_id: &str) -> Result<Vec<NamedItem>, ClickUpError> {
        self.fetch_named(&format!("/team/{}/space", team_id), "spaces").await
    }

    pub async fn lists(&self, space_id: &str) -> Result<Vec<NamedItem>, ClickUpError> {
        self.fetch_named(&format!("/space/{}/list", space_id), "lists").await
    }
}
