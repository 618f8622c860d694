use super::error::ProxyError;
use super::server::AppState;
use crate::analytics::{task_statistics, TaskAnalytics, TaskFilter, TaskFilterParams, TaskStatistics};
use crate::clickup::{ClickUpClient, UpstreamResponse};
use crate::tasks::{normalize, TaskRecord};
use crate::workload::WorkloadReport;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

fn client(state: &AppState) -> Result<&ClickUpClient, ProxyError> {
    state.client.as_ref().ok_or(ProxyError::MissingToken)
}

/// An empty body reads as `{}`.
fn parse_body(body: &Bytes) -> Result<Value, ProxyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ProxyError::InvalidBody(e.to_string()))
}

/// Removes `list_id` from the body. Missing, null, empty and zero all count
/// as absent.
fn take_list_id(body: &mut Value) -> Option<String> {
    match body.as_object_mut()?.remove("list_id")? {
        Value::String(id) if !id.is_empty() => Some(id),
        Value::Number(id) if id.as_f64() != Some(0.0) => Some(id.to_string()),
        _ => None,
    }
}

fn echo(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(upstream.body)).into_response()
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let client = client(&state)?;
    let mut payload = parse_body(&body)?;
    let list_id = take_list_id(&mut payload).ok_or(ProxyError::MissingListId)?;

    let upstream = client.create_task(&list_id, &payload).await?;
    info!("Create task in list {} -> {}", list_id, upstream.status);
    Ok(echo(upstream))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let client = client(&state)?;
    let payload = parse_body(&body)?;

    let upstream = client.update_task(&task_id, &payload).await?;
    info!("Update task {} -> {}", task_id, upstream.status);
    Ok(echo(upstream))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Response, ProxyError> {
    let client = client(&state)?;

    let upstream = client.delete_task(&task_id).await?;
    info!("Delete task {} -> {}", task_id, upstream.status);
    Ok(echo(upstream))
}

async fn load_tasks(state: &AppState) -> Result<Vec<TaskRecord>, ProxyError> {
    let grouped = state.source.load().await?;
    Ok(normalize(&grouped))
}

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TaskFilterParams>,
) -> Result<Json<Vec<TaskRecord>>, ProxyError> {
    let tasks = load_tasks(&state).await?;
    let filter = TaskFilter::from(&params);
    Ok(Json(filter.apply(&tasks).into_iter().cloned().collect()))
}

pub async fn workload(State(state): State<Arc<AppState>>) -> Result<Json<WorkloadReport>, ProxyError> {
    let tasks = load_tasks(&state).await?;
    Ok(Json(WorkloadReport::compute(&tasks, &state.roster)))
}

pub async fn analytics(State(state): State<Arc<AppState>>) -> Result<Json<TaskAnalytics>, ProxyError> {
    let tasks = load_tasks(&state).await?;
    Ok(Json(TaskAnalytics::from_tasks(&tasks)))
}

pub async fn statistics(State(state): State<Arc<AppState>>) -> Result<Json<TaskStatistics>, ProxyError> {
    let grouped = state.source.load().await?;
    Ok(Json(task_statistics(&grouped, Utc::now())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_defaults_to_empty_object() {
        assert_eq!(parse_body(&Bytes::new()).unwrap(), json!({}));
        assert_eq!(parse_body(&Bytes::from_static(b"  \n")).unwrap(), json!({}));
        assert!(matches!(
            parse_body(&Bytes::from_static(b"{oops")),
            Err(ProxyError::InvalidBody(_))
        ));
    }

    #[test]
    fn test_take_list_id() {
        let mut body = json!({"list_id": "901", "name": "x"});
        assert_eq!(take_list_id(&mut body).as_deref(), Some("901"));
        assert_eq!(body, json!({"name": "x"}));

        assert_eq!(take_list_id(&mut json!({"list_id": 77})).as_deref(), Some("77"));
        assert!(take_list_id(&mut json!({"list_id": ""})).is_none());
        assert!(take_list_id(&mut json!({"list_id": 0})).is_none());
        assert!(take_list_id(&mut json!({"list_id": null})).is_none());
        assert!(take_list_id(&mut json!({"name": "x"})).is_none());
        assert!(take_list_id(&mut json!(["list_id"])).is_none());
    }
}
