use crate::error::{ClickUpError, SourceError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Failures the proxy reports itself, as opposed to upstream answers it
/// echoes. Always rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("CLICKUP_API_TOKEN not set")]
    MissingToken,
    #[error("list_id required")]
    MissingListId,
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Upstream(#[from] ClickUpError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingToken | ProxyError::MissingListId | ProxyError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::Upstream(_) | ProxyError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!("Proxy request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ProxyError::MissingToken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ProxyError::MissingListId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyError::InvalidBody("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::Upstream(ClickUpError::Decode("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ProxyError::MissingToken.to_string(), "CLICKUP_API_TOKEN not set");
        assert_eq!(ProxyError::MissingListId.to_string(), "list_id required");
        assert_eq!(
            ProxyError::Upstream(ClickUpError::Decode("bad".into())).to_string(),
            "Failed to parse response: bad"
        );
    }
}
