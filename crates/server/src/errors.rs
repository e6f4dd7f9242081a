use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// JSON error body: `{ "error": <reason phrase>, "detail": <message> }`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, detail) }

    pub fn unauthorized(detail: impl Into<String>) -> Self { Self::new(StatusCode::UNAUTHORIZED, detail) }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Token(_) | ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 只向客户端暴露业务错误信息，内部错误记录日志
        let detail = match e {
            ServiceError::Validation(m)
            | ServiceError::NotFound(m)
            | ServiceError::Conflict(m)
            | ServiceError::Unauthorized(m) => m,
            other => {
                error!(error = %other, "internal service error");
                "internal error".to_string()
            }
        };
        Self { status, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = self.status.as_u16(), detail = %self.detail, "request rejected");
        }
        let title = self.status.canonical_reason().unwrap_or("error");
        (self.status, Json(serde_json::json!({ "error": title, "detail": self.detail }))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
