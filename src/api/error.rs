use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::{error::StatsError, types::Credential};

/// Error returned by API handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub StatsError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            StatsError::MalformedUpstreamData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            StatsError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            StatsError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            StatsError::Config(_) | StatsError::Io(_) | StatsError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, error = %self.0, "request failed");
        } else {
            warn!(%status, error = %self.0, "request rejected");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Credential::new)
            .ok_or_else(|| ApiError(StatsError::Unauthorized("Not authenticated".to_string())))
    }
}
