// SPDX-License-Identifier: MIT

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::hub::HubError;

/// HTTP-facing wrapper that renders [`HubError`] as a JSON body
#[derive(Debug)]
pub struct ApiError(pub HubError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<HubError> for ApiError {
    fn from(err: HubError) -> Self {
        Self(err)
    }
}

/// Malformed or incomplete request bodies are validation failures
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(HubError::validation(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            HubError::ValidationFailed(_) | HubError::InvalidCoordinate(_) => {
                StatusCode::BAD_REQUEST
            }
            HubError::NotFound { .. } => StatusCode::NOT_FOUND,
            HubError::Conflict(_)
            | HubError::InvalidTransition { .. }
            | HubError::NotAssigned { .. } => StatusCode::CONFLICT,
            HubError::Integrity(_) | HubError::Config(_) | HubError::Io(_) | HubError::Yaml(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self.0);
        } else {
            log::debug!("Request rejected: {}", self.0);
        }

        let body = json!({
            "error": self.0.to_string(),
            "code": self.0.code(),
        });
        (status, Json(body)).into_response()
    }
}
