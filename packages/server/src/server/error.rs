//! HTTP rendering of `AppError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::common::errors::messages;
use crate::common::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationRequired => {
                (StatusCode::UNAUTHORIZED, messages::LOGIN_REQUIRED.to_string())
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::InvalidState(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Persistence(ref e) => {
                tracing::error!(error = ?e, "Persistence error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages::INTERNAL.to_string(),
                )
            }
            AppError::Generation(ref e) => {
                tracing::error!(error = ?e, "Generation error");
                (StatusCode::BAD_GATEWAY, messages::GENERATION_FAILED.to_string())
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let cases = [
            (AppError::AuthenticationRequired, StatusCode::UNAUTHORIZED),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::invalid_state("x"), StatusCode::BAD_REQUEST),
            (
                AppError::Persistence(anyhow::anyhow!("connection reset")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Generation(anyhow::anyhow!("timeout")),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
