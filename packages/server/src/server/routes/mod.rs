// HTTP routes
pub mod advertisers;
pub mod contents;
pub mod health;
pub mod notifications;
pub mod preview;

pub use health::*;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::common::errors::messages;
use crate::common::{AppError, AppResult, Id};

/// Unwrap a JSON body, turning any rejection into a 400 before the handler
/// touches the datastore.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected request body");
            Err(AppError::invalid_state(messages::INVALID_REQUEST))
        }
    }
}

/// Same as `json_body` for query strings.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    match query {
        Ok(Query(params)) => Ok(params),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected query string");
            Err(AppError::invalid_state(messages::INVALID_REQUEST))
        }
    }
}

/// Path ids that are not UUIDs cannot name an existing row.
pub(crate) fn path_id<T>(raw: &str, not_found: &str) -> AppResult<Id<T>> {
    Id::parse(raw).map_err(|_| AppError::not_found(not_found))
}
