use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{path_id, query_params};
use crate::common::errors::messages;
use crate::common::{AppError, AppResult};
use crate::domains::notifications::Notification;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread: bool,
}

pub async fn list_notifications(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    query: Result<Query<NotificationQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Notification>>> {
    let query = query_params(query)?;
    let notifications = state
        .deps
        .notifications
        .list_notifications(user.operator_id, query.unread)
        .await?;
    Ok(Json(notifications))
}

pub async fn mark_read(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = path_id(&id, messages::NOTIFICATION_NOT_FOUND)?;
    if !state
        .deps
        .notifications
        .mark_notification_read(id, user.operator_id)
        .await?
    {
        return Err(AppError::not_found(messages::NOTIFICATION_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}
