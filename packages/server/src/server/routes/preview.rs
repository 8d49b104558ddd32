//! Unauthenticated routes keyed by a preview token.
//!
//! These are the only handlers that reach the datastore without an
//! operator session, and they only go through `BasePreviewStore`.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::json_body;
use crate::common::AppResult;
use crate::domains::contents::activities;
use crate::domains::contents::models::{Channel, ConfirmAction, ContentStatus, PreviewToken};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub action: ConfirmAction,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct RespondResponse {
    success: bool,
    status: ContentStatus,
}

/// What the advertiser sees on the preview page.
#[derive(Serialize)]
pub struct PreviewResponse {
    title: String,
    body: String,
    channel: Channel,
    status: ContentStatus,
    scheduled_at: Option<DateTime<Utc>>,
    confirm_message: Option<String>,
}

pub async fn get_preview(
    Extension(state): Extension<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<PreviewResponse>> {
    let token = PreviewToken::from_path(token);
    let content = activities::view_preview(&state.deps, &token).await?;
    Ok(Json(PreviewResponse {
        title: content.title,
        body: content.body,
        channel: content.channel,
        status: content.status,
        scheduled_at: content.scheduled_at,
        confirm_message: content.confirm_message,
    }))
}

/// `POST /preview/{token}/respond`
///
/// The body is validated before the token is looked up.
pub async fn respond(
    Extension(state): Extension<AppState>,
    Path(token): Path<String>,
    payload: Result<Json<RespondRequest>, JsonRejection>,
) -> AppResult<Json<RespondResponse>> {
    let request = json_body(payload)?;
    let token = PreviewToken::from_path(token);
    let status =
        activities::respond_to_confirm(&state.deps, &token, request.action, request.message)
            .await?;
    Ok(Json(RespondResponse {
        success: true,
        status,
    }))
}
