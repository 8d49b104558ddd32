use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{json_body, path_id, query_params};
use crate::common::errors::messages;
use crate::common::{AppError, AppResult, ContentId};
use crate::domains::contents::activities::{
    self, ContentEdit, CreateContentInput, GenerateDraftInput,
};
use crate::domains::contents::models::{Content, ContentFilter};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// Content as shown to its operator, with the shareable preview link.
#[derive(Serialize)]
pub struct ContentResponse {
    #[serde(flatten)]
    content: Content,
    preview_url: String,
}

impl ContentResponse {
    fn new(content: Content, base_url: &str) -> Self {
        let preview_url = content.preview_token.preview_url(base_url);
        Self {
            content,
            preview_url,
        }
    }
}

#[derive(Serialize)]
pub struct ConfirmResponse {
    success: bool,
    preview_url: String,
    message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PublishRequest {
    pub url: Option<String>,
}

fn content_id(raw: &str) -> AppResult<ContentId> {
    path_id(raw, messages::CONTENT_NOT_FOUND)
}

pub async fn create_content(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateContentInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ContentResponse>)> {
    let input = json_body(payload)?;
    let content = activities::create_draft(&state.deps, user.operator_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContentResponse::new(content, &state.deps.preview_base_url)),
    ))
}

pub async fn generate_content(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    payload: Result<Json<GenerateDraftInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ContentResponse>)> {
    let input = json_body(payload)?;
    let content = activities::generate_draft(&state.deps, user.operator_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContentResponse::new(content, &state.deps.preview_base_url)),
    ))
}

pub async fn list_contents(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    query: Result<Query<ContentFilter>, QueryRejection>,
) -> AppResult<Json<Vec<ContentResponse>>> {
    let filter = query_params(query)?;
    let contents = state
        .deps
        .contents
        .list_contents(user.operator_id, &filter)
        .await?;
    Ok(Json(
        contents
            .into_iter()
            .map(|c| ContentResponse::new(c, &state.deps.preview_base_url))
            .collect(),
    ))
}

pub async fn get_content(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ContentResponse>> {
    let id = content_id(&id)?;
    let content = state
        .deps
        .contents
        .find_content(id, user.operator_id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::CONTENT_NOT_FOUND))?;
    Ok(Json(ContentResponse::new(
        content,
        &state.deps.preview_base_url,
    )))
}

pub async fn update_content(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<ContentEdit>, JsonRejection>,
) -> AppResult<Json<ContentResponse>> {
    let id = content_id(&id)?;
    let edit = json_body(payload)?;
    let content = activities::update_draft(&state.deps, user.operator_id, id, edit).await?;
    Ok(Json(ContentResponse::new(
        content,
        &state.deps.preview_base_url,
    )))
}

pub async fn delete_content(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = content_id(&id)?;
    activities::delete_draft(&state.deps, user.operator_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /contents/{id}/confirm`
pub async fn request_confirm(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ConfirmResponse>> {
    let id = content_id(&id)?;
    let result = activities::request_confirm(&state.deps, user.operator_id, id).await?;
    Ok(Json(ConfirmResponse {
        success: true,
        preview_url: result.preview_url,
        message: result.message,
    }))
}

pub async fn publish_content(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    payload: Option<Json<PublishRequest>>,
) -> AppResult<Json<ContentResponse>> {
    let id = content_id(&id)?;
    let url = payload.and_then(|Json(body)| body.url);
    let content = activities::publish_content(&state.deps, user.operator_id, id, url).await?;
    Ok(Json(ContentResponse::new(
        content,
        &state.deps.preview_base_url,
    )))
}
