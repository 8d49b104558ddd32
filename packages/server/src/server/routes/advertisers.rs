use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    Json,
};

use super::{json_body, path_id};
use crate::common::errors::messages;
use crate::common::{AppError, AppResult};
use crate::domains::advertisers::{Advertiser, AdvertiserUpdate, NewAdvertiser};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

pub async fn create_advertiser(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    payload: Result<Json<NewAdvertiser>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Advertiser>)> {
    let mut input = json_body(payload)?;
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::invalid_state(messages::NAME_REQUIRED));
    }

    let advertiser = state
        .deps
        .advertisers
        .create_advertiser(user.operator_id, &input)
        .await?;
    tracing::info!(advertiser_id = %advertiser.id, operator_id = %user.operator_id, "Advertiser created");
    Ok((StatusCode::CREATED, Json(advertiser)))
}

pub async fn list_advertisers(
    Extension(state): Extension<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Advertiser>>> {
    let advertisers = state
        .deps
        .advertisers
        .list_advertisers(user.operator_id)
        .await?;
    Ok(Json(advertisers))
}

pub async fn get_advertiser(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Advertiser>> {
    let id = path_id(&id, messages::ADVERTISER_NOT_FOUND)?;
    state
        .deps
        .advertisers
        .find_advertiser(id, user.operator_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(messages::ADVERTISER_NOT_FOUND))
}

pub async fn update_advertiser(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<AdvertiserUpdate>, JsonRejection>,
) -> AppResult<Json<Advertiser>> {
    let id = path_id(&id, messages::ADVERTISER_NOT_FOUND)?;
    let mut update = json_body(payload)?;
    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::invalid_state(messages::NAME_REQUIRED));
        }
    }

    let mut advertiser = state
        .deps
        .advertisers
        .find_advertiser(id, user.operator_id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::ADVERTISER_NOT_FOUND))?;
    advertiser.apply(update);

    state
        .deps
        .advertisers
        .save_advertiser(&advertiser)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(messages::ADVERTISER_NOT_FOUND))
}
