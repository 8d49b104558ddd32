use serde_json::{json, Value};
use tracing::info;

use crate::common::errors::messages;
use crate::common::{AppError, AppResult, ContentId, OperatorId};
use crate::domains::contents::models::Content;
use crate::kernel::ServerDeps;

/// `approved → published`, recording the live URL under the content's channel.
pub async fn publish_content(
    deps: &ServerDeps,
    operator_id: OperatorId,
    content_id: ContentId,
    url: Option<String>,
) -> AppResult<Content> {
    let content = deps
        .contents
        .find_content(content_id, operator_id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::CONTENT_NOT_FOUND))?;

    if !content.status.can_publish() {
        return Err(AppError::invalid_state(messages::PUBLISH_NOT_ALLOWED));
    }

    let mut metadata = content.metadata.clone();
    if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
        record_published_url(&mut metadata, content.channel.as_str(), url.trim());
    }

    let published = deps
        .contents
        .mark_published(content_id, operator_id, &metadata)
        .await?
        .ok_or_else(|| AppError::invalid_state(messages::PUBLISH_NOT_ALLOWED))?;

    info!(content_id = %content_id, channel = %published.channel, "Content published");
    Ok(published)
}

fn record_published_url(metadata: &mut Value, channel: &str, url: &str) {
    if !metadata.is_object() {
        *metadata = json!({});
    }
    let urls = metadata
        .as_object_mut()
        .map(|m| m.entry("published_urls").or_insert_with(|| json!({})));
    if let Some(urls) = urls {
        if !urls.is_object() {
            *urls = json!({});
        }
        if let Some(map) = urls.as_object_mut() {
            map.insert(channel.to_string(), Value::String(url.to_string()));
        }
    }
}
