//! Confirm workflow: the operator hands a draft to the advertiser, and the
//! advertiser answers through the preview link.
//!
//! Each step writes the content row first and appends to the notification
//! log second. The log write is not transactional with the status write: if
//! it fails the status change stands and the failure is only logged.

use chrono::Utc;
use tracing::{error, info, warn};

use crate::common::errors::messages;
use crate::common::{AppError, AppResult, ContentId, OperatorId};
use crate::domains::contents::models::{ConfirmAction, Content, ContentStatus, PreviewToken};
use crate::domains::notifications::messages::{confirm_request_message, confirm_response_message};
use crate::domains::notifications::{NewNotification, NotificationStatus, NotificationType};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone)]
pub struct ConfirmRequestResult {
    pub content: Content,
    pub preview_url: String,
    pub message: String,
}

/// Move an operator's content to `pending_confirm` and log the request.
///
/// Repeating the call re-stamps `confirm_requested_at` and returns the same
/// preview URL; the token is never regenerated, so earlier links stay valid.
pub async fn request_confirm(
    deps: &ServerDeps,
    operator_id: OperatorId,
    content_id: ContentId,
) -> AppResult<ConfirmRequestResult> {
    let content = deps
        .contents
        .find_content(content_id, operator_id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::CONTENT_NOT_FOUND))?;

    if !content.status.can_request_confirm() {
        return Err(AppError::invalid_state(messages::CONFIRM_NOT_ALLOWED));
    }

    let advertiser = deps
        .advertisers
        .find_advertiser(content.advertiser_id, operator_id)
        .await?;
    let (advertiser, phone) = match advertiser {
        Some(advertiser) => match advertiser.confirm_phone().map(str::to_string) {
            Some(phone) => (advertiser, phone),
            None => return Err(AppError::invalid_state(messages::MISSING_CONTACT_PHONE)),
        },
        None => return Err(AppError::invalid_state(messages::MISSING_CONTACT_PHONE)),
    };

    let content = deps
        .contents
        .mark_confirm_requested(content_id, operator_id, Utc::now())
        .await?
        .ok_or_else(|| AppError::invalid_state(messages::CONFIRM_NOT_ALLOWED))?;

    let preview_url = content.preview_token.preview_url(&deps.preview_base_url);
    let text = confirm_request_message(&advertiser, &content, &preview_url);

    let notification = NewNotification {
        user_id: operator_id,
        content_id: Some(content.id),
        notification_type: NotificationType::ConfirmRequest,
        message: text.clone(),
        recipient_phone: Some(phone.clone()),
        recipient_email: advertiser.contact_email.clone(),
        status: NotificationStatus::Pending,
        sent_at: None,
    };
    if let Err(e) = deps.notifications.insert_notification(&notification).await {
        error!(content_id = %content.id, error = %e, "Failed to log confirm request notification");
    }

    if let Err(e) = deps.messenger.send_confirm_request(&phone, &text).await {
        warn!(content_id = %content.id, error = %e, "Confirm request hand-off failed");
    }

    info!(
        content_id = %content.id,
        operator_id = %operator_id,
        advertiser_id = %advertiser.id,
        "Confirm requested"
    );

    Ok(ConfirmRequestResult {
        content,
        preview_url,
        message: format!("{}님께 컨펌 요청을 보냈습니다.", advertiser.approver_name()),
    })
}

/// Record the advertiser's decision for the content behind `token`.
///
/// Legal only while the content is `pending_confirm`; any other status,
/// including one already answered, is rejected, so a token cannot flip the
/// state twice. The write itself is conditional on the same status, which
/// also rejects the loser of two concurrent answers.
pub async fn respond_to_confirm(
    deps: &ServerDeps,
    token: &PreviewToken,
    action: ConfirmAction,
    message: Option<String>,
) -> AppResult<ContentStatus> {
    let content = deps
        .preview
        .find_by_preview_token(token)
        .await?
        .ok_or_else(|| AppError::not_found(messages::CONTENT_NOT_FOUND))?;

    if !content.status.accepts_confirm_response() {
        return Err(AppError::invalid_state(messages::ALREADY_PROCESSED));
    }

    let now = Utc::now();
    let updated = deps
        .preview
        .record_confirm_response(content.id, action.target_status(), message.as_deref(), now)
        .await?
        .ok_or_else(|| AppError::invalid_state(messages::ALREADY_PROCESSED))?;

    let notification = NewNotification {
        user_id: updated.user_id,
        content_id: Some(updated.id),
        notification_type: NotificationType::ConfirmResponse,
        message: confirm_response_message(&updated, action, message.as_deref()),
        recipient_phone: None,
        recipient_email: None,
        status: NotificationStatus::Sent,
        sent_at: Some(now),
    };
    if let Err(e) = deps.notifications.insert_notification(&notification).await {
        error!(content_id = %updated.id, error = %e, "Failed to log confirm response notification");
    }

    info!(content_id = %updated.id, status = %updated.status, "Confirm response recorded");

    Ok(updated.status)
}

/// Read-only view of the content behind a preview token.
pub async fn view_preview(deps: &ServerDeps, token: &PreviewToken) -> AppResult<Content> {
    deps.preview
        .find_by_preview_token(token)
        .await?
        .ok_or_else(|| AppError::not_found(messages::CONTENT_NOT_FOUND))
}
