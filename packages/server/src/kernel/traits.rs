// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Workflow rules live in domain activities that call these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseContentStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::common::{AdvertiserId, ContentId, NotificationId, OperatorId};
use crate::domains::advertisers::{Advertiser, NewAdvertiser};
use crate::domains::contents::models::{
    Content, ContentFilter, ContentStatus, NewContent, PreviewToken,
};
use crate::domains::notifications::{NewNotification, Notification};

// =============================================================================
// Operator-scoped stores
// =============================================================================
//
// Every read and write is scoped by the calling operator; a row owned by
// someone else behaves exactly like a missing row.

#[async_trait]
pub trait BaseAdvertiserStore: Send + Sync {
    async fn create_advertiser(
        &self,
        user_id: OperatorId,
        input: &NewAdvertiser,
    ) -> Result<Advertiser>;

    async fn find_advertiser(
        &self,
        id: AdvertiserId,
        user_id: OperatorId,
    ) -> Result<Option<Advertiser>>;

    async fn list_advertisers(&self, user_id: OperatorId) -> Result<Vec<Advertiser>>;

    /// Persist the editable fields of an advertiser the caller owns.
    async fn save_advertiser(&self, advertiser: &Advertiser) -> Result<Option<Advertiser>>;
}

#[async_trait]
pub trait BaseContentStore: Send + Sync {
    /// Create a `draft` holding the given preview token.
    async fn create_content(
        &self,
        user_id: OperatorId,
        input: &NewContent,
        preview_token: &PreviewToken,
    ) -> Result<Content>;

    async fn find_content(&self, id: ContentId, user_id: OperatorId) -> Result<Option<Content>>;

    async fn list_contents(
        &self,
        user_id: OperatorId,
        filter: &ContentFilter,
    ) -> Result<Vec<Content>>;

    /// Persist title, body, channel, schedule and status. Returns `None`
    /// unless the stored row is still `draft` or `revision`.
    async fn save_draft(&self, content: &Content) -> Result<Option<Content>>;

    /// Set `pending_confirm` and stamp `confirm_requested_at`. Returns `None`
    /// unless the stored row is `draft`, `revision` or `pending_confirm`.
    async fn mark_confirm_requested(
        &self,
        id: ContentId,
        user_id: OperatorId,
        requested_at: DateTime<Utc>,
    ) -> Result<Option<Content>>;

    /// `approved → published`; returns `None` when the row is not `approved`.
    async fn mark_published(
        &self,
        id: ContentId,
        user_id: OperatorId,
        metadata: &serde_json::Value,
    ) -> Result<Option<Content>>;

    async fn delete_content(&self, id: ContentId, user_id: OperatorId) -> Result<bool>;

    /// Round-trip to the datastore, used by the health check.
    async fn ping(&self) -> Result<()>;
}

#[async_trait]
pub trait BaseNotificationStore: Send + Sync {
    /// Append a row. Notifications are never rewritten by the workflow.
    async fn insert_notification(&self, input: &NewNotification) -> Result<Notification>;

    async fn list_notifications(
        &self,
        user_id: OperatorId,
        unread_only: bool,
    ) -> Result<Vec<Notification>>;

    async fn mark_notification_read(&self, id: NotificationId, user_id: OperatorId)
        -> Result<bool>;
}

// =============================================================================
// Token-scoped store (elevated access)
// =============================================================================

/// The only datastore access that is not scoped to an operator.
///
/// Used by the unauthenticated preview routes, where the preview token is the
/// credential. Keep this to the two operations below.
#[async_trait]
pub trait BasePreviewStore: Send + Sync {
    async fn find_by_preview_token(&self, token: &PreviewToken) -> Result<Option<Content>>;

    /// Write the approver's decision on the resolved row. Returns `None` when
    /// the row is no longer `pending_confirm`.
    async fn record_confirm_response(
        &self,
        id: ContentId,
        status: ContentStatus,
        message: Option<&str>,
        responded_at: DateTime<Utc>,
    ) -> Result<Option<Content>>;
}

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Complete with a separate system prompt.
    async fn complete_with_system(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let combined = format!("{}\n\n{}", system_prompt, user_prompt);
        self.complete(&combined).await
    }
}

// =============================================================================
// Messenger Trait (Infrastructure - outbound SMS)
// =============================================================================

#[async_trait]
pub trait BaseMessenger: Send + Sync {
    /// Hand a confirm request to the approver's phone.
    async fn send_confirm_request(&self, phone_number: &str, message: &str) -> Result<()>;
}
