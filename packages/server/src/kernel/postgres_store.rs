//! Postgres implementation of the datastore traits.
//!
//! Thin adapter: each method delegates to the query on the matching model.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{AdvertiserId, ContentId, NotificationId, OperatorId};
use crate::domains::advertisers::{Advertiser, NewAdvertiser};
use crate::domains::contents::models::{
    Content, ContentFilter, ContentStatus, NewContent, PreviewToken,
};
use crate::domains::notifications::{NewNotification, Notification};
use crate::kernel::{BaseAdvertiserStore, BaseContentStore, BaseNotificationStore, BasePreviewStore};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseAdvertiserStore for PostgresStore {
    async fn create_advertiser(
        &self,
        user_id: OperatorId,
        input: &NewAdvertiser,
    ) -> Result<Advertiser> {
        Advertiser::create(user_id, input, &self.pool).await
    }

    async fn find_advertiser(
        &self,
        id: AdvertiserId,
        user_id: OperatorId,
    ) -> Result<Option<Advertiser>> {
        Advertiser::find_owned(id, user_id, &self.pool).await
    }

    async fn list_advertisers(&self, user_id: OperatorId) -> Result<Vec<Advertiser>> {
        Advertiser::list_owned(user_id, &self.pool).await
    }

    async fn save_advertiser(&self, advertiser: &Advertiser) -> Result<Option<Advertiser>> {
        Advertiser::save(advertiser, &self.pool).await
    }
}

#[async_trait]
impl BaseContentStore for PostgresStore {
    async fn create_content(
        &self,
        user_id: OperatorId,
        input: &NewContent,
        preview_token: &PreviewToken,
    ) -> Result<Content> {
        Content::create(user_id, input, preview_token, &self.pool).await
    }

    async fn find_content(&self, id: ContentId, user_id: OperatorId) -> Result<Option<Content>> {
        Content::find_owned(id, user_id, &self.pool).await
    }

    async fn list_contents(
        &self,
        user_id: OperatorId,
        filter: &ContentFilter,
    ) -> Result<Vec<Content>> {
        Content::list_owned(user_id, filter, &self.pool).await
    }

    async fn save_draft(&self, content: &Content) -> Result<Option<Content>> {
        Content::save_draft(content, &self.pool).await
    }

    async fn mark_confirm_requested(
        &self,
        id: ContentId,
        user_id: OperatorId,
        requested_at: DateTime<Utc>,
    ) -> Result<Option<Content>> {
        Content::mark_confirm_requested(id, user_id, requested_at, &self.pool).await
    }

    async fn mark_published(
        &self,
        id: ContentId,
        user_id: OperatorId,
        metadata: &serde_json::Value,
    ) -> Result<Option<Content>> {
        Content::mark_published(id, user_id, metadata, &self.pool).await
    }

    async fn delete_content(&self, id: ContentId, user_id: OperatorId) -> Result<bool> {
        Content::delete(id, user_id, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl BaseNotificationStore for PostgresStore {
    async fn insert_notification(&self, input: &NewNotification) -> Result<Notification> {
        Notification::create(input, &self.pool).await
    }

    async fn list_notifications(
        &self,
        user_id: OperatorId,
        unread_only: bool,
    ) -> Result<Vec<Notification>> {
        Notification::list_for_user(user_id, unread_only, &self.pool).await
    }

    async fn mark_notification_read(
        &self,
        id: NotificationId,
        user_id: OperatorId,
    ) -> Result<bool> {
        Notification::mark_read(id, user_id, &self.pool).await
    }
}

#[async_trait]
impl BasePreviewStore for PostgresStore {
    async fn find_by_preview_token(&self, token: &PreviewToken) -> Result<Option<Content>> {
        Content::find_by_preview_token(token, &self.pool).await
    }

    async fn record_confirm_response(
        &self,
        id: ContentId,
        status: ContentStatus,
        message: Option<&str>,
        responded_at: DateTime<Utc>,
    ) -> Result<Option<Content>> {
        Content::record_confirm_response(id, status, message, responded_at, &self.pool).await
    }
}
