use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::{Channel, ContentStatus, PreviewToken};
use crate::common::{AdvertiserId, ContentId, OperatorId};

/// One planned or produced piece of marketing content.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Content {
    pub id: ContentId,
    pub user_id: OperatorId,
    pub advertiser_id: AdvertiserId,
    pub title: String,
    /// Free text, HTML or JSON depending on the channel.
    pub body: String,
    #[sqlx(try_from = "String")]
    pub channel: Channel,
    #[sqlx(try_from = "String")]
    pub status: ContentStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Assigned once at creation and never regenerated.
    pub preview_token: PreviewToken,
    pub confirm_requested_at: Option<DateTime<Utc>>,
    pub confirm_responded_at: Option<DateTime<Utc>>,
    pub confirm_message: Option<String>,
    /// Open key-value bag; `published_urls` is keyed by channel.
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a draft.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub advertiser_id: AdvertiserId,
    pub title: String,
    pub body: String,
    pub channel: Channel,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub metadata: serde_json::Value,
}

/// Listing filter; `from`/`to` bound `scheduled_at` for calendar views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentFilter {
    pub status: Option<ContentStatus>,
    pub advertiser_id: Option<AdvertiserId>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ContentFilter {
    pub fn matches(&self, content: &Content) -> bool {
        if self.status.is_some_and(|s| s != content.status) {
            return false;
        }
        if self
            .advertiser_id
            .is_some_and(|a| a != content.advertiser_id)
        {
            return false;
        }
        if let Some(from) = self.from {
            if content.scheduled_at.map_or(true, |at| at < from) {
                return false;
            }
        }
        if let Some(to) = self.to {
            if content.scheduled_at.map_or(true, |at| at >= to) {
                return false;
            }
        }
        true
    }
}

impl Content {
    /// Published URL recorded for this content's own channel.
    pub fn url_for_channel(&self) -> Option<&str> {
        self.metadata
            .get("published_urls")
            .and_then(|urls| urls.get(self.channel.as_str()))
            .and_then(|url| url.as_str())
    }

    pub async fn create(
        user_id: OperatorId,
        input: &NewContent,
        preview_token: &PreviewToken,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO contents (id, user_id, advertiser_id, title, body, channel, status, scheduled_at, preview_token, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, 'draft', $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(ContentId::new())
        .bind(user_id)
        .bind(input.advertiser_id)
        .bind(&input.title)
        .bind(&input.body)
        .bind(input.channel.as_str())
        .bind(input.scheduled_at)
        .bind(preview_token)
        .bind(&input.metadata)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find content by id, scoped to its owning operator.
    pub async fn find_owned(
        id: ContentId,
        user_id: OperatorId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM contents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Token lookup. Not scoped to an operator: the token is the credential.
    pub async fn find_by_preview_token(
        token: &PreviewToken,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM contents WHERE preview_token = $1")
            .bind(token)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_owned(
        user_id: OperatorId,
        filter: &ContentFilter,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM contents
            WHERE user_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::uuid IS NULL OR advertiser_id = $3)
              AND ($4::timestamptz IS NULL OR scheduled_at >= $4)
              AND ($5::timestamptz IS NULL OR scheduled_at < $5)
            ORDER BY scheduled_at ASC NULLS LAST, created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.advertiser_id)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Persist operator edits (title, body, channel, schedule, status).
    ///
    /// Only applies while the row is still editable; returns `None` otherwise.
    pub async fn save_draft(content: &Content, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE contents
            SET title = $3, body = $4, channel = $5, scheduled_at = $6, status = $7, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND status IN ('draft', 'revision')
            RETURNING *
            "#,
        )
        .bind(content.id)
        .bind(content.user_id)
        .bind(&content.title)
        .bind(&content.body)
        .bind(content.channel.as_str())
        .bind(content.scheduled_at)
        .bind(content.status.as_str())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Returns `None` when the row is missing or no longer accepts a request,
    /// so an answer recorded after the caller's read is never overwritten.
    pub async fn mark_confirm_requested(
        id: ContentId,
        user_id: OperatorId,
        requested_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE contents
            SET status = 'pending_confirm', confirm_requested_at = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
              AND status IN ('draft', 'revision', 'pending_confirm')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(requested_at)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Conditional write: only succeeds while the row is still
    /// `pending_confirm`, so two concurrent answers cannot both apply.
    pub async fn record_confirm_response(
        id: ContentId,
        status: ContentStatus,
        message: Option<&str>,
        responded_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE contents
            SET status = $2, confirm_responded_at = $3, confirm_message = $4, updated_at = NOW()
            WHERE id = $1 AND status = 'pending_confirm'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(responded_at)
        .bind(message)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// `approved → published`, guarded in the same statement.
    pub async fn mark_published(
        id: ContentId,
        user_id: OperatorId,
        metadata: &serde_json::Value,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE contents
            SET status = 'published', metadata = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND status = 'approved'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(metadata)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: ContentId, user_id: OperatorId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
