use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;

use crate::common::{ContentId, NotificationId, OperatorId};
use crate::domains::contents::models::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ConfirmRequest,
    ConfirmResponse,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::ConfirmRequest => "confirm_request",
            NotificationType::ConfirmResponse => "confirm_response",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirm_request" => Ok(NotificationType::ConfirmRequest),
            "confirm_response" => Ok(NotificationType::ConfirmResponse),
            other => Err(UnknownVariant::new("notification type", other)),
        }
    }
}

impl TryFrom<String> for NotificationType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Sent,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Sent => "sent",
        }
    }
}

impl FromStr for NotificationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(NotificationStatus::Pending),
            "sent" => Ok(NotificationStatus::Sent),
            other => Err(UnknownVariant::new("notification status", other)),
        }
    }
}

impl TryFrom<String> for NotificationStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Immutable audit event for one confirm workflow transition.
///
/// Only `is_read` ever changes after insert.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: OperatorId,
    pub content_id: Option<ContentId>,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub message: String,
    pub recipient_phone: Option<String>,
    pub recipient_email: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: OperatorId,
    pub content_id: Option<ContentId>,
    pub notification_type: NotificationType,
    pub message: String,
    pub recipient_phone: Option<String>,
    pub recipient_email: Option<String>,
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub async fn create(input: &NewNotification, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO notifications (id, user_id, content_id, type, message, recipient_phone, recipient_email, status, sent_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(NotificationId::new())
        .bind(input.user_id)
        .bind(input.content_id)
        .bind(input.notification_type.as_str())
        .bind(&input.message)
        .bind(&input.recipient_phone)
        .bind(&input.recipient_email)
        .bind(input.status.as_str())
        .bind(input.sent_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn list_for_user(
        user_id: OperatorId,
        unread_only: bool,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM notifications
            WHERE user_id = $1 AND (NOT $2 OR is_read = FALSE)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn mark_read(id: NotificationId, user_id: OperatorId, pool: &PgPool) -> Result<bool> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
