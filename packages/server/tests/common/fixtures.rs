//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use chrono::{DateTime, Utc};
use server_core::common::OperatorId;
use server_core::domains::advertisers::{Advertiser, NewAdvertiser};
use server_core::domains::contents::models::{Channel, Content, NewContent, PreviewToken};
use sqlx::PgPool;

/// Create an advertiser with the given approver phone.
pub async fn create_test_advertiser(
    pool: &PgPool,
    operator_id: OperatorId,
    name: &str,
    contact_phone: Option<&str>,
) -> Result<Advertiser> {
    let input = NewAdvertiser {
        name: name.to_string(),
        contact_name: Some("김담당".to_string()),
        contact_phone: contact_phone.map(str::to_string),
        contact_email: None,
        memo: None,
    };
    Advertiser::create(operator_id, &input, pool).await
}

/// Create a draft with a fresh preview token.
pub async fn create_test_draft(
    pool: &PgPool,
    advertiser: &Advertiser,
    title: &str,
) -> Result<Content> {
    create_test_scheduled_draft(pool, advertiser, title, None).await
}

/// Create a draft planned for `scheduled_at`.
pub async fn create_test_scheduled_draft(
    pool: &PgPool,
    advertiser: &Advertiser,
    title: &str,
    scheduled_at: Option<DateTime<Utc>>,
) -> Result<Content> {
    let input = NewContent {
        advertiser_id: advertiser.id,
        title: title.to_string(),
        body: "본문".to_string(),
        channel: Channel::Instagram,
        scheduled_at,
        metadata: serde_json::json!({}),
    };
    Content::create(advertiser.user_id, &input, &PreviewToken::generate(), pool).await
}
