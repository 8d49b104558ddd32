use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AdvertiserId, OperatorId};

/// A client on whose behalf content is produced.
///
/// `contact_phone` is the minimum contact needed to send a confirm request.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Advertiser {
    pub id: AdvertiserId,
    pub user_id: OperatorId,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAdvertiser {
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub memo: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvertiserUpdate {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub memo: Option<String>,
}

impl Advertiser {
    /// Phone number to reach the approver, if a non-blank one is on file.
    pub fn confirm_phone(&self) -> Option<&str> {
        self.contact_phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
    }

    /// Name used to address the approver in messages.
    pub fn approver_name(&self) -> &str {
        self.contact_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("담당자")
    }

    pub fn apply(&mut self, update: AdvertiserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(contact_name) = update.contact_name {
            self.contact_name = Some(contact_name);
        }
        if let Some(contact_phone) = update.contact_phone {
            self.contact_phone = Some(contact_phone);
        }
        if let Some(contact_email) = update.contact_email {
            self.contact_email = Some(contact_email);
        }
        if let Some(memo) = update.memo {
            self.memo = Some(memo);
        }
    }

    pub async fn create(user_id: OperatorId, input: &NewAdvertiser, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO advertisers (id, user_id, name, contact_name, contact_phone, contact_email, memo)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(AdvertiserId::new())
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.contact_name)
        .bind(&input.contact_phone)
        .bind(&input.contact_email)
        .bind(&input.memo)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_owned(
        id: AdvertiserId,
        user_id: OperatorId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM advertisers WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn list_owned(user_id: OperatorId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM advertisers WHERE user_id = $1 ORDER BY name ASC, created_at ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn save(advertiser: &Advertiser, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE advertisers
            SET name = $3, contact_name = $4, contact_phone = $5, contact_email = $6, memo = $7, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(advertiser.id)
        .bind(advertiser.user_id)
        .bind(&advertiser.name)
        .bind(&advertiser.contact_name)
        .bind(&advertiser.contact_phone)
        .bind(&advertiser.contact_email)
        .bind(&advertiser.memo)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advertiser(contact_name: Option<&str>, contact_phone: Option<&str>) -> Advertiser {
        Advertiser {
            id: AdvertiserId::new(),
            user_id: OperatorId::new(),
            name: "카페 봄날".to_string(),
            contact_name: contact_name.map(str::to_string),
            contact_phone: contact_phone.map(str::to_string),
            contact_email: None,
            memo: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn blank_phone_is_treated_as_missing() {
        assert_eq!(advertiser(None, Some("   ")).confirm_phone(), None);
        assert_eq!(advertiser(None, None).confirm_phone(), None);
        assert_eq!(
            advertiser(None, Some("010-1234-5678")).confirm_phone(),
            Some("010-1234-5678")
        );
    }

    #[test]
    fn approver_name_falls_back_to_default() {
        assert_eq!(advertiser(None, None).approver_name(), "담당자");
        assert_eq!(advertiser(Some(""), None).approver_name(), "담당자");
        assert_eq!(advertiser(Some("김민지"), None).approver_name(), "김민지");
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut adv = advertiser(Some("김민지"), Some("010-1234-5678"));
        adv.apply(AdvertiserUpdate {
            memo: Some("월 4회 포스팅".to_string()),
            ..Default::default()
        });
        assert_eq!(adv.contact_name.as_deref(), Some("김민지"));
        assert_eq!(adv.memo.as_deref(), Some("월 4회 포스팅"));
    }
}
