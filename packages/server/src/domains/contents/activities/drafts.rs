use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::common::errors::messages;
use crate::common::{AdvertiserId, AppError, AppResult, ContentId, OperatorId};
use crate::domains::contents::models::{Channel, Content, ContentStatus, NewContent, PreviewToken};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentInput {
    pub advertiser_id: AdvertiserId,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub channel: Channel,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Operator edits. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentEdit {
    pub title: Option<String>,
    pub body: Option<String>,
    pub channel: Option<Channel>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Create a `draft` for one of the operator's advertisers.
pub async fn create_draft(
    deps: &ServerDeps,
    operator_id: OperatorId,
    input: CreateContentInput,
) -> AppResult<Content> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::invalid_state(messages::TITLE_REQUIRED));
    }

    deps.advertisers
        .find_advertiser(input.advertiser_id, operator_id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::ADVERTISER_NOT_FOUND))?;

    let new_content = NewContent {
        advertiser_id: input.advertiser_id,
        title: title.to_string(),
        body: input.body,
        channel: input.channel,
        scheduled_at: input.scheduled_at,
        metadata: serde_json::json!({}),
    };
    insert_draft(deps, operator_id, &new_content).await
}

/// Store a new draft with a freshly generated preview token.
pub(crate) async fn insert_draft(
    deps: &ServerDeps,
    operator_id: OperatorId,
    new_content: &NewContent,
) -> AppResult<Content> {
    let token = PreviewToken::generate();
    let content = deps
        .contents
        .create_content(operator_id, new_content, &token)
        .await?;

    info!(
        content_id = %content.id,
        operator_id = %operator_id,
        channel = %content.channel,
        "Draft created"
    );
    Ok(content)
}

/// Apply edits to a `draft` or `revision`. Editing a `revision` sends it
/// back to `draft` so it can be re-submitted.
pub async fn update_draft(
    deps: &ServerDeps,
    operator_id: OperatorId,
    content_id: ContentId,
    edit: ContentEdit,
) -> AppResult<Content> {
    let mut content = deps
        .contents
        .find_content(content_id, operator_id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::CONTENT_NOT_FOUND))?;

    if !content.status.is_editable() {
        return Err(AppError::invalid_state(messages::EDIT_NOT_ALLOWED));
    }

    if let Some(title) = edit.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_state(messages::TITLE_REQUIRED));
        }
        content.title = title.to_string();
    }
    if let Some(body) = edit.body {
        content.body = body;
    }
    if let Some(channel) = edit.channel {
        content.channel = channel;
    }
    if let Some(scheduled_at) = edit.scheduled_at {
        content.scheduled_at = Some(scheduled_at);
    }
    content.status = ContentStatus::Draft;

    deps.contents
        .save_draft(&content)
        .await?
        .ok_or_else(|| AppError::invalid_state(messages::EDIT_NOT_ALLOWED))
}

pub async fn delete_draft(
    deps: &ServerDeps,
    operator_id: OperatorId,
    content_id: ContentId,
) -> AppResult<()> {
    if !deps.contents.delete_content(content_id, operator_id).await? {
        return Err(AppError::not_found(messages::CONTENT_NOT_FOUND));
    }
    info!(content_id = %content_id, operator_id = %operator_id, "Content deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::domains::contents::models::ContentFilter;
    use crate::kernel::test_dependencies::TestDependencies;
    use crate::kernel::BaseContentStore;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, day, hour, 0, 0).unwrap()
    }

    async fn draft_on(
        deps: &TestDependencies,
        operator_id: OperatorId,
        advertiser_id: AdvertiserId,
        title: &str,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Content {
        create_draft(
            &deps.server_deps(),
            operator_id,
            CreateContentInput {
                advertiser_id,
                title: title.to_string(),
                body: String::new(),
                channel: Channel::Instagram,
                scheduled_at,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn create_draft_assigns_unique_tokens() {
        let deps = TestDependencies::new();
        let operator_id = OperatorId::new();
        let advertiser = deps.store.seed_advertiser(operator_id, "카페 봄날", None);

        let mut tokens = Vec::new();
        for title in ["첫 번째", "두 번째"] {
            let content = create_draft(
                &deps.server_deps(),
                operator_id,
                CreateContentInput {
                    advertiser_id: advertiser.id,
                    title: title.to_string(),
                    body: String::new(),
                    channel: Channel::BlogNaver,
                    scheduled_at: None,
                },
            )
            .await
            .unwrap();
            assert_eq!(content.status, ContentStatus::Draft);
            tokens.push(content.preview_token);
        }
        assert_ne!(tokens[0], tokens[1]);
    }

    #[tokio::test]
    async fn create_draft_for_foreign_advertiser_is_not_found() {
        let deps = TestDependencies::new();
        let advertiser = deps.store.seed_advertiser(OperatorId::new(), "카페 봄날", None);

        let err = create_draft(
            &deps.server_deps(),
            OperatorId::new(),
            CreateContentInput {
                advertiser_id: advertiser.id,
                title: "제목".to_string(),
                body: String::new(),
                channel: Channel::Threads,
                scheduled_at: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn editing_a_revision_returns_it_to_draft() {
        let deps = TestDependencies::new();
        let operator_id = OperatorId::new();
        let advertiser = deps.store.seed_advertiser(operator_id, "카페 봄날", None);
        let content = deps.store.seed_content(
            &advertiser,
            "초안",
            ContentStatus::Revision,
            PreviewToken::generate(),
        );

        let edited = update_draft(
            &deps.server_deps(),
            operator_id,
            content.id,
            ContentEdit {
                body: Some("수정된 본문".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(edited.status, ContentStatus::Draft);
        assert_eq!(edited.body, "수정된 본문");
        assert_eq!(edited.preview_token, content.preview_token);
    }

    #[tokio::test]
    async fn pending_content_cannot_be_edited() {
        let deps = TestDependencies::new();
        let operator_id = OperatorId::new();
        let advertiser = deps.store.seed_advertiser(operator_id, "카페 봄날", None);
        let content = deps.store.seed_content(
            &advertiser,
            "초안",
            ContentStatus::PendingConfirm,
            PreviewToken::generate(),
        );

        let err = update_draft(
            &deps.server_deps(),
            operator_id,
            content.id,
            ContentEdit::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn stale_edit_does_not_overwrite_pending_content() {
        let deps = TestDependencies::new();
        let operator_id = OperatorId::new();
        let advertiser = deps.store.seed_advertiser(operator_id, "카페 봄날", None);
        let content = deps.store.seed_content(
            &advertiser,
            "초안",
            ContentStatus::PendingConfirm,
            PreviewToken::generate(),
        );

        let mut stale = content.clone();
        stale.status = ContentStatus::Draft;
        stale.body = "덮어쓰기".to_string();
        let saved = deps.store.save_draft(&stale).await.unwrap();

        assert!(saved.is_none());
        let stored = deps.store.content(content.id).unwrap();
        assert_eq!(stored.status, ContentStatus::PendingConfirm);
        assert_eq!(stored.body, "");
    }

    #[tokio::test]
    async fn calendar_window_is_half_open_and_skips_unscheduled() {
        let deps = TestDependencies::new();
        let operator_id = OperatorId::new();
        let advertiser = deps.store.seed_advertiser(operator_id, "카페 봄날", None);
        let start = draft_on(&deps, operator_id, advertiser.id, "월초", Some(at(1, 0))).await;
        let inside = draft_on(&deps, operator_id, advertiser.id, "중순", Some(at(15, 9))).await;
        draft_on(&deps, operator_id, advertiser.id, "다음 달", Some(at(31, 0))).await;
        draft_on(&deps, operator_id, advertiser.id, "미정", None).await;

        let filter = ContentFilter {
            from: Some(at(1, 0)),
            to: Some(at(31, 0)),
            ..Default::default()
        };
        let listed = deps.store.list_contents(operator_id, &filter).await.unwrap();

        let ids: Vec<ContentId> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![start.id, inside.id]);
    }

    #[tokio::test]
    async fn unbounded_listing_puts_unscheduled_last() {
        let deps = TestDependencies::new();
        let operator_id = OperatorId::new();
        let advertiser = deps.store.seed_advertiser(operator_id, "카페 봄날", None);
        let unscheduled = draft_on(&deps, operator_id, advertiser.id, "미정", None).await;
        let late = draft_on(&deps, operator_id, advertiser.id, "늦게", Some(at(20, 0))).await;
        let early = draft_on(&deps, operator_id, advertiser.id, "먼저", Some(at(2, 0))).await;

        let listed = deps
            .store
            .list_contents(operator_id, &ContentFilter::default())
            .await
            .unwrap();

        let ids: Vec<ContentId> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![early.id, late.id, unscheduled.id]);
    }

    #[tokio::test]
    async fn delete_is_scoped_to_the_owner() {
        let deps = TestDependencies::new();
        let operator_id = OperatorId::new();
        let advertiser = deps.store.seed_advertiser(operator_id, "카페 봄날", None);
        let content = draft_on(&deps, operator_id, advertiser.id, "삭제 대상", None).await;

        let err = delete_draft(&deps.server_deps(), OperatorId::new(), content.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(deps.store.content(content.id).is_some());

        delete_draft(&deps.server_deps(), operator_id, content.id)
            .await
            .unwrap();
        assert!(deps.store.content(content.id).is_none());

        let err = delete_draft(&deps.server_deps(), operator_id, content.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
