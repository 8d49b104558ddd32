use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::drafts::insert_draft;
use crate::common::errors::messages;
use crate::common::{AdvertiserId, AppError, AppResult, OperatorId};
use crate::domains::contents::models::{Channel, Content, NewContent};
use crate::domains::contents::prompts::{parse_generated_draft, system_prompt, user_prompt};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateDraftInput {
    pub advertiser_id: AdvertiserId,
    pub channel: Channel,
    pub topic: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub tone: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Ask the LLM for a channel-specific draft and store it as `draft`.
///
/// Nothing is stored when generation or parsing fails.
pub async fn generate_draft(
    deps: &ServerDeps,
    operator_id: OperatorId,
    input: GenerateDraftInput,
) -> AppResult<Content> {
    if input.topic.trim().is_empty() {
        return Err(AppError::invalid_state(messages::INVALID_REQUEST));
    }

    let advertiser = deps
        .advertisers
        .find_advertiser(input.advertiser_id, operator_id)
        .await?
        .ok_or_else(|| AppError::not_found(messages::ADVERTISER_NOT_FOUND))?;

    let system = system_prompt(input.channel);
    let user = user_prompt(
        &advertiser,
        &input.topic,
        &input.keywords,
        input.tone.as_deref(),
    );

    let raw = deps
        .ai
        .complete_with_system(&system, &user)
        .await
        .map_err(|e| {
            warn!(advertiser_id = %advertiser.id, error = %e, "Draft generation failed");
            AppError::Generation(e)
        })?;

    let draft = parse_generated_draft(&raw).map_err(|e| {
        warn!(advertiser_id = %advertiser.id, error = %e, "Unusable draft from AI");
        AppError::Generation(e)
    })?;

    let new_content = NewContent {
        advertiser_id: advertiser.id,
        title: draft.title,
        body: draft.body,
        channel: input.channel,
        scheduled_at: input.scheduled_at,
        metadata: json!({
            "generated": true,
            "topic": input.topic.trim(),
            "hashtags": draft.hashtags,
        }),
    };
    insert_draft(deps, operator_id, &new_content).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::contents::models::ContentStatus;
    use crate::kernel::test_dependencies::{MockAI, TestDependencies};

    fn input(advertiser_id: AdvertiserId) -> GenerateDraftInput {
        GenerateDraftInput {
            advertiser_id,
            channel: Channel::Instagram,
            topic: "봄 신메뉴".to_string(),
            keywords: vec!["딸기라떼".to_string()],
            tone: Some("친근하게".to_string()),
            scheduled_at: None,
        }
    }

    #[tokio::test]
    async fn generated_draft_is_stored_with_hashtags() {
        let deps = TestDependencies::new().with_ai(MockAI::new().with_response(
            r##"{"title": "딸기라떼 출시", "body": "봄이 왔어요 🍓", "hashtags": ["#딸기라떼", "카페"]}"##,
        ));
        let operator_id = OperatorId::new();
        let advertiser = deps.store.seed_advertiser(operator_id, "카페 봄날", None);

        let content = generate_draft(&deps.server_deps(), operator_id, input(advertiser.id))
            .await
            .unwrap();

        assert_eq!(content.status, ContentStatus::Draft);
        assert_eq!(content.title, "딸기라떼 출시");
        assert_eq!(content.metadata["hashtags"], json!(["딸기라떼", "카페"]));
        assert_eq!(content.metadata["generated"], json!(true));

        let calls = deps.ai.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("인스타그램"));
        assert!(calls[0].1.contains("딸기라떼"));
    }

    #[tokio::test]
    async fn unusable_reply_stores_nothing() {
        let deps =
            TestDependencies::new().with_ai(MockAI::new().with_response("죄송하지만 작성할 수 없습니다."));
        let operator_id = OperatorId::new();
        let advertiser = deps.store.seed_advertiser(operator_id, "카페 봄날", None);
        let server_deps = deps.server_deps();

        let err = generate_draft(&server_deps, operator_id, input(advertiser.id))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
        let listed = server_deps
            .contents
            .list_contents(operator_id, &Default::default())
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}
