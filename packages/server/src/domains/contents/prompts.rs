//! Prompt templates for AI-generated drafts.
//!
//! The model is asked for a single JSON object `{ title, body, hashtags }`.
//! Replies wrapped in markdown code fences are accepted.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::domains::advertisers::Advertiser;
use crate::domains::contents::models::Channel;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedDraft {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Writing guidance for each channel.
fn channel_guidelines(channel: Channel) -> &'static str {
    match channel {
        Channel::BlogNaver => {
            "네이버 블로그 포스팅입니다. 검색 노출을 고려해 핵심 키워드를 제목과 본문 앞부분에 자연스럽게 배치하고, \
             소제목(<h2>)과 짧은 문단(<p>)으로 구성된 HTML 본문을 1,500자 이상 작성하세요."
        }
        Channel::BlogTistory => {
            "티스토리 블로그 포스팅입니다. 정보 전달형 구성으로 소제목(<h2>)과 목록(<ul>)을 활용한 HTML 본문을 \
             1,500자 이상 작성하세요."
        }
        Channel::Instagram => {
            "인스타그램 피드 캡션입니다. 첫 줄에서 시선을 끌고, 줄바꿈과 이모지를 적절히 사용해 300자 이내로 작성하세요. \
             해시태그는 본문에 넣지 말고 hashtags 배열에 10~15개를 담으세요."
        }
        Channel::Threads => {
            "스레드 게시물입니다. 대화하듯 가벼운 말투로 500자 이내로 작성하고, 해시태그는 hashtags 배열에 3개 이하로 담으세요."
        }
        Channel::Facebook => {
            "페이스북 게시물입니다. 공감을 이끄는 도입과 명확한 행동 유도 문구를 포함해 600자 이내로 작성하세요."
        }
        Channel::Youtube => {
            "유튜브 영상 설명란입니다. 영상 요약, 주요 내용 목차, 관련 링크 안내 문구를 포함해 작성하세요."
        }
        Channel::Linkedin => {
            "링크드인 게시물입니다. 전문적인 어조로 인사이트 중심의 글을 800자 이내로 작성하세요."
        }
    }
}

pub fn system_prompt(channel: Channel) -> String {
    format!(
        "당신은 광고대행사의 전문 마케팅 카피라이터입니다.\n\
         광고주를 대신해 {} 콘텐츠 초안을 작성합니다.\n\
         {}\n\n\
         반드시 다음 형식의 JSON 객체 하나만 응답하세요:\n\
         {{\"title\": \"제목\", \"body\": \"본문\", \"hashtags\": [\"태그\"]}}",
        channel.display_name(),
        channel_guidelines(channel)
    )
}

pub fn user_prompt(
    advertiser: &Advertiser,
    topic: &str,
    keywords: &[String],
    tone: Option<&str>,
) -> String {
    let mut prompt = format!("광고주: {}\n주제: {}\n", advertiser.name, topic.trim());

    let keywords: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if !keywords.is_empty() {
        prompt.push_str(&format!("포함할 키워드: {}\n", keywords.join(", ")));
    }

    if let Some(tone) = tone.map(str::trim).filter(|t| !t.is_empty()) {
        prompt.push_str(&format!("어조: {}\n", tone));
    }

    if let Some(memo) = advertiser.memo.as_deref().filter(|m| !m.trim().is_empty()) {
        prompt.push_str(&format!("광고주 참고사항: {}\n", memo.trim()));
    }

    prompt
}

/// Parse the model's reply into a draft.
pub fn parse_generated_draft(raw: &str) -> Result<GeneratedDraft> {
    let json = strip_code_fence(raw.trim());
    let mut draft: GeneratedDraft =
        serde_json::from_str(json).context("AI response is not the expected JSON object")?;

    draft.title = draft.title.trim().to_string();
    if draft.title.is_empty() {
        return Err(anyhow!("AI response has an empty title"));
    }
    draft.hashtags = draft
        .hashtags
        .into_iter()
        .map(|tag| tag.trim().trim_start_matches('#').to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    Ok(draft)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening fence.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{AdvertiserId, OperatorId};
    use chrono::Utc;

    fn advertiser() -> Advertiser {
        Advertiser {
            id: AdvertiserId::new(),
            user_id: OperatorId::new(),
            name: "카페 봄날".to_string(),
            contact_name: None,
            contact_phone: None,
            contact_email: None,
            memo: Some("경쟁사 언급 금지".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn system_prompt_names_the_channel() {
        let prompt = system_prompt(Channel::Instagram);
        assert!(prompt.contains("인스타그램"));
        assert!(prompt.contains("\"hashtags\""));
    }

    #[test]
    fn user_prompt_skips_blank_keywords_and_tone() {
        let prompt = user_prompt(
            &advertiser(),
            " 봄 신메뉴 ",
            &["딸기라떼".to_string(), " ".to_string()],
            Some(""),
        );
        assert!(prompt.contains("광고주: 카페 봄날"));
        assert!(prompt.contains("주제: 봄 신메뉴\n"));
        assert!(prompt.contains("포함할 키워드: 딸기라떼\n"));
        assert!(!prompt.contains("어조"));
        assert!(prompt.contains("경쟁사 언급 금지"));
    }

    #[test]
    fn parses_fenced_json_and_normalizes_hashtags() {
        let raw = "```json\n{\"title\": \" 봄 신메뉴 \", \"body\": \"본문\", \"hashtags\": [\"#카페\", \"딸기\", \"\"]}\n```";
        let draft = parse_generated_draft(raw).unwrap();
        assert_eq!(draft.title, "봄 신메뉴");
        assert_eq!(draft.hashtags, vec!["카페", "딸기"]);
    }

    #[test]
    fn plain_json_without_hashtags_is_accepted() {
        let draft = parse_generated_draft("{\"title\": \"제목\", \"body\": \"<p>본문</p>\"}").unwrap();
        assert!(draft.hashtags.is_empty());
        assert_eq!(draft.body, "<p>본문</p>");
    }

    #[test]
    fn prose_reply_is_rejected() {
        assert!(parse_generated_draft("물론입니다! 아래는 초안입니다.").is_err());
        assert!(parse_generated_draft("{\"title\": \"\", \"body\": \"x\"}").is_err());
    }
}
