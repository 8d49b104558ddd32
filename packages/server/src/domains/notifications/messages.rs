//! Notification text templates.

use crate::domains::advertisers::Advertiser;
use crate::domains::contents::models::{ConfirmAction, Content};

/// Message sent to the advertiser's approver asking them to review a draft.
pub fn confirm_request_message(advertiser: &Advertiser, content: &Content, preview_url: &str) -> String {
    format!(
        "[{}] {}님, '{}' 콘텐츠 검토를 요청드립니다.\n\
         아래 링크에서 내용을 확인하신 후 승인 또는 수정 요청을 남겨주세요.\n\
         {}",
        advertiser.name,
        advertiser.approver_name(),
        content.title,
        preview_url
    )
}

/// In-app message for the operator once the approver has answered.
pub fn confirm_response_message(
    content: &Content,
    action: ConfirmAction,
    message: Option<&str>,
) -> String {
    let verdict = match action {
        ConfirmAction::Approved => "승인되었습니다",
        ConfirmAction::Revision => "수정 요청되었습니다",
    };
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(note) => format!("'{}' 콘텐츠가 {}. 메모: {}", content.title, verdict, note),
        None => format!("'{}' 콘텐츠가 {}.", content.title, verdict),
    }
}
