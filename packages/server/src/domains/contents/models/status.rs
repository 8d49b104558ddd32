//! Content status lifecycle.
//!
//! ```text
//! draft ──request──▶ pending_confirm ──approve──▶ approved ──publish──▶ published
//!   ▲                     │   ▲
//!   │                     │   └─────────── re-request ────────┐
//!   └──── edit ──── revision ◀──reject──┘                     │
//!                     └───────────────────────────────────────┘
//! ```
//!
//! `scheduled` and `error` exist as peer states for other flows and are not
//! reachable from the confirm workflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    PendingConfirm,
    Approved,
    Revision,
    Scheduled,
    Published,
    Error,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::PendingConfirm => "pending_confirm",
            ContentStatus::Approved => "approved",
            ContentStatus::Revision => "revision",
            ContentStatus::Scheduled => "scheduled",
            ContentStatus::Published => "published",
            ContentStatus::Error => "error",
        }
    }

    /// States from which an operator may hand the content to the advertiser.
    ///
    /// `pending_confirm` is accepted so that repeating the request only
    /// re-stamps `confirm_requested_at`.
    pub fn can_request_confirm(&self) -> bool {
        matches!(
            self,
            ContentStatus::Draft | ContentStatus::Revision | ContentStatus::PendingConfirm
        )
    }

    /// Only a pending request can be answered; this is what makes a preview
    /// token single-use.
    pub fn accepts_confirm_response(&self) -> bool {
        *self == ContentStatus::PendingConfirm
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, ContentStatus::Draft | ContentStatus::Revision)
    }

    pub fn can_publish(&self) -> bool {
        *self == ContentStatus::Approved
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ContentStatus::Draft),
            "pending_confirm" => Ok(ContentStatus::PendingConfirm),
            "approved" => Ok(ContentStatus::Approved),
            "revision" => Ok(ContentStatus::Revision),
            "scheduled" => Ok(ContentStatus::Scheduled),
            "published" => Ok(ContentStatus::Published),
            "error" => Ok(ContentStatus::Error),
            other => Err(UnknownVariant::new("content status", other)),
        }
    }
}

impl TryFrom<String> for ContentStatus {
    type Error = UnknownVariant;

    // `Self::Error` would collide with the `Error` variant.
    fn try_from(value: String) -> Result<Self, UnknownVariant> {
        value.parse()
    }
}

/// The advertiser's answer to a confirm request.
///
/// Deserializing anything other than `"approved"` or `"revision"` fails,
/// which rejects bad input before the token is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmAction {
    Approved,
    Revision,
}

impl ConfirmAction {
    pub fn target_status(&self) -> ContentStatus {
        match self {
            ConfirmAction::Approved => ContentStatus::Approved,
            ConfirmAction::Revision => ContentStatus::Revision,
        }
    }
}
