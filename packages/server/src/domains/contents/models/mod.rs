pub mod channel;
pub mod content;
pub mod preview_token;
pub mod status;

pub use channel::Channel;
pub use content::{Content, ContentFilter, NewContent};
pub use preview_token::PreviewToken;
pub use status::{ConfirmAction, ContentStatus};

use thiserror::Error;

/// A text column held a value that no enum variant maps to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
