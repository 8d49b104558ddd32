//! Preview tokens are bearer capabilities.
//!
//! Whoever holds a token may read the content it points at and answer its
//! confirm request, without an operator session. The type is kept apart
//! from operator identity, and `Debug` never prints the secret so tokens do
//! not end up in logs.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PreviewToken(String);

impl PreviewToken {
    /// 32 random bytes (two v4 UUIDs), URL-safe base64 without padding.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
        bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Wraps a token received from a URL path. No validation is done here:
    /// an unknown token simply resolves to nothing.
    pub fn from_path(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{base_url}/preview/{token}`.
    pub fn preview_url(&self, base_url: &str) -> String {
        format!("{}/preview/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl fmt::Debug for PreviewToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PreviewToken(<redacted>)")
    }
}
