//! Outbound message delivery.
//!
//! No SMS provider is wired up yet: confirm requests are written to the
//! notification log as `pending` and this messenger only logs the hand-off.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::BaseMessenger;

#[derive(Debug, Default, Clone)]
pub struct LogOnlyMessenger;

#[async_trait]
impl BaseMessenger for LogOnlyMessenger {
    async fn send_confirm_request(&self, phone_number: &str, message: &str) -> Result<()> {
        info!(
            phone_suffix = %phone_suffix(phone_number),
            message_length = message.chars().count(),
            "Confirm request queued (no SMS provider configured)"
        );
        Ok(())
    }
}

/// Last four digits, enough to correlate without logging the number.
fn phone_suffix(phone_number: &str) -> String {
    let digits: Vec<char> = phone_number.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(4);
    digits[start..].iter().collect()
}
