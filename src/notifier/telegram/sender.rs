// notifier/telegram/sender.rs

use crate::model::NotifyError;
use crate::notifier::telegram::TelegramNotifier;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Sends a plain text message to the configured chat.
pub async fn send_text(notifier: &TelegramNotifier, text: &str) -> Result<(), NotifyError> {
    let url = format!("https://api.telegram.org/bot{}/sendMessage", notifier.bot_token);
    let params = [
        ("chat_id", notifier.chat_id.to_string()),
        ("text", text.to_string()),
    ];

    let response = match timeout(
        Duration::from_secs(10),
        notifier.client.post(&url).form(&params).send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            warn!("❌ Telegram send() failed: {:?}", e);
            return Err(NotifyError::Http(e));
        }
        Err(_) => {
            warn!("⏳ Telegram send() timed out");
            return Err(NotifyError::Unreachable);
        }
    };

    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ Telegram API responded [{}]: {}", status, body);
        return Err(NotifyError::Api {
            status: status.as_u16(),
            body,
        });
    }

    info!("✅ Telegram text sent [{}]", status);
    Ok(())
}
