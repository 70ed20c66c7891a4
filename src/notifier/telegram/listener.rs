// notifier/telegram/listener.rs

use crate::model::TaggedPost;
use crate::notifier::telegram::TelegramNotifier;
use crate::notifier::telegram::command_handler::handle_command;
use chrono::Utc;
use serde::Deserialize;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    result: Vec<TelegramUpdate>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
    // Ленты вакансий обычно живут в каналах
    channel_post: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    chat: TelegramChat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

impl TelegramUpdate {
    fn content(&self) -> Option<(i64, &str)> {
        let message = self.message.as_ref().or(self.channel_post.as_ref())?;
        let text = message.text.as_deref()?;
        Some((message.chat.id, text))
    }
}

/// Polls for Telegram updates: slash-commands are dispatched to the command
/// handler, everything else is treated as a job-posting title and tagged.
pub async fn listen_for_posts(notifier: &TelegramNotifier) {
    let url = format!("https://api.telegram.org/bot{}/getUpdates", notifier.bot_token);
    loop {
        let current_offset = notifier.offset.load(std::sync::atomic::Ordering::SeqCst);
        let response = notifier
            .client
            .get(&url)
            .query(&[("offset", (current_offset + 1).to_string())])
            .send()
            .await;
        if let Ok(resp) = response {
            if let Ok(api_response) = resp.json::<TelegramApiResponse>().await {
                for update in api_response.result {
                    if let Some((chat_id, text)) = update.content() {
                        if text.starts_with('/') {
                            handle_command(text, notifier).await;
                        } else {
                            handle_post(update.update_id, chat_id, text, notifier).await;
                        }
                    }
                    notifier
                        .offset
                        .store(update.update_id + 1, std::sync::atomic::Ordering::SeqCst);
                }
            }
        }
        sleep(Duration::from_secs(notifier.config.poll_interval_seconds)).await;
    }
}

/// Tags a single incoming post, persists the outcome and replies on a match.
pub async fn handle_post(update_id: i64, chat_id: i64, title: &str, notifier: &TelegramNotifier) {
    match notifier.storage.lock().await.is_tagged(update_id) {
        Ok(true) => {
            info!("Already tagged: {}", update_id);
            return;
        }
        Ok(false) => {}
        Err(e) => {
            warn!("Tagged check failed: {:?}", e);
            return;
        }
    }

    let result = notifier.engine.match_title(title);
    match &result {
        Some(m) => info!(
            "🏷 [{}] \"{}\" -> {} ({:.2})",
            update_id, title, m.specialization, m.score
        ),
        None => info!("🏷 [{}] \"{}\" -> no match", update_id, title),
    }

    let post = TaggedPost {
        update_id,
        chat_id,
        title: title.to_string(),
        specialization: result.as_ref().map(|m| m.specialization.clone()),
        score: result.as_ref().map(|m| m.score),
        tagged_at: Utc::now(),
    };
    if let Err(e) = notifier.storage.lock().await.save_tag(&post) {
        warn!("DB save error: {:?}", e);
    }

    if let Some(m) = result {
        let reply = format!("🏷 {} ({:.2})", m.specialization, m.score);
        if let Err(e) = notifier.notify_text(&reply).await {
            warn!("Telegram send error: {:?}", e);
        }
    }
}
