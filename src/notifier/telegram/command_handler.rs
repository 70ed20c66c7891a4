// notifier/telegram/command_handler.rs

use crate::notifier::telegram::TelegramNotifier;
use tracing::{info, warn};

/// Handles an incoming command and triggers the corresponding action.
pub async fn handle_command(command_text: &str, notifier: &TelegramNotifier) {
    info!("Handling command: {}", command_text);
    match command_text {
        "/ping" => {
            if let Err(e) = notifier.notify_text("✅ I am online!").await {
                warn!("/ping error: {:?}", e);
            }
        }
        "/help" => {
            let help_msg = "📋 Available commands:\n\
                /ping — check connection\n\
                /help — command list\n\
                /stats — tag counts per specialization\n\
                /last — last tagged post\n\
                /uptime — service uptime";
            if let Err(e) = notifier.notify_text(help_msg).await {
                warn!("/help error: {:?}", e);
            }
        }
        "/stats" => {
            match notifier.storage.lock().await.tag_counts() {
                Ok(counts) if !counts.is_empty() => {
                    let mut msg = String::from("📊 Tagged posts:\n");
                    for (specialization, count) in counts {
                        msg.push_str(&format!("• {} — {}\n", specialization, count));
                    }
                    if let Err(e) = notifier.notify_text(&msg).await {
                        warn!("/stats notify error: {:?}", e);
                    }
                }
                Ok(_) => {
                    if let Err(e) = notifier.notify_text("📭 Nothing tagged yet.").await {
                        warn!("/stats empty notify error: {:?}", e);
                    }
                }
                Err(e) => {
                    if let Err(send_err) = notifier.notify_text(&format!("❌ Error: {:?}", e)).await {
                        warn!("/stats send error: {:?}", send_err);
                    }
                }
            }
        }
        "/last" => {
            match notifier.storage.lock().await.get_last_tagged() {
                Ok(Some(post)) => {
                    let tag = post.specialization.as_deref().unwrap_or("---");
                    let msg = format!(
                        "🕵️ Last post:\n📦 {}\n🏷 {}\n🕒 {}",
                        post.title, tag, post.tagged_at
                    );
                    if let Err(e) = notifier.notify_text(&msg).await {
                        warn!("/last notify error: {:?}", e);
                    }
                }
                Ok(None) => {
                    if let Err(e) = notifier.notify_text("📭 No posts in the database.").await {
                        warn!("/last empty notify error: {:?}", e);
                    }
                }
                Err(e) => {
                    if let Err(send_err) = notifier.notify_text(&format!("❌ Error: {:?}", e)).await {
                        warn!("/last send error: {:?}", send_err);
                    }
                }
            }
        }
        "/uptime" => {
            let uptime = notifier.start_time.elapsed();
            let msg = format!(
                "⏱ Uptime: {:02}:{:02}:{:02}",
                uptime.as_secs() / 3600,
                (uptime.as_secs() % 3600) / 60,
                uptime.as_secs() % 60
            );
            if let Err(e) = notifier.notify_text(&msg).await {
                warn!("/uptime error: {:?}", e);
            }
        }
        other => {
            info!("Unknown command ignored: {}", other);
        }
    }
}
