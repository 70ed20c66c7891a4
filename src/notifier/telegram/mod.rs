pub mod command_handler;
pub mod listener;
pub mod sender;

use crate::config::AppConfig;
use crate::engine::MatchingEngine;
use crate::model::NotifyError;
use crate::notifier::Notifier;
use crate::storage::SqliteStorage;
use reqwest::Client;
use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use std::time::Instant;
use tokio::sync::Mutex;

pub struct TelegramNotifier {
    pub bot_token: String,
    pub chat_id: i64,
    pub client: Client,
    pub offset: AtomicI64,
    pub storage: Arc<Mutex<SqliteStorage>>,
    pub engine: Arc<MatchingEngine>,
    pub config: Arc<AppConfig>,
    pub start_time: Instant,
}

impl TelegramNotifier {
    pub fn new(
        storage: Arc<Mutex<SqliteStorage>>,
        engine: Arc<MatchingEngine>,
        config: Arc<AppConfig>,
    ) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("❗ Failed to create HTTP client");
        Self {
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id,
            client,
            offset: AtomicI64::new(0),
            storage,
            engine,
            config,
            start_time: Instant::now(),
        }
    }

    pub async fn notify_text(&self, text: &str) -> Result<(), NotifyError> {
        sender::send_text(self, text).await
    }

    pub async fn listen_for_posts(&self) {
        listener::listen_for_posts(self).await;
    }

    pub async fn set_my_commands(&self) -> Result<(), reqwest::Error> {
        let url = format!("https://api.telegram.org/bot{}/setMyCommands", self.bot_token);
        let commands = serde_json::json!({
            "commands": [
                { "command": "ping", "description": "Check connection" },
                { "command": "help", "description": "Command list" },
                { "command": "stats", "description": "Tag counts per specialization" },
                { "command": "last", "description": "Last tagged post" },
                { "command": "uptime", "description": "Service uptime" }
            ]
        });
        self.client.post(&url).json(&commands).send().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send_text(&self, text: &str) -> Result<(), NotifyError> {
        sender::send_text(self, text).await
    }
}
