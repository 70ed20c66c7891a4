use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use vacancy_tagger::config::{AppConfig, load_config};
use vacancy_tagger::engine::MatchingEngine;
use vacancy_tagger::notifier::TelegramNotifier;
use vacancy_tagger::storage::SqliteStorage;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file
    let config: Arc<AppConfig> = match load_config("config.json") {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let engine = Arc::new(MatchingEngine::from_config(&config));
    info!(
        "Engine ready: {} specializations",
        engine.specialization_count()
    );

    // Batch mode: tag titles from a file (or stdin via "-") and exit
    if let Some(path) = env::args().nth(1) {
        run_batch(&engine, &path);
        return;
    }

    // Feed mode: storage + Telegram listener
    let storage = match SqliteStorage::new("data.db") {
        Ok(s) => Arc::new(Mutex::new(s)),
        Err(e) => {
            error!("Failed to initialize storage: {:?}", e);
            return;
        }
    };

    let notifier = Arc::new(TelegramNotifier::new(storage, engine, config));

    if let Err(e) = notifier.set_my_commands().await {
        warn!("Failed to register commands: {:?}", e);
    }

    info!("Sending startup message...");
    if let Err(e) = notifier.notify_text("🚀 vacancy-tagger started!").await {
        warn!("Startup notification failed: {:?}", e);
    }

    info!("Listening for feed updates...");
    notifier.listen_for_posts().await;
}

/// Тегирует заголовки построчно и печатает результат
fn run_batch(engine: &MatchingEngine, path: &str) {
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                error!("Cannot open {}: {}", path, e);
                return;
            }
        }
    };

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("Read error: {}", e);
                break;
            }
        };
        let title = line.trim();
        if title.is_empty() {
            continue;
        }
        match engine.match_title(title) {
            Some(result) => {
                println!("{} -> {} ({:.2})", title, result.specialization, result.score)
            }
            None => println!("{} -> ---", title),
        }
    }
}
