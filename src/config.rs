use crate::model::{SynonymRule, WeightRule};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use thiserror::Error;

/// Полная конфигурация: настройки ленты плюс пять таблиц движка.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub telegram_bot_token: String,
    #[serde(default)]
    pub telegram_chat_id: i64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    pub specializations: Vec<String>,
    pub synonyms: Vec<SynonymRule>,
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
    pub weights: Vec<WeightRule>,
    pub stop_words: Vec<String>,
}

fn default_poll_interval() -> u64 {
    1
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let raw = r#"{
            "specializations": ["DevOps", "Java разработчик"],
            "synonyms": [
                { "src": "be", "dst": null },
                { "src": "stack", "dst": "фуллстек" }
            ],
            "abbreviations": { "qa": "тестировщик" },
            "weights": [{ "word": "java", "weight": 3.0 }],
            "stop_words": ["senior", "middle"]
        }"#;

        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.specializations.len(), 2);
        assert!(config.synonyms[0].dst.is_none());
        assert_eq!(config.synonyms[1].dst.as_deref(), Some("фуллстек"));
        assert_eq!(config.abbreviations["qa"], "тестировщик");
        assert_eq!(config.poll_interval_seconds, 1);
        assert!(config.telegram_bot_token.is_empty());
    }
}
