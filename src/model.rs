// Core structs: MatchResult, TaggedPost
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Результат сопоставления: исходная метка специализации и её оценка покрытия.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub specialization: String,
    pub score: f64,
}

/// Обработанное сообщение ленты вакансий.
#[derive(Debug, Clone)]
pub struct TaggedPost {
    pub update_id: i64,
    pub chat_id: i64,
    pub title: String,
    pub specialization: Option<String>,
    pub score: Option<f64>,
    pub tagged_at: DateTime<Utc>,
}

/// Правило глобальной замены: `dst = None` означает «выбросить токен».
#[derive(Debug, Clone, Deserialize)]
pub struct SynonymRule {
    pub src: String,
    pub dst: Option<String>,
}

/// Вес слова или фразы; вес фразы раздаётся каждому токену её нормальной формы.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightRule {
    pub word: String,
    pub weight: f64,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram api error [{status}]: {body}")]
    Api { status: u16, body: String },
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("telegram unreachable")]
    Unreachable,
}
