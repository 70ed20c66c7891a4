// Matching engine: normalization pipeline, weighted-coverage scoring and
// best-match selection over a fixed set of specialization labels.

pub mod normalizer;
pub mod scoring;

pub use normalizer::Normalizer;

use crate::config::AppConfig;
use crate::model::{MatchResult, SynonymRule, WeightRule};
use normalizer::fold_homoglyphs;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Минимальная оценка покрытия, при которой совпадение принимается.
pub const MATCH_THRESHOLD: f64 = 0.25;

/// Специализация: исходная метка плюс её нормализованный набор ключевых слов.
/// Строится один раз при создании движка и дальше не меняется.
struct SpecKeywords {
    original: String,
    words: Vec<String>,
}

/// Движок сопоставления. Все таблицы неизменяемы после создания, поэтому
/// экземпляр можно разделять между потоками без синхронизации; горячая
/// перезагрузка конфигурации — это построение нового движка и подмена ссылки.
pub struct MatchingEngine {
    normalizer: Normalizer,
    weights: HashMap<String, f64>,
    stop_words: HashSet<String>,
    specs: Vec<SpecKeywords>,
}

impl MatchingEngine {
    pub fn new(
        specializations: &[String],
        synonyms: &[SynonymRule],
        abbreviations: &BTreeMap<String, String>,
        weights: &[WeightRule],
        stop_words: &[String],
    ) -> Self {
        let normalizer = Normalizer::new(synonyms, abbreviations);

        let stop_words: HashSet<String> = stop_words
            .iter()
            .map(|w| fold_homoglyphs(&w.to_lowercase()))
            .collect();

        // Вес фразы раздаётся каждому токену её нормальной формы
        let mut weight_table = HashMap::new();
        for rule in weights {
            let normalized = normalizer.normalize(&rule.word);
            for token in normalized.split_whitespace() {
                weight_table.insert(token.to_string(), rule.weight);
            }
        }

        // Предвычисленные наборы ключевых слов, в порядке конфигурации
        let specs = specializations
            .iter()
            .map(|name| {
                let normalized = normalizer.normalize(name);
                SpecKeywords {
                    original: name.clone(),
                    words: normalized
                        .split_whitespace()
                        .filter(|w| !stop_words.contains(*w) && w.chars().count() >= 2)
                        .map(str::to_string)
                        .collect(),
                }
            })
            .collect();

        Self {
            normalizer,
            weights: weight_table,
            stop_words,
            specs,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.specializations,
            &config.synonyms,
            &config.abbreviations,
            &config.weights,
            &config.stop_words,
        )
    }

    /// Каноническая форма текста; см. [`Normalizer::normalize`].
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    pub fn specialization_count(&self) -> usize {
        self.specs.len()
    }

    /// Подбирает наилучшую специализацию для заголовка вакансии.
    /// `None` означает «ни одна не прошла порог», это не ошибка.
    pub fn match_title(&self, text: &str) -> Option<MatchResult> {
        let normalized = self.normalize(text);
        let text_words: Vec<String> = normalized
            .split_whitespace()
            .filter(|w| !self.stop_words.contains(*w) && w.chars().count() >= 2)
            .map(str::to_string)
            .collect();

        let mut best: Option<MatchResult> = None;

        for spec in &self.specs {
            let score = self.weighted_coverage_ratio(&spec.words, &text_words);

            // Строгое сравнение: при равных оценках побеждает более ранняя
            // специализация из конфигурации
            if score >= MATCH_THRESHOLD && best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(MatchResult {
                    specialization: spec.original.clone(),
                    score,
                });
            }
        }

        best
    }
}
