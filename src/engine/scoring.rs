use super::MatchingEngine;
use super::normalizer::fold_homoglyphs;
use std::collections::HashSet;

/// Маркер — идентификатор заявки/тикета, а не смысловой токен:
/// чисто числовой, «буква + цифры» (код потребности вида п2026)
/// или длинный буквенно-цифровой.
pub(crate) fn is_marker(token: &str) -> bool {
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    let mut chars = token.chars();
    if let Some(first) = chars.next() {
        let rest = chars.as_str();
        if first.is_alphabetic() && !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
    }

    token.chars().count() > 5 && token.chars().any(|c| c.is_ascii_digit())
}

impl MatchingEngine {
    /// Вес токена; ключ складывается по гомоглифам, отсутствующий вес равен 1.0.
    fn weight_of(&self, word: &str) -> f64 {
        let key = fold_homoglyphs(&word.to_lowercase());
        self.weights.get(&key).copied().unwrap_or(1.0)
    }

    /// Взвешенная доля ключевых слов специализации, найденных в запросе,
    /// нормированная на больший из двух весовых итогов. Оба списка
    /// уже нормализованы; множественность токенов не учитывается.
    pub fn weighted_coverage_ratio(&self, spec_words: &[String], text_words: &[String]) -> f64 {
        if spec_words.is_empty() || text_words.is_empty() {
            return 0.0;
        }

        let spec_set: HashSet<&str> = spec_words.iter().map(String::as_str).collect();
        let text_set: HashSet<&str> = text_words.iter().map(String::as_str).collect();

        let mut spec_total = 0.0;
        let mut text_total = 0.0;
        let mut matched = 0.0;

        for &word in &spec_set {
            if self.stop_words.contains(word) || is_marker(word) || word.chars().count() < 2 {
                continue;
            }
            let weight = self.weight_of(word);
            spec_total += weight;
            if text_set.contains(word) {
                matched += weight;
            }
        }

        for &word in &text_set {
            if self.stop_words.contains(word) || is_marker(word) || word.chars().count() < 2 {
                continue;
            }
            text_total += self.weight_of(word);
        }

        // Все ключевые слова отфильтрованы — специализации нечем совпадать
        if spec_total == 0.0 {
            return 0.0;
        }

        matched / spec_total.max(text_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeightRule;
    use std::collections::BTreeMap;

    fn engine_with_weights(weights: &[(&str, f64)], stop_words: &[&str]) -> MatchingEngine {
        let weights: Vec<WeightRule> = weights
            .iter()
            .map(|(w, v)| WeightRule { word: (*w).to_string(), weight: *v })
            .collect();
        let stop_words: Vec<String> = stop_words.iter().map(|s| s.to_string()).collect();
        MatchingEngine::new(&[], &[], &BTreeMap::new(), &weights, &stop_words)
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn marker_classification() {
        assert!(is_marker("10912"));
        assert!(is_marker("7"));
        assert!(is_marker("п2026"));
        assert!(is_marker("d10879"));
        assert!(is_marker("аb1234"));   // длиннее 5 и с цифрой
        assert!(is_marker("130126"));

        assert!(!is_marker("1с"));      // цифра впереди, короткий
        assert!(!is_marker("sа1"));     // две буквы перед цифрой, короткий
        assert!(!is_marker("b2b"));
        assert!(!is_marker("разработчик"));
        assert!(!is_marker(""));
    }

    #[test]
    fn empty_inputs_score_zero() {
        let engine = engine_with_weights(&[], &[]);
        assert_eq!(engine.weighted_coverage_ratio(&[], &words(&["jаvа"])), 0.0);
        assert_eq!(engine.weighted_coverage_ratio(&words(&["jаvа"]), &[]), 0.0);
    }

    #[test]
    fn fully_filtered_spec_scores_zero() {
        let engine = engine_with_weights(&[], &["senior"]);
        // Ключевые слова — стоп-слово, маркер и однобуквенный токен
        let spec = words(&["sеniоr", "10912", "x"]);
        let text = words(&["sеniоr", "jаvа"]);
        assert_eq!(engine.weighted_coverage_ratio(&spec, &text), 0.0);
    }

    #[test]
    fn denominator_is_the_larger_total() {
        let engine = engine_with_weights(&[], &[]);
        // Полное покрытие, но запрос вдвое «шире» специализации
        let spec = words(&["jаvа", "разработчик"]);
        let text = words(&["jаvа", "разработчик", "банки", "кредиты"]);
        assert_eq!(engine.weighted_coverage_ratio(&spec, &text), 0.5);
        // Симметричный случай: итоги равны, покрытие полное
        let exact = words(&["jаvа", "разработчик"]);
        assert_eq!(engine.weighted_coverage_ratio(&spec, &exact), 1.0);
    }

    #[test]
    fn duplicates_do_not_inflate_totals() {
        let engine = engine_with_weights(&[], &[]);
        let spec = words(&["jаvа", "jаvа", "разработчик"]);
        let text = words(&["jаvа", "jаvа", "jаvа", "разработчик"]);
        assert_eq!(engine.weighted_coverage_ratio(&spec, &text), 1.0);
    }

    #[test]
    fn weight_lookup_folds_homoglyphs_and_defaults_to_one() {
        // Вес задан латиницей, токены — в сложенной форме
        let engine = engine_with_weights(&[("java", 3.0)], &[]);
        let spec = words(&["jаvа", "разработчик"]);
        let text = words(&["jаvа"]);
        // matched = 3, spec_total = 4, text_total = 3
        assert_eq!(engine.weighted_coverage_ratio(&spec, &text), 0.75);
    }

    #[test]
    fn markers_are_excluded_from_both_sides() {
        let engine = engine_with_weights(&[], &[]);
        let spec = words(&["dеvорs"]);
        let clean = words(&["dеvорs"]);
        let noisy = words(&["dеvорs", "10902", "п2026", "bd10905"]);
        assert_eq!(
            engine.weighted_coverage_ratio(&spec, &clean),
            engine.weighted_coverage_ratio(&spec, &noisy)
        );
    }
}
