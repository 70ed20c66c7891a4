use crate::model::SynonymRule;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// Складывает визуально похожие латинские буквы в кириллические двойники.
/// Ровно семь букв; расширение набора меняет результаты сопоставления
/// на существующих конфигурациях.
pub fn fold_homoglyphs(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a' => 'а',
            'c' => 'с',
            'e' => 'е',
            'o' => 'о',
            'p' => 'р',
            'x' => 'х',
            'y' => 'у',
            other => other,
        })
        .collect()
}

/// Нормализатор заголовков: склейка составных терминов, фолдинг гомоглифов,
/// чистка пунктуации и двухэтапная подстановка синонимов.
pub struct Normalizer {
    compounds: Vec<(Regex, &'static str)>,
    synonyms: HashMap<String, Option<String>>,
    abbreviations: HashMap<String, String>,
}

impl Normalizer {
    pub fn new(synonyms: &[SynonymRule], abbreviations: &BTreeMap<String, String>) -> Self {
        // Patterns are defined over unfolded Latin spellings,
        // so collapsing MUST run before the homoglyph fold.
        let compounds = vec![
            (Regex::new(r"front[-\s]+end").expect("bad compound pattern"), "frontend"),
            (Regex::new(r"back[-\s]+end").expect("bad compound pattern"), "backend"),
            (Regex::new(r"full[-\s]+stack").expect("bad compound pattern"), "fullstack"),
            (Regex::new(r"ux[-\s]*ui").expect("bad compound pattern"), "uxui"),
            (Regex::new(r"ui[-\s]*ux").expect("bad compound pattern"), "uxui"),
        ];

        // Ключи и значения складываются при построении, чтобы normalize
        // была стабильна на собственном выводе. Дубликаты ключей — last write wins.
        let mut synonym_table = HashMap::new();
        for rule in synonyms {
            let src = fold_homoglyphs(&rule.src.to_lowercase());
            let dst = rule
                .dst
                .as_ref()
                .filter(|d| !d.is_empty())
                .map(|d| fold_homoglyphs(&d.to_lowercase()));
            synonym_table.insert(src, dst);
        }

        let mut abbreviation_table = HashMap::new();
        for (src, dst) in abbreviations {
            abbreviation_table.insert(
                fold_homoglyphs(&src.to_lowercase()),
                fold_homoglyphs(&dst.to_lowercase()),
            );
        }

        Self {
            compounds,
            synonyms: synonym_table,
            abbreviations: abbreviation_table,
        }
    }

    /// Приводит произвольный текст к нижнему регистру и пробельно-разделённым
    /// нормализованным токенам. Порядок шагов менять нельзя.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = text.to_lowercase();

        for (pattern, replacement) in &self.compounds {
            result = pattern.replace_all(&result, *replacement).into_owned();
        }

        let result = fold_homoglyphs(&result);
        // «дwh» — гомоглифно-испорченное написание dwh
        let result = result.replace("дwh", "dwh");

        let cleaned: String = result
            .chars()
            .map(|c| {
                if matches!(c, 'a'..='z' | '0'..='9' | 'а'..='я') {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        let mut normalized: Vec<String> = Vec::new();
        for token in cleaned.split_whitespace() {
            let mut current = token.to_string();

            // Глобальная таблица: замена либо удаление токена
            if let Some(dst) = self.synonyms.get(&current) {
                match dst {
                    Some(replacement) => current = replacement.clone(),
                    None => continue,
                }
            }

            // Локальная таблица сокращений: только замена
            if let Some(replacement) = self.abbreviations.get(&current) {
                current = replacement.clone();
            }

            if !current.is_empty() {
                normalized.push(current);
            }
        }

        normalized.join(" ")
    }
}
