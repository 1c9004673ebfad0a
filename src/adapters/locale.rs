//! Locale detection adapters.
//!
//! A lightweight wordlist heuristic is enough here: detection only selects
//! message templates, so a wrong guess costs nothing but a language.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::ports::{Locale, LocaleDetector};

/// Common Portuguese function words and greetings.
static PORTUGUESE_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "você", "voce", "não", "nao", "olá", "ola", "obrigado", "obrigada", "por", "favor",
        "ajuda", "como", "está", "esta", "uma", "para", "salvar", "nota", "pesquisar",
    ]
    .into_iter()
    .collect()
});

/// Guesses the locale from marker words, falling back to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicLocaleDetector;

impl HeuristicLocaleDetector {
    /// Creates a new detector.
    pub fn new() -> Self {
        Self
    }
}

impl LocaleDetector for HeuristicLocaleDetector {
    fn detect(&self, text: &str) -> Locale {
        let hits = text
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| PORTUGUESE_MARKERS.contains(word.to_lowercase().as_str()))
            .count();

        if hits >= 2 {
            Locale::Portuguese
        } else {
            Locale::default()
        }
    }
}

/// Always reports the same locale. Useful in tests and for deployments
/// that pin a language.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocaleDetector(pub Locale);

impl LocaleDetector for FixedLocaleDetector {
    fn detect(&self, _text: &str) -> Locale {
        self.0
    }
}
