//! Locale Detector Port - guesses which language a user is writing in.
//!
//! Detection only influences which template set the formatter renders
//! with; routing never depends on it.

/// Message template locales known to the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English templates. The fixed fallback.
    #[default]
    English,
    /// Portuguese templates.
    Portuguese,
}

impl Locale {
    /// BCP 47-ish tag for logging.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Portuguese => "pt",
        }
    }
}

/// Port for locale detection.
pub trait LocaleDetector: Send + Sync {
    /// Guesses the locale of `text`, falling back to [`Locale::default`]
    /// when unsure.
    fn detect(&self, text: &str) -> Locale;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_english() {
        assert_eq!(Locale::default(), Locale::English);
    }

    #[test]
    fn tags_are_stable() {
        assert_eq!(Locale::English.tag(), "en");
        assert_eq!(Locale::Portuguese.tag(), "pt");
    }
}
