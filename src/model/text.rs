//! Localised text.

use std::fmt;

/// Display language for localised fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    Japanese,
    English,
}

impl Language {
    /// Wire name as it appears in the feed (`"japanese"` / `"english"`).
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "japanese" => Some(Language::Japanese),
            "english" => Some(Language::English),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Language::Japanese => Language::English,
            Language::English => Language::Japanese,
        }
    }

    pub fn short_code(self) -> &'static str {
        match self {
            Language::Japanese => "JA",
            Language::English => "EN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Japanese => "japanese",
            Language::English => "english",
        })
    }
}

/// A string carried in both UI languages.
///
/// Articles and episodes only ship one string on the wire; it fills both
/// slots via [`MultiLangText::same`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiLangText {
    pub japanese: String,
    pub english: String,
}

impl MultiLangText {
    pub fn new(japanese: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            japanese: japanese.into(),
            english: english.into(),
        }
    }

    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            japanese: text.clone(),
            english: text,
        }
    }

    /// Text for `language`, falling back to the other language when empty.
    pub fn get(&self, language: Language) -> &str {
        let (wanted, fallback) = match language {
            Language::Japanese => (&self.japanese, &self.english),
            Language::English => (&self.english, &self.japanese),
        };
        if wanted.is_empty() {
            fallback
        } else {
            wanted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_requested_language() {
        let text = MultiLangText::new("こんにちは", "hello");
        assert_eq!(text.get(Language::Japanese), "こんにちは");
        assert_eq!(text.get(Language::English), "hello");
    }

    #[test]
    fn get_falls_back_when_requested_is_empty() {
        let text = MultiLangText::new("", "hello");
        assert_eq!(text.get(Language::Japanese), "hello");
    }

    #[test]
    fn same_fills_both_languages() {
        let text = MultiLangText::same("DroidKaigi");
        assert_eq!(text.japanese, text.english);
    }

    #[test]
    fn language_round_trips_through_wire_name() {
        for lang in [Language::Japanese, Language::English] {
            assert_eq!(Language::from_wire(&lang.to_string()), Some(lang));
        }
        assert_eq!(Language::from_wire("klingon"), None);
    }
}
