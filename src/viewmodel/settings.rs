use tracing::debug;

use crate::model::Language;

/// User preferences that affect rendering.
#[derive(Debug, Default)]
pub struct SettingsViewModel {
    language: Language,
}

impl SettingsViewModel {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.other();
        debug!(language = %self.language, "language switched");
        self.language
    }
}
