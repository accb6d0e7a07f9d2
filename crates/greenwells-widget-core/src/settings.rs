use serde::Serialize;
use tracing::warn;

use crate::storage::{
    AI_PERSONALITY_STORAGE_KEY, FallbackStore, KeyValueStore, LANGUAGE_STORAGE_KEY,
    THEME_STORAGE_KEY,
};

pub const DARK_MODE_BODY_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Sw,
    Fr,
}

impl Language {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Sw => "sw",
            Self::Fr => "fr",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "en" => Some(Self::En),
            "sw" => Some(Self::Sw),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AiPersonality {
    #[default]
    Friendly,
    Professional,
    Neutral,
}

impl AiPersonality {
    const ORDER: [Self; 3] = [Self::Friendly, Self::Professional, Self::Neutral];

    /// Display and storage name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Friendly => "Friendly",
            Self::Professional => "Professional",
            Self::Neutral => "Neutral",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ORDER
            .into_iter()
            .find(|personality| personality.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// Slider positions run 1..=3.
    #[must_use]
    pub fn from_slider(value: u8) -> Option<Self> {
        let index = usize::from(value).checked_sub(1)?;
        Self::ORDER.get(index).copied()
    }

    #[must_use]
    pub fn slider_value(self) -> u8 {
        match self {
            Self::Friendly => 1,
            Self::Professional => 2,
            Self::Neutral => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        format!("Current: {}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Settings {
    pub theme: Theme,
    pub language: Language,
    pub ai_personality: AiPersonality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    Theme(Theme),
    Language(Language),
    AiPersonality(AiPersonality),
}

impl Settings {
    /// Reads each scalar independently. Missing or unknown values keep the default.
    pub fn load<S: KeyValueStore>(store: &FallbackStore<S>) -> Self {
        let defaults = Self::default();
        Self {
            theme: load_scalar(store, THEME_STORAGE_KEY, Theme::parse).unwrap_or(defaults.theme),
            language: load_scalar(store, LANGUAGE_STORAGE_KEY, Language::parse)
                .unwrap_or(defaults.language),
            ai_personality: load_scalar(store, AI_PERSONALITY_STORAGE_KEY, AiPersonality::parse)
                .unwrap_or(defaults.ai_personality),
        }
    }

    pub fn apply<S: KeyValueStore>(&mut self, store: &mut FallbackStore<S>, change: SettingChange) {
        match change {
            SettingChange::Theme(theme) => {
                self.theme = theme;
                store.set(THEME_STORAGE_KEY, theme.as_str());
            }
            SettingChange::Language(language) => {
                self.language = language;
                store.set(LANGUAGE_STORAGE_KEY, language.as_str());
            }
            SettingChange::AiPersonality(personality) => {
                self.ai_personality = personality;
                store.set(AI_PERSONALITY_STORAGE_KEY, personality.as_str());
            }
        }
    }
}

fn load_scalar<S, T>(store: &FallbackStore<S>, key: &str, parse: fn(&str) -> Option<T>) -> Option<T>
where
    S: KeyValueStore,
{
    let raw = store.get(key)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        warn!(key, value = %raw, "ignoring unrecognized stored setting");
    }
    parsed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationKey {
    Feedback,
    Submit,
    Chat,
    Settings,
}

impl TranslationKey {
    pub const ALL: [Self; 4] = [Self::Feedback, Self::Submit, Self::Chat, Self::Settings];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feedback => "feedback",
            Self::Submit => "submit",
            Self::Chat => "chat",
            Self::Settings => "settings",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw.trim())
    }
}

#[must_use]
pub fn translate(language: Language, key: TranslationKey) -> &'static str {
    match (language, key) {
        (Language::En, TranslationKey::Feedback) => "Send Us Your Feedback",
        (Language::En, TranslationKey::Submit) => "Submit Feedback",
        (Language::En, TranslationKey::Chat) => "Chat with Support",
        (Language::En, TranslationKey::Settings) => "Settings",
        (Language::Sw, TranslationKey::Feedback) => "Tuma Maoni Yako",
        (Language::Sw, TranslationKey::Submit) => "Tuma Maoni",
        (Language::Sw, TranslationKey::Chat) => "Sema na Msaada",
        (Language::Sw, TranslationKey::Settings) => "Mipango",
        (Language::Fr, TranslationKey::Feedback) => "Envoyez-nous vos commentaires",
        (Language::Fr, TranslationKey::Submit) => "Soumettre les commentaires",
        (Language::Fr, TranslationKey::Chat) => "Discuter avec le support",
        (Language::Fr, TranslationKey::Settings) => "Paramètres",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn slider_maps_positions_to_personalities() {
        assert_eq!(AiPersonality::from_slider(1), Some(AiPersonality::Friendly));
        assert_eq!(AiPersonality::from_slider(3), Some(AiPersonality::Neutral));
        assert_eq!(AiPersonality::from_slider(0), None);
        assert_eq!(AiPersonality::from_slider(4), None);
        assert_eq!(AiPersonality::Professional.label(), "Current: Professional");
    }

    #[test]
    fn apply_persists_each_scalar() {
        let mut store = FallbackStore::new(MemoryStore::new());
        let mut settings = Settings::default();

        settings.apply(&mut store, SettingChange::Theme(Theme::Dark));
        settings.apply(&mut store, SettingChange::Language(Language::Sw));
        settings.apply(&mut store, SettingChange::AiPersonality(AiPersonality::Neutral));

        assert_eq!(store.get(THEME_STORAGE_KEY).as_deref(), Some("dark"));
        assert_eq!(store.get(LANGUAGE_STORAGE_KEY).as_deref(), Some("sw"));
        assert_eq!(store.get(AI_PERSONALITY_STORAGE_KEY).as_deref(), Some("Neutral"));
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn load_keeps_defaults_for_unknown_values() {
        let store = FallbackStore::new(MemoryStore::with_entries([
            (THEME_STORAGE_KEY, "sepia"),
            (LANGUAGE_STORAGE_KEY, "fr"),
            (AI_PERSONALITY_STORAGE_KEY, "professional"),
        ]));

        let settings = Settings::load(&store);

        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.language, Language::Fr);
        assert_eq!(settings.ai_personality, AiPersonality::Professional);
    }

    #[test]
    fn every_language_translates_every_key() {
        for language in [Language::En, Language::Sw, Language::Fr] {
            for key in TranslationKey::ALL {
                assert!(!translate(language, key).is_empty());
            }
        }
        assert_eq!(translate(Language::Sw, TranslationKey::Chat), "Sema na Msaada");
        assert_eq!(TranslationKey::parse("submit"), Some(TranslationKey::Submit));
        assert_eq!(TranslationKey::parse("logout"), None);
    }
}
