//! UI locales and the static translation table.
//!
//! The table ships as `assets/translations.json`, is embedded at compile time
//! and parsed once on first access. It is never mutated afterwards.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

const TRANSLATIONS_JSON: &str = include_str!("../assets/translations.json");

static TRANSLATIONS: LazyLock<Translations> = LazyLock::new(|| {
    serde_json::from_str(TRANSLATIONS_JSON).expect("embedded translations.json must parse")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    En,
    #[default]
    Fi,
    Sv,
    No,
    Da,
    Et,
    Lv,
    Lt,
    Ru,
}

impl Locale {
    pub const ALL: [Locale; 9] = [
        Locale::En,
        Locale::Fi,
        Locale::Sv,
        Locale::No,
        Locale::Da,
        Locale::Et,
        Locale::Lv,
        Locale::Lt,
        Locale::Ru,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fi => "fi",
            Locale::Sv => "sv",
            Locale::No => "no",
            Locale::Da => "da",
            Locale::Et => "et",
            Locale::Lv => "lv",
            Locale::Lt => "lt",
            Locale::Ru => "ru",
        }
    }

    /// Lowercase English language name. The suggestion service keys some
    /// descriptions by these names instead of by locale code.
    pub fn english_name(self) -> &'static str {
        match self {
            Locale::En => "english",
            Locale::Fi => "finnish",
            Locale::Sv => "swedish",
            Locale::No => "norwegian",
            Locale::Da => "danish",
            Locale::Et => "estonian",
            Locale::Lv => "latvian",
            Locale::Lt => "lithuanian",
            Locale::Ru => "russian",
        }
    }

    pub fn strings(self) -> &'static UiStrings {
        let table = &*TRANSLATIONS;
        match self {
            Locale::En => &table.en,
            Locale::Fi => &table.fi,
            Locale::Sv => &table.sv,
            Locale::No => &table.no,
            Locale::Da => &table.da,
            Locale::Et => &table.et,
            Locale::Lv => &table.lv,
            Locale::Lt => &table.lt,
            Locale::Ru => &table.ru,
        }
    }

    /// Picks this locale's entry from a description map, falling back to English.
    pub fn pick<'a>(self, descriptions: &'a HashMap<String, String>) -> &'a str {
        [
            self.code(),
            self.english_name(),
            Locale::En.code(),
            Locale::En.english_name(),
        ]
        .iter()
        .find_map(|key| descriptions.get(*key))
        .map(String::as_str)
        .unwrap_or("")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code() == wanted)
            .ok_or_else(|| ConfigError::InvalidLocale(s.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct Translations {
    en: UiStrings,
    fi: UiStrings,
    sv: UiStrings,
    no: UiStrings,
    da: UiStrings,
    et: UiStrings,
    lv: UiStrings,
    lt: UiStrings,
    ru: UiStrings,
}

/// Every user-facing string of the wizard in one language.
#[derive(Debug, Deserialize)]
pub struct UiStrings {
    pub title: String,
    pub steps: StepLabels,
    pub description: DescriptionStrings,
    pub suggestions: SuggestionStrings,
    pub loading: String,
    pub no_suggestions: String,
    pub selected: SelectedStrings,
    pub buttons: ButtonLabels,
    pub language: LanguageStrings,
    #[serde(rename = "type")]
    pub tag_type: TagTypeStrings,
    pub input_method: InputMethodStrings,
    pub filename: FilenameStrings,
}

#[derive(Debug, Deserialize)]
pub struct StepLabels {
    pub describe: String,
    pub review: String,
    pub save: String,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionStrings {
    pub label: String,
    pub button: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionStrings {
    pub title: String,
    pub fallback: String,
    pub conditional: String,
    pub banner_size: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectedStrings {
    pub title: String,
    pub save_as: String,
}

#[derive(Debug, Deserialize)]
pub struct ButtonLabels {
    pub back: String,
    pub next: String,
    pub start_new: String,
    pub save_tags: String,
}

#[derive(Debug, Deserialize)]
pub struct LanguageStrings {
    pub label: String,
    pub options: HashMap<String, String>,
}

impl LanguageStrings {
    /// Name of `locale` as written in this language.
    pub fn name_of(&self, locale: Locale) -> &str {
        self.options
            .get(locale.code())
            .map(String::as_str)
            .unwrap_or(locale.code())
    }
}

#[derive(Debug, Deserialize)]
pub struct TagTypeStrings {
    pub label: String,
    pub options: TagTypeOptions,
}

#[derive(Debug, Deserialize)]
pub struct TagTypeOptions {
    pub template: String,
    pub asset: String,
}

#[derive(Debug, Deserialize)]
pub struct InputMethodStrings {
    pub label: String,
    pub options: InputMethodOptions,
}

#[derive(Debug, Deserialize)]
pub struct InputMethodOptions {
    pub description: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct FilenameStrings {
    pub label: String,
    pub placeholder: String,
}
