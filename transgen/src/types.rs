//! Core, format-agnostic types for transgen.
//! Ingestion decodes into these; emitters render views of these.

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The platforms translations can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Platform {
    #[serde(rename = "ios")]
    Ios,
    #[serde(rename = "android")]
    Android,
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Ios => write!(f, "iOS"),
            Platform::Android => write!(f, "Android"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(Error::settings_error(format!(
                "unknown platform `{}` (expected ios or android)",
                other
            ))),
        }
    }
}

/// Language name → translated text, iterated in ingestion language order.
///
/// A language that is absent and a language mapped to `""` are different
/// states: both are skipped on emission, but they are reported differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Translations {
    entries: Vec<(String, String)>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text for `language`, keeping the current position of an
    /// existing language.
    pub fn insert(&mut self, language: impl Into<String>, text: impl Into<String>) {
        let language = language.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(lang, _)| *lang == language) {
            Some((_, existing)) => *existing = text,
            None => self.entries.push((language, text)),
        }
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.entries.iter().any(|(lang, _)| lang == language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(lang, _)| lang.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(lang, text)| (lang.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for Translations {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut translations = Translations::new();
        for (language, text) in iter {
            translations.insert(language, text);
        }
        translations
    }
}

/// A single translatable string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationItem {
    /// The item key, never blank for ingested items.
    pub key: String,

    /// The platforms the item applies to.
    pub platforms: BTreeSet<Platform>,

    /// Per-language texts.
    pub translations: Translations,

    /// The section the item belongs to; empty means "same as before".
    pub section: String,
}

impl TranslationItem {
    pub fn new(
        key: impl Into<String>,
        platforms: impl IntoIterator<Item = Platform>,
        translations: Translations,
        section: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            platforms: platforms.into_iter().collect(),
            translations,
            section: section.into(),
        }
    }

    /// Two items are the same item when both the key and the platform set match.
    pub fn is_same_item(&self, other: &TranslationItem) -> bool {
        self.key == other.key && self.platforms == other.platforms
    }

    pub fn applies_to(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

impl Display for TranslationItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} translations)", self.key, self.translations.len())
    }
}

/// The result of ingesting one translations table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSet {
    /// Items in row order.
    pub items: Vec<TranslationItem>,
    /// Languages in header order.
    pub languages: Vec<String>,
    /// Keys in row order (diagnostics only).
    pub keys: Vec<String>,
}

impl TranslationSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_item(&self, key: &str) -> Option<&TranslationItem> {
        self.items.iter().find(|item| item.key == key)
    }
}

/// Immutable snapshot of a (possibly merged) translation set, ready to be emitted.
///
/// Obtained from [`crate::merge::TranslationSetBuilder::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<TranslationItem>,
    languages: Vec<String>,
}

impl Catalog {
    pub(crate) fn new(items: Vec<TranslationItem>, languages: Vec<String>) -> Self {
        Self { items, languages }
    }

    pub fn items(&self) -> &[TranslationItem] {
        &self.items
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_item(&self, key: &str) -> Option<&TranslationItem> {
        self.items.iter().find(|item| item.key == key)
    }
}

impl From<TranslationSet> for Catalog {
    fn from(value: TranslationSet) -> Self {
        Catalog::new(value.items, value.languages)
    }
}

/// A single translation to be written: one item seen through one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation<'a> {
    pub key: &'a str,
    pub text: &'a str,
    pub section: &'a str,
}
