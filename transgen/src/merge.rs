//! Client overrides of the default translation set.
//!
//! The default set is copied into a [`TranslationSetBuilder`], client items
//! are merged into it, and the builder is then frozen into a [`Catalog`].
//! Nothing else can change items after ingestion.

use crate::types::{Catalog, TranslationItem, TranslationSet};

/// Counters returned by [`TranslationSetBuilder::apply_overrides`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideReport {
    /// Client items that matched a default item and overwrote its languages.
    pub overridden: usize,
    /// Client items that had no match and were appended.
    pub added: usize,
}

impl OverrideReport {
    pub fn total(&self) -> usize {
        self.overridden + self.added
    }
}

/// Mutable working copy of a translation set during the merge phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSetBuilder {
    items: Vec<TranslationItem>,
    languages: Vec<String>,
}

impl TranslationSetBuilder {
    pub fn new(set: TranslationSet) -> Self {
        Self {
            items: set.items,
            languages: set.languages,
        }
    }

    pub fn items(&self) -> &[TranslationItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merges client items into the default items.
    ///
    /// A client item matching a default item (same key, same platform set)
    /// overwrites each of its languages on that item; other languages are
    /// kept. Unmatched client items are appended as they are. Client items
    /// are applied in order, so a later duplicate wins.
    pub fn apply_overrides(&mut self, client_items: &[TranslationItem]) -> OverrideReport {
        let mut report = OverrideReport::default();
        for client_item in client_items {
            match self
                .items
                .iter_mut()
                .find(|item| item.is_same_item(client_item))
            {
                Some(item) => {
                    for (language, text) in client_item.translations.iter() {
                        item.translations.insert(language, text);
                    }
                    report.overridden += 1;
                }
                None => {
                    self.items.push(client_item.clone());
                    report.added += 1;
                }
            }
        }

        for language in client_items
            .iter()
            .flat_map(|item| item.translations.languages())
        {
            if !self.languages.iter().any(|known| known == language) {
                self.languages.push(language.to_string());
            }
        }

        report
    }

    /// Freezes the merged items.
    pub fn finish(self) -> Catalog {
        Catalog::new(self.items, self.languages)
    }
}

impl From<TranslationSet> for TranslationSetBuilder {
    fn from(value: TranslationSet) -> Self {
        TranslationSetBuilder::new(value)
    }
}
