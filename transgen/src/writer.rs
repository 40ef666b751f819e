//! Per-language emission of a [`Catalog`] through an [`Emitter`].
//!
//! The writer resolves one output path per configured language, builds the
//! filtered view of the catalog for that language and platform, and hands it
//! to the emitter. Key-only emitters get the unfiltered key view instead,
//! written once. Output folders are never created here; see
//! [`crate::generator::Generator::create_missing_paths`] for that.

use std::path::{Path, PathBuf};

use crate::{
    error::Error,
    language::LanguageRegistry,
    settings::TargetSetting,
    traits::{Emitter, PathTarget},
    types::{Catalog, Platform, Translation, TranslationItem},
};

/// Whether `item` should be written for `language` on `platform`.
///
/// Items with a blank key, another platform, no entry for the language, or
/// an empty text are skipped. With `verbose`, missing and empty texts are
/// reported separately.
pub fn is_valid_item(item: &TranslationItem, language: &str, platform: Platform, verbose: bool) -> bool {
    if item.key.trim().is_empty() || !item.applies_to(platform) {
        return false;
    }
    match item.translations.get(language) {
        None => {
            if verbose {
                tracing::debug!("`{}` has no {} translation, skipping", item.key, language);
            }
            false
        }
        Some("") => {
            if verbose {
                tracing::debug!("`{}` has an empty {} translation, skipping", item.key, language);
            }
            false
        }
        Some(_) => true,
    }
}

/// The outcome of writing one language.
#[derive(Debug)]
pub struct LanguageOutcome {
    pub language: String,
    /// The resolved destination; `None` when path resolution failed.
    pub path: Option<PathBuf>,
    /// Number of written translations, or the reason nothing was written.
    pub result: Result<usize, Error>,
}

impl LanguageOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregated outcomes of one emitter over all languages of a client.
#[derive(Debug)]
pub struct WriteReport {
    pub platform: Platform,
    pub outcomes: Vec<LanguageOutcome>,
}

impl WriteReport {
    /// Successful only if every language was written.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(LanguageOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &LanguageOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_success())
            .filter_map(|outcome| outcome.path.as_deref())
    }
}

/// Writes the catalog of one client through one emitter.
pub struct TranslationWriter<'a> {
    target: &'a TargetSetting,
    catalog: &'a Catalog,
    registry: &'a LanguageRegistry,
    emitter: &'a dyn Emitter,
    output_root: &'a Path,
    verbose: bool,
}

impl<'a> TranslationWriter<'a> {
    pub fn new(
        target: &'a TargetSetting,
        catalog: &'a Catalog,
        registry: &'a LanguageRegistry,
        emitter: &'a dyn Emitter,
        output_root: &'a Path,
    ) -> Self {
        Self {
            target,
            catalog,
            registry,
            emitter,
            output_root,
            verbose: false,
        }
    }

    /// Logs every skipped translation.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn platform(&self) -> Platform {
        self.emitter.platform()
    }

    /// The destination of `language`, joined onto the output root.
    pub fn resolve_output_path(&self, language: &str) -> Result<PathBuf, Error> {
        let target = PathTarget::new(
            self.target.directory(self.platform()),
            language,
            &self.target.default_language,
            self.registry,
        );
        Ok(self.output_root.join(self.emitter.relative_path(&target)?))
    }

    /// Destinations of all target languages, in order, without duplicates.
    ///
    /// Languages whose path cannot be resolved are reported and left out.
    pub fn resolved_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for language in &self.target.target_languages {
            match self.resolve_output_path(language) {
                Ok(path) => {
                    if !paths.contains(&path) {
                        paths.push(path);
                    }
                }
                Err(e) => tracing::warn!(
                    "client {}, {}: no output path for {}: {}",
                    self.target.client_name,
                    self.platform(),
                    language,
                    e
                ),
            }
        }
        paths
    }

    /// The ordered, filtered view of the catalog for `language`.
    pub fn translations_for(&self, language: &str) -> Vec<Translation<'a>> {
        let platform = self.platform();
        self.catalog
            .items()
            .iter()
            .filter(|item| is_valid_item(item, language, platform, self.verbose))
            .filter_map(|item| {
                item.translations.get(language).map(|text| Translation {
                    key: item.key.as_str(),
                    text,
                    section: item.section.as_str(),
                })
            })
            .collect()
    }

    /// Every item of the platform with a non-blank key, whatever its texts.
    ///
    /// The texts are left empty; this view is for emitters that only list keys.
    pub fn key_view(&self) -> Vec<Translation<'a>> {
        let platform = self.platform();
        self.catalog
            .items()
            .iter()
            .filter(|item| !item.key.trim().is_empty() && item.applies_to(platform))
            .map(|item| Translation {
                key: item.key.as_str(),
                text: "",
                section: item.section.as_str(),
            })
            .collect()
    }

    /// Writes one language, logging a failure with its full context.
    pub fn write_language(&self, language: &str) -> LanguageOutcome {
        self.write_view(language, |writer| writer.translations_for(language))
    }

    /// Writes the key view once, to the default language's path.
    pub fn write_keys(&self) -> LanguageOutcome {
        self.write_view(&self.target.default_language, |writer| writer.key_view())
    }

    fn write_view<F>(&self, language: &str, view: F) -> LanguageOutcome
    where
        F: FnOnce(&Self) -> Vec<Translation<'a>>,
    {
        let path = match self.resolve_output_path(language) {
            Ok(path) => path,
            Err(e) => {
                self.log_failure(language, None, &e);
                return LanguageOutcome {
                    language: language.to_string(),
                    path: None,
                    result: Err(e),
                };
            }
        };

        let translations = view(self);
        let result = self
            .emitter
            .write_to(&path, &translations)
            .map(|_| translations.len());
        match &result {
            Ok(count) => tracing::debug!(
                "wrote {} translations for {} to {}",
                count,
                language,
                path.display()
            ),
            Err(e) => self.log_failure(language, Some(&path), e),
        }

        LanguageOutcome {
            language: language.to_string(),
            path: Some(path),
            result,
        }
    }

    /// Writes each of `languages` independently.
    pub fn write_languages<S: AsRef<str>>(&self, languages: &[S]) -> WriteReport {
        WriteReport {
            platform: self.platform(),
            outcomes: languages
                .iter()
                .map(|language| self.write_language(language.as_ref()))
                .collect(),
        }
    }

    /// Writes every target language of the client.
    pub fn write_all(&self) -> WriteReport {
        self.write_languages(&self.target.target_languages)
    }

    fn log_failure(&self, language: &str, path: Option<&Path>, error: &Error) {
        match path {
            Some(path) => tracing::error!(
                "client {}, {}, {}: failed to write {}: {}",
                self.target.client_name,
                self.platform(),
                language,
                path.display(),
                error
            ),
            None => tracing::error!(
                "client {}, {}, {}: {}",
                self.target.client_name,
                self.platform(),
                language,
                error
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        formats::{AndroidStringsEmitter, StringsEmitter, SwiftKeysEmitter},
        types::Translations,
    };
    use std::fs;

    fn target(languages: &[&str]) -> TargetSetting {
        TargetSetting {
            client_name: "clientOne".to_string(),
            target_languages: languages.iter().map(|l| l.to_string()).collect(),
            do_ios: true,
            do_android: true,
            default_language: "English".to_string(),
            client_csv_filename: None,
            relative_path_android: None,
            relative_path_ios: None,
        }
    }

    fn item(key: &str, platforms: &[Platform], texts: &[(&str, &str)]) -> TranslationItem {
        TranslationItem::new(
            key,
            platforms.iter().copied(),
            texts.iter().copied().collect::<Translations>(),
            "",
        )
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                item("both", &[Platform::Ios, Platform::Android], &[("English", "Both"), ("German", "Beide")]),
                item("android_only", &[Platform::Android], &[("English", "Android"), ("German", "Android")]),
                item("ios_only", &[Platform::Ios], &[("English", "iOS"), ("German", "")]),
                item(" ", &[Platform::Ios, Platform::Android], &[("English", "Blank")]),
            ],
            vec!["English".to_string(), "German".to_string()],
        )
    }

    #[test]
    fn test_is_valid_item() {
        let catalog = catalog();
        let items = catalog.items();
        assert!(is_valid_item(&items[0], "German", Platform::Ios, false));
        assert!(!is_valid_item(&items[1], "English", Platform::Ios, false));
        assert!(!is_valid_item(&items[2], "German", Platform::Ios, true));
        assert!(!is_valid_item(&items[2], "French", Platform::Ios, true));
        assert!(!is_valid_item(&items[3], "English", Platform::Android, false));
    }

    #[test]
    fn test_android_only_item_never_in_ios_view() {
        let catalog = catalog();
        let registry = LanguageRegistry::new();
        let target = target(&["English", "German"]);
        let writer = TranslationWriter::new(&target, &catalog, &registry, &StringsEmitter, Path::new("."));
        let english: Vec<_> = writer.translations_for("English").iter().map(|t| t.key).collect();
        assert_eq!(english, vec!["both", "ios_only"]);
        let german: Vec<_> = writer.translations_for("German").iter().map(|t| t.key).collect();
        assert_eq!(german, vec!["both"]);
    }

    #[test]
    fn test_key_view_ignores_texts() {
        let catalog = catalog();
        let registry = LanguageRegistry::new();
        let target = target(&["German"]);
        let keys = SwiftKeysEmitter::new("clientOne", None);
        let writer = TranslationWriter::new(&target, &catalog, &registry, &keys, Path::new("."));
        let listed: Vec<_> = writer.key_view().iter().map(|t| t.key).collect();
        assert_eq!(listed, vec!["both", "ios_only"]);
        assert!(writer.translations_for("German").iter().all(|t| t.key != "ios_only"));
    }

    #[test]
    fn test_write_keys_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("clientOne/Localization")).unwrap();

        let catalog = catalog();
        let registry = LanguageRegistry::new();
        let target = target(&["German"]);
        let keys = SwiftKeysEmitter::new("clientOne", None);
        let outcome =
            TranslationWriter::new(&target, &catalog, &registry, &keys, dir.path()).write_keys();

        assert_eq!(outcome.language, "English");
        assert_eq!(outcome.result.as_ref().unwrap(), &2);
        let written =
            fs::read_to_string(dir.path().join("clientOne/Localization/TranslationKey.swift")).unwrap();
        assert!(written.contains("\tstatic let ios_only = \"ios_only\"\n"));
        assert!(!written.contains("android_only"));
    }

    #[test]
    fn test_resolved_paths_skip_unknown_languages() {
        let catalog = catalog();
        let registry = LanguageRegistry::new();
        let target = target(&["English", "German", "Klingonish"]);
        let writer = TranslationWriter::new(
            &target,
            &catalog,
            &registry,
            &AndroidStringsEmitter,
            Path::new("project"),
        );
        assert_eq!(
            writer.resolved_paths(),
            vec![
                PathBuf::from("project/clientOne/src/main/res/values/strings.xml"),
                PathBuf::from("project/clientOne/src/main/res/values-de/strings.xml"),
            ]
        );
    }

    #[test]
    fn test_missing_folder_does_not_stop_other_languages() {
        let dir = tempfile::tempdir().unwrap();
        let values = dir.path().join("clientOne/src/main/res/values");
        fs::create_dir_all(&values).unwrap();

        let catalog = catalog();
        let registry = LanguageRegistry::new();
        let target = target(&["German", "English"]);
        let report = TranslationWriter::new(
            &target,
            &catalog,
            &registry,
            &AndroidStringsEmitter,
            dir.path(),
        )
        .write_all();

        assert!(!report.is_success());
        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(
            report.outcomes[0].result,
            Err(Error::OutputPathMissing { .. })
        ));
        assert_eq!(report.outcomes[1].result.as_ref().unwrap(), &2);

        let written = fs::read_to_string(values.join("strings.xml")).unwrap();
        assert!(written.contains(r#"<string name="android_only">Android</string>"#));
        assert!(!written.contains("ios_only"));
        assert!(!dir.path().join("clientOne/src/main/res/values-de").exists());
    }

    #[test]
    fn test_write_all_success() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("clientOne/Localization/en.lproj")).unwrap();
        fs::create_dir_all(dir.path().join("clientOne/Localization/de.lproj")).unwrap();

        let catalog = catalog();
        let registry = LanguageRegistry::new();
        let target = target(&["English", "German"]);
        let report =
            TranslationWriter::new(&target, &catalog, &registry, &StringsEmitter, dir.path())
                .verbose(true)
                .write_all();

        assert!(report.is_success());
        assert_eq!(report.written_paths().count(), 2);
        let german = fs::read_to_string(
            dir.path().join("clientOne/Localization/de.lproj/Localizable.strings"),
        )
        .unwrap();
        assert_eq!(german, "\"both\" = \"Beide\";\n");
    }
}
