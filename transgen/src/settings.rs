//! The `settings.json` file describing which clients to generate for.
//!
//! ```json
//! {
//!   "targets": [
//!     {
//!       "clientName": "clientOne",
//!       "targetLanguages": ["English", "German"],
//!       "doIOS": true,
//!       "doAndroid": true,
//!       "defaultLanguage": "English",
//!       "clientCSVFilename": "translations_clientOne.csv",
//!       "relativePathAndroid": "android/clientOne",
//!       "relativePathIOS": "App/Clients/clientOne"
//!     }
//!   ],
//!   "languageCodeMapping": { "Chinese": "zh-Hans" },
//!   "writeEnglishIfMissing": false,
//!   "iosKeyCaseType": "Camel"
//! }
//! ```

use std::{
    collections::{BTreeSet, HashMap},
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, formats::KeyCase, language::LanguageRegistry, types::Platform};

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationsSettings {
    /// The clients the translations are generated for.
    pub targets: Vec<TargetSetting>,

    /// Custom language name → code mapping, used before the ISO table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code_mapping: Option<HashMap<String, String>>,

    /// Fill blank cells from the first language column.
    #[serde(default)]
    pub write_english_if_missing: bool,

    /// Identifier case for `TranslationKey.swift`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_key_case_type: Option<KeyCase>,
}

/// Settings for a single client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSetting {
    /// The client name, also its default folder name.
    pub client_name: String,

    /// Languages to generate, in order.
    pub target_languages: Vec<String>,

    #[serde(rename = "doIOS")]
    pub do_ios: bool,

    pub do_android: bool,

    /// The language written to the unsuffixed Android `values` folder.
    pub default_language: String,

    /// Optional client-specific table overriding the default one.
    #[serde(rename = "clientCSVFilename", default, skip_serializing_if = "Option::is_none")]
    pub client_csv_filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path_android: Option<String>,

    #[serde(rename = "relativePathIOS", default, skip_serializing_if = "Option::is_none")]
    pub relative_path_ios: Option<String>,
}

impl TargetSetting {
    /// The client folder for `platform`, relative to the project.
    pub fn directory(&self, platform: Platform) -> &str {
        let custom = match platform {
            Platform::Android => self.relative_path_android.as_deref(),
            Platform::Ios => self.relative_path_ios.as_deref(),
        };
        custom
            .filter(|path| !path.trim().is_empty())
            .unwrap_or(&self.client_name)
    }

    pub fn platforms(&self) -> BTreeSet<Platform> {
        let mut platforms = BTreeSet::new();
        if self.do_ios {
            platforms.insert(Platform::Ios);
        }
        if self.do_android {
            platforms.insert(Platform::Android);
        }
        platforms
    }

    /// The client table file name, if one is configured.
    pub fn client_csv(&self) -> Option<&str> {
        self.client_csv_filename
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

impl TranslationsSettings {
    /// Parses and validates settings from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let settings: TranslationsSettings = serde_json::from_reader(reader)?;
        if settings.targets.is_empty() {
            return Err(Error::settings_error("no clients found in the settings file"));
        }
        Ok(settings)
    }

    /// Parses and validates settings from a file path.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        tracing::debug!("loading settings from {}", path.display());
        let file = File::open(path).map_err(Error::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn client_names(&self) -> Vec<&str> {
        self.targets
            .iter()
            .map(|target| target.client_name.as_str())
            .collect()
    }

    pub fn find_target(&self, client_name: &str) -> Option<&TargetSetting> {
        self.targets
            .iter()
            .find(|target| target.client_name == client_name)
    }

    /// Builds the language registry described by these settings.
    pub fn language_registry(&self) -> LanguageRegistry {
        match &self.language_code_mapping {
            Some(mapping) => LanguageRegistry::with_overrides(mapping.iter()),
            None => LanguageRegistry::new(),
        }
    }
}
