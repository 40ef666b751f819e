//! Swift source listing every iOS translation key as a constant.
//!
//! ```swift
//! struct TranslationKey {
//!     static let okButton = "ok_button"
//! }
//! ```

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use indoc::indoc;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    formats::SectionTracker,
    traits::{Emitter as EmitterTrait, PathTarget},
    types::{Platform, Translation},
};

/// How keys are turned into Swift identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum KeyCase {
    /// `ok_button` → `OkButton`
    #[serde(alias = "pascal")]
    Pascal,
    /// `ok_button` → `okButton`
    #[serde(alias = "camel")]
    Camel,
    /// Keys are used as they are.
    #[serde(alias = "snake")]
    Snake,
}

impl KeyCase {
    pub fn apply(&self, key: &str) -> String {
        match self {
            KeyCase::Pascal => pascal_case(key),
            KeyCase::Camel => {
                let pascal = pascal_case(key);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) if !pascal.trim().is_empty() => {
                        first.to_lowercase().chain(chars).collect()
                    }
                    _ => key.to_string(),
                }
            }
            KeyCase::Snake => key.to_string(),
        }
    }
}

fn pascal_case(key: &str) -> String {
    key.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Formats `key` with an optional case; no case means no transformation.
pub fn format_key(key: &str, case: Option<KeyCase>) -> String {
    match case {
        Some(case) => case.apply(key),
        None => key.to_string(),
    }
}

/// An in-memory `TranslationKey.swift` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub client_name: String,
    pub constants: Vec<KeyConstant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConstant {
    pub identifier: String,
    pub key: String,
    pub section: Option<String>,
}

impl Format {
    pub fn from_translations(
        client_name: impl Into<String>,
        translations: &[Translation<'_>],
        case: Option<KeyCase>,
    ) -> Self {
        let mut sections = SectionTracker::default();
        let constants = translations
            .iter()
            .map(|translation| KeyConstant {
                identifier: format_key(translation.key, case),
                key: translation.key.to_string(),
                section: sections.enter(translation.section).map(str::to_string),
            })
            .collect();
        Format {
            client_name: client_name.into(),
            constants,
        }
    }

    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = format!(
            indoc! {"
            //
            //  TranslationKey.swift
            //  {}
            //
            //
            // swiftlint:disable:next type_body_length
            struct TranslationKey {{
            "},
            self.client_name
        );

        for constant in &self.constants {
            if let Some(section) = &constant.section {
                content.push_str(&format!("\n\t// {}\n", section));
            }
            content.push_str(&format!(
                "\tstatic let {} = \"{}\"\n",
                constant.identifier, constant.key
            ));
        }
        content.push_str("}\n");

        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

/// Writes `<client>/Localization/TranslationKey.swift`.
#[derive(Debug, Clone)]
pub struct Emitter {
    client_name: String,
    case: Option<KeyCase>,
}

impl Emitter {
    pub fn new(client_name: impl Into<String>, case: Option<KeyCase>) -> Self {
        Self {
            client_name: client_name.into(),
            case,
        }
    }
}

impl EmitterTrait for Emitter {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn relative_path(&self, target: &PathTarget<'_>) -> Result<PathBuf, Error> {
        Ok(PathBuf::from(target.client_dir)
            .join("Localization")
            .join("TranslationKey.swift"))
    }

    fn render(
        &self,
        _destination: &Path,
        translations: &[Translation<'_>],
        writer: &mut dyn Write,
    ) -> Result<(), Error> {
        Format::from_translations(self.client_name.as_str(), translations, self.case).to_writer(writer)
    }
}
