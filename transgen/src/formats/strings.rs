//! Support for Apple `.strings` output.
//!
//! Java-style `%s` placeholders are rewritten to `%@`, and CDATA passages are
//! unwrapped since `.strings` values carry no markup.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    formats::{SectionTracker, split_cdata},
    traits::{Emitter as EmitterTrait, PathTarget},
    types::{Platform, Translation},
};

lazy_static! {
    static ref STRING_PLACEHOLDER_REGEX: Regex = Regex::new(r"%(\d+\$)?s").unwrap();
}

/// Represents an Apple `.strings` localization file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub pairs: Vec<Pair>,
}

impl Format {
    pub fn from_translations(translations: &[Translation<'_>]) -> Self {
        let mut sections = SectionTracker::default();
        let pairs = translations
            .iter()
            .map(|translation| {
                let unwrapped: String = split_cdata(translation.text)
                    .into_iter()
                    .map(|(_, text)| text)
                    .collect();
                Pair {
                    key: translation.key.to_string(),
                    value: to_ios_placeholders(&unwrapped),
                    section: sections.enter(translation.section).map(str::to_string),
                }
            })
            .collect();
        Format { pairs }
    }

    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();
        for pair in &self.pairs {
            content.push_str(&pair.to_string());
            content.push('\n');
        }
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

/// A single key-value pair in a `.strings` file, possibly opening a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
    /// Section comment written on the line before the pair.
    pub section: Option<String>,
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(section) = &self.section {
            writeln!(f, "// {}", section)?;
        }
        write!(f, "\"{}\" = \"{}\";", self.key, self.value)
    }
}

/// Rewrites `%s` to `%@` and `%<n>$s` to `%<n>$@`.
pub fn to_ios_placeholders(text: &str) -> String {
    STRING_PLACEHOLDER_REGEX
        .replace_all(text, "%${1}@")
        .into_owned()
}

/// Writes `<client>/Localization/<code>.lproj/Localizable.strings`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Emitter;

impl EmitterTrait for Emitter {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn relative_path(&self, target: &PathTarget<'_>) -> Result<PathBuf, Error> {
        Ok(PathBuf::from(target.client_dir)
            .join("Localization")
            .join(format!("{}.lproj", target.language_code()?))
            .join("Localizable.strings"))
    }

    fn render(
        &self,
        _destination: &Path,
        translations: &[Translation<'_>],
        writer: &mut dyn Write,
    ) -> Result<(), Error> {
        Format::from_translations(translations).to_writer(writer)
    }
}
