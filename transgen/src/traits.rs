//! The capability every output format implements.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    error::Error,
    language::LanguageRegistry,
    types::{Platform, Translation},
};

/// Everything a path template may depend on.
///
/// Templates are pure: the only lookup available is the language code,
/// which goes through the in-memory [`LanguageRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct PathTarget<'a> {
    /// The client's folder, relative to the output root.
    pub client_dir: &'a str,
    pub language: &'a str,
    pub default_language: &'a str,
    registry: &'a LanguageRegistry,
}

impl<'a> PathTarget<'a> {
    pub fn new(
        client_dir: &'a str,
        language: &'a str,
        default_language: &'a str,
        registry: &'a LanguageRegistry,
    ) -> Self {
        Self {
            client_dir,
            language,
            default_language,
            registry,
        }
    }

    pub fn is_default_language(&self) -> bool {
        self.language == self.default_language
    }

    /// The short code for [`PathTarget::language`].
    pub fn language_code(&self) -> Result<String, Error> {
        self.registry.resolve_code(self.language)
    }
}

/// A platform-specific renderer for one output file.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use transgen::formats::AndroidStringsEmitter;
/// use transgen::traits::Emitter;
/// use transgen::types::Translation;
///
/// let translations = [Translation { key: "ok", text: "OK", section: "" }];
/// let mut out = Vec::new();
/// AndroidStringsEmitter
///     .render(Path::new("values/strings.xml"), &translations, &mut out)?;
/// assert!(String::from_utf8_lossy(&out).contains(r#"<string name="ok">OK</string>"#));
/// # Ok::<(), transgen::Error>(())
/// ```
pub trait Emitter {
    /// The platform whose items this emitter renders.
    fn platform(&self) -> Platform;

    /// The output file for one language, relative to the output root.
    fn relative_path(&self, target: &PathTarget<'_>) -> Result<PathBuf, Error>;

    /// Renders the already-filtered translations.
    fn render(
        &self,
        destination: &Path,
        translations: &[Translation<'_>],
        writer: &mut dyn Write,
    ) -> Result<(), Error>;

    /// Writes the translations to `destination`, creating or truncating the
    /// file. The parent folder must already exist.
    fn write_to(&self, destination: &Path, translations: &[Translation<'_>]) -> Result<(), Error> {
        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(Error::OutputPathMissing {
                path: destination.to_path_buf(),
            });
        }
        let file = File::create(destination)?;
        let mut writer = BufWriter::new(file);
        self.render(destination, translations, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
