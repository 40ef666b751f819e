//! Support for Android `strings.xml` output.
//!
//! Only singular `<string>` elements are produced. Apostrophes are escaped
//! with a backslash as the Android resource compiler requires, and
//! `<![CDATA[...]]>` passages in a translation are kept as CDATA sections.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    error::Error,
    formats::{SectionTracker, split_cdata},
    traits::{Emitter as EmitterTrait, PathTarget},
    types::{Platform, Translation},
};

/// An in-memory `strings.xml` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    /// Comment placed before the `<resources>` root.
    pub header: String,
    pub strings: Vec<StringResource>,
}

/// One `<string>` element, optionally opening a new section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringResource {
    pub name: String,
    /// Apostrophe-escaped value, split into `(is_cdata, text)` parts.
    pub parts: Vec<(bool, String)>,
    /// Section comment to write before this element.
    pub section: Option<String>,
}

impl Format {
    pub fn from_translations(header: impl Into<String>, translations: &[Translation<'_>]) -> Self {
        let mut sections = SectionTracker::default();
        let strings = translations
            .iter()
            .map(|translation| {
                let escaped = escape_apostrophes(translation.text);
                StringResource {
                    name: translation.key.to_string(),
                    parts: split_cdata(&escaped)
                        .into_iter()
                        .map(|(is_cdata, text)| (is_cdata, text.to_string()))
                        .collect(),
                    section: sections.enter(translation.section).map(str::to_string),
                }
            })
            .collect();
        Format {
            header: header.into(),
            strings,
        }
    }

    /// Write to any writer (file, memory, etc.).
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 4);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml_writer.write_event(Event::Comment(BytesText::from_escaped(comment_text(&self.header))))?;
        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;

        for sr in &self.strings {
            if let Some(section) = &sr.section {
                xml_writer.write_event(Event::Comment(BytesText::from_escaped(comment_text(section))))?;
            }

            let mut elem = BytesStart::new("string");
            elem.push_attribute(("name", sr.name.as_str()));
            xml_writer.write_event(Event::Start(elem))?;
            // keeps `</string>` on the same line even when there is no content
            xml_writer.write_event(Event::Text(BytesText::new("")))?;
            for (is_cdata, text) in &sr.parts {
                if *is_cdata {
                    xml_writer.write_event(Event::CData(BytesCData::new(text.as_str())))?;
                } else {
                    xml_writer
                        .write_event(Event::Text(BytesText::from_escaped(partial_escape(text.as_str()))))?;
                }
            }
            xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Breaks up `--` and a trailing `-`, neither of which may appear in an XML comment.
fn comment_text(text: &str) -> String {
    let mut comment = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '-' && comment.ends_with('-') {
            comment.push(' ');
        }
        comment.push(c);
    }
    if comment.ends_with('-') {
        comment.push(' ');
    }
    comment
}

/// Prefixes every apostrophe that is not already escaped with a backslash.
pub fn escape_apostrophes(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut previous = None;
    for c in text.chars() {
        if c == '\'' && previous != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(c);
        previous = Some(c);
    }
    escaped
}

/// Writes `<client>/src/main/res/values[-<code>]/strings.xml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Emitter;

impl EmitterTrait for Emitter {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn relative_path(&self, target: &PathTarget<'_>) -> Result<PathBuf, Error> {
        let values = if target.is_default_language() {
            "values".to_string()
        } else {
            format!("values-{}", target.language_code()?)
        };
        Ok(PathBuf::from(target.client_dir)
            .join("src")
            .join("main")
            .join("res")
            .join(values)
            .join("strings.xml"))
    }

    fn render(
        &self,
        destination: &Path,
        translations: &[Translation<'_>],
        writer: &mut dyn Write,
    ) -> Result<(), Error> {
        let folder = destination
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let header = format!("{}/{}: {} items", folder, file, translations.len());
        Format::from_translations(header, translations).to_writer(writer)
    }
}
