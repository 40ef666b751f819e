//! Ingestion of the translations table.
//!
//! The table is delimiter-separated (`;` by default) with a fixed five-column
//! prefix followed by one column per language:
//!
//! ```text
//! Section;Key;Android;iOS;Notes;English;German
//! General;ok;x;x;;OK;OK
//! ;cancel;x;;;Cancel;Abbrechen
//! ```
//!
//! The Android and iOS marker columns may appear in either order.
use std::{fs::File, io::Read, path::Path};

use csv::StringRecord;

use crate::{
    error::Error,
    language::LanguageRegistry,
    types::{Platform, TranslationItem, TranslationSet, Translations},
};

/// The fixed header columns, in their declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderColumn {
    Section = 0,
    Key = 1,
    Android = 2,
    Ios = 3,
    Notes = 4,
}

/// Number of fixed columns before the language columns start.
pub const FIXED_COLUMNS: usize = HeaderColumn::Notes as usize + 1;

/// The marker cell value meaning "this row applies to the platform".
pub const PLATFORM_MARKER: &str = "x";

/// Options controlling how a translations table is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Replace every translation with its key.
    pub debug_mode: bool,
    /// Use the first language column when a cell is blank.
    pub fallback_to_default_language: bool,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            debug_mode: false,
            fallback_to_default_language: false,
            delimiter: b';',
        }
    }
}

impl IngestOptions {
    /// Creates default ingest options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables debug mode.
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Enables/disables the first-language fallback for blank cells.
    pub fn with_fallback_to_default_language(mut self, fallback: bool) -> Self {
        self.fallback_to_default_language = fallback;
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Column indices resolved from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnLayout {
    width: usize,
    android: usize,
    ios: usize,
    /// (language, column index) in header order.
    languages: Vec<(String, usize)>,
}

impl ColumnLayout {
    fn from_header(header: &StringRecord, registry: &LanguageRegistry) -> Result<Self, Error> {
        if header.len() < FIXED_COLUMNS {
            return Err(Error::InvalidHeader(format!(
                "expected at least {} columns, found {}",
                FIXED_COLUMNS,
                header.len()
            )));
        }

        let android_header = header[HeaderColumn::Android as usize].to_lowercase();
        let ios_header = header[HeaderColumn::Ios as usize].to_lowercase();
        let (android, ios) = if android_header.contains("ios") || ios_header.contains("android") {
            tracing::debug!("platform marker columns are swapped in the header");
            (HeaderColumn::Ios as usize, HeaderColumn::Android as usize)
        } else {
            (HeaderColumn::Android as usize, HeaderColumn::Ios as usize)
        };

        let languages = header
            .iter()
            .enumerate()
            .skip(FIXED_COLUMNS)
            .map(|(idx, language)| {
                if !registry.is_known(language) {
                    tracing::warn!(
                        "language {} not among standard ISO English languages, possible candidates: {}",
                        language.to_lowercase(),
                        registry.suggestions(language).join(", ")
                    );
                }
                (language.to_string(), idx)
            })
            .collect();

        Ok(Self {
            width: header.len(),
            android,
            ios,
            languages,
        })
    }

    fn platforms(&self, record: &StringRecord) -> Vec<Platform> {
        let mut platforms = Vec::new();
        if &record[self.ios] == PLATFORM_MARKER {
            platforms.push(Platform::Ios);
        }
        if &record[self.android] == PLATFORM_MARKER {
            platforms.push(Platform::Android);
        }
        platforms
    }
}

impl TranslationSet {
    /// Parses a translations table from any reader.
    ///
    /// Unknown language names in the header are reported but kept.
    pub fn from_reader<R: Read>(
        reader: R,
        options: &IngestOptions,
        registry: &LanguageRegistry,
    ) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(options.delimiter)
            .escape(Some(b'\\'))
            .from_reader(reader);

        let mut records = rdr.records();
        let header = match records.next() {
            Some(header) => header?,
            None => return Err(Error::InvalidHeader("the table is empty".to_string())),
        };
        let layout = ColumnLayout::from_header(&header, registry)?;

        let mut set = TranslationSet {
            languages: layout
                .languages
                .iter()
                .map(|(language, _)| language.clone())
                .collect(),
            ..TranslationSet::default()
        };

        let mut current_section = String::new();
        for record in records {
            let record = record?;

            let section = &record[HeaderColumn::Section as usize];
            if !section.is_empty() {
                current_section = section.to_string();
            }

            if record.len() != layout.width {
                let delimiter = char::from(options.delimiter).to_string();
                // Rebuilt from the parsed fields, so a quoted cell shows unquoted.
                return Err(Error::MalformedRow {
                    row: record.position().map(|p| p.line()).unwrap_or_default(),
                    fields: record.len(),
                    expected: layout.width,
                    content: record.iter().collect::<Vec<_>>().join(&delimiter),
                });
            }

            let key = &record[HeaderColumn::Key as usize];
            if key.trim().is_empty() {
                continue;
            }

            let translations = layout
                .languages
                .iter()
                .map(|(language, idx)| {
                    let text = if options.debug_mode {
                        key
                    } else {
                        let cell = &record[*idx];
                        match layout.languages.first() {
                            Some((_, first_idx))
                                if options.fallback_to_default_language
                                    && cell.trim().is_empty() =>
                            {
                                &record[*first_idx]
                            }
                            _ => cell,
                        }
                    };
                    (language.clone(), text.to_string())
                })
                .collect::<Translations>();

            if set.find_item(key).is_some() {
                tracing::debug!(
                    "row {}: key `{}` appears more than once",
                    record.position().map(|p| p.line()).unwrap_or_default(),
                    key
                );
            }
            set.items.push(TranslationItem::new(
                key,
                layout.platforms(&record),
                translations,
                current_section.clone(),
            ));
            set.keys.push(key.to_string());
        }

        tracing::debug!(
            items = set.items.len(),
            languages = set.languages.len(),
            "parsed translations table"
        );
        Ok(set)
    }

    /// Parses a translations table from a file path.
    ///
    /// The file may carry a UTF-8 or UTF-16 byte order mark.
    pub fn read_from<P: AsRef<Path>>(
        path: P,
        options: &IngestOptions,
        registry: &LanguageRegistry,
    ) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let file = File::open(path).map_err(Error::Io)?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        Self::from_reader(decoder, options, registry)
    }

    /// Like [`TranslationSet::read_from`], but reports any failure and yields
    /// an empty set instead.
    pub fn read_or_empty<P: AsRef<Path>>(
        path: P,
        options: &IngestOptions,
        registry: &LanguageRegistry,
    ) -> Self {
        let path = path.as_ref();
        Self::read_from(path, options, registry).unwrap_or_else(|e| {
            tracing::error!("skipping translations file {}: {}", path.display(), e);
            TranslationSet::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TABLE: &str = "\
Section;Key;Android;iOS;Notes;English;German
General;ok;x;x;;OK;OK
;cancel;x;;;Cancel;Abbrechen
;;x;x;;Orphan;Waise
Errors;error_generic;;x;note;Error;
";

    fn parse(content: &str, options: &IngestOptions) -> Result<TranslationSet, Error> {
        TranslationSet::from_reader(Cursor::new(content), options, &LanguageRegistry::new())
    }

    #[test]
    fn test_parse_basic_table() {
        let set = parse(TABLE, &IngestOptions::default()).unwrap();
        assert_eq!(set.languages, vec!["English", "German"]);
        assert_eq!(set.keys, vec!["ok", "cancel", "error_generic"]);
        assert_eq!(set.items.len(), 3);

        let ok = &set.items[0];
        assert_eq!(ok.section, "General");
        assert!(ok.applies_to(Platform::Ios));
        assert!(ok.applies_to(Platform::Android));

        let cancel = &set.items[1];
        assert_eq!(cancel.section, "General");
        assert_eq!(cancel.platforms.len(), 1);
        assert!(cancel.applies_to(Platform::Android));
        assert_eq!(cancel.translations.get("German"), Some("Abbrechen"));

        let error = &set.items[2];
        assert_eq!(error.section, "Errors");
        assert_eq!(error.translations.get("German"), Some(""));
    }

    #[test]
    fn test_blank_keys_are_dropped() {
        let set = parse(TABLE, &IngestOptions::default()).unwrap();
        let rows = TABLE.lines().count();
        assert!(set.items.len() <= rows - 1);
        assert!(set.items.iter().all(|item| !item.key.trim().is_empty()));
    }

    #[test]
    fn test_marker_is_exact_match() {
        let table = "Section;Key;Android;iOS;Notes;English\n;a;X;yes;;A\n;b; x;x ;;B\n";
        let set = parse(table, &IngestOptions::default()).unwrap();
        assert!(set.items.iter().all(|item| item.platforms.is_empty()));
    }

    #[test]
    fn test_swapped_marker_columns() {
        let regular = "Section;Key;Android;iOS;Notes;English\n;a;x;;;A\n;b;;x;;B\n;c;x;x;;C\n";
        let swapped = "Section;Key;iOS;Android;Notes;English\n;a;;x;;A\n;b;x;;;B\n;c;x;x;;C\n";
        let regular = parse(regular, &IngestOptions::default()).unwrap();
        let swapped = parse(swapped, &IngestOptions::default()).unwrap();
        for (r, s) in regular.items.iter().zip(swapped.items.iter()) {
            assert_eq!(r.key, s.key);
            assert_eq!(r.platforms, s.platforms);
        }
        assert_eq!(
            swapped.items[0].platforms.iter().copied().collect::<Vec<_>>(),
            vec![Platform::Android]
        );
    }

    #[test]
    fn test_malformed_row_aborts() {
        let table = "Section;Key;Android;iOS;Notes;English\n;a;x;x;;A\n;b;x;x;;B;extra\n";
        let err = parse(table, &IngestOptions::default()).unwrap_err();
        match err {
            Error::MalformedRow {
                row,
                fields,
                expected,
                content,
            } => {
                assert_eq!(row, 3);
                assert_eq!((fields, expected), (7, 6));
                assert_eq!(content, ";b;x;x;;B;extra");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_row_reports_parsed_fields() {
        let table = "Section;Key;Android;iOS;Notes;English\n;\"a;b\";x;x;;A;B\n";
        match parse(table, &IngestOptions::default()).unwrap_err() {
            Error::MalformedRow { fields, content, .. } => {
                assert_eq!(fields, 7);
                assert_eq!(content, ";a;b;x;x;;A;B");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_key_keeps_both_rows() {
        let table = "Section;Key;Android;iOS;Notes;English\n;a;x;;;First\n;a;;x;;Second\n";
        let set = parse(table, &IngestOptions::default()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.find_item("a").unwrap().translations.get("English"), Some("First"));
    }

    #[test]
    fn test_debug_mode_uses_keys() {
        let set = parse(TABLE, &IngestOptions::new().with_debug_mode(true)).unwrap();
        let error = set.find_item("error_generic").unwrap();
        assert_eq!(error.translations.get("English"), Some("error_generic"));
        assert_eq!(error.translations.get("German"), Some("error_generic"));
    }

    #[test]
    fn test_fallback_to_first_language() {
        let options = IngestOptions::new().with_fallback_to_default_language(true);
        let set = parse(TABLE, &options).unwrap();
        let error = set.find_item("error_generic").unwrap();
        assert_eq!(error.translations.get("German"), Some("Error"));
        let cancel = set.find_item("cancel").unwrap();
        assert_eq!(cancel.translations.get("German"), Some("Abbrechen"));
    }

    #[test]
    fn test_quoted_and_escaped_cells() {
        let table = "Section;Key;Android;iOS;Notes;English\n;a;x;x;;\"One; two\"\n;b;x;x;;\"Say \\\"hi\\\"\"\n";
        let set = parse(table, &IngestOptions::default()).unwrap();
        assert_eq!(set.items[0].translations.get("English"), Some("One; two"));
        assert_eq!(set.items[1].translations.get("English"), Some("Say \"hi\""));
    }

    #[test]
    fn test_custom_delimiter() {
        let table = "Section,Key,Android,iOS,Notes,English\n,a,x,x,,A\n";
        let set = parse(table, &IngestOptions::new().with_delimiter(b',')).unwrap();
        assert_eq!(set.items.len(), 1);
    }

    #[test]
    fn test_short_header_is_rejected() {
        let err = parse("Section;Key;Android\n", &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = parse("", &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }
}
