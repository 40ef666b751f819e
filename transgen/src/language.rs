//! Language name → language code resolution.
//!
//! The translations table names its language columns by English display
//! name ("English", "German", ...), while output paths need short codes
//! (`values-de`, `de.lproj`). A [`LanguageRegistry`] is built once per run
//! and handed to whoever needs codes.

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use unic_langid::LanguageIdentifier;

use crate::error::Error;

lazy_static! {
    /// ISO 639-1 codes keyed by lower-cased English display name.
    static ref ISO_LANGUAGES: BTreeMap<&'static str, &'static str> = {
        let pairs: &[(&str, &str)] = &[
            ("afar", "aa"), ("abkhazian", "ab"), ("avestan", "ae"), ("afrikaans", "af"),
            ("akan", "ak"), ("amharic", "am"), ("aragonese", "an"), ("arabic", "ar"),
            ("assamese", "as"), ("avaric", "av"), ("aymara", "ay"), ("azerbaijani", "az"),
            ("bashkir", "ba"), ("belarusian", "be"), ("bulgarian", "bg"), ("bihari", "bh"),
            ("bislama", "bi"), ("bambara", "bm"), ("bengali", "bn"), ("tibetan", "bo"),
            ("breton", "br"), ("bosnian", "bs"), ("catalan", "ca"), ("chechen", "ce"),
            ("chamorro", "ch"), ("corsican", "co"), ("cree", "cr"), ("czech", "cs"),
            ("church slavic", "cu"), ("chuvash", "cv"), ("welsh", "cy"), ("danish", "da"),
            ("german", "de"), ("divehi", "dv"), ("dzongkha", "dz"), ("ewe", "ee"),
            ("greek", "el"), ("english", "en"), ("esperanto", "eo"), ("spanish", "es"),
            ("estonian", "et"), ("basque", "eu"), ("persian", "fa"), ("fulah", "ff"),
            ("finnish", "fi"), ("fijian", "fj"), ("faroese", "fo"), ("french", "fr"),
            ("western frisian", "fy"), ("irish", "ga"), ("scottish gaelic", "gd"),
            ("galician", "gl"), ("guarani", "gn"), ("gujarati", "gu"), ("manx", "gv"),
            ("hausa", "ha"), ("hebrew", "he"), ("hindi", "hi"), ("hiri motu", "ho"),
            ("croatian", "hr"), ("haitian", "ht"), ("hungarian", "hu"), ("armenian", "hy"),
            ("herero", "hz"), ("interlingua", "ia"), ("indonesian", "id"),
            ("interlingue", "ie"), ("igbo", "ig"), ("sichuan yi", "ii"), ("inupiaq", "ik"),
            ("ido", "io"), ("icelandic", "is"), ("italian", "it"), ("inuktitut", "iu"),
            ("japanese", "ja"), ("javanese", "jv"), ("georgian", "ka"), ("kongo", "kg"),
            ("kikuyu", "ki"), ("kuanyama", "kj"), ("kazakh", "kk"), ("kalaallisut", "kl"),
            ("khmer", "km"), ("kannada", "kn"), ("korean", "ko"), ("kanuri", "kr"),
            ("kashmiri", "ks"), ("kurdish", "ku"), ("komi", "kv"), ("cornish", "kw"),
            ("kyrgyz", "ky"), ("latin", "la"), ("luxembourgish", "lb"), ("ganda", "lg"),
            ("limburgish", "li"), ("lingala", "ln"), ("lao", "lo"), ("lithuanian", "lt"),
            ("luba-katanga", "lu"), ("latvian", "lv"), ("malagasy", "mg"),
            ("marshallese", "mh"), ("maori", "mi"), ("macedonian", "mk"),
            ("malayalam", "ml"), ("mongolian", "mn"), ("marathi", "mr"), ("malay", "ms"),
            ("maltese", "mt"), ("burmese", "my"), ("nauru", "na"),
            ("norwegian bokmål", "nb"), ("north ndebele", "nd"), ("nepali", "ne"),
            ("ndonga", "ng"), ("dutch", "nl"), ("norwegian nynorsk", "nn"),
            ("norwegian", "no"), ("south ndebele", "nr"), ("navajo", "nv"),
            ("nyanja", "ny"), ("occitan", "oc"), ("ojibwa", "oj"), ("oromo", "om"),
            ("odia", "or"), ("ossetic", "os"), ("punjabi", "pa"), ("pali", "pi"),
            ("polish", "pl"), ("pashto", "ps"), ("portuguese", "pt"), ("quechua", "qu"),
            ("romansh", "rm"), ("rundi", "rn"), ("romanian", "ro"), ("russian", "ru"),
            ("kinyarwanda", "rw"), ("sanskrit", "sa"), ("sardinian", "sc"),
            ("sindhi", "sd"), ("northern sami", "se"), ("sango", "sg"), ("sinhala", "si"),
            ("slovak", "sk"), ("slovenian", "sl"), ("samoan", "sm"), ("shona", "sn"),
            ("somali", "so"), ("albanian", "sq"), ("serbian", "sr"), ("swati", "ss"),
            ("southern sotho", "st"), ("sundanese", "su"), ("swedish", "sv"),
            ("swahili", "sw"), ("tamil", "ta"), ("telugu", "te"), ("tajik", "tg"),
            ("thai", "th"), ("tigrinya", "ti"), ("turkmen", "tk"), ("tagalog", "tl"),
            ("tswana", "tn"), ("tongan", "to"), ("turkish", "tr"), ("tsonga", "ts"),
            ("tatar", "tt"), ("twi", "tw"), ("tahitian", "ty"), ("uyghur", "ug"),
            ("ukrainian", "uk"), ("urdu", "ur"), ("uzbek", "uz"), ("venda", "ve"),
            ("vietnamese", "vi"), ("volapük", "vo"), ("walloon", "wa"), ("wolof", "wo"),
            ("xhosa", "xh"), ("yiddish", "yi"), ("yoruba", "yo"), ("zhuang", "za"),
            ("chinese", "zh"), ("zulu", "zu"),
        ];
        pairs.iter().copied().collect()
    };
}

/// Resolves language display names to the codes used in output paths.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    /// Custom mapping from the settings file, keyed by lower-cased name.
    overrides: HashMap<String, String>,
}

impl LanguageRegistry {
    /// Creates a registry that only knows the built-in ISO table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry where `mapping` takes precedence over the ISO table.
    /// Names are matched case-insensitively.
    pub fn with_overrides<I, K, V>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let overrides = mapping
            .into_iter()
            .map(|(name, code)| (name.as_ref().to_lowercase(), code.into()))
            .collect();
        Self { overrides }
    }

    /// Whether [`Self::resolve_code`] would succeed for `language`.
    pub fn is_known(&self, language: &str) -> bool {
        self.lookup(language).is_some()
    }

    /// Resolves a language name to its code.
    ///
    /// Lookup order: custom mapping, ISO display names, then a name that
    /// already is a language identifier with a known ISO primary subtag
    /// (e.g. `de` or `pt-BR`).
    pub fn resolve_code(&self, language: &str) -> Result<String, Error> {
        self.lookup(language).ok_or_else(|| Error::UnknownLanguage {
            language: language.to_string(),
            suggestions: self.suggestions(language.trim()),
        })
    }

    fn lookup(&self, language: &str) -> Option<String> {
        let lang = language.trim().to_lowercase();
        if let Some(code) = self.overrides.get(&lang) {
            return Some(code.clone());
        }
        if let Some(code) = ISO_LANGUAGES.get(lang.as_str()) {
            return Some((*code).to_string());
        }
        let id = language.trim().parse::<LanguageIdentifier>().ok()?;
        ISO_LANGUAGES
            .values()
            .any(|code| *code == id.language.as_str())
            .then(|| id.to_string())
    }

    /// Known names starting with the same letter, best character overlap first.
    pub fn suggestions(&self, language: &str) -> Vec<String> {
        let lang = language.to_lowercase();
        let Some(first) = lang.chars().next() else {
            return Vec::new();
        };
        let mut candidates: Vec<(usize, &str)> = ISO_LANGUAGES
            .keys()
            .copied()
            .chain(self.overrides.keys().map(String::as_str))
            .filter(|name| name.starts_with(first))
            .map(|name| (name.chars().filter(|c| lang.contains(*c)).count(), name))
            .collect();
        candidates.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        candidates.dedup_by(|a, b| a.1 == b.1);
        candidates
            .into_iter()
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
