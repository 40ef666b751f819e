pub mod android_strings;
pub mod csv;
pub mod strings;
pub mod swift_keys;

use lazy_static::lazy_static;
use regex::Regex;

// Reexporting the emitters for easier access
pub use android_strings::Emitter as AndroidStringsEmitter;
pub use strings::Emitter as StringsEmitter;
pub use swift_keys::{Emitter as SwiftKeysEmitter, KeyCase};

lazy_static! {
    static ref CDATA_REGEX: Regex = Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap();
}

/// Splits `text` into plain and `<![CDATA[...]]>` segments.
///
/// Each segment is `(is_cdata, content)`; CDATA content is returned without
/// its brackets. Empty segments are dropped, except that a text without any
/// CDATA passage always yields exactly one plain segment.
pub fn split_cdata(text: &str) -> Vec<(bool, &str)> {
    let mut parts = Vec::new();
    let mut last_end = 0;
    for captures in CDATA_REGEX.captures_iter(text) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if whole.start() > last_end {
            parts.push((false, &text[last_end..whole.start()]));
        }
        if !inner.as_str().is_empty() {
            parts.push((true, inner.as_str()));
        }
        last_end = whole.end();
    }
    if last_end == 0 {
        return vec![(false, text)];
    }
    if last_end < text.len() {
        parts.push((false, &text[last_end..]));
    }
    parts
}

/// Tracks the section of the last emitted item.
#[derive(Debug, Default)]
pub(crate) struct SectionTracker {
    current: String,
}

impl SectionTracker {
    /// Returns the section to announce before an item in `section`, if any.
    pub(crate) fn enter<'s>(&mut self, section: &'s str) -> Option<&'s str> {
        if section.is_empty() || section == self.current {
            return None;
        }
        self.current = section.to_string();
        Some(section)
    }
}
