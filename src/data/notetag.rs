//! Notetag metadata extraction
//!
//! Note fields are free text with embedded tags. `<Key:value>` records the
//! raw value text (leading spaces included), `<Key>` records a bare flag.
//! Anything else in the note is ignored.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    /// `<Key:value>`, value kept verbatim
    Text(String),

    /// `<Key>`
    Flag,
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(text) => Some(text.as_str()),
            MetaValue::Flag => None,
        }
    }
}

/// Tag name to tag value. Later tags with the same name win.
pub type Meta = HashMap<String, MetaValue>;

/// Scans a note for tags
///
/// A key runs until the first `<`, `>` or `:`. After the key, everything up
/// to the next `>` is the value if it starts with `:`; otherwise the key is
/// recorded as a flag, even when a `<` cut it short (`<A<B>` flags `A`).
/// A tag with no closing `>` is skipped and scanning resumes inside it.
pub fn extract_metadata(note: &str) -> Meta {
    let mut meta = Meta::new();
    let mut rest = note;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let key_len = after_open
            .find(|c: char| matches!(c, '<' | '>' | ':'))
            .unwrap_or(after_open.len());
        let key = &after_open[..key_len];
        let tail = &after_open[key_len..];

        let Some(close) = tail.find('>').filter(|_| !key.is_empty()) else {
            rest = after_open;
            continue;
        };

        let value = match tail[..close].strip_prefix(':') {
            Some(text) => MetaValue::Text(text.to_string()),
            None => MetaValue::Flag,
        };
        meta.insert(key.to_string(), value);
        rest = &tail[close + 1..];
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_tag_keeps_raw_text() {
        let meta = extract_metadata("<OnMapTroop: 3>");
        assert_eq!(
            meta.get("OnMapTroop"),
            Some(&MetaValue::Text(" 3".to_string()))
        );
    }

    #[test]
    fn test_flag_tag() {
        let meta = extract_metadata("<Boss>");
        assert_eq!(meta.get("Boss"), Some(&MetaValue::Flag));
        assert_eq!(meta.get("Boss").and_then(MetaValue::as_text), None);
    }

    #[test]
    fn test_multiple_tags_and_free_text() {
        let meta = extract_metadata("Guards the bridge.\n<OnMapTroop:4, 1>\n<Elite> see <Map:2>");
        assert_eq!(meta.len(), 3);
        assert_eq!(meta["OnMapTroop"], MetaValue::Text("4, 1".to_string()));
        assert_eq!(meta["Elite"], MetaValue::Flag);
        assert_eq!(meta["Map"], MetaValue::Text("2".to_string()));
    }

    #[test]
    fn test_key_cut_short_by_open_is_flag() {
        let meta = extract_metadata("<broken <OnMapTroop:1>");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta["broken "], MetaValue::Flag);
        assert!(!meta.contains_key("OnMapTroop"));

        let meta = extract_metadata("<A<B>");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta["A"], MetaValue::Flag);
    }

    #[test]
    fn test_unclosed_tags_ignored() {
        let meta = extract_metadata("<broken <Real:1");
        assert!(meta.is_empty());
    }

    #[test]
    fn test_value_may_contain_open() {
        let meta = extract_metadata("<Open: 2 <Boss>");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta["Open"], MetaValue::Text(" 2 <Boss".to_string()));
    }

    #[test]
    fn test_unterminated_and_empty_tags_ignored() {
        assert!(extract_metadata("<>").is_empty());
        assert!(extract_metadata("<:5>").is_empty());
        assert!(extract_metadata("<OnMapTroop: 3").is_empty());
        assert!(extract_metadata("").is_empty());
    }

    #[test]
    fn test_later_tag_wins() {
        let meta = extract_metadata("<OnMapTroop:1><OnMapTroop:2>");
        assert_eq!(meta["OnMapTroop"], MetaValue::Text("2".to_string()));
    }
}
