//! Glyph maps: icon name to Unicode character.
//!
//! Upstream icon sets publish their name tables in several JSON shapes. All of
//! them normalize into a single [`GlyphMap`]:
//!
//! ```
//! use horizon_iconfont::GlyphMap;
//!
//! let flat = GlyphMap::from_json_str(r#"{"a": "1f600"}"#).unwrap();
//! let nested = GlyphMap::from_json_str(r#"{"a": {"unicode": "1f600"}}"#).unwrap();
//! let records = GlyphMap::from_json_str(r#"[{"name": "a", "unicode": "1f600"}]"#).unwrap();
//!
//! assert_eq!(flat, nested);
//! assert_eq!(nested, records);
//! assert_eq!(flat.get("a"), Some('\u{1F600}'));
//! ```
//!
//! Entries that cannot be parsed are dropped individually; only a document
//! whose top level is neither an object nor an array is rejected.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{IconError, IconResult};
use crate::logging::targets;

/// An immutable mapping from icon name to glyph character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphMap {
    glyphs: BTreeMap<String, char>,
}

impl GlyphMap {
    /// Create an empty glyph map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse glyph map JSON text and normalize it.
    pub fn from_json_str(text: &str) -> IconResult<Self> {
        let raw: Value = serde_json::from_str(text)
            .map_err(|e| IconError::invalid_glyph_map(format!("malformed JSON: {e}")))?;
        Self::normalize(&raw)
    }

    /// Normalize any supported JSON shape into a glyph map.
    ///
    /// Supported shapes:
    /// - flat object `{name: "hex" | int}`
    /// - object of objects `{name: {"unicode": "hex" | int, ...}}`
    /// - array of records `[{"name": ..., "unicode": ...}, ...]`
    ///
    /// Objects are classified by their first value. Later duplicates overwrite
    /// earlier ones.
    pub fn normalize(raw: &Value) -> IconResult<Self> {
        let mut glyphs = BTreeMap::new();
        let mut skipped = 0usize;

        match raw {
            Value::Array(records) => {
                for record in records {
                    match record_entry(record) {
                        Some((name, glyph)) => {
                            glyphs.insert(name, glyph);
                        }
                        None => skipped += 1,
                    }
                }
            }
            Value::Object(entries) => {
                let nested = matches!(entries.values().next(), Some(Value::Object(_)));
                for (name, value) in entries {
                    let code = if nested {
                        value.as_object().and_then(|detail| detail.get("unicode"))
                    } else {
                        Some(value)
                    };
                    match code.and_then(parse_codepoint) {
                        Some(glyph) => {
                            glyphs.insert(name.clone(), glyph);
                        }
                        None => skipped += 1,
                    }
                }
            }
            other => {
                return Err(IconError::invalid_glyph_map(format!(
                    "expected an object or an array, found {}",
                    json_type_name(other)
                )));
            }
        }

        if skipped > 0 {
            tracing::debug!(
                target: targets::GLYPH_MAP,
                skipped,
                loaded = glyphs.len(),
                "skipped malformed glyph map entries"
            );
        }

        Ok(Self { glyphs })
    }

    /// Look up the glyph for an icon name.
    pub fn get(&self, name: &str) -> Option<char> {
        self.glyphs.get(name).copied()
    }

    /// Check whether the map contains an icon name.
    pub fn contains(&self, name: &str) -> bool {
        self.glyphs.contains_key(name)
    }

    /// Number of glyphs in the map.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Check whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Icon names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.glyphs.keys().map(String::as_str)
    }

    /// Iterate over `(name, glyph)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, char)> + '_ {
        self.glyphs.iter().map(|(name, glyph)| (name.as_str(), *glyph))
    }

    /// Serialize to the canonical glyph map file format.
    ///
    /// The output is a JSON object sorted by name, indented by two spaces,
    /// with lowercase hexadecimal codepoints padded to at least four digits,
    /// terminated by a newline: `{"house": "ea01"}`.
    pub fn to_json_string(&self) -> IconResult<String> {
        let codes: BTreeMap<&str, String> = self
            .glyphs
            .iter()
            .map(|(name, glyph)| (name.as_str(), format!("{:04x}", *glyph as u32)))
            .collect();
        let mut text = serde_json::to_string_pretty(&codes)
            .map_err(|e| IconError::invalid_glyph_map(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }
}

impl FromIterator<(String, char)> for GlyphMap {
    fn from_iter<I: IntoIterator<Item = (String, char)>>(iter: I) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}

/// Parse a raw codepoint value.
///
/// Strings are hexadecimal, optionally prefixed with `0x` or `U+`; numbers are
/// taken as-is. Returns `None` for anything that is not a Unicode scalar value.
pub fn parse_codepoint(value: &Value) -> Option<char> {
    let code = match value {
        Value::String(text) => parse_hex_codepoint(text)?,
        Value::Number(number) => u32::try_from(number.as_u64()?).ok()?,
        _ => return None,
    };
    char::from_u32(code)
}

/// Parse a hexadecimal codepoint string such as `"ea01"`, `"0xEA01"` or `"U+EA01"`.
pub fn parse_hex_codepoint(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits = ["0x", "0X", "U+", "u+"]
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .unwrap_or(text);
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn record_entry(record: &Value) -> Option<(String, char)> {
    let record = record.as_object()?;
    let name = record.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let glyph = parse_codepoint(record.get("unicode")?)?;
    Some((name.to_string(), glyph))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shapes_normalize_identically() {
        let flat = GlyphMap::from_json_str(r#"{"a": "1f600"}"#).unwrap();
        let nested = GlyphMap::from_json_str(r#"{"a": {"unicode": "1f600"}}"#).unwrap();
        let records = GlyphMap::from_json_str(r#"[{"name": "a", "unicode": "1f600"}]"#).unwrap();

        assert_eq!(flat, nested);
        assert_eq!(nested, records);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("a"), Some('😀'));
    }

    #[test]
    fn malformed_entry_is_dropped() {
        let json = r#"{"house": "ea01", "broken": "nope", "gear": "ea02"}"#;
        let map = GlyphMap::from_json_str(json).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("house"), Some('\u{ea01}'));
        assert_eq!(map.get("gear"), Some('\u{ea02}'));
        assert!(!map.contains("broken"));
    }

    #[test]
    fn malformed_records_are_dropped() {
        let map = GlyphMap::from_json_str(
            r#"[
                {"name": "ok", "unicode": "E001"},
                {"name": "", "unicode": "E002"},
                {"unicode": "E003"},
                {"name": "no-code"},
                "not a record",
                {"name": "surrogate", "unicode": "d800"}
            ]"#,
        )
        .unwrap();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["ok"]);
    }

    #[test]
    fn nested_entries_without_unicode_are_dropped() {
        let map = GlyphMap::from_json_str(
            r#"{"a": {"unicode": 59905}, "b": {"search": ["x"]}, "c": "e001"}"#,
        )
        .unwrap();
        assert_eq!(map.get("a"), Some('\u{ea01}'));
        assert!(!map.contains("b"));
        // Classified as nested by the first value, so a bare string is malformed.
        assert!(!map.contains("c"));
    }

    #[test]
    fn integer_and_prefixed_codepoints() {
        let map = GlyphMap::from_json_str(
            r#"{"int": 61441, "hex": "0xF002", "uplus": "U+f003", "upper": "F004"}"#,
        )
        .unwrap();
        assert_eq!(map.get("int"), Some('\u{f001}'));
        assert_eq!(map.get("hex"), Some('\u{f002}'));
        assert_eq!(map.get("uplus"), Some('\u{f003}'));
        assert_eq!(map.get("upper"), Some('\u{f004}'));
    }

    #[test]
    fn duplicate_records_last_write_wins() {
        let map = GlyphMap::from_json_str(
            r#"[{"name": "x", "unicode": "e001"}, {"name": "x", "unicode": "e002"}]"#,
        )
        .unwrap();
        assert_eq!(map.get("x"), Some('\u{e002}'));
    }

    #[test]
    fn unsupported_top_level_is_rejected() {
        let err = GlyphMap::from_json_str("42").unwrap_err();
        assert!(matches!(err, IconError::InvalidGlyphMap { .. }));

        let err = GlyphMap::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, IconError::InvalidGlyphMap { .. }));
    }

    #[test]
    fn empty_documents_are_empty_maps() {
        assert!(GlyphMap::from_json_str("{}").unwrap().is_empty());
        assert!(GlyphMap::from_json_str("[]").unwrap().is_empty());
    }

    #[test]
    fn canonical_json_output() {
        let map: GlyphMap = [
            ("house-fill".to_string(), '\u{ea02}'),
            ("house".to_string(), '\u{ea01}'),
            ("smile".to_string(), '\u{1f600}'),
            ("a".to_string(), '\u{41}'),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            map.to_json_string().unwrap(),
            "{\n  \"a\": \"0041\",\n  \"house\": \"ea01\",\n  \"house-fill\": \"ea02\",\n  \"smile\": \"1f600\"\n}\n"
        );
    }

    #[test]
    fn hex_parsing_rejects_garbage() {
        assert_eq!(parse_hex_codepoint("nope"), None);
        assert_eq!(parse_hex_codepoint("0x"), None);
        assert_eq!(parse_hex_codepoint(" ea01 "), Some(0xea01));
    }
}
