//! Developer-time glyph map tooling.
//!
//! These helpers build `glyphmap.json` files from upstream metadata or from a
//! font's own character map. They are meant for asset generation scripts and
//! are never called while rendering.

use std::fs;
use std::path::Path;

use horizon_iconfont::glyph_map::parse_hex_codepoint;
use horizon_iconfont::GlyphMap;
use serde_json::Value;

use crate::error::{FamilyError, FamilyResult};
use crate::logging::targets;

/// Metadata keys that may hold a codepoint, in lookup order.
pub const CODEPOINT_KEYS: [&str; 3] = ["encodedCode", "unicode", "codepoint"];

/// Parse a codepoint from metadata.
///
/// Integers are taken as-is. Strings are hexadecimal and may carry a CSS
/// escape backslash or a `U+` / `0x` prefix: `"\\f101"`, `"U+F101"`, `"0xf101"`.
pub fn normalize_codepoint(value: &Value) -> FamilyResult<char> {
    let invalid = || FamilyError::InvalidCodepoint {
        value: value.to_string(),
    };
    let code = match value {
        Value::Number(number) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid)?,
        Value::String(text) => {
            let text = text.trim().trim_start_matches('\\');
            parse_hex_codepoint(text).ok_or_else(invalid)?
        }
        _ => return Err(invalid()),
    };
    char::from_u32(code).ok_or_else(invalid)
}

/// Build a glyph map from upstream icon metadata.
///
/// Accepts `{name: code}`, `{name: {<code key>: code, ...}}` and
/// `[{"name": ..., <code key>: code}, ...]`, where the code key is the first
/// non-empty of [`CODEPOINT_KEYS`]. Entries without a usable code are
/// skipped.
pub fn glyph_map_from_metadata(data: &Value) -> FamilyResult<GlyphMap> {
    let mut skipped = 0usize;
    let mut keep = |name: &str, code: Option<&Value>| -> Option<(String, char)> {
        let entry = code
            .and_then(|code| normalize_codepoint(code).ok())
            .filter(|_| !name.is_empty())
            .map(|glyph| (name.to_string(), glyph));
        if entry.is_none() {
            skipped += 1;
        }
        entry
    };

    let map: GlyphMap = match data {
        Value::Object(entries) => {
            let nested = matches!(entries.values().next(), Some(Value::Object(_)));
            entries
                .iter()
                .filter_map(|(name, value)| {
                    let code = if nested { metadata_code(value) } else { Some(value) };
                    keep(name, code)
                })
                .collect()
        }
        Value::Array(records) => records
            .iter()
            .filter_map(|record| {
                let name = record.get("name").and_then(Value::as_str).unwrap_or_default();
                keep(name, metadata_code(record))
            })
            .collect(),
        _ => {
            return Err(FamilyError::UnsupportedMetadata {
                message: "expected an object or an array".to_string(),
            });
        }
    };

    tracing::debug!(
        target: targets::TOOLING,
        glyphs = map.len(),
        skipped,
        "built glyph map from metadata"
    );
    Ok(map)
}

fn metadata_code(record: &Value) -> Option<&Value> {
    let record = record.as_object()?;
    CODEPOINT_KEYS
        .iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_truthy(value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Build a glyph map from a font's first Unicode character map.
///
/// Names come from the font's glyph names: `uniF101` becomes `uf101`, dots
/// and underscores become hyphens and everything is lowercased. Glyphs
/// without a name are called after their codepoint.
pub fn glyph_map_from_font(data: &[u8]) -> FamilyResult<GlyphMap> {
    let face = ttf_parser::Face::parse(data, 0).map_err(|e| FamilyError::UnsupportedMetadata {
        message: format!("font could not be parsed: {e}"),
    })?;
    let subtable = face
        .tables()
        .cmap
        .and_then(|cmap| cmap.subtables.into_iter().find(|subtable| subtable.is_unicode()))
        .ok_or_else(|| FamilyError::NoGlyphs {
            source_name: "font without a Unicode cmap".to_string(),
        })?;

    let mut codepoints = Vec::new();
    subtable.codepoints(|code| codepoints.push(code));

    let map: GlyphMap = codepoints
        .into_iter()
        .filter_map(|code| {
            let glyph = char::from_u32(code)?;
            let id = subtable.glyph_index(code)?;
            let name = match face.glyph_name(id) {
                Some(name) => display_glyph_name(name),
                None => format!("u{code:04x}"),
            };
            Some((name, glyph))
        })
        .collect();

    if map.is_empty() {
        return Err(FamilyError::NoGlyphs {
            source_name: "font cmap".to_string(),
        });
    }
    tracing::debug!(target: targets::TOOLING, glyphs = map.len(), "built glyph map from font");
    Ok(map)
}

/// Read a font file and build its glyph map.
pub fn glyph_map_from_font_file(path: impl AsRef<Path>) -> FamilyResult<GlyphMap> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| FamilyError::io(path, e))?;
    glyph_map_from_font(&data)
}

fn display_glyph_name(name: &str) -> String {
    let name = match name.strip_prefix("uni") {
        Some(hex) if (4..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            format!("u{hex}")
        }
        _ => name.to_string(),
    };
    name.replace(['.', '_'], "-").to_lowercase()
}

/// Write a glyph map in canonical form, creating parent directories.
pub fn write_glyph_map(path: impl AsRef<Path>, map: &GlyphMap) -> FamilyResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FamilyError::io(parent, e))?;
    }
    let text = map.to_json_string()?;
    fs::write(path, text).map_err(|e| FamilyError::io(path, e))?;
    tracing::info!(
        target: targets::TOOLING,
        path = %path.display(),
        glyphs = map.len(),
        "wrote glyph map"
    );
    Ok(())
}
