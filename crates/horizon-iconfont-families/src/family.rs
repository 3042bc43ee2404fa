//! Per-family icon name resolution.
//!
//! Upstream icon sets encode their styles in glyph names in different ways.
//! An [`IconFamily`] turns a friendly name plus an optional style into the
//! exact glyph map key:
//!
//! | Family | Styles | Encoding |
//! |---|---|---|
//! | Bootstrap | `outline` (default), `fill` | `house` / `house-fill` |
//! | Eva | `fill` (default), `outline` | `activity` / `activity-outline`, looked up in the map |
//! | Devicon | `plain` (default), `plain-wordmark`, `original`, `original-wordmark` | `rust-plain` |
//! | Fluent | `regular` (default), `filled`, `light` | `ic-fluent-settings-16-regular` |
//!
//! Resolution never touches the font; the result is looked up in the glyph
//! map at render time like any other name.

use std::fmt;
use std::str::FromStr;

use horizon_iconfont::{GlyphMap, IconError};

use crate::error::{FamilyError, FamilyResult};
use crate::logging::targets;

/// Name every family passes through untouched.
pub const NONE_ICON: &str = "none";

const BOOTSTRAP_STYLES: &[&str] = &["outline", "fill"];
const EVA_STYLES: &[&str] = &["fill", "outline"];
// Longest suffix first so `-plain-wordmark` is not read as `-wordmark`.
const DEVICON_STYLES: &[&str] = &["plain-wordmark", "original-wordmark", "plain", "original"];
const FLUENT_STYLES: &[&str] = &["regular", "filled", "light"];

const FLUENT_PREFIX: &str = "ic-fluent-";

/// A naming strategy for one upstream icon family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconFamily {
    /// Names are glyph map keys as-is.
    #[default]
    Plain,
    /// Bootstrap Icons.
    Bootstrap,
    /// Eva Icons.
    Eva,
    /// Devicon.
    Devicon,
    /// Fluent System Icons.
    Fluent,
}

impl IconFamily {
    /// All families.
    pub const ALL: [IconFamily; 5] = [
        IconFamily::Plain,
        IconFamily::Bootstrap,
        IconFamily::Eva,
        IconFamily::Devicon,
        IconFamily::Fluent,
    ];

    /// Identifier used in configuration, e.g. `"bootstrap"`.
    pub fn name(self) -> &'static str {
        match self {
            IconFamily::Plain => "plain",
            IconFamily::Bootstrap => "bootstrap",
            IconFamily::Eva => "eva",
            IconFamily::Devicon => "devicon",
            IconFamily::Fluent => "fluent",
        }
    }

    /// Styles the family knows about.
    pub fn styles(self) -> &'static [&'static str] {
        match self {
            IconFamily::Plain => &[],
            IconFamily::Bootstrap => BOOTSTRAP_STYLES,
            IconFamily::Eva => EVA_STYLES,
            IconFamily::Devicon => DEVICON_STYLES,
            IconFamily::Fluent => FLUENT_STYLES,
        }
    }

    /// Style used when none is given.
    pub fn default_style(self) -> Option<&'static str> {
        match self {
            IconFamily::Plain => None,
            IconFamily::Bootstrap => Some("outline"),
            IconFamily::Eva => Some("fill"),
            IconFamily::Devicon => Some("plain"),
            IconFamily::Fluent => Some("regular"),
        }
    }

    /// Style encoded in a name's suffix, if any.
    ///
    /// ```
    /// use horizon_iconfont_families::IconFamily;
    ///
    /// assert_eq!(IconFamily::Bootstrap.infer_style("house-fill"), Some("fill"));
    /// assert_eq!(IconFamily::Fluent.infer_style("settings-16-light"), Some("light"));
    /// assert_eq!(IconFamily::Devicon.infer_style("rust-plain-wordmark"), Some("plain-wordmark"));
    /// assert_eq!(IconFamily::Bootstrap.infer_style("house"), None);
    /// ```
    pub fn infer_style(self, name: &str) -> Option<&'static str> {
        let lower = name.to_ascii_lowercase();
        self.styles()
            .iter()
            .copied()
            .find(|style| style_suffix(&lower, style).is_some())
    }

    /// Resolve a friendly name and optional style to a glyph map key.
    ///
    /// `glyphs` is the map of the icon set the name will be rendered from;
    /// families that pick between candidate names consult it.
    pub fn resolve(
        self,
        name: &str,
        style: Option<&str>,
        glyphs: &GlyphMap,
    ) -> FamilyResult<String> {
        if name == NONE_ICON {
            return Ok(name.to_string());
        }
        let resolved = match self {
            IconFamily::Plain => name.to_string(),
            IconFamily::Bootstrap => self.resolve_bootstrap(name, style)?,
            IconFamily::Eva => resolve_eva(name, style.or(self.default_style()), glyphs),
            IconFamily::Devicon => resolve_devicon(name, style),
            IconFamily::Fluent => self.resolve_fluent(name, style, glyphs)?,
        };
        tracing::trace!(
            target: targets::FAMILY,
            family = self.name(),
            name,
            style,
            resolved = %resolved,
            "resolved icon name"
        );
        Ok(resolved)
    }

    /// Resolve the style an icon should be activated with.
    ///
    /// A style suffix in the name wins over the default; an explicit style
    /// that contradicts the suffix is a [`FamilyError::StyleConflict`].
    pub fn resolve_style(self, name: &str, style: Option<&str>) -> FamilyResult<Option<String>> {
        let inferred = self.infer_style(name);
        match (style, inferred) {
            (Some(explicit), Some(inferred)) if !explicit.eq_ignore_ascii_case(inferred) => {
                Err(FamilyError::style_conflict(name, explicit))
            }
            (Some(explicit), _) => {
                self.check_style(explicit)?;
                Ok(Some(explicit.to_ascii_lowercase()))
            }
            (None, Some(inferred)) => Ok(Some(inferred.to_string())),
            (None, None) => Ok(self.default_style().map(str::to_string)),
        }
    }

    fn check_style(self, style: &str) -> FamilyResult<()> {
        if self.styles().is_empty() || self.styles().iter().any(|s| s.eq_ignore_ascii_case(style)) {
            return Ok(());
        }
        Err(IconError::UnknownStyle {
            provider: self.name().to_string(),
            style: style.to_string(),
            available: self.styles().iter().map(|s| s.to_string()).collect(),
        }
        .into())
    }

    fn resolve_bootstrap(self, name: &str, style: Option<&str>) -> FamilyResult<String> {
        let style = self.resolve_style(name, style)?;
        let base = strip_style_suffix(name, BOOTSTRAP_STYLES);
        Ok(match style.as_deref() {
            Some("fill") => format!("{base}-fill"),
            _ => base.to_string(),
        })
    }

    fn resolve_fluent(
        self,
        name: &str,
        style: Option<&str>,
        glyphs: &GlyphMap,
    ) -> FamilyResult<String> {
        if glyphs.contains(name) {
            return Ok(name.to_string());
        }
        let style = self
            .resolve_style(name, style)?
            .unwrap_or_else(|| "regular".to_string());
        let base = strip_style_suffix(name, FLUENT_STYLES);
        let base = base.strip_prefix(FLUENT_PREFIX).unwrap_or(base);

        let prefixed = format!("{FLUENT_PREFIX}{base}-{style}");
        if glyphs.contains(&prefixed) {
            return Ok(prefixed);
        }
        Ok(format!("{base}-{style}"))
    }
}

impl fmt::Display for IconFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IconFamily {
    type Err = FamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconFamily::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                IconError::UnknownStyle {
                    provider: "families".to_string(),
                    style: s.to_string(),
                    available: IconFamily::ALL.iter().map(|f| f.name().to_string()).collect(),
                }
                .into()
            })
    }
}

/// Eva keeps suffixed names and otherwise prefers whatever the map has.
fn resolve_eva(name: &str, style: Option<&str>, glyphs: &GlyphMap) -> String {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with("-outline") || lower.ends_with("-fill") {
        return name.to_string();
    }
    if style == Some("outline") {
        let candidate = format!("{name}-outline");
        if glyphs.contains(&candidate) {
            return candidate;
        }
        return name.to_string();
    }
    if glyphs.contains(name) {
        return name.to_string();
    }
    let candidate = format!("{name}-fill");
    if glyphs.contains(&candidate) {
        return candidate;
    }
    name.to_string()
}

fn resolve_devicon(name: &str, style: Option<&str>) -> String {
    let lower = name.to_ascii_lowercase();
    if DEVICON_STYLES
        .iter()
        .any(|style| style_suffix(&lower, style).is_some())
    {
        return name.to_string();
    }
    let style = style
        .map(str::to_ascii_lowercase)
        .filter(|style| DEVICON_STYLES.contains(&style.as_str()))
        .unwrap_or_else(|| "plain".to_string());
    format!("{name}-{style}")
}

/// The part of `name` before `-<style>`, if it ends that way.
fn style_suffix<'a>(name: &'a str, style: &str) -> Option<&'a str> {
    name.strip_suffix(style)?.strip_suffix('-')
}

fn strip_style_suffix<'a>(name: &'a str, styles: &[&str]) -> &'a str {
    let lower = name.to_ascii_lowercase();
    styles
        .iter()
        .find_map(|style| style_suffix(&lower, style).map(str::len))
        .map_or(name, |len| &name[..len])
}
