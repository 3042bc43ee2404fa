//! Icon colors.
//!
//! Colors are given as strings the way a stylesheet would write them:
//! `"black"`, `"#0d6efd"`, `"#fff8"`, `"rgb(255, 0, 0)"`, `"transparent"`.

use std::fmt;

use cssparser::color::{parse_hash_color, parse_named_color};
use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use crate::error::{IconError, IconResult};

/// A straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl IconColor {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create a color from its components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS color string.
    ///
    /// Accepts hex notation (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), CSS
    /// named colors, `transparent`, and `rgb()`/`rgba()` with comma separated
    /// components.
    pub fn parse(color: &str) -> IconResult<Self> {
        let mut input = ParserInput::new(color.trim());
        let mut parser = Parser::new(&mut input);
        parser
            .parse_entirely(parse_color)
            .map_err(|_| IconError::InvalidColor {
                color: color.to_string(),
            })
    }

    /// Whether the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl std::str::FromStr for IconColor {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IconColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

fn parse_color<'i>(parser: &mut Parser<'i, '_>) -> Result<IconColor, CssParseError<'i, ()>> {
    let token = parser.next()?.clone();
    match token {
        Token::Hash(hash) | Token::IDHash(hash) => {
            let (r, g, b, alpha) =
                parse_hash_color(hash.as_bytes()).map_err(|()| parser.new_custom_error(()))?;
            Ok(IconColor::rgba(r, g, b, unit_to_byte(alpha)))
        }
        Token::Ident(name) => {
            if name.eq_ignore_ascii_case("transparent") {
                return Ok(IconColor::TRANSPARENT);
            }
            let (r, g, b) = parse_named_color(&name.to_ascii_lowercase())
                .map_err(|()| parser.new_custom_error(()))?;
            Ok(IconColor::rgba(r, g, b, 255))
        }
        Token::Function(name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            parser.parse_nested_block(|p| {
                let r = parse_channel(p)?;
                p.expect_comma()?;
                let g = parse_channel(p)?;
                p.expect_comma()?;
                let b = parse_channel(p)?;
                let a = if p.try_parse(|p| p.expect_comma()).is_ok() {
                    parse_alpha(p)?
                } else {
                    255
                };
                Ok(IconColor::rgba(r, g, b, a))
            })
        }
        _ => Err(parser.new_custom_error(())),
    }
}

fn parse_channel<'i>(parser: &mut Parser<'i, '_>) -> Result<u8, CssParseError<'i, ()>> {
    match *parser.next()? {
        Token::Number { value, .. } => Ok(value.round().clamp(0.0, 255.0) as u8),
        Token::Percentage { unit_value, .. } => Ok(unit_to_byte(unit_value)),
        _ => Err(parser.new_custom_error(())),
    }
}

fn parse_alpha<'i>(parser: &mut Parser<'i, '_>) -> Result<u8, CssParseError<'i, ()>> {
    match *parser.next()? {
        Token::Number { value, .. } | Token::Percentage {
            unit_value: value, ..
        } => Ok(unit_to_byte(value)),
        _ => Err(parser.new_custom_error(())),
    }
}

fn unit_to_byte(unit: f32) -> u8 {
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(IconColor::parse("#000").unwrap(), IconColor::BLACK);
        assert_eq!(
            IconColor::parse("#0d6efd").unwrap(),
            IconColor::rgba(0x0d, 0x6e, 0xfd, 255)
        );
        assert_eq!(
            IconColor::parse("#ff000080").unwrap(),
            IconColor::rgba(255, 0, 0, 128)
        );
        assert_eq!(
            IconColor::parse("#fff0").unwrap(),
            IconColor::rgba(255, 255, 255, 0)
        );
    }

    #[test]
    fn named_colors() {
        assert_eq!(IconColor::parse("black").unwrap(), IconColor::BLACK);
        assert_eq!(IconColor::parse("White").unwrap(), IconColor::WHITE);
        assert_eq!(
            IconColor::parse("rebeccapurple").unwrap(),
            IconColor::rgba(0x66, 0x33, 0x99, 255)
        );
        assert!(IconColor::parse("transparent").unwrap().is_transparent());
    }

    #[test]
    fn functional_notation() {
        assert_eq!(
            IconColor::parse("rgb(255, 128, 0)").unwrap(),
            IconColor::rgba(255, 128, 0, 255)
        );
        assert_eq!(
            IconColor::parse("rgba(0, 0, 0, 0.5)").unwrap(),
            IconColor::rgba(0, 0, 0, 128)
        );
        assert_eq!(
            IconColor::parse("rgb(100%, 0%, 0%)").unwrap(),
            IconColor::rgba(255, 0, 0, 255)
        );
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "blurple", "#12", "rgb(1, 2)", "black white"] {
            let err = IconColor::parse(bad).unwrap_err();
            assert!(matches!(err, IconError::InvalidColor { .. }), "{bad}");
        }
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(IconColor::rgba(255, 0, 16, 255).to_string(), "#ff0010");
        assert_eq!(IconColor::rgba(0, 0, 0, 0).to_string(), "#00000000");
    }
}
