//! Color values used for fills, outlines and canvas backgrounds.

use std::fmt;
use std::str::FromStr;

use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, Result};

// ============================================================================
// Color
// ============================================================================

/// An 8-bit sRGB color with straight (non-premultiplied) alpha.
///
/// Colors are written in compositions the same way icon designers write
/// them: `#RRGGBB`, `#RRGGBBAA`, the short `#RGB` form, or a CSS color
/// name such as `white`. They serialize back to upper-case hex.
///
/// # Example
///
/// ```
/// use icon_compositor::Color;
///
/// let green: Color = "#2DBE6C".parse().unwrap();
/// assert_eq!(green.to_rgba8(), [0x2D, 0xBE, 0x6C, 0xFF]);
///
/// let white: Color = "white".parse().unwrap();
/// assert_eq!(white, Color::rgb(255, 255, 255));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(Srgba<u8>);

impl Color {
    /// Creates an opaque color.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue).with_alpha(u8::MAX))
    }

    /// Creates a color with the given alpha.
    pub fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(Srgb::new(red, green, blue).with_alpha(alpha))
    }

    /// Fully transparent black, the initial state of a foreground canvas.
    pub fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Parses a hex code or CSS color name.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if hex.len() == 8 {
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ComposeError::color(format!("{text:?}: invalid hex digit")));
            }
            let rgb = Srgb::<u8>::from_str(&hex[..6])
                .map_err(|e| ComposeError::color(format!("{text:?}: {e}")))?;
            let alpha = u8::from_str_radix(&hex[6..], 16)
                .map_err(|e| ComposeError::color(format!("{text:?}: {e}")))?;
            return Ok(Self(rgb.with_alpha(alpha)));
        }

        if let Ok(rgb) = Srgb::<u8>::from_str(hex) {
            return Ok(Self(rgb.with_alpha(u8::MAX)));
        }

        palette::named::from_str(&trimmed.to_ascii_lowercase())
            .map(|rgb| Self(rgb.with_alpha(u8::MAX)))
            .ok_or_else(|| ComposeError::color(format!("unrecognized color {text:?}")))
    }

    pub fn red(&self) -> u8 {
        self.0.red
    }

    pub fn green(&self) -> u8 {
        self.0.green
    }

    pub fn blue(&self) -> u8 {
        self.0.blue
    }

    pub fn alpha(&self) -> u8 {
        self.0.alpha
    }

    /// Returns `[r, g, b, a]`.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Returns `[r, g, b]`, dropping alpha.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [self.red(), self.green(), self.blue()]
    }

    /// Returns true if alpha is 255.
    pub fn is_opaque(&self) -> bool {
        self.alpha() == u8::MAX
    }

    /// Returns the same color with alpha forced to 255.
    pub fn opaque(self) -> Self {
        Self::rgb(self.red(), self.green(), self.blue())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red(), self.green(), self.blue())?;
        if !self.is_opaque() {
            write!(f, "{:02X}", self.alpha())?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ComposeError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_six_digit_hex() {
        let c = Color::parse("#1B8F4E").unwrap();
        assert_eq!(c.to_rgba8(), [0x1B, 0x8F, 0x4E, 0xFF]);

        // Leading '#' is optional and case does not matter
        assert_eq!(Color::parse("1b8f4e").unwrap(), c);
    }

    #[test]
    fn parse_eight_digit_hex_keeps_alpha() {
        let c = Color::parse("#FDD83580").unwrap();
        assert_eq!(c.to_rgba8(), [0xFD, 0xD8, 0x35, 0x80]);
        assert!(!c.is_opaque());
        assert!(c.opaque().is_opaque());
    }

    #[test]
    fn parse_short_hex() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::rgb(255, 255, 255));
    }

    #[test]
    fn parse_named_color() {
        assert_eq!(Color::parse("white").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::parse("Black").unwrap(), Color::rgb(0, 0, 0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Color::parse("not-a-color"),
            Err(ComposeError::InvalidColor(_))
        ));
        assert!(matches!(
            Color::parse("#12345G78"),
            Err(ComposeError::InvalidColor(_))
        ));
        // Sign characters are not hex digits
        assert!(matches!(
            Color::parse("#FFFFFF+1"),
            Err(ComposeError::InvalidColor(_))
        ));
        assert!(matches!(
            Color::parse("#+1FFFFFF"),
            Err(ComposeError::InvalidColor(_))
        ));
    }

    #[test]
    fn display_is_upper_hex() {
        assert_eq!(Color::rgb(0x2D, 0xBE, 0x6C).to_string(), "#2DBE6C");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_string(), "#00000000");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::rgb(0xE8, 0xF5, 0xE9)).unwrap();
        assert_eq!(json, "\"#E8F5E9\"");

        let back: Color = serde_json::from_str("\"#424242\"").unwrap();
        assert_eq!(back, Color::rgb(0x42, 0x42, 0x42));

        assert!(serde_json::from_str::<Color>("\"#zzz\"").is_err());
    }
}
