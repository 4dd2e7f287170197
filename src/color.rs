//! RGB color values and the small slice of CSS color syntax the effect accepts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color. Alpha is carried separately per particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white, used for the dark appearance.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Slate-900, the default text color.
    pub const SLATE_900: Rgb = Rgb::new(15, 23, 42);

    /// Color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rgb(r, g, b)`, `rgba(r, g, b, a)`, `#rgb`, `#rrggbb`, `white`
    /// or `black`. Alpha in `rgba()` is accepted and dropped.
    #[must_use]
    pub fn parse_css(input: &str) -> Option<Self> {
        let s = input.trim().to_ascii_lowercase();
        match s.as_str() {
            "white" => return Some(Self::WHITE),
            "black" => return Some(Self::new(0, 0, 0)),
            _ => {}
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let inner = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let mut parts = inner.split(',').map(str::trim);
        let mut channel = || -> Option<u8> {
            let v: f32 = parts.next()?.parse().ok()?;
            Some(v.round().clamp(0.0, 255.0) as u8)
        };
        let color = Self::new(channel()?, channel()?, channel()?);
        Some(color)
    }

    /// CSS `rgba()` string with the given alpha, as used for canvas fills.
    #[must_use]
    pub fn to_css_rgba(self, alpha: f32) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let nibble = |c: u8| -> Option<u8> { (c as char).to_digit(16).map(|d| d as u8) };
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => {
            let r = nibble(bytes[0])?;
            let g = nibble(bytes[1])?;
            let b = nibble(bytes[2])?;
            Some(Rgb::new(r * 17, g * 17, b * 17))
        }
        6 => {
            let byte = |i: usize| -> Option<u8> {
                Some(nibble(bytes[i])? * 16 + nibble(bytes[i + 1])?)
            };
            Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::SLATE_900
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_css(&value).ok_or_else(|| format!("unrecognized color '{value}'"))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(Rgb::parse_css("rgb(15, 23, 42)"), Some(Rgb::SLATE_900));
        assert_eq!(
            Rgb::parse_css("rgba(1,2,3, 0.5)"),
            Some(Rgb::new(1, 2, 3))
        );
        assert_eq!(Rgb::parse_css(" RGB(300, -4, 7.6) "), Some(Rgb::new(255, 0, 8)));
    }

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(Rgb::parse_css("#fff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse_css("#0f172a"), Some(Rgb::SLATE_900));
        assert_eq!(Rgb::parse_css("black"), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Rgb::parse_css("rgb(1, 2)"), None);
        assert_eq!(Rgb::parse_css("#12345"), None);
        assert_eq!(Rgb::parse_css("hsl(0, 0%, 0%)"), None);
        assert!(Rgb::try_from("teal".to_owned()).is_err());
    }

    #[test]
    fn css_rgba_clamps_alpha() {
        assert_eq!(Rgb::new(1, 2, 3).to_css_rgba(1.5), "rgba(1, 2, 3, 1)");
        assert_eq!(Rgb::new(1, 2, 3).to_css_rgba(0.25), "rgba(1, 2, 3, 0.25)");
    }

    #[test]
    fn display_round_trips_through_parse() {
        let c = Rgb::new(200, 100, 50);
        assert_eq!(Rgb::parse_css(&c.to_string()), Some(c));
    }
}
