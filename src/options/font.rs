use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Font size used when a size string cannot be parsed.
pub const DEFAULT_FONT_SIZE: f32 = 50.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Font", inline)]
#[serde(default)]
/// Font descriptor the text is rendered with before sampling.
pub struct FontOptions {
    /// CSS font family list, e.g. `"Inter, sans-serif"`.
    #[schemars(title = "Family")]
    pub family: String,
    /// Font size in CSS pixels. Accepts a number or a CSS string such as
    /// `"50px"`.
    #[serde(deserialize_with = "size_from_number_or_css")]
    #[schemars(title = "Size", range(min = 8.0, max = 200.0), extend("step" = 1.0))]
    pub size: f32,
    /// Numeric font weight (100-900).
    #[schemars(title = "Weight", range(min = 100, max = 900), extend("step" = 100))]
    pub weight: u16,
}

impl FontOptions {
    /// Parse a CSS pixel size such as `"50px"` or `"32"`, taking the leading
    /// integer and falling back to [`DEFAULT_FONT_SIZE`].
    #[must_use]
    pub fn parse_size(css: &str) -> f32 {
        let trimmed = css.trim();
        let digits: String = trimmed
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        match digits.parse::<u32>() {
            Ok(px) if px > 0 => px as f32,
            _ => DEFAULT_FONT_SIZE,
        }
    }

    pub(crate) fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            family: if self.family.trim().is_empty() {
                defaults.family
            } else {
                self.family.clone()
            },
            size: if self.size.is_finite() && self.size > 0.0 {
                self.size
            } else {
                defaults.size
            },
            weight: self.weight.clamp(1, 1000),
        }
    }
}

fn size_from_number_or_css<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Px(f32),
        Css(String),
    }

    Ok(match Size::deserialize(deserializer)? {
        Size::Px(px) => px,
        Size::Css(css) => FontOptions::parse_size(&css),
    })
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size: DEFAULT_FONT_SIZE,
            weight: 400,
        }
    }
}
