use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which way the vaporize front travels across the text.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SweepDirection {
    /// Front starts at the left edge.
    #[default]
    LeftToRight,
    /// Front starts at the right edge.
    RightToLeft,
}

/// Horizontal placement of the text inside the surface.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    /// Anchored at the left padding.
    Left,
    /// Centered on the surface.
    #[default]
    Center,
    /// Anchored at the right padding.
    Right,
}

/// Element used for the visually hidden, screen-reader copy of the texts.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SemanticTag {
    /// `<h1>`
    H1,
    /// `<h2>`
    H2,
    /// `<h3>`
    H3,
    /// `<p>`
    #[default]
    P,
}

impl SemanticTag {
    /// HTML tag name.
    #[must_use]
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::P => "p",
        }
    }
}
