//! Effect configuration with TOML preset support.
//!
//! Every caller-tweakable setting (texts, font, color, spread, density,
//! phase durations, sweep direction, alignment) lives here. Options
//! serialize to/from TOML so a site can ship named presets, and
//! [`Options::json_schema`] describes the UI-exposed fields for editors.
//!
//! Out-of-range values are never rejected: [`Options::sanitized`] clamps or
//! defaults them so the effect always has something to show.

mod font;
mod layout;
mod timing;

use std::path::Path;

pub use font::{FontOptions, DEFAULT_FONT_SIZE};
pub use layout::{SemanticTag, SweepDirection, TextAlignment};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use timing::{AnimationOptions, MAX_PHASE_SECS};

use crate::color::Rgb;
use crate::error::VaporError;
use crate::util::remap::remap;
use crate::util::spread::vaporize_spread;

/// Texts shown when the caller supplies none.
pub const DEFAULT_TEXTS: [&str; 2] = ["Next.js", "React"];

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Strings cycled in order, wrapping to the first after the last.
    #[schemars(title = "Texts")]
    pub texts: Vec<String>,
    /// Base text color as a CSS color string.
    #[schemars(title = "Color", with = "String")]
    pub color: Rgb,
    /// Dispersal intensity multiplier.
    #[schemars(title = "Spread", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub spread: f32,
    /// 0-10 scale of how many swept particles drift rather than fade fast.
    #[schemars(title = "Density", range(min = 0.0, max = 10.0), extend("step" = 1.0))]
    pub density: f32,
    /// Sweep direction.
    #[schemars(title = "Direction")]
    pub direction: SweepDirection,
    /// Horizontal alignment.
    #[schemars(title = "Alignment")]
    pub alignment: TextAlignment,
    /// Element for the hidden accessible copy of the texts.
    #[schemars(skip)]
    pub tag: SemanticTag,
    /// Font descriptor.
    pub font: FontOptions,
    /// Phase durations.
    pub animation: AnimationOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            texts: DEFAULT_TEXTS.iter().map(|&t| t.to_owned()).collect(),
            color: Rgb::SLATE_900,
            spread: 5.0,
            density: 5.0,
            direction: SweepDirection::default(),
            alignment: TextAlignment::default(),
            tag: SemanticTag::default(),
            font: FontOptions::default(),
            animation: AnimationOptions::default(),
        }
    }
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Copy with every field clamped or defaulted into its usable range.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let texts = if self.texts.is_empty() {
            log::debug!("no texts configured, using defaults");
            defaults.texts
        } else {
            self.texts.clone()
        };
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        Self {
            texts,
            color: self.color,
            spread: finite_or(self.spread, defaults.spread).max(0.0),
            density: finite_or(self.density, defaults.density).clamp(0.0, 10.0),
            direction: self.direction,
            alignment: self.alignment,
            tag: self.tag,
            font: self.font.sanitized(),
            animation: self.animation.sanitized(),
        }
    }

    /// Fraction of swept particles that drift instead of fading quickly:
    /// density 0..10 remapped onto 0.3..1.0.
    #[must_use]
    pub fn density_fraction(&self) -> f32 {
        remap(self.density, (0.0, 10.0), (0.3, 1.0), true)
    }

    /// Dispersal magnitude: the font-size spread curve times the caller's
    /// multiplier.
    #[must_use]
    pub fn spread_factor(&self) -> f32 {
        vaporize_spread(self.font.size) * self.spread
    }

    /// All texts joined by a space, for the hidden accessible element.
    #[must_use]
    pub fn accessible_text(&self) -> String {
        self.texts.join(" ")
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VaporError> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content)?;
        log::info!("Loaded options from '{}'", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VaporError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("Saved options to '{}'", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
texts = ["A", "B"]
direction = "right_to_left"
color = "#ffffff"

[animation]
wait_duration = 2.0
"##;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.texts, vec!["A".to_owned(), "B".to_owned()]);
        assert_eq!(opts.direction, SweepDirection::RightToLeft);
        assert_eq!(opts.color, Rgb::WHITE);
        assert_eq!(opts.animation.wait_duration, 2.0);
        // Everything else should be default
        assert_eq!(opts.animation.vaporize_duration, 2.0);
        assert_eq!(opts.font, FontOptions::default());
        assert_eq!(opts.alignment, TextAlignment::Center);
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err = toml::from_str::<Options>("color = \"chartreuse-ish\"");
        assert!(err.is_err());
    }

    #[test]
    fn empty_texts_fall_back_to_defaults() {
        let opts = Options {
            texts: Vec::new(),
            ..Options::default()
        };
        assert_eq!(opts.sanitized().texts, vec!["Next.js", "React"]);
    }

    #[test]
    fn sanitize_clamps_numbers() {
        let mut opts = Options {
            spread: -3.0,
            density: 42.0,
            ..Options::default()
        };
        opts.font.size = f32::NAN;
        opts.font.family = "  ".to_owned();
        opts.animation.vaporize_duration = 0.0;
        opts.animation.wait_duration = -1.0;

        let clean = opts.sanitized();
        assert_eq!(clean.spread, 0.0);
        assert_eq!(clean.density, 10.0);
        assert_eq!(clean.font.size, DEFAULT_FONT_SIZE);
        assert_eq!(clean.font.family, "sans-serif");
        assert!(clean.animation.vaporize_duration > 0.0);
        assert_eq!(clean.animation.wait_duration, 0.0);
    }

    #[test]
    fn density_fraction_endpoints() {
        let mut opts = Options::default();
        opts.density = 10.0;
        assert_eq!(opts.density_fraction(), 1.0);
        opts.density = 0.0;
        assert_eq!(opts.density_fraction(), 0.3);
    }

    #[test]
    fn spread_factor_uses_font_curve() {
        let opts = Options::default();
        // 50px -> 0.5, times the default multiplier of 5
        assert!((opts.spread_factor() - 2.5).abs() < 1e-5);
    }

    #[test]
    fn parse_font_size_strings() {
        assert_eq!(FontOptions::parse_size("72px"), 72.0);
        assert_eq!(FontOptions::parse_size("18"), 18.0);
        assert_eq!(FontOptions::parse_size("large"), DEFAULT_FONT_SIZE);
        assert_eq!(FontOptions::parse_size("0px"), DEFAULT_FONT_SIZE);
    }

    #[test]
    fn font_size_accepts_css_strings() {
        let css: Options = toml::from_str("[font]\nsize = \"72px\"\n").unwrap();
        assert_eq!(css.font.size, 72.0);
        let number: Options = toml::from_str("[font]\nsize = 32.5\n").unwrap();
        assert_eq!(number.font.size, 32.5);
        let integer: Options = toml::from_str("[font]\nsize = 40\n").unwrap();
        assert_eq!(integer.font.size, 40.0);
        let junk: Options = toml::from_str("[font]\nsize = \"huge\"\n").unwrap();
        assert_eq!(junk.font.size, DEFAULT_FONT_SIZE);
        assert!(toml::from_str::<Options>("[font]\nsize = true\n").is_err());
    }

    #[test]
    fn accessible_text_joins() {
        assert_eq!(Options::default().accessible_text(), "Next.js React");
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir().join(format!(
            "vaportext-presets-{}",
            std::process::id()
        ));
        let mut opts = Options::default();
        opts.texts = vec!["hello".to_owned()];
        opts.save(&dir.join("hero.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["hero".to_owned()]);
        let loaded = Options::load(&dir.join("hero.toml")).unwrap();
        assert_eq!(loaded, opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("texts"));
        assert!(props.contains_key("font"));
        assert!(props.contains_key("animation"));
        assert!(props.contains_key("density"));
        // Skipped fields should be absent
        assert!(!props.contains_key("tag"));

        let animation = &props["animation"]["properties"];
        assert!(animation.get("vaporize_duration").is_some());
    }
}
