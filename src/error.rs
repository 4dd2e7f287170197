//! Crate-level error types.

use std::fmt;

/// Errors produced by the vaportext crate.
///
/// Frame-time problems (surface not mounted, zero-area viewport, failed
/// rasterization) are not errors; the animator defers and retries instead.
#[derive(Debug)]
pub enum VaporError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Browser host setup failure (missing window, canvas context, ...).
    Host(String),
}

impl fmt::Display for VaporError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for VaporError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VaporError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for VaporError {
    fn from(e: toml::de::Error) -> Self {
        Self::OptionsParse(e.to_string())
    }
}

impl From<toml::ser::Error> for VaporError {
    fn from(e: toml::ser::Error) -> Self {
        Self::OptionsParse(e.to_string())
    }
}
