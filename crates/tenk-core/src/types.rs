//! Core type definitions with validation.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types and tracker operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A category with this name already exists.
    #[error("category already exists: {name}")]
    DuplicateCategory { name: String },

    /// No category with this name exists.
    #[error("unknown category: {name}")]
    UnknownCategory { name: String },

    /// Animation controls require the background effects to be enabled.
    #[error("background effects are disabled")]
    EffectsDisabled,

    /// Invalid background fit value.
    #[error("invalid background fit: {value} (expected cover, contain or stretch)")]
    InvalidBackgroundFit { value: String },

    /// Invalid background attachment value.
    #[error("invalid background attachment: {value} (expected fixed or scroll)")]
    InvalidBackgroundAttachment { value: String },
}

/// A validated category name.
///
/// Category names are trimmed and must be non-empty. Uniqueness is enforced
/// by the ledger, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Creates a new name after trimming and validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "category name",
            });
        }
        if trimmed.len() == name.len() {
            Ok(Self(name))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// The category every fresh or reset ledger starts with.
    pub fn general() -> Self {
        Self(crate::DEFAULT_CATEGORY.to_string())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryName> for String {
    fn from(name: CategoryName) -> Self {
        name.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CategoryName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Strength of the dark overlay drawn over the background image, in \[0.0, 1.0\].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct OverlayAlpha(f32);

impl OverlayAlpha {
    /// Overlay strength used until the user picks one.
    pub const DEFAULT: Self = Self(0.35);

    /// Creates an overlay strength, clamping to \[0.0, 1.0\].
    ///
    /// NaN values become the default strength.
    #[must_use]
    pub const fn clamped(value: f32) -> Self {
        if value.is_nan() {
            Self::DEFAULT
        } else if value < 0.0 {
            Self(0.0)
        } else if value > 1.0 {
            Self(1.0)
        } else {
            Self(value)
        }
    }

    /// Returns the inner f32 value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Default for OverlayAlpha {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for OverlayAlpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for OverlayAlpha {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OverlayAlpha {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f32::deserialize(deserializer)?;
        Ok(Self::clamped(value))
    }
}

/// How the background image is scaled to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundFit {
    /// Scale to cover the whole window, cropping overflow.
    #[default]
    Cover,
    /// Scale to fit inside the window, letterboxing if needed.
    Contain,
    /// Stretch to the window size, ignoring aspect ratio.
    Stretch,
}

impl BackgroundFit {
    /// String representation used in the persisted payload.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Stretch => "stretch",
        }
    }

    /// The CSS `background-size` value this fit maps to.
    #[must_use]
    pub const fn css_size(&self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Stretch => "100% 100%",
        }
    }
}

impl fmt::Display for BackgroundFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackgroundFit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cover" => Ok(Self::Cover),
            "contain" => Ok(Self::Contain),
            "stretch" => Ok(Self::Stretch),
            _ => Err(ValidationError::InvalidBackgroundFit {
                value: s.to_string(),
            }),
        }
    }
}

/// Whether the background scrolls with the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundAttachment {
    /// Background stays in place while content scrolls.
    #[default]
    Fixed,
    /// Background scrolls along with content.
    Scroll,
}

impl BackgroundAttachment {
    /// String representation used in the persisted payload.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Scroll => "scroll",
        }
    }
}

impl fmt::Display for BackgroundAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackgroundAttachment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "scroll" => Ok(Self::Scroll),
            _ => Err(ValidationError::InvalidBackgroundAttachment {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_name_trims_whitespace() {
        let name = CategoryName::new("  Rust ").unwrap();
        assert_eq!(name.as_str(), "Rust");
    }

    #[test]
    fn category_name_rejects_blank() {
        assert_eq!(
            CategoryName::new("   "),
            Err(ValidationError::Empty {
                field: "category name"
            })
        );
        assert!(CategoryName::new("").is_err());
    }

    #[test]
    fn category_name_deserialize_rejects_empty() {
        let result: Result<CategoryName, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }

    #[test]
    fn overlay_alpha_clamps() {
        assert!((OverlayAlpha::clamped(1.5).value() - 1.0).abs() < f32::EPSILON);
        assert!(OverlayAlpha::clamped(-0.2).value().abs() < f32::EPSILON);
        assert_eq!(OverlayAlpha::clamped(f32::NAN), OverlayAlpha::DEFAULT);
        assert!((OverlayAlpha::clamped(0.5).value() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn overlay_alpha_deserialize_clamps() {
        let alpha: OverlayAlpha = serde_json::from_str("3.0").unwrap();
        assert!((alpha.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn background_fit_parses_known_values() {
        assert_eq!("cover".parse::<BackgroundFit>(), Ok(BackgroundFit::Cover));
        assert_eq!(
            "stretch".parse::<BackgroundFit>(),
            Ok(BackgroundFit::Stretch)
        );
        assert!("tile".parse::<BackgroundFit>().is_err());
        assert_eq!(BackgroundFit::Stretch.css_size(), "100% 100%");
    }

    #[test]
    fn background_attachment_serde_is_lowercase() {
        let json = serde_json::to_string(&BackgroundAttachment::Scroll).unwrap();
        assert_eq!(json, r#""scroll""#);
        assert_eq!(
            "fixed".parse::<BackgroundAttachment>(),
            Ok(BackgroundAttachment::Fixed)
        );
    }
}
