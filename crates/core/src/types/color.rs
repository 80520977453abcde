//! Hex color value type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`HexColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexColorError {
    /// The input string is empty.
    #[error("color value cannot be empty")]
    Empty,
    /// The input does not start with `#`.
    #[error("color value must start with #")]
    MissingHashPrefix,
    /// The input is shorter than the minimum length.
    #[error("color value must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length, including the `#`.
        min: usize,
    },
}

/// A CSS-style hex color value, e.g. `#FF0000`.
///
/// The platform stores color values exactly as entered; this type only
/// guarantees the shape every configured color must have: a leading `#`
/// followed by at least three characters.
///
/// ## Constraints
///
/// - Must start with `#`
/// - Total length of at least 4 characters (`#` + 3)
///
/// ## Examples
///
/// ```
/// use storeroom_core::HexColor;
///
/// assert!(HexColor::parse("#fff").is_ok());
/// assert!(HexColor::parse("#FF0000").is_ok());
///
/// assert!(HexColor::parse("").is_err());    // empty
/// assert!(HexColor::parse("red").is_err()); // missing #
/// assert!(HexColor::parse("#ab").is_err()); // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Minimum total length of a color value (`#` plus three characters).
    pub const MIN_LENGTH: usize = 4;

    /// Parse a `HexColor` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Does not start with `#`
    /// - Is shorter than 4 characters in total
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        if s.is_empty() {
            return Err(HexColorError::Empty);
        }

        if !s.starts_with('#') {
            return Err(HexColorError::MissingHashPrefix);
        }

        if s.chars().count() < Self::MIN_LENGTH {
            return Err(HexColorError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the color value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `HexColor` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_values() {
        assert!(HexColor::parse("#fff").is_ok());
        assert!(HexColor::parse("#FFF").is_ok());
        assert!(HexColor::parse("#FF0000").is_ok());
        assert!(HexColor::parse("#abc123").is_ok());
        assert!(HexColor::parse("#00ff0080").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(HexColor::parse(""), Err(HexColorError::Empty));
    }

    #[test]
    fn test_parse_missing_prefix() {
        assert_eq!(HexColor::parse("red"), Err(HexColorError::MissingHashPrefix));
        assert_eq!(
            HexColor::parse("ff0000"),
            Err(HexColorError::MissingHashPrefix)
        );
        // Leading whitespace is not stripped here; callers trim first.
        assert_eq!(
            HexColor::parse(" #fff"),
            Err(HexColorError::MissingHashPrefix)
        );
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(HexColor::parse("#"), Err(HexColorError::TooShort { min: 4 }));
        assert_eq!(
            HexColor::parse("#ab"),
            Err(HexColorError::TooShort { min: 4 })
        );
    }

    #[test]
    fn test_minimum_length_value() {
        assert!(HexColor::parse("#abc").is_ok());
    }

    #[test]
    fn test_display() {
        let color = HexColor::parse("#FF0000").unwrap();
        assert_eq!(format!("{color}"), "#FF0000");
    }

    #[test]
    fn test_value_is_kept_verbatim() {
        // Case is preserved; no normalization happens on parse.
        let color = HexColor::parse("#AbCdEf").unwrap();
        assert_eq!(color.as_str(), "#AbCdEf");
    }

    #[test]
    fn test_serde_roundtrip() {
        let color = HexColor::parse("#00ff00").unwrap();
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#00ff00\"");

        let parsed: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, color);
    }

    #[test]
    fn test_from_str() {
        let color: HexColor = "#336699".parse().unwrap();
        assert_eq!(color.as_str(), "#336699");
    }
}
