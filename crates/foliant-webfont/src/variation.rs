//! Font variation descriptions.
//!
//! Variants are written in the compact `[style][weight]` notation used by
//! webfont loaders: a style letter (`n` normal, `i` italic, `o` oblique)
//! followed by a weight digit in hundreds (`4` = 400, `7` = 700). So `n4` is
//! the regular face and `n7` the bold one.

use std::fmt;

use crate::FontConfigError;

/// Style axis of a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    fn letter(self) -> char {
        match self {
            FontStyle::Normal => 'n',
            FontStyle::Italic => 'i',
            FontStyle::Oblique => 'o',
        }
    }
}

/// A single weight/style variant of a font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variation {
    pub style: FontStyle,
    /// CSS weight, 100..=900 in steps of 100.
    pub weight: u16,
}

impl Variation {
    /// The regular face: normal style, weight 400.
    pub const NORMAL: Variation = Variation {
        style: FontStyle::Normal,
        weight: 400,
    };

    /// The bold face: normal style, weight 700.
    pub const BOLD: Variation = Variation {
        style: FontStyle::Normal,
        weight: 700,
    };

    /// Parse a variation description such as `n4` or `i7`.
    pub fn parse(text: &str) -> Result<Self, FontConfigError> {
        let invalid = || FontConfigError::InvalidVariation(text.to_string());

        let mut chars = text.chars();
        let style = match chars.next().ok_or_else(invalid)? {
            'n' => FontStyle::Normal,
            'i' => FontStyle::Italic,
            'o' => FontStyle::Oblique,
            _ => return Err(invalid()),
        };
        let weight = match chars.next().ok_or_else(invalid)? {
            digit @ '1'..='9' => (digit as u16 - '0' as u16) * 100,
            _ => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }

        Ok(Variation { style, weight })
    }

    /// Conventional file-name suffix for this variation (`Regular`, `Bold`,
    /// `Italic`, `BoldItalic`, or the raw weight for anything else).
    pub fn face_name(&self) -> String {
        match (self.style, self.weight) {
            (FontStyle::Normal, 400) => "Regular".to_string(),
            (FontStyle::Normal, 700) => "Bold".to_string(),
            (FontStyle::Italic, 400) => "Italic".to_string(),
            (FontStyle::Italic, 700) => "BoldItalic".to_string(),
            (_, weight) => weight.to_string(),
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.style.letter(), self.weight / 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_normal_and_bold() {
        assert_eq!(Variation::parse("n4").unwrap(), Variation::NORMAL);
        assert_eq!(Variation::parse("n7").unwrap(), Variation::BOLD);
        assert_eq!(
            Variation::parse("i4").unwrap(),
            Variation {
                style: FontStyle::Italic,
                weight: 400
            }
        );
    }

    #[test]
    fn rejects_malformed_descriptions() {
        for bad in ["", "n", "4", "x4", "n0", "n44", "bold"] {
            assert!(Variation::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn round_trips_through_display() {
        for text in ["n4", "n7", "i4", "o9"] {
            assert_eq!(Variation::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn face_names_follow_convention() {
        assert_eq!(Variation::NORMAL.face_name(), "Regular");
        assert_eq!(Variation::BOLD.face_name(), "Bold");
    }
}
