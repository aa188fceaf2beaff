//! User-chosen parameters for one layout pass.

use crate::CompoundingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Left-to-right ordering of the three scale tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest on the right: 1.0, 0.7, 0.4.
    #[default]
    Growing,
    /// Smallest on the left: 0.4, 0.7, 1.0.
    Shrinking,
}

/// Vertical placement of the two non-dominant tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Top,
    Bottom,
    Center,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Growing => "growing",
            Self::Shrinking => "shrinking",
        }
    }
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Center => "center",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CompoundingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "growing" => Ok(Self::Growing),
            "shrinking" => Ok(Self::Shrinking),
            other => Err(CompoundingError::InvalidParam(format!("unknown direction '{other}'"))),
        }
    }
}

impl FromStr for Alignment {
    type Err = CompoundingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "center" => Ok(Self::Center),
            other => Err(CompoundingError::InvalidParam(format!("unknown alignment '{other}'"))),
        }
    }
}

/// Opaque sRGB background colour, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0x33, 0xff, 0x00)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = CompoundingError;

    /// Accepts `#rrggbb` or `#rgb`, with or without the `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CompoundingError::InvalidParam(format!("invalid colour '{s}'"));
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                // #abc expands to #aabbcc
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = CompoundingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Snapshot of everything the layout engine and renderer read.
///
/// Owned by the caller and replaced wholesale on every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub direction: Direction,
    pub alignment: Alignment,
    pub background: Color,
    /// Dominant tile width as a percentage of canvas height (0-100).
    pub photo_size: u32,
    /// Horizontal crop anchor, percent in [0, 100].
    pub crop_x: f64,
    /// Vertical crop anchor, percent in [0, 100].
    pub crop_y: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            direction: Direction::Growing,
            alignment: Alignment::Top,
            background: Color::default(),
            photo_size: 100,
            crop_x: 50.0,
            crop_y: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_enum_names_case_insensitively() {
        assert_eq!("Shrinking".parse::<Direction>().unwrap(), Direction::Shrinking);
        assert_eq!(" center ".parse::<Alignment>().unwrap(), Alignment::Center);
        assert!("sideways".parse::<Alignment>().is_err());
    }

    #[test]
    fn colour_accepts_long_and_short_hex() {
        assert_eq!("#33ff00".parse::<Color>().unwrap(), Color::new(0x33, 0xff, 0x00));
        assert_eq!("FFF".parse::<Color>().unwrap(), Color::new(255, 255, 255));
        assert_eq!("#1a2B3c".parse::<Color>().unwrap().to_string(), "#1a2b3c");
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn params_serialize_with_lowercase_names() {
        let json = serde_json::to_value(Params::default()).unwrap();
        assert_eq!(json["direction"], "growing");
        assert_eq!(json["alignment"], "top");
        assert_eq!(json["background"], "#33ff00");
        assert_eq!(json["photo_size"], 100);
    }
}
