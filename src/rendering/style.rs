//! Colors and styles for the schematic accident map.

use crate::core::geo::Point;
use crate::MapError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color, serialized as `#rrggbb` or `#rrggbbaa`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Result<Self, MapError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| MapError::ParseError(format!("color must start with '#': {hex}")))?;
        if !digits.is_ascii() {
            return Err(MapError::ParseError(format!("invalid color: {hex}")));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|_| MapError::ParseError(format!("invalid color: {hex}")))
        };

        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Color::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Ok(Color::rgba(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => Err(MapError::ParseError(format!("invalid color: {hex}"))),
        }
    }

    /// `#rrggbb`, ignoring alpha
    pub fn to_hex_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }

    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.to_hex_rgb())
        } else {
            write!(f, "{}{:02x}", self.to_hex_rgb(), self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRenderStyle {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRenderStyle {
    pub fill_color: Color,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Color,
    pub size: f32,
    pub font_family: String,
}

impl TextStyle {
    pub fn new(color: Color, size: f32) -> Self {
        Self {
            color,
            size,
            font_family: "Arial".to_string(),
        }
    }
}

/// Overlay panel pinned to a corner of the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeStyle {
    pub background: Color,
    pub text: TextStyle,
    pub padding: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub background: Color,
    pub road: LineRenderStyle,
    pub road_spacing: f64,
    pub road_offset: f64,
    pub route: LineRenderStyle,
    pub user_marker: PointRenderStyle,
    pub accident_marker: PointRenderStyle,
    pub label: TextStyle,
    /// Label position relative to its marker
    pub label_offset: Point,
    pub summary: TextStyle,
    /// Distance of the summary line from the left and bottom edges
    pub summary_margin: f64,
    pub info_notice: NoticeStyle,
    pub fallback_notice: NoticeStyle,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xf0, 0xf0, 0xf0),
            road: LineRenderStyle {
                color: Color::rgb(0xdd, 0xdd, 0xdd),
                width: 10.0,
            },
            road_spacing: crate::core::constants::ROAD_SPACING,
            road_offset: crate::core::constants::ROAD_FIRST_OFFSET,
            route: LineRenderStyle {
                color: Color::rgb(0x3b, 0x82, 0xf6),
                width: 3.0,
            },
            user_marker: PointRenderStyle {
                fill_color: Color::rgb(0x3b, 0x82, 0xf6),
                radius: 8.0,
            },
            accident_marker: PointRenderStyle {
                fill_color: Color::rgb(0xef, 0x44, 0x44),
                radius: 10.0,
            },
            label: TextStyle::new(Color::BLACK, 12.0),
            label_offset: Point::new(15.0, 0.0),
            summary: TextStyle::new(Color::BLACK, 14.0),
            summary_margin: 20.0,
            info_notice: NoticeStyle {
                background: Color::WHITE.with_opacity(0.8),
                text: TextStyle::new(Color::rgb(0x4b, 0x55, 0x63), 12.0),
                padding: 16.0,
            },
            fallback_notice: NoticeStyle {
                background: Color::rgb(0xff, 0xfb, 0xeb).with_opacity(0.9),
                text: TextStyle::new(Color::rgb(0xb4, 0x53, 0x09), 12.0),
                padding: 16.0,
            },
        }
    }
}
