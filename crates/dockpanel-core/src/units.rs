// crates/dockpanel-core/src/units.rs
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// A declared size: a fixed pixel value or a percentage of the container.
///
/// Percentages always resolve against the container dimension supplied at
/// resize time, never against a declared parent size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Fixed pixel value
    Pixels(f32),
    /// Percentage of the container dimension (0-100 range)
    Percent(f32),
}

impl Dimension {
    /// Convert to pixels given a container dimension. Pixel values pass
    /// through unchanged.
    pub fn to_pixels(&self, container: f32) -> f32 {
        match self {
            Dimension::Pixels(px) => *px,
            Dimension::Percent(pct) => container * (pct / 100.0),
        }
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Dimension::Percent(_))
    }

    /// Parse a declared size string (like "200px", "40%"). A bare number is
    /// taken as pixels.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();

        if let Some(stripped) = value.strip_suffix('%') {
            return stripped.parse().ok().map(Dimension::Percent);
        }

        if let Some(stripped) = value.strip_suffix("px") {
            return stripped.parse().ok().map(Dimension::Pixels);
        }

        value.parse().ok().map(Dimension::Pixels)
    }
}

impl Default for Dimension {
    /// Declared sizes default to the full container.
    fn default() -> Self {
        Dimension::Percent(100.0)
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DimensionVisitor;

        impl Visitor<'_> for DimensionVisitor {
            type Value = Dimension;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a size string like \"200px\" or \"40%\", or a number of pixels")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Dimension, E> {
                Dimension::parse(v).ok_or_else(|| E::custom(format!("invalid size value: {v}")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Dimension, E> {
                Ok(Dimension::Pixels(v as f32))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Dimension, E> {
                Ok(Dimension::Pixels(v as f32))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Dimension, E> {
                Ok(Dimension::Pixels(v as f32))
            }
        }

        deserializer.deserialize_any(DimensionVisitor)
    }
}
