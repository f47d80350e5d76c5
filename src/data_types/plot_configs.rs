use crate::error::{ChartError, ChartResult};
use chrono_tz::Tz;
use eyre::{bail, Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Straight RGBA color, components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ChartColor {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            bail!("expected 6 or 8 hex digits, got {:?}", hex);
        }
        let channel = |i: usize| -> Result<f32> {
            let byte = u8::from_str_radix(&digits[i..i + 2], 16)
                .wrap_err_with(|| format!("invalid hex color {:?}", hex))?;
            Ok(byte as f32 / 255.0)
        };
        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }
}

impl From<ChartColor> for gpui::Hsla {
    fn from(c: ChartColor) -> Self {
        gpui::Rgba {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
        .into()
    }
}

/// Serde adapter storing a [`ChartColor`] as a hex string.
pub mod hex_color {
    use super::ChartColor;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &ChartColor, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ChartColor, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ChartColor::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Color/thickness surface of the line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub thickness: f32,
    #[serde(with = "hex_color")]
    pub color: ChartColor,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            thickness: 2.0,
            color: ChartColor::rgba(0.0, 0.6, 1.0, 1.0),
        }
    }
}

impl LineStyle {
    pub fn validate(&self) -> ChartResult<()> {
        if !(self.thickness > 0.0) || !self.thickness.is_finite() {
            return Err(ChartError::InvalidStyle(format!(
                "line thickness must be positive, got {}",
                self.thickness
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Half-size of the square drawn for each visible marker, in pixels.
    pub radius: f32,
    #[serde(with = "hex_color")]
    pub color: ChartColor,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 3.0,
            color: ChartColor::rgba(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Marker pool strategy, chosen once at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PoolConfig {
    Dynamic {
        #[serde(default = "default_warm_count")]
        warm_count: usize,
    },
    StaticCached {
        #[serde(default = "default_provisioned")]
        provisioned: usize,
    },
}

fn default_warm_count() -> usize {
    100
}

fn default_provisioned() -> usize {
    24
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::Dynamic {
            warm_count: default_warm_count(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Maximum bounds-local distance between pointer and marker for a hit.
    pub detection_radius: f32,
    /// Extra hover area past the right edge of the bounds.
    pub trailing_margin: f32,
    /// How many indices at each end get pushed away from the edge.
    pub edge_index_count: usize,
    /// Horizontal push for edge indices, in container units.
    pub edge_shift: f32,
    /// Distance above the marker, in container units (containers are y-down).
    pub vertical_offset: f32,
    pub timezone: Tz,
    pub time_format: String,
    pub value_precision: usize,
    pub unit: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            detection_radius: 12.0,
            trailing_margin: 16.0,
            edge_index_count: 2,
            edge_shift: 40.0,
            vertical_offset: 24.0,
            timezone: Tz::UTC,
            time_format: "%H:%M:%S".to_string(),
            value_precision: 2,
            unit: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub line: LineStyle,
    pub markers: MarkerStyle,
    pub pool: PoolConfig,
    pub tooltip: TooltipConfig,
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).wrap_err("failed to parse chart config")?;
        config.validate().wrap_err("invalid chart config")?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.line.validate()?;
        if !(self.markers.radius > 0.0) {
            return Err(ChartError::InvalidStyle(format!(
                "marker radius must be positive, got {}",
                self.markers.radius
            )));
        }
        if !(self.tooltip.detection_radius > 0.0) {
            return Err(ChartError::InvalidStyle(format!(
                "detection radius must be positive, got {}",
                self.tooltip.detection_radius
            )));
        }
        Ok(())
    }
}
