use std::path::Path;

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::control::PidGains;
use crate::error::ConfigError;
use crate::placement::frame::FrameSize;

/// Depth of the array's bounding box, in world units.
pub const ARRAY_DEPTH: f64 = 0.3;

// ---------------------------------------------------------------------------
// Array shape and clumping policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayShape {
    /// One monitor per grid unit.
    #[default]
    Grid,
    /// Adjacent units randomly merged into larger monitors.
    ClumpedGrid,
}

/// How a clumped layout rolls the extent of each new monitor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ClumpPolicy {
    /// Width and height each `ceil(r * factor)` units (at least 1).
    /// With probability `square_bias` the height copies the width.
    Continuous {
        factor: f64,
        #[serde(default)]
        square_bias: f64,
    },
    /// Chained rolls: clump at all, then 2x2 / 1x2 / 2x1, then 2x2 grows to 3x3.
    Nested {
        clump_chance: f64,
        #[serde(default)]
        large_chance: f64,
    },
}

impl Default for ClumpPolicy {
    fn default() -> Self {
        ClumpPolicy::Continuous { factor: 2.0, square_bias: 0.0 }
    }
}

impl ClumpPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            ClumpPolicy::Continuous { factor, square_bias } => {
                if !factor.is_finite() || factor < 0.0 {
                    return Err(ConfigError::InvalidClumpingFactor(factor));
                }
                check_probability("square_bias", square_bias)
            }
            ClumpPolicy::Nested { clump_chance, large_chance } => {
                check_probability("clump_chance", clump_chance)?;
                check_probability("large_chance", large_chance)
            }
        }
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

// ---------------------------------------------------------------------------
// Array configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    pub shape: ArrayShape,
    pub array_width: usize,
    pub array_height: usize,
    /// Width of the whole array in world units.
    pub width_in_units: f64,
    /// Fraction of its slot each monitor fills, leaving a gap to its neighbours.
    pub monitor_size_factor: f64,
    /// Bezel width in world units.
    pub border_size: f64,
    pub mass_density: f64,
    pub clumping: ClumpPolicy,
    pub positional_gains: PidGains,
    pub rotational_gains: PidGains,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            shape: ArrayShape::Grid,
            array_width: 3,
            array_height: 3,
            width_in_units: 5.0,
            monitor_size_factor: 0.95,
            border_size: 0.05,
            mass_density: 1.0,
            clumping: ClumpPolicy::default(),
            positional_gains: PidGains::positional(),
            rotational_gains: PidGains::rotational(),
        }
    }
}

impl ArrayConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: ArrayConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.array_width == 0 || self.array_height == 0 {
            return Err(ConfigError::InvalidGridDimensions {
                width: self.array_width,
                height: self.array_height,
            });
        }
        if !self.width_in_units.is_finite() || self.width_in_units <= 0.0 {
            return Err(ConfigError::InvalidWorldWidth(self.width_in_units));
        }
        if !(self.monitor_size_factor > 0.0 && self.monitor_size_factor <= 1.0) {
            return Err(ConfigError::InvalidSizeFactor(self.monitor_size_factor));
        }
        if !self.border_size.is_finite() || self.border_size < 0.0 {
            return Err(ConfigError::InvalidBorderSize(self.border_size));
        }
        if !self.mass_density.is_finite() || self.mass_density <= 0.0 {
            return Err(ConfigError::InvalidMassDensity(self.mass_density));
        }
        self.clumping.validate()
    }

    /// Array extent in world units; height follows the frame's aspect ratio.
    pub fn world_extent(&self, frame: FrameSize) -> Vector2<f64> {
        Vector2::new(self.width_in_units, self.width_in_units * frame.aspect())
    }

    /// Bounding box of the array, for drawing or culling.
    pub fn bounds(&self, frame: FrameSize) -> Vector3<f64> {
        let extent = self.world_extent(frame);
        Vector3::new(extent.x, extent.y, ARRAY_DEPTH)
    }

    pub fn grid_units(&self) -> usize {
        self.array_width * self.array_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = ArrayConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.grid_units(), 9);
        assert_eq!(c.positional_gains, PidGains::new(0.9, 0.0, 0.9));
    }

    #[test]
    fn parses_partial_toml() {
        let c = ArrayConfig::from_toml_str(
            r#"
            shape = "clumped_grid"
            array_width = 8
            array_height = 4
            monitor_size_factor = 0.9

            [clumping]
            policy = "nested"
            clump_chance = 0.4
            large_chance = 0.2

            [rotational_gains]
            kp = 0.5
            ki = 0.0
            kd = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(c.shape, ArrayShape::ClumpedGrid);
        assert_eq!(c.array_width, 8);
        assert_eq!(c.clumping, ClumpPolicy::Nested { clump_chance: 0.4, large_chance: 0.2 });
        assert_eq!(c.rotational_gains, PidGains::new(0.5, 0.0, 0.1));
        // untouched keys keep defaults
        assert_eq!(c.width_in_units, 5.0);
    }

    #[test]
    fn continuous_square_bias_defaults_to_zero() {
        let c = ArrayConfig::from_toml_str("[clumping]\npolicy = \"continuous\"\nfactor = 3.0\n").unwrap();
        assert_eq!(c.clumping, ClumpPolicy::Continuous { factor: 3.0, square_bias: 0.0 });
    }

    #[test]
    fn rejects_bad_values() {
        let mut c = ArrayConfig { array_height: 0, ..Default::default() };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidGridDimensions { width: 3, height: 0 })));
        c.array_height = 2;
        c.monitor_size_factor = 0.0;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidSizeFactor(_))));
        c.monitor_size_factor = 1.0;
        c.border_size = -0.1;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidBorderSize(_))));
        c.border_size = 0.0;
        c.clumping = ClumpPolicy::Continuous { factor: -1.0, square_bias: 0.0 };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidClumpingFactor(_))));
        c.clumping = ClumpPolicy::Nested { clump_chance: 1.5, large_chance: 0.0 };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidProbability { name: "clump_chance", .. })
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            ArrayConfig::from_toml_str("array_width = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn world_extent_keeps_aspect() {
        let c = ArrayConfig { width_in_units: 8.0, ..Default::default() };
        let frame = FrameSize::new(1920, 1080).unwrap();
        let e = c.world_extent(frame);
        assert!((e.y - 4.5).abs() < 1e-12);
        assert!((c.bounds(frame).z - ARRAY_DEPTH).abs() < 1e-12);
    }
}
