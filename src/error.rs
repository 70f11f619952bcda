use thiserror::Error;

// ---------------------------------------------------------------------------
// Configuration errors (rejected before any layout is produced)
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("array dimensions must be positive, got {width}x{height}")]
    InvalidGridDimensions { width: usize, height: usize },

    #[error("array width in world units must be positive and finite, got {0}")]
    InvalidWorldWidth(f64),

    #[error("monitor size factor must lie in (0, 1], got {0}")]
    InvalidSizeFactor(f64),

    #[error("border size must be non-negative and finite, got {0}")]
    InvalidBorderSize(f64),

    #[error("mass density must be positive and finite, got {0}")]
    InvalidMassDensity(f64),

    #[error("clumping factor must be non-negative and finite, got {0}")]
    InvalidClumpingFactor(f64),

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("frame dimensions must be positive, got {width}x{height}")]
    InvalidFrame { width: u32, height: u32 },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Control errors (per fixed tick)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ControlError {
    #[error("timestep must be positive and finite, got {0}")]
    NonPositiveTimestep(f64),
}

/// Any error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Control(#[from] ControlError),
}

/// Reject zero, negative and non-finite timesteps.
pub fn check_timestep(dt: f64) -> Result<(), ControlError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(ControlError::NonPositiveTimestep(dt))
    }
}
