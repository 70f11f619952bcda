use serde::{Deserialize, Serialize};

use crate::error::{check_timestep, ControlError};

// ---------------------------------------------------------------------------
// PID gains
// ---------------------------------------------------------------------------

/// Proportional, integral and derivative gains. Typically each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub const fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// Gains used to hold a monitor at its root position.
    pub const fn positional() -> Self {
        Self::new(0.9, 0.0, 0.9)
    }

    /// Gains used to hold a monitor upright.
    pub const fn rotational() -> Self {
        Self::new(0.7, 0.0, 0.04)
    }
}

// ---------------------------------------------------------------------------
// PID controller (single axis)
// ---------------------------------------------------------------------------

/// Scalar PID controller.
///
/// The integral term accumulates without clamping and the derivative is taken
/// on the raw error, so the first call after construction sees a derivative
/// kick from a previous error of zero. State is only reset by building a new
/// controller.
#[derive(Debug, Clone)]
pub struct Pid {
    pub gains: PidGains,
    integral: f64,
    prev_error: f64,
}

impl Pid {
    pub fn new(gains: PidGains) -> Self {
        Self { gains, integral: 0.0, prev_error: 0.0 }
    }

    /// Advance the controller by one step and return its output.
    ///
    /// Must be called exactly once per logical tick. A non-positive or
    /// non-finite `dt` is rejected and leaves the state untouched.
    pub fn output(&mut self, error: f64, dt: f64) -> Result<f64, ControlError> {
        check_timestep(dt)?;
        self.integral += error * dt;
        let derivative = (error - self.prev_error) / dt;
        self.prev_error = error;
        Ok(self.gains.kp * error + self.gains.ki * self.integral + self.gains.kd * derivative)
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn prev_error(&self) -> f64 {
        self.prev_error
    }
}
