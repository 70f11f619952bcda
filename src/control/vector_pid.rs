use nalgebra::Vector3;

use super::pid::{Pid, PidGains};
use crate::error::{check_timestep, ControlError};

// ---------------------------------------------------------------------------
// Three decoupled PID controllers, one per axis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Vector3Pid {
    pub x: Pid,
    pub y: Pid,
    pub z: Pid,
}

impl Vector3Pid {
    pub fn new(gains: PidGains) -> Self {
        Self { x: Pid::new(gains), y: Pid::new(gains), z: Pid::new(gains) }
    }

    /// Drive `current` toward `target`. Each axis sees only its own error.
    pub fn output(
        &mut self,
        current: &Vector3<f64>,
        target: &Vector3<f64>,
        dt: f64,
    ) -> Result<Vector3<f64>, ControlError> {
        // Validate up front so a bad dt never leaves the axes out of step.
        check_timestep(dt)?;
        let error = target - current;
        Ok(Vector3::new(
            self.x.output(error.x, dt)?,
            self.y.output(error.y, dt)?,
            self.z.output(error.z, dt)?,
        ))
    }

    /// Replace the gains on all three axes. Accumulators are kept.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.x.gains = gains;
        self.y.gains = gains;
        self.z.gains = gains;
    }

    pub fn gains(&self) -> PidGains {
        self.x.gains
    }
}
