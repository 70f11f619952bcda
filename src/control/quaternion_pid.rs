use nalgebra::{UnitQuaternion, Vector3};

use super::pid::PidGains;
use super::vector_pid::Vector3Pid;
use crate::error::ControlError;

// ---------------------------------------------------------------------------
// Orientation "PID": per-axis Euler error fed to a Vector3Pid
// ---------------------------------------------------------------------------

/// Wrap an angle in degrees into (-180, 180].
pub fn wrap_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Euler angles (roll, pitch, yaw) of `rotation` in degrees, each in (-180, 180].
pub fn euler_error_degrees(rotation: &UnitQuaternion<f64>) -> Vector3<f64> {
    let (roll, pitch, yaw) = rotation.euler_angles();
    Vector3::new(
        wrap_degrees(roll.to_degrees()),
        wrap_degrees(pitch.to_degrees()),
        wrap_degrees(yaw.to_degrees()),
    )
}

/// Treats each Euler axis as an independent error signal with a target of zero.
///
/// Not a true orientation controller: it only converges toward the identity
/// rotation, and near gimbal lock the axes stop being independent.
#[derive(Debug, Clone)]
pub struct QuaternionPid {
    pub axes: Vector3Pid,
}

impl QuaternionPid {
    pub fn new(gains: PidGains) -> Self {
        Self { axes: Vector3Pid::new(gains) }
    }

    /// Corrective angular output (degree-scaled) driving `current` toward identity.
    pub fn output(
        &mut self,
        current: &UnitQuaternion<f64>,
        dt: f64,
    ) -> Result<Vector3<f64>, ControlError> {
        let angles = euler_error_degrees(current);
        self.axes.output(&angles, &Vector3::zeros(), dt)
    }

    pub fn set_gains(&mut self, gains: PidGains) {
        self.axes.set_gains(gains);
    }
}
