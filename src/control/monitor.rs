use nalgebra::Vector3;

use super::controller::{BodyState, Correction, PoseController};
use super::pid::PidGains;
use super::quaternion_pid::QuaternionPid;
use super::vector_pid::Vector3Pid;
use crate::error::{check_timestep, ControlError};

// ---------------------------------------------------------------------------
// Monitor stabilizer: position + velocity + rotation + angular velocity
// ---------------------------------------------------------------------------

/// Holds one monitor near its root position and upright.
///
/// Position and velocity loops share the positional gains; rotation and
/// angular-velocity loops share the rotational gains. Outputs are scaled by
/// the body mass so heavy and light monitors settle alike.
#[derive(Debug, Clone)]
pub struct MonitorController {
    pub root: Vector3<f64>,
    position: Vector3Pid,
    velocity: Vector3Pid,
    rotation: QuaternionPid,
    angular_velocity: Vector3Pid,
}

impl MonitorController {
    pub fn new(root: Vector3<f64>, positional: PidGains, rotational: PidGains) -> Self {
        Self {
            root,
            position: Vector3Pid::new(positional),
            velocity: Vector3Pid::new(positional),
            rotation: QuaternionPid::new(rotational),
            angular_velocity: Vector3Pid::new(rotational),
        }
    }

    pub fn set_gains(&mut self, positional: PidGains, rotational: PidGains) {
        self.position.set_gains(positional);
        self.velocity.set_gains(positional);
        self.rotation.set_gains(rotational);
        self.angular_velocity.set_gains(rotational);
    }

    pub fn positional_gains(&self) -> PidGains {
        self.position.gains()
    }

    pub fn rotational_gains(&self) -> PidGains {
        self.angular_velocity.gains()
    }

    pub fn update(&mut self, state: &BodyState, dt: f64) -> Result<Correction, ControlError> {
        check_timestep(dt)?;

        let pos = self.position.output(&state.position, &self.root, dt)?;
        let vel = self.velocity.output(&state.velocity, &Vector3::zeros(), dt)?;

        let rot = self.rotation.output(&state.rotation, dt)?;
        let ang = self.angular_velocity.output(&state.angular_velocity, &Vector3::zeros(), dt)?;

        Ok(Correction {
            force: (pos + vel) * state.mass,
            torque: (rot + ang) * state.mass,
        })
    }
}

impl PoseController for MonitorController {
    fn correct(&mut self, state: &BodyState, dt: f64) -> Result<Correction, ControlError> {
        self.update(state, dt)
    }

    fn name(&self) -> &str {
        "MonitorController"
    }
}
