use nalgebra::{UnitQuaternion, Vector3};

use crate::error::ControlError;

/// Snapshot of a rigid body as seen by a controller at one fixed tick.
#[derive(Debug, Clone)]
pub struct BodyState {
    pub time: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub angular_velocity: Vector3<f64>,
    pub mass: f64,
}

impl BodyState {
    /// A body at rest at `position`, upright.
    pub fn at_rest(position: Vector3<f64>, mass: f64) -> Self {
        Self {
            time: 0.0,
            position,
            velocity: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
            mass,
        }
    }
}

/// Force and torque to hand to the physics integrator for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Correction {
    pub force: Vector3<f64>,
    pub torque: Vector3<f64>,
}

/// Trait for pose controllers.
///
/// Implement this to plug a custom stabilizer into the settle runner or a
/// monitor array.
pub trait PoseController {
    /// Compute the correction for the current body state.
    ///
    /// Called once per fixed tick; implementations are stateful.
    fn correct(&mut self, state: &BodyState, dt: f64) -> Result<Correction, ControlError>;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
