use nalgebra::{UnitQuaternion, Vector3};

use crate::control::BodyState;
use crate::error::{check_timestep, ControlError};

// ---------------------------------------------------------------------------
// Semi-implicit Euler step with constant force/torque over the step
// ---------------------------------------------------------------------------

/// Advance `state` by `dt` under a constant force and torque.
///
/// Velocities are updated first and then used for position and attitude.
/// Angular acceleration uses unit inertia per unit mass (torque / mass), and
/// the rotation is applied in the world frame.
pub fn euler_step(
    state: &BodyState,
    force: &Vector3<f64>,
    torque: &Vector3<f64>,
    dt: f64,
) -> Result<BodyState, ControlError> {
    check_timestep(dt)?;

    let velocity = state.velocity + force / state.mass * dt;
    let angular_velocity = state.angular_velocity + torque / state.mass * dt;
    let spin = UnitQuaternion::from_scaled_axis(angular_velocity * dt);

    Ok(BodyState {
        time: state.time + dt,
        position: state.position + velocity * dt,
        velocity,
        rotation: spin * state.rotation,
        angular_velocity,
        mass: state.mass,
    })
}
