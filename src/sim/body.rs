use nalgebra::Vector3;

use super::integrator::euler_step;
use crate::control::BodyState;
use crate::error::ControlError;
use crate::placement::{CropRegion, MonitorInstance, Placement, RigidBody, UvRect};

// ---------------------------------------------------------------------------
// Point body: accumulates force/torque, integrates on demand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PointBody {
    pub state: BodyState,
    force: Vector3<f64>,
    torque: Vector3<f64>,
}

impl PointBody {
    pub fn new(state: BodyState) -> Self {
        Self { state, force: Vector3::zeros(), torque: Vector3::zeros() }
    }

    /// Integrate the accumulated force and torque over `dt`, then clear them.
    pub fn integrate(&mut self, dt: f64) -> Result<(), ControlError> {
        self.state = euler_step(&self.state, &self.force, &self.torque, dt)?;
        self.force = Vector3::zeros();
        self.torque = Vector3::zeros();
        Ok(())
    }

    /// Instantaneous velocity change, e.g. a knock from a neighbour.
    pub fn kick(&mut self, velocity: Vector3<f64>, angular_velocity: Vector3<f64>) {
        self.state.velocity += velocity;
        self.state.angular_velocity += angular_velocity;
    }
}

impl RigidBody for PointBody {
    fn body_state(&self) -> BodyState {
        self.state.clone()
    }

    fn add_force(&mut self, force: Vector3<f64>) {
        self.force += force;
    }

    fn add_torque(&mut self, torque: Vector3<f64>) {
        self.torque += torque;
    }
}

// ---------------------------------------------------------------------------
// Simulated monitor: a point body that also accepts placements and frames
// ---------------------------------------------------------------------------

/// Frames are identified by their index in the stream.
pub type FrameIndex = u64;

#[derive(Debug, Clone)]
pub struct SimMonitor {
    pub body: PointBody,
    pub screen_scale: Vector3<f64>,
    pub last_frame: Option<(FrameIndex, CropRegion)>,
}

impl SimMonitor {
    pub fn new() -> Self {
        Self {
            body: PointBody::new(BodyState::at_rest(Vector3::zeros(), 1.0)),
            screen_scale: Vector3::new(1.0, 1.0, 1.0),
            last_frame: None,
        }
    }
}

impl Default for SimMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorInstance for SimMonitor {
    type Frame = FrameIndex;

    /// Teleport to the placement and take its mass; motion is kept.
    fn apply_placement(&mut self, placement: &Placement) {
        let s = &mut self.body.state;
        s.position = placement.position;
        s.rotation = placement.rotation;
        s.mass = placement.mass;
    }

    fn set_border_size(&mut self, _border: f64, screen_scale: Vector3<f64>) {
        self.screen_scale = screen_scale;
    }

    fn display(&mut self, frame: &FrameIndex, _uv: &UvRect, crop: &CropRegion) {
        self.last_frame = Some((*frame, *crop));
    }
}

impl RigidBody for SimMonitor {
    fn body_state(&self) -> BodyState {
        self.body.body_state()
    }

    fn add_force(&mut self, force: Vector3<f64>) {
        self.body.add_force(force);
    }

    fn add_torque(&mut self, torque: Vector3<f64>) {
        self.body.add_torque(torque);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forces_accumulate_until_integrated() {
        let mut b = PointBody::new(BodyState::at_rest(Vector3::zeros(), 2.0));
        b.add_force(Vector3::new(1.0, 0.0, 0.0));
        b.add_force(Vector3::new(1.0, 0.0, 0.0));
        b.integrate(1.0).unwrap();
        assert!((b.state.velocity.x - 1.0).abs() < 1e-12);
        // accumulators cleared
        b.integrate(1.0).unwrap();
        assert!((b.state.velocity.x - 1.0).abs() < 1e-12);
        assert!((b.state.position.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn kick_adds_velocity() {
        let mut b = PointBody::new(BodyState::at_rest(Vector3::zeros(), 1.0));
        b.kick(Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(b.state.velocity.y, 1.0);
        assert_eq!(b.state.angular_velocity.z, 2.0);
    }
}
