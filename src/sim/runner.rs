use log::debug;
use nalgebra::Vector3;

use super::body::{PointBody, SimMonitor};
use crate::control::{BodyState, MonitorController, PidGains, PoseController};
use crate::error::{check_timestep, ControlError};
use crate::placement::{MonitorArray, RigidBody};

// ---------------------------------------------------------------------------
// Fixed-step settle configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SettleConfig {
    pub dt: f64,
    pub max_time: f64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            dt: 0.02,        // 50 Hz fixed step
            max_time: 20.0,
        }
    }
}

impl SettleConfig {
    pub fn steps(&self) -> usize {
        (self.max_time / self.dt).ceil() as usize
    }
}

// ---------------------------------------------------------------------------
// Single body
// ---------------------------------------------------------------------------

/// Run `controller` against `body` for the configured time.
/// Returns every state, starting with the initial one.
pub fn settle_with(
    body: &mut PointBody,
    controller: &mut dyn PoseController,
    config: &SettleConfig,
) -> Result<Vec<BodyState>, ControlError> {
    check_timestep(config.dt)?;
    let steps = config.steps();
    let mut trajectory = Vec::with_capacity(steps.min(200_000) + 1);
    trajectory.push(body.body_state());

    for _ in 0..steps {
        let correction = controller.correct(&body.state, config.dt)?;
        body.add_force(correction.force);
        body.add_torque(correction.torque);
        body.integrate(config.dt)?;
        trajectory.push(body.body_state());
    }

    debug!("{} ran {} steps of {} s", controller.name(), steps, config.dt);
    Ok(trajectory)
}

/// Distance from the last state of `trajectory` to `root`.
pub fn final_error(trajectory: &[BodyState], root: &Vector3<f64>) -> f64 {
    trajectory.last().map_or(0.0, |s| (s.position - root).norm())
}

/// Settle a monitor released at `start` toward `root` with a fresh controller.
pub fn settle(
    start: BodyState,
    root: Vector3<f64>,
    positional: PidGains,
    rotational: PidGains,
    config: &SettleConfig,
) -> Result<Vec<BodyState>, ControlError> {
    let mut body = PointBody::new(start);
    let mut controller = MonitorController::new(root, positional, rotational);
    let trajectory = settle_with(&mut body, &mut controller, config)?;
    debug!("settled toward {:?}, final error {:.3e}", root.as_slice(), final_error(&trajectory, &root));
    Ok(trajectory)
}

// ---------------------------------------------------------------------------
// Whole array
// ---------------------------------------------------------------------------

/// Tick a simulated array: correct every monitor, then integrate every body.
pub fn step_array(array: &mut MonitorArray<SimMonitor>, dt: f64) -> Result<(), ControlError> {
    array.fixed_update(dt)?;
    for m in array.monitors_mut() {
        m.instance.body.integrate(dt)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArrayConfig;
    use crate::control::euler_error_degrees;
    use crate::layout::seeded;
    use crate::placement::FrameSize;
    use nalgebra::UnitQuaternion;

    fn displaced() -> BodyState {
        BodyState {
            time: 0.0,
            position: Vector3::new(0.5, -0.3, 0.2),
            velocity: Vector3::zeros(),
            rotation: UnitQuaternion::from_scaled_axis(Vector3::new(0.2, 0.1, -0.15)),
            angular_velocity: Vector3::zeros(),
            mass: 2.0,
        }
    }

    #[test]
    fn displaced_monitor_returns_home() {
        let config = SettleConfig { dt: 0.02, max_time: 40.0 };
        let traj = settle(
            displaced(),
            Vector3::zeros(),
            PidGains::positional(),
            PidGains::rotational(),
            &config,
        )
        .unwrap();
        let last = traj.last().unwrap();
        assert!(last.position.norm() < 1e-5, "position error {}", last.position.norm());
        assert!(last.velocity.norm() < 1e-5);
        assert!(euler_error_degrees(&last.rotation).norm() < 1e-4);
        assert_eq!(traj.len(), config.steps() + 1);
    }

    #[test]
    fn settles_toward_offset_root() {
        let root = Vector3::new(2.0, 1.0, 0.0);
        let start = BodyState::at_rest(Vector3::new(3.0, 1.0, 0.0), 1.0);
        let config = SettleConfig { dt: 0.02, max_time: 30.0 };
        let traj = settle(start, root, PidGains::positional(), PidGains::rotational(), &config).unwrap();
        let last = traj.last().unwrap();
        assert!((last.position - root).norm() < 1e-3);
        assert_eq!(final_error(&traj, &root), (last.position - root).norm());
        // measured from the root, not from the origin
        assert!(final_error(&traj, &Vector3::zeros()) > 2.0);
        assert_eq!(final_error(&[], &root), 0.0);
    }

    #[test]
    fn quaternion_stays_unit() {
        let config = SettleConfig { dt: 0.02, max_time: 10.0 };
        let traj = settle(
            displaced(),
            Vector3::zeros(),
            PidGains::positional(),
            PidGains::rotational(),
            &config,
        )
        .unwrap();
        for s in &traj {
            let norm = s.rotation.quaternion().norm();
            assert!((norm - 1.0).abs() < 1e-9, "norm drifted to {} at t={:.2}", norm, s.time);
        }
    }

    #[test]
    fn zero_dt_rejected_before_running() {
        let config = SettleConfig { dt: 0.0, max_time: 1.0 };
        let r = settle(displaced(), Vector3::zeros(), PidGains::positional(), PidGains::rotational(), &config);
        assert_eq!(r.unwrap_err(), ControlError::NonPositiveTimestep(0.0));
    }

    #[test]
    fn knocked_array_recovers() {
        let frame = FrameSize::new(1920, 1080).unwrap();
        let mut array =
            MonitorArray::build(ArrayConfig::default(), frame, &mut seeded(3), |_| SimMonitor::new()).unwrap();
        for m in array.monitors_mut() {
            m.instance.body.kick(Vector3::new(0.3, -0.2, 0.5), Vector3::new(0.1, 0.0, -0.1));
        }
        for _ in 0..2000 {
            step_array(&mut array, 0.02).unwrap();
        }
        for m in array.monitors() {
            let err = (m.instance.body.state.position - m.placement.position).norm();
            assert!(err < 1e-3, "monitor at {:?} still {} away", m.cell.footprint, err);
        }
    }
}
