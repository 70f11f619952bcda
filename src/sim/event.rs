use nalgebra::Vector3;

use crate::control::{euler_error_degrees, BodyState};

// ---------------------------------------------------------------------------
// Settle events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// Position crossed the root on the given axis (0 = x, 1 = y, 2 = z).
    Overshoot { axis: usize },
    /// Position and attitude within tolerance and at rest.
    Settled,
}

#[derive(Debug, Clone)]
pub struct SettleEvent {
    pub time: f64,
    pub kind: EventKind,
}

/// Passive detectors that inspect consecutive states.
pub trait EventDetector {
    fn check(&mut self, prev: &BodyState, current: &BodyState) -> Option<EventKind>;
}

/// Fires each time an axis of the position error changes sign.
pub struct OvershootDetector {
    pub root: Vector3<f64>,
}

impl EventDetector for OvershootDetector {
    fn check(&mut self, prev: &BodyState, current: &BodyState) -> Option<EventKind> {
        let before = prev.position - self.root;
        let after = current.position - self.root;
        (0..3)
            .find(|&axis| before[axis] != 0.0 && before[axis].signum() != after[axis].signum() && after[axis] != 0.0)
            .map(|axis| EventKind::Overshoot { axis })
    }
}

/// Fires once, when the body is close to its root pose and nearly still.
pub struct SettledDetector {
    pub root: Vector3<f64>,
    pub position_tolerance: f64,
    pub angle_tolerance_deg: f64,
    pub speed_tolerance: f64,
    fired: bool,
}

impl SettledDetector {
    pub fn new(root: Vector3<f64>, position_tolerance: f64, angle_tolerance_deg: f64) -> Self {
        Self {
            root,
            position_tolerance,
            angle_tolerance_deg,
            speed_tolerance: position_tolerance,
            fired: false,
        }
    }
}

impl EventDetector for SettledDetector {
    fn check(&mut self, _prev: &BodyState, current: &BodyState) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let near = (current.position - self.root).norm() < self.position_tolerance;
        let upright = euler_error_degrees(&current.rotation).amax() < self.angle_tolerance_deg;
        let still = current.velocity.norm() < self.speed_tolerance;
        if near && upright && still {
            self.fired = true;
            Some(EventKind::Settled)
        } else {
            None
        }
    }
}

/// Run `detectors` over a trajectory in time order.
pub fn detect(trajectory: &[BodyState], detectors: &mut [Box<dyn EventDetector>]) -> Vec<SettleEvent> {
    let mut events = Vec::new();
    for pair in trajectory.windows(2) {
        for d in detectors.iter_mut() {
            if let Some(kind) = d.check(&pair[0], &pair[1]) {
                events.push(SettleEvent { time: pair[1].time, kind });
            }
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, vx: f64) -> BodyState {
        let mut s = BodyState::at_rest(Vector3::new(x, 0.0, 0.0), 1.0);
        s.velocity.x = vx;
        s
    }

    #[test]
    fn overshoot_detected() {
        let mut det = OvershootDetector { root: Vector3::zeros() };
        assert_eq!(det.check(&at(0.1, -1.0), &at(-0.05, -1.0)), Some(EventKind::Overshoot { axis: 0 }));
        assert_eq!(det.check(&at(0.1, -1.0), &at(0.05, -1.0)), None);
    }

    #[test]
    fn settled_fires_once() {
        let mut det = SettledDetector::new(Vector3::zeros(), 0.01, 0.5);
        assert!(det.check(&at(0.5, 0.0), &at(0.2, 0.0)).is_none());
        assert_eq!(det.check(&at(0.01, 0.0), &at(0.001, 0.0)), Some(EventKind::Settled));
        assert!(det.check(&at(0.001, 0.0), &at(0.0, 0.0)).is_none());
    }

    #[test]
    fn detect_collects_in_order() {
        let traj = vec![at(0.2, 0.0), at(-0.1, 0.0), at(0.001, 0.0)];
        let mut detectors: Vec<Box<dyn EventDetector>> = vec![
            Box::new(OvershootDetector { root: Vector3::zeros() }),
            Box::new(SettledDetector::new(Vector3::zeros(), 0.01, 1.0)),
        ];
        let events = detect(&traj, &mut detectors);
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Overshoot { axis: 0 },
                EventKind::Overshoot { axis: 0 },
                EventKind::Settled
            ]
        );
    }
}
