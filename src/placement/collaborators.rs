use nalgebra::Vector3;

use super::frame::{CropRegion, FrameSize, UvRect};
use super::transform::Placement;
use crate::control::BodyState;

/// The engine-side object that shows one slice of the video.
///
/// The array calls into it; it never calls back.
pub trait MonitorInstance {
    /// Handle to a full decoded frame, owned by the frame source.
    type Frame;

    fn apply_placement(&mut self, placement: &Placement);

    /// Bezel width changed; `screen_scale` is the screen's new scale inside it.
    fn set_border_size(&mut self, border: f64, screen_scale: Vector3<f64>);

    /// Show the given region of `frame`.
    fn display(&mut self, frame: &Self::Frame, uv: &UvRect, crop: &CropRegion);
}

/// Read access to a rigid body plus the two ways of pushing it.
pub trait RigidBody {
    fn body_state(&self) -> BodyState;
    fn add_force(&mut self, force: Vector3<f64>);
    fn add_torque(&mut self, torque: Vector3<f64>);
}

/// Supplies frame dimensions once and the latest frame each tick, if any.
pub trait FrameSource {
    type Frame;

    fn frame_size(&self) -> FrameSize;

    /// `None` until the first frame has been decoded.
    fn current_frame(&self) -> Option<&Self::Frame>;
}
