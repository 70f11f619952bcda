pub mod integrator;
pub mod body;
pub mod runner;
pub mod event;

pub use body::{FrameIndex, PointBody, SimMonitor};
pub use integrator::euler_step;
pub use runner::{final_error, settle, settle_with, step_array, SettleConfig};
