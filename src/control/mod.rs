pub mod controller;
pub mod pid;
pub mod vector_pid;
pub mod quaternion_pid;
pub mod monitor;

pub use controller::{BodyState, Correction, PoseController};
pub use pid::{Pid, PidGains};
pub use vector_pid::Vector3Pid;
pub use quaternion_pid::{euler_error_degrees, wrap_degrees, QuaternionPid};
pub use monitor::MonitorController;
