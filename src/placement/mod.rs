pub mod frame;
pub mod transform;
pub mod collaborators;
pub mod array;

pub use frame::{CropRegion, FrameSize, UvRect};
pub use transform::{place, screen_scale, Placement};
pub use collaborators::{FrameSource, MonitorInstance, RigidBody};
pub use array::{Monitor, MonitorArray};
