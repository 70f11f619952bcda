pub mod config;
pub mod control;
pub mod error;
pub mod io;
pub mod layout;
pub mod logger;
pub mod placement;
pub mod sim;

pub use config::{ArrayConfig, ArrayShape, ClumpPolicy};
pub use error::{ConfigError, ControlError, Error};
pub use placement::{FrameSize, MonitorArray};
