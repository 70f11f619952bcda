pub mod cell;
pub mod occupancy;
pub mod random;
pub mod partition;

pub use cell::{Cell, Footprint};
pub use occupancy::OccupancyGrid;
pub use random::{seeded, ScriptedRandom, UnitRandom};
pub use partition::{clumped, partition, roll_extent, uniform};
