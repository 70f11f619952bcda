use log::warn;
use nalgebra::{UnitQuaternion, Vector2, Vector3};

use super::frame::{CropRegion, FrameSize, UvRect};
use crate::config::ArrayConfig;
use crate::layout::Cell;

// ---------------------------------------------------------------------------
// Placement: everything a monitor instance needs at array-construction time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Center of the monitor relative to the array origin, world units.
    pub position: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
    /// Monitor extent in world units; depth is fixed at 1.
    pub scale: Vector3<f64>,
    pub uv: UvRect,
    pub crop: CropRegion,
    pub mass: f64,
    /// Scale of the screen inside its bezel.
    pub screen_scale: Vector3<f64>,
}

impl Placement {
    pub fn monitor_extent(&self) -> Vector2<f64> {
        self.scale.xy()
    }
}

/// Compute the world transform, texture mapping and mass for one cell.
///
/// Pure: the same cell, config and frame always give the same placement.
pub fn place(cell: &Cell, config: &ArrayConfig, frame: FrameSize) -> Placement {
    let extent = config.world_extent(frame);

    let scale = Vector3::new(cell.size.x * extent.x, cell.size.y * extent.y, 1.0);
    let position = Vector3::new(
        (cell.position.x - 0.5) * extent.x,
        (cell.position.y - 0.5) * extent.y,
        0.0,
    );

    let uv = UvRect::from_cell(cell).clamped();
    let crop = CropRegion::from_uv(&uv, frame);

    // Squared magnitude keeps the unit depth, so mass ~ w^2 + h^2 + 1.
    let mass = scale.norm_squared() * config.mass_density;

    Placement {
        position,
        rotation: UnitQuaternion::identity(),
        scale,
        uv,
        crop,
        mass,
        screen_scale: screen_scale(scale.xy(), config.border_size),
    }
}

/// Fraction of the monitor the screen fills once a bezel of `border` is taken off.
///
/// A bezel wider than the monitor clamps the screen to zero on that axis.
pub fn screen_scale(monitor_extent: Vector2<f64>, border: f64) -> Vector3<f64> {
    let axis = |extent: f64| {
        let s = (extent - border) / extent;
        if s < 0.0 {
            warn!("border {} exceeds monitor extent {}, hiding screen", border, extent);
            0.0
        } else {
            s
        }
    };
    Vector3::new(axis(monitor_extent.x), axis(monitor_extent.y), 1.0)
}
