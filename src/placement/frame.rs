use log::warn;
use nalgebra::Vector2;

use crate::error::ConfigError;
use crate::layout::Cell;

// ---------------------------------------------------------------------------
// Source frame dimensions
// ---------------------------------------------------------------------------

/// Size of the video frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        let frame = Self { width, height };
        frame.validate()?;
        Ok(frame)
    }

    /// Both dimensions must be non-zero, otherwise the aspect ratio is not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidFrame { width: self.width, height: self.height });
        }
        Ok(())
    }

    /// Height over width.
    pub fn aspect(&self) -> f64 {
        self.height as f64 / self.width as f64
    }
}

// ---------------------------------------------------------------------------
// UV rectangle (normalized texture space)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl UvRect {
    /// Texture region shown by `cell`: its center plus or minus half its size.
    pub fn from_cell(cell: &Cell) -> Self {
        Self { min: cell.min(), max: cell.max() }
    }

    pub fn size(&self) -> Vector2<f64> {
        self.max - self.min
    }

    /// Quad corners in mesh order: bottom-left, top-right, bottom-right, top-left.
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        [
            self.min,
            self.max,
            Vector2::new(self.max.x, self.min.y),
            Vector2::new(self.min.x, self.max.y),
        ]
    }

    pub fn is_inside_unit_square(&self) -> bool {
        self.min.x >= 0.0 && self.min.y >= 0.0 && self.max.x <= 1.0 && self.max.y <= 1.0
    }

    /// Clamp into [0, 1]^2, warning when anything had to move.
    pub fn clamped(self) -> Self {
        if self.is_inside_unit_square() {
            return self;
        }
        warn!(
            "uv rect ({:.6}, {:.6})..({:.6}, {:.6}) leaves the frame, clamping",
            self.min.x, self.min.y, self.max.x, self.max.y
        );
        Self {
            min: self.min.map(|v| v.clamp(0.0, 1.0)),
            max: self.max.map(|v| v.clamp(0.0, 1.0)),
        }
    }
}

// ---------------------------------------------------------------------------
// Pixel crop region
// ---------------------------------------------------------------------------

/// The pixels of the source frame one monitor shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Round a UV rectangle to whole pixels, clamped to the frame.
    pub fn from_uv(uv: &UvRect, frame: FrameSize) -> Self {
        let fw = frame.width as f64;
        let fh = frame.height as f64;
        let size = uv.size();

        let x = (uv.min.x * fw).round();
        let y = (uv.min.y * fh).round();
        let w = (size.x * fw).round();
        let h = (size.y * fh).round();

        if x < 0.0 || y < 0.0 || x + w > fw || y + h > fh {
            warn!(
                "crop {}x{} at ({}, {}) exceeds {}x{} frame, clamping",
                w, h, x, y, frame.width, frame.height
            );
        }

        let (x0, x1) = (x.clamp(0.0, fw), (x + w).clamp(0.0, fw));
        let (y0, y1) = (y.clamp(0.0, fh), (y + h).clamp(0.0, fh));
        Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0).max(0.0) as u32,
            height: (y1 - y0).max(0.0) as u32,
        }
    }
}
