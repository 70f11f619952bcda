//! Plug a custom monitor and frame source into the array.
//!
//! The frame source generates a gradient test card; each monitor crops its
//! region out of the frame and reports the mean brightness of what it shows.
//!
//! Run with: cargo run --example custom_monitor

use nalgebra::Vector3;

use monitor_man::config::{ArrayConfig, ArrayShape};
use monitor_man::layout::seeded;
use monitor_man::placement::{
    CropRegion, FrameSize, FrameSource, MonitorArray, MonitorInstance, Placement, UvRect,
};

/// Greyscale frame, row-major, one byte per pixel.
struct TestCard {
    size: FrameSize,
    pixels: Vec<u8>,
}

impl TestCard {
    fn gradient(size: FrameSize) -> Self {
        let (w, h) = (size.width as usize, size.height as usize);
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                pixels.push(((x + y) * 255 / (w + h - 2).max(1)) as u8);
            }
        }
        Self { size, pixels }
    }

    fn mean(&self, crop: &CropRegion) -> f64 {
        let w = self.size.width as usize;
        let mut sum = 0u64;
        for y in crop.y..crop.y + crop.height {
            let row = y as usize * w;
            for x in crop.x..crop.x + crop.width {
                sum += u64::from(self.pixels[row + x as usize]);
            }
        }
        let n = u64::from(crop.width) * u64::from(crop.height);
        if n == 0 { 0.0 } else { sum as f64 / n as f64 }
    }
}

struct Decoder {
    card: Option<TestCard>,
    size: FrameSize,
}

impl FrameSource for Decoder {
    type Frame = TestCard;

    fn frame_size(&self) -> FrameSize {
        self.size
    }

    fn current_frame(&self) -> Option<&TestCard> {
        self.card.as_ref()
    }
}

struct PanelMonitor {
    label: String,
    position: Vector3<f64>,
    visible: Vector3<f64>,
    brightness: Option<f64>,
}

impl MonitorInstance for PanelMonitor {
    type Frame = TestCard;

    fn apply_placement(&mut self, placement: &Placement) {
        self.position = placement.position;
    }

    fn set_border_size(&mut self, _border: f64, screen_scale: Vector3<f64>) {
        self.visible = screen_scale;
    }

    fn display(&mut self, frame: &TestCard, _uv: &UvRect, crop: &CropRegion) {
        self.brightness = Some(frame.mean(crop));
    }
}

fn main() -> Result<(), monitor_man::Error> {
    let _ = monitor_man::logger::init(monitor_man::logger::level_from_env());

    let size = FrameSize::new(640, 360)?;
    let mut decoder = Decoder { card: None, size };

    let config = ArrayConfig {
        shape: ArrayShape::ClumpedGrid,
        array_width: 4,
        array_height: 3,
        ..Default::default()
    };
    let mut array = MonitorArray::build(config, decoder.frame_size(), &mut seeded(1), |cell| PanelMonitor {
        label: format!("{},{}", cell.column(), cell.row()),
        position: Vector3::zeros(),
        visible: Vector3::new(1.0, 1.0, 1.0),
        brightness: None,
    })?;

    // Nothing decoded yet: monitors keep showing nothing.
    assert!(!array.display(&decoder));

    decoder.card = Some(TestCard::gradient(size));
    array.display(&decoder);

    // Thicker bezels only touch the screen scale.
    array.set_border_size(0.2)?;

    for m in array.monitors() {
        let p = &m.instance;
        println!(
            "monitor {:>5}  at ({:>6.2}, {:>6.2})  screen {:.2}x{:.2}  brightness {:>6.1}",
            p.label,
            p.position.x,
            p.position.y,
            p.visible.x,
            p.visible.y,
            p.brightness.unwrap_or(0.0),
        );
    }
    Ok(())
}
