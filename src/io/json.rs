use std::io::{self, Write};

use crate::config::{ArrayConfig, ArrayShape};
use crate::placement::Monitor;

/// Summary statistics of a laid-out array.
#[derive(Debug, Clone)]
pub struct LayoutSummary {
    pub monitors: usize,
    pub clumps: usize,
    pub largest_clump: (usize, usize),
    /// Fraction of the array area covered by screens (before bezels).
    pub coverage: f64,
    pub total_mass: f64,
}

impl LayoutSummary {
    pub fn from_monitors<M>(monitors: &[Monitor<M>]) -> Self {
        let largest = monitors
            .iter()
            .map(|m| m.cell.footprint)
            .max_by_key(|fp| (fp.units(), fp.columns))
            .map_or((0, 0), |fp| (fp.columns, fp.rows));

        LayoutSummary {
            monitors: monitors.len(),
            clumps: monitors.iter().filter(|m| m.cell.footprint.is_clump()).count(),
            largest_clump: largest,
            coverage: monitors.iter().map(|m| m.cell.area()).sum(),
            total_mass: monitors.iter().map(|m| m.placement.mass).sum(),
        }
    }
}

/// Write a layout summary as JSON.
pub fn write_summary<W: Write>(
    writer: &mut W,
    config: &ArrayConfig,
    summary: &LayoutSummary,
) -> io::Result<()> {
    let shape = match config.shape {
        ArrayShape::Grid => "grid",
        ArrayShape::ClumpedGrid => "clumped_grid",
    };
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"array\": {{")?;
    writeln!(writer, "    \"shape\": \"{}\",", shape)?;
    writeln!(writer, "    \"width\": {},", config.array_width)?;
    writeln!(writer, "    \"height\": {},", config.array_height)?;
    writeln!(writer, "    \"width_in_units\": {:.3},", config.width_in_units)?;
    writeln!(writer, "    \"monitor_size_factor\": {:.3}", config.monitor_size_factor)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"layout\": {{")?;
    writeln!(writer, "    \"monitors\": {},", summary.monitors)?;
    writeln!(writer, "    \"clumps\": {},", summary.clumps)?;
    writeln!(
        writer,
        "    \"largest_clump\": [{}, {}],",
        summary.largest_clump.0, summary.largest_clump.1
    )?;
    writeln!(writer, "    \"coverage\": {:.4},", summary.coverage)?;
    writeln!(writer, "    \"total_mass\": {:.3}", summary.total_mass)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write a layout summary JSON to a file.
pub fn write_summary_file(path: &str, config: &ArrayConfig, summary: &LayoutSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, config, summary)
}
