//! Lay out a clumped wall with each clumping policy and print an ASCII map.
//!
//! Run with: cargo run --example clumped_wall -- [seed]

use monitor_man::config::{ArrayConfig, ArrayShape, ClumpPolicy};
use monitor_man::io::LayoutSummary;
use monitor_man::layout::{partition, seeded, Cell};

fn main() -> Result<(), monitor_man::Error> {
    let _ = monitor_man::logger::init(monitor_man::logger::level_from_env());
    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(42);

    let policies = [
        ("continuous, factor 2", ClumpPolicy::Continuous { factor: 2.0, square_bias: 0.0 }),
        ("continuous, factor 3, square bias 0.5", ClumpPolicy::Continuous { factor: 3.0, square_bias: 0.5 }),
        ("nested, clump 0.5, large 0.25", ClumpPolicy::Nested { clump_chance: 0.5, large_chance: 0.25 }),
    ];

    for (name, clumping) in policies {
        let config = ArrayConfig {
            shape: ArrayShape::ClumpedGrid,
            array_width: 16,
            array_height: 9,
            clumping,
            ..Default::default()
        };
        let cells = partition(&config, &mut seeded(seed))?;

        println!("{} (seed {}): {} monitors", name, seed, cells.len());
        print!("{}", ascii_map(&cells, config.array_width, config.array_height));
        println!();
    }

    // Same wall, but with placements: summary of the last policy
    let config = ArrayConfig {
        shape: ArrayShape::ClumpedGrid,
        array_width: 16,
        array_height: 9,
        clumping: ClumpPolicy::Nested { clump_chance: 0.5, large_chance: 0.25 },
        ..Default::default()
    };
    let frame = monitor_man::FrameSize::new(3840, 2160)?;
    let array = monitor_man::MonitorArray::build(config, frame, &mut seeded(seed), |_| {
        monitor_man::sim::SimMonitor::new()
    })?;
    let s = LayoutSummary::from_monitors(array.monitors());
    println!(
        "placed {} monitors, {} clumps, largest {}x{}, total mass {:.2}",
        s.monitors, s.clumps, s.largest_clump.0, s.largest_clump.1, s.total_mass
    );
    Ok(())
}

/// One letter per monitor, cycling a..z, top row first.
fn ascii_map(cells: &[Cell], width: usize, height: usize) -> String {
    let mut grid = vec![vec!['.'; width]; height];
    for (i, cell) in cells.iter().enumerate() {
        let fp = &cell.footprint;
        let letter = (b'a' + (i % 26) as u8) as char;
        for c in fp.column..fp.column + fp.columns {
            for r in fp.row..fp.row + fp.rows {
                grid[r][c] = letter;
            }
        }
    }
    let mut out = String::new();
    for row in grid.iter().rev() {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}
