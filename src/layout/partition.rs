use log::{debug, info};

use super::cell::{Cell, Footprint};
use super::occupancy::OccupancyGrid;
use super::random::UnitRandom;
use crate::config::{ArrayConfig, ArrayShape, ClumpPolicy};
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Layout entry point
// ---------------------------------------------------------------------------

/// Partition the configured grid into monitor cells.
///
/// Cells are emitted column by column (column outer, row inner). Uniform
/// layouts never touch `rng`.
pub fn partition(config: &ArrayConfig, rng: &mut dyn UnitRandom) -> Result<Vec<Cell>, ConfigError> {
    config.validate()?;
    let (w, h) = (config.array_width, config.array_height);

    let footprints = match config.shape {
        ArrayShape::Grid => uniform(w, h),
        ArrayShape::ClumpedGrid => clumped(w, h, &config.clumping, rng),
    };

    info!(
        "laid out {} monitors over a {}x{} {:?} array",
        footprints.len(),
        w,
        h,
        config.shape
    );

    Ok(cells(&footprints, w, h, config.monitor_size_factor))
}

/// Express footprints as array fractions with the given size factor.
pub fn cells(footprints: &[Footprint], width: usize, height: usize, size_factor: f64) -> Vec<Cell> {
    footprints
        .iter()
        .map(|fp| Cell::from_footprint(*fp, width, height, size_factor))
        .collect()
}

// ---------------------------------------------------------------------------
// Uniform grid
// ---------------------------------------------------------------------------

pub fn uniform(width: usize, height: usize) -> Vec<Footprint> {
    let mut out = Vec::with_capacity(width * height);
    for i in 0..width {
        for j in 0..height {
            out.push(Footprint::unit(i, j));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Clumped grid
// ---------------------------------------------------------------------------

/// Randomly merge neighbouring units into larger monitors.
///
/// A rolled clump that leaves the grid or touches a claimed unit is dropped
/// in favour of a single unit; it is never retried smaller.
pub fn clumped(
    width: usize,
    height: usize,
    policy: &ClumpPolicy,
    rng: &mut dyn UnitRandom,
) -> Vec<Footprint> {
    let mut grid = OccupancyGrid::new(width, height);
    let mut out = Vec::new();

    for i in 0..width {
        for j in 0..height {
            if grid.is_occupied(i, j) {
                continue;
            }

            let (columns, rows) = roll_extent(policy, rng);
            let candidate = Footprint::new(i, j, columns, rows);

            if candidate.is_clump() && grid.is_free(&candidate) {
                debug!("clump {}x{} at ({}, {})", columns, rows, i, j);
                grid.fill(&candidate);
                out.push(candidate);
            } else {
                out.push(Footprint::unit(i, j));
            }
            grid.occupy(i, j);
        }
    }

    debug_assert!(grid.is_full());
    out
}

/// Roll the (columns, rows) extent of the next monitor.
pub fn roll_extent(policy: &ClumpPolicy, rng: &mut dyn UnitRandom) -> (usize, usize) {
    match *policy {
        ClumpPolicy::Continuous { factor, square_bias } => {
            let columns = continuous_dim(rng.next_unit(), factor);
            // No bias roll at all when squares are never forced.
            let rows = if square_bias > 0.0 && rng.next_unit() < square_bias {
                columns
            } else {
                continuous_dim(rng.next_unit(), factor)
            };
            (columns, rows)
        }
        ClumpPolicy::Nested { clump_chance, large_chance } => {
            if rng.next_unit() >= clump_chance {
                return (1, 1);
            }
            let shape = rng.next_unit();
            if shape < 1.0 / 3.0 {
                if rng.next_unit() < large_chance {
                    (3, 3)
                } else {
                    (2, 2)
                }
            } else if shape < 2.0 / 3.0 {
                (1, 2)
            } else {
                (2, 1)
            }
        }
    }
}

fn continuous_dim(sample: f64, factor: f64) -> usize {
    ((sample * factor).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::random::{seeded, ScriptedRandom};

    fn assert_exact_cover(fps: &[Footprint], w: usize, h: usize) {
        for fp in fps {
            assert!(fp.fits(w, h), "{:?} leaves the {}x{} grid", fp, w, h);
        }
        for c in 0..w {
            for r in 0..h {
                let n = fps.iter().filter(|fp| fp.contains(c, r)).count();
                assert_eq!(n, 1, "unit ({}, {}) covered {} times", c, r, n);
            }
        }
        let units: usize = fps.iter().map(|fp| fp.units()).sum();
        assert_eq!(units, w * h);
    }

    fn grid_config(w: usize, h: usize, factor: f64) -> ArrayConfig {
        ArrayConfig {
            array_width: w,
            array_height: h,
            monitor_size_factor: factor,
            ..Default::default()
        }
    }

    #[test]
    fn uniform_tiles_unit_square() {
        for w in 1..=6 {
            for h in 1..=6 {
                let mut rng = ScriptedRandom::new(vec![]);
                let cells = partition(&grid_config(w, h, 1.0), &mut rng).unwrap();
                assert_eq!(cells.len(), w * h);
                let area: f64 = cells.iter().map(|c| c.area()).sum();
                assert!((area - 1.0).abs() < 1e-9, "{}x{} area {}", w, h, area);
                for (a, ca) in cells.iter().enumerate() {
                    for cb in &cells[a + 1..] {
                        let overlap_x = ca.max().x.min(cb.max().x) - ca.min().x.max(cb.min().x);
                        let overlap_y = ca.max().y.min(cb.max().y) - ca.min().y.max(cb.min().y);
                        assert!(overlap_x <= 1e-12 || overlap_y <= 1e-12);
                    }
                }
                assert_eq!(rng.drawn(), 0);
            }
        }
    }

    #[test]
    fn three_by_three_with_gap() {
        let mut rng = seeded(1);
        let cells = partition(&grid_config(3, 3, 0.9), &mut rng).unwrap();
        assert_eq!(cells.len(), 9);
        let centers = [1.0 / 6.0, 0.5, 5.0 / 6.0];
        for c in &cells {
            assert!((c.size.x - 0.3).abs() < 1e-12);
            assert!((c.size.y - 0.3).abs() < 1e-12);
            assert!((c.position.x - centers[c.column()]).abs() < 1e-12);
            assert!((c.position.y - centers[c.row()]).abs() < 1e-12);
        }
    }

    #[test]
    fn clumped_covers_exactly_once() {
        let policies = [
            ClumpPolicy::Continuous { factor: 3.0, square_bias: 0.0 },
            ClumpPolicy::Continuous { factor: 2.5, square_bias: 0.5 },
            ClumpPolicy::Nested { clump_chance: 0.6, large_chance: 0.5 },
        ];
        for policy in &policies {
            for seed in 0..40 {
                let mut rng = seeded(seed);
                let (w, h) = (3 + seed as usize % 7, 2 + seed as usize % 5);
                let fps = clumped(w, h, policy, &mut rng);
                assert_exact_cover(&fps, w, h);
            }
        }
    }

    #[test]
    fn clumped_is_reproducible() {
        let config = ArrayConfig {
            shape: ArrayShape::ClumpedGrid,
            array_width: 12,
            array_height: 7,
            clumping: ClumpPolicy::Continuous { factor: 3.0, square_bias: 0.25 },
            ..Default::default()
        };
        let a = partition(&config, &mut seeded(42)).unwrap();
        let b = partition(&config, &mut seeded(42)).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.footprint, y.footprint);
            assert_eq!(x.position.x.to_bits(), y.position.x.to_bits());
            assert_eq!(x.size.y.to_bits(), y.size.y.to_bits());
        }
        // a large array at factor 3 should produce at least one clump
        assert!(a.iter().any(|c| c.footprint.is_clump()));
    }

    #[test]
    fn zero_factor_degenerates_to_uniform() {
        let policy = ClumpPolicy::Continuous { factor: 0.0, square_bias: 0.0 };
        for seed in 0..10 {
            let fps = clumped(5, 4, &policy, &mut seeded(seed));
            assert_eq!(fps, uniform(5, 4));
        }
        let nested = ClumpPolicy::Nested { clump_chance: 0.0, large_chance: 1.0 };
        assert_eq!(clumped(4, 4, &nested, &mut seeded(3)), uniform(4, 4));
    }

    #[test]
    fn scripted_continuous_clump() {
        // 2x2 grid, factor 2: 0.9 -> 2 columns, 0.9 -> 2 rows. Zero bias draws nothing extra.
        let policy = ClumpPolicy::Continuous { factor: 2.0, square_bias: 0.0 };
        let mut rng = ScriptedRandom::new(vec![0.9, 0.9]);
        let fps = clumped(2, 2, &policy, &mut rng);
        assert_eq!(fps, vec![Footprint::new(0, 0, 2, 2)]);
        assert_eq!(rng.drawn(), 2);
    }

    #[test]
    fn rejected_clump_falls_back_to_single_unit() {
        // Always roll 2x2 on a 3x1 grid: never fits vertically.
        let policy = ClumpPolicy::Continuous { factor: 2.0, square_bias: 1.0 };
        let mut rng = ScriptedRandom::new(vec![0.9, 0.0]);
        let fps = clumped(3, 1, &policy, &mut rng);
        assert_eq!(fps, uniform(3, 1));
    }

    #[test]
    fn clump_past_the_edge_is_rejected() {
        // 3x2 grid, every roll is 2x1 (two columns, one row).
        // Column 0 clumps fit; column 2 would leave the grid.
        let policy = ClumpPolicy::Nested { clump_chance: 1.0, large_chance: 0.0 };
        let mut rng = ScriptedRandom::new(vec![0.0, 0.9]);
        let fps = clumped(3, 2, &policy, &mut rng);
        assert_eq!(
            fps,
            vec![
                Footprint::new(0, 0, 2, 1),
                Footprint::new(0, 1, 2, 1),
                Footprint::unit(2, 0),
                Footprint::unit(2, 1),
            ]
        );
    }

    #[test]
    fn overlapping_clump_is_rejected() {
        // 2x3 grid, factor 2: 0.3 -> 1 unit, 0.9 -> 2 units.
        // (0,0) unit, (0,1) 2x2, then (1,0) rolls 1x2 which would hit (1,1).
        let policy = ClumpPolicy::Continuous { factor: 2.0, square_bias: 0.0 };
        let mut rng = ScriptedRandom::new(vec![
            0.3, 0.3, //
            0.9, 0.9, //
            0.3, 0.9,
        ]);
        let fps = clumped(2, 3, &policy, &mut rng);
        assert_eq!(
            fps,
            vec![Footprint::unit(0, 0), Footprint::new(0, 1, 2, 2), Footprint::unit(1, 0)]
        );
        assert_eq!(rng.drawn(), 6);
    }

    #[test]
    fn nested_rolls() {
        let policy = ClumpPolicy::Nested { clump_chance: 0.5, large_chance: 0.5 };
        let cases: [(&[f64], (usize, usize)); 5] = [
            (&[0.7], (1, 1)),
            (&[0.1, 0.1, 0.9], (2, 2)),
            (&[0.1, 0.1, 0.1], (3, 3)),
            (&[0.1, 0.5], (1, 2)),
            (&[0.1, 0.8], (2, 1)),
        ];
        for (samples, expected) in cases {
            let mut rng = ScriptedRandom::new(samples.to_vec());
            assert_eq!(roll_extent(&policy, &mut rng), expected, "{:?}", samples);
        }
    }

    #[test]
    fn square_bias_copies_width() {
        let policy = ClumpPolicy::Continuous { factor: 4.0, square_bias: 0.5 };
        let mut rng = ScriptedRandom::new(vec![0.6, 0.2]);
        assert_eq!(roll_extent(&policy, &mut rng), (3, 3));
        let mut rng = ScriptedRandom::new(vec![0.6, 0.7, 0.1]);
        assert_eq!(roll_extent(&policy, &mut rng), (3, 1));
    }

    #[test]
    fn enormous_factor_falls_back_without_overflow() {
        let config = ArrayConfig {
            shape: ArrayShape::ClumpedGrid,
            array_width: 3,
            array_height: 3,
            monitor_size_factor: 1.0,
            clumping: ClumpPolicy::Continuous { factor: 1e10, square_bias: 0.0 },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let cells = partition(&config, &mut ScriptedRandom::new(vec![0.9])).unwrap();
        let fps: Vec<_> = cells.iter().map(|c| c.footprint).collect();
        assert_eq!(fps, uniform(3, 3));

        let widest = ClumpPolicy::Continuous { factor: f64::MAX, square_bias: 0.5 };
        for seed in 0..10 {
            let fps = clumped(4, 3, &widest, &mut seeded(seed));
            assert_exact_cover(&fps, 4, 3);
        }
    }

    #[test]
    fn zero_bias_draws_two_samples_per_roll() {
        let policy = ClumpPolicy::Continuous { factor: 3.0, square_bias: 0.0 };
        let mut rng = ScriptedRandom::new(vec![0.5, 0.1]);
        assert_eq!(roll_extent(&policy, &mut rng), (2, 1));
        assert_eq!(rng.drawn(), 2);
    }

    #[test]
    fn invalid_config_rejected_before_layout() {
        let config = ArrayConfig { array_width: 0, ..Default::default() };
        assert!(partition(&config, &mut seeded(0)).is_err());
    }
}
