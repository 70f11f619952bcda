use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Polygon};
use nalgebra::{UnitQuaternion, Vector3};

use monitor_man::config::{ArrayConfig, ArrayShape, ClumpPolicy};
use monitor_man::control::{euler_error_degrees, BodyState};
use monitor_man::io::LayoutSummary;
use monitor_man::layout::seeded;
use monitor_man::logger;
use monitor_man::placement::{FrameSize, MonitorArray};
use monitor_man::sim::{settle, SettleConfig, SimMonitor};

fn main() -> eframe::Result {
    let _ = logger::init(logger::level_from_env());

    let config = ArrayConfig {
        shape: ArrayShape::ClumpedGrid,
        array_width: 12,
        array_height: 7,
        width_in_units: 12.0,
        monitor_size_factor: 0.92,
        clumping: ClumpPolicy::Nested { clump_chance: 0.6, large_chance: 0.3 },
        ..Default::default()
    };
    let app = match WallViz::new(config, 1920, 1080, 7) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Monitor Wall", options, Box::new(|_| Ok(Box::new(app))))
}

struct WallViz {
    array: MonitorArray<SimMonitor>,
    summary: LayoutSummary,
    root: Vector3<f64>,
    trajectory: Vec<BodyState>,
    seed: u64,
}

impl WallViz {
    fn new(config: ArrayConfig, width: u32, height: u32, seed: u64) -> Result<Self, monitor_man::Error> {
        let frame = FrameSize::new(width, height)?;
        let array = MonitorArray::build(config, frame, &mut seeded(seed), |_| SimMonitor::new())?;
        let mut app = Self {
            summary: LayoutSummary::from_monitors(array.monitors()),
            array,
            root: Vector3::zeros(),
            trajectory: Vec::new(),
            seed,
        };
        app.resettle()?;
        Ok(app)
    }

    /// Knock the largest monitor and record it settling back.
    fn resettle(&mut self) -> Result<(), monitor_man::Error> {
        let cfg = self.array.config();
        let Some(m) = self.array.monitors().iter().max_by_key(|m| m.cell.footprint.units()) else {
            self.trajectory.clear();
            return Ok(());
        };
        self.root = m.placement.position;
        let start = BodyState {
            time: 0.0,
            position: self.root + Vector3::new(0.6, -0.4, 0.5),
            velocity: Vector3::zeros(),
            rotation: UnitQuaternion::from_euler_angles(0.4, -0.3, 0.2),
            angular_velocity: Vector3::zeros(),
            mass: m.placement.mass,
        };
        let config = SettleConfig { dt: 0.02, max_time: 25.0 };
        self.trajectory = settle(start, self.root, cfg.positional_gains, cfg.rotational_gains, &config)?;
        Ok(())
    }

    fn reroll(&mut self) {
        self.seed += 1;
        let mut rng = seeded(self.seed);
        if let Err(e) = self.array.rebuild(&mut rng, |_| SimMonitor::new()) {
            log::error!("{}", e);
            return;
        }
        self.summary = LayoutSummary::from_monitors(self.array.monitors());
        if let Err(e) = self.resettle() {
            log::error!("{}", e);
        }
    }
}

impl eframe::App for WallViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("Seed {}", self.seed));
                if ui.button("Re-roll").clicked() {
                    self.reroll();
                }
            });
            ui.label(format!(
                "Monitors: {}  |  Clumps: {} (largest {}x{})  |  Coverage: {:.1} %  |  Mass: {:.1}",
                self.summary.monitors,
                self.summary.clumps,
                self.summary.largest_clump.0,
                self.summary.largest_clump.1,
                self.summary.coverage * 100.0,
                self.summary.total_mass,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            // Wall layout, in world units
            ui.vertical(|ui| {
                ui.label("Layout (world units)");
                Plot::new("layout")
                    .width(available.x - 8.0)
                    .height(half_h)
                    .data_aspect(1.0)
                    .show(ui, |plot_ui| {
                        for (i, m) in self.array.monitors().iter().enumerate() {
                            let half = m.placement.monitor_extent() / 2.0;
                            let c = m.placement.position;
                            let corners: PlotPoints = vec![
                                [c.x - half.x, c.y - half.y],
                                [c.x + half.x, c.y - half.y],
                                [c.x + half.x, c.y + half.y],
                                [c.x - half.x, c.y + half.y],
                            ]
                            .into();
                            plot_ui.polygon(Polygon::new(format!("monitor {}", i), corners));
                        }
                    });
            });

            let step = (self.trajectory.len() / 2000).max(1);
            let sampled: Vec<&BodyState> = self.trajectory.iter().step_by(step).collect();

            ui.horizontal(|ui| {
                // Position error vs Time
                ui.vertical(|ui| {
                    ui.label("Position error (units)");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [s.time, (s.position - self.root).norm()])
                        .collect();
                    Plot::new("position")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Error", points));
                        });
                });

                // Euler angles vs Time
                ui.vertical(|ui| {
                    ui.label("Attitude (deg)");
                    let angles: Vec<Vector3<f64>> =
                        sampled.iter().map(|s| euler_error_degrees(&s.rotation)).collect();
                    Plot::new("attitude")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            for (axis, name) in ["Roll", "Pitch", "Yaw"].into_iter().enumerate() {
                                let points: PlotPoints = sampled.iter()
                                    .zip(&angles)
                                    .map(|(s, e)| [s.time, e[axis]])
                                    .collect();
                                plot_ui.line(Line::new(name, points));
                            }
                        });
                });
            });
        });
    }
}
