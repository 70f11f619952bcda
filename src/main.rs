use std::process::ExitCode;

use log::error;
use nalgebra::{UnitQuaternion, Vector3};

use monitor_man::config::{ArrayConfig, ArrayShape};
use monitor_man::control::{euler_error_degrees, BodyState};
use monitor_man::io::{csv, json, LayoutSummary};
use monitor_man::layout::seeded;
use monitor_man::logger;
use monitor_man::placement::{FrameSize, MonitorArray};
use monitor_man::sim::event::{detect, EventDetector, EventKind, OvershootDetector, SettledDetector};
use monitor_man::sim::{settle, step_array, SettleConfig, SimMonitor};

const USAGE: &str = "usage: monitor-man [CONFIG.toml] [--seed N] [--csv PATH] [--json PATH] [--settle-csv PATH]";

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    seed: u64,
    layout_csv: Option<String>,
    summary_json: Option<String>,
    settle_csv: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                let v = it.next().ok_or("--seed needs a value")?;
                args.seed = v.parse().map_err(|_| format!("bad seed: {}", v))?;
            }
            "--csv" => args.layout_csv = Some(it.next().ok_or("--csv needs a path")?),
            "--json" => args.summary_json = Some(it.next().ok_or("--json needs a path")?),
            "--settle-csv" => args.settle_csv = Some(it.next().ok_or("--settle-csv needs a path")?),
            "-h" | "--help" => return Err(USAGE.into()),
            _ if arg.starts_with("--") => return Err(format!("unknown option {}\n{}", arg, USAGE)),
            _ => args.config = Some(arg),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    let _ = logger::init(logger::level_from_env());

    let args = match parse_args() {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    // -----------------------------------------------------------------------
    // Array: default is a clumped 8x5 wall showing a 1080p stream
    // -----------------------------------------------------------------------
    let config = match &args.config {
        Some(path) => ArrayConfig::load(path)?,
        None => ArrayConfig {
            shape: ArrayShape::ClumpedGrid,
            array_width: 8,
            array_height: 5,
            width_in_units: 8.0,
            monitor_size_factor: 0.9,
            ..Default::default()
        },
    };
    let frame = FrameSize::new(1920, 1080)?;
    let mut rng = seeded(args.seed);
    let mut array = MonitorArray::build(config, frame, &mut rng, |_| SimMonitor::new())?;

    let summary = LayoutSummary::from_monitors(array.monitors());
    let config = array.config();
    let extent = config.world_extent(frame);

    // -----------------------------------------------------------------------
    // Print layout
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  MONITOR ARRAY — {}x{} {:?}, seed {}", config.array_width, config.array_height, config.shape, args.seed);
    println!("====================================================================");
    println!();
    println!("  Array Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Frame:         {:>5}x{:<5} px   World extent: {:>6.2} x {:<6.2} units",
        frame.width, frame.height, extent.x, extent.y
    );
    println!(
        "  Size factor:   {:>8.3}       Border:       {:>8.3} units",
        config.monitor_size_factor, config.border_size
    );
    println!(
        "  Monitors:      {:>8}       Clumps:       {:>8}   (largest {}x{})",
        summary.monitors, summary.clumps, summary.largest_clump.0, summary.largest_clump.1
    );
    println!(
        "  Coverage:      {:>7.1} %       Total mass:   {:>8.2}",
        summary.coverage * 100.0,
        summary.total_mass
    );
    println!();

    println!("  Monitors");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>4}  {:>7}  {:>5}  {:>8}  {:>8}  {:>7}  {:>7}  {:>9}",
        "#", "cell", "span", "x", "y", "w", "h", "crop px"
    );
    println!("  {}", "─".repeat(66));
    for (i, m) in array.monitors().iter().enumerate() {
        let fp = &m.cell.footprint;
        let p = &m.placement;
        println!(
            "  {:>4}  {:>3},{:<3}  {:>2}x{:<2}  {:>8.3}  {:>8.3}  {:>7.3}  {:>7.3}  {:>4}x{:<4}",
            i, fp.column, fp.row, fp.columns, fp.rows,
            p.position.x, p.position.y, p.scale.x, p.scale.y,
            p.crop.width, p.crop.height,
        );
    }
    println!();

    if let Some(path) = &args.layout_csv {
        csv::write_layout_file(path, array.monitors())?;
        println!("  Layout written to {}", path);
    }
    if let Some(path) = &args.summary_json {
        json::write_summary_file(path, array.config(), &summary)?;
        println!("  Summary written to {}", path);
    }

    // -----------------------------------------------------------------------
    // Settle demo: knock the largest monitor off its root and let it recover
    // -----------------------------------------------------------------------
    let Some(target) = array
        .monitors()
        .iter()
        .max_by_key(|m| m.cell.footprint.units())
        .map(|m| (m.placement.position, m.placement.mass))
    else {
        return Ok(());
    };
    let (root, mass) = target;

    let start = BodyState {
        time: 0.0,
        position: root + Vector3::new(0.4, -0.25, 0.3),
        velocity: Vector3::zeros(),
        rotation: UnitQuaternion::from_euler_angles(0.3, -0.2, 0.25),
        angular_velocity: Vector3::zeros(),
        mass,
    };
    let settle_config = SettleConfig { dt: 0.02, max_time: 30.0 };
    let cfg = array.config();
    let trajectory = settle(start, root, cfg.positional_gains, cfg.rotational_gains, &settle_config)?;

    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(OvershootDetector { root }),
        Box::new(SettledDetector::new(root, 1e-3, 0.1)),
    ];
    let events = detect(&trajectory, &mut detectors);

    println!("  Settle Events (mass {:.2}, dt={} s)", mass, settle_config.dt);
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &events {
        match &e.kind {
            EventKind::Overshoot { axis } => {
                println!("  OVERSHOOT  t={:>6.2}s   axis {}", e.time, ["x", "y", "z"][*axis])
            }
            EventKind::Settled => println!("  SETTLED    t={:>6.2}s", e.time),
        }
    }
    if !events.iter().any(|e| e.kind == EventKind::Settled) {
        println!("  (not settled within {:.0} s)", settle_config.max_time);
    }
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>10}  {:>9}  {:>8}  {:>8}  {:>8}",
        "t (s)", "error", "speed", "roll", "pitch", "yaw"
    );
    println!("  {}", "─".repeat(60));
    let sample_interval = (trajectory.len() / 20).max(1);
    for (i, s) in trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != trajectory.len() - 1 {
            continue;
        }
        let e = euler_error_degrees(&s.rotation);
        println!(
            "  {:>7.2}  {:>10.2e}  {:>9.4}  {:>8.3}  {:>8.3}  {:>8.3}",
            s.time,
            (s.position - root).norm(),
            s.velocity.norm(),
            e.x, e.y, e.z
        );
    }
    println!();

    if let Some(path) = &args.settle_csv {
        csv::write_settle_file(path, &trajectory)?;
        println!("  Trajectory written to {}", path);
    }

    // A few ticks of the live loop: show a frame, correct, integrate.
    let source = StillFrame(0, frame);
    for _ in 0..50 {
        array.display(&source);
        step_array(&mut array, settle_config.dt)?;
    }
    let drift = array
        .monitors()
        .iter()
        .map(|m| (m.instance.body.state.position - m.placement.position).norm())
        .fold(0.0_f64, f64::max);
    println!("  Live loop: 50 ticks, max drift {:.2e} units", drift);

    println!("  Simulation: {} steps, dt={} s", trajectory.len(), settle_config.dt);
    println!("====================================================================");
    println!();
    Ok(())
}

/// A frame source that always has the same frame.
struct StillFrame(u64, FrameSize);

impl monitor_man::placement::FrameSource for StillFrame {
    type Frame = u64;

    fn frame_size(&self) -> FrameSize {
        self.1
    }

    fn current_frame(&self) -> Option<&u64> {
        Some(&self.0)
    }
}
