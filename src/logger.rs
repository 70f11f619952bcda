//! Minimal stderr logger for the binaries and demos.
//!
//! The library itself only emits through the [`log`] facade; nothing is
//! printed unless a binary installs a logger. Each line carries the level,
//! seconds since the logger was installed, and the module path:
//!
//! ```text
//! INFO [0.002s] monitor_man::placement::array - built 9 monitors, array 5.00x2.81 units
//! ```

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Environment variable read by [`level_from_env`].
pub const LOG_ENV: &str = "MONITOR_MAN_LOG";

struct StderrLogger {
    start: Instant,
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr().lock(),
                "{} [{:.3}s] {} - {}",
                record.level(),
                self.start.elapsed().as_secs_f64(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| StderrLogger { start: Instant::now() });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
/// Unknown or missing values fall back to `default`.
pub fn parse_level(value: Option<&str>, default: LevelFilter) -> LevelFilter {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Level named by `MONITOR_MAN_LOG`, or `Info`.
pub fn level_from_env() -> LevelFilter {
    parse_level(std::env::var(LOG_ENV).ok().as_deref(), LevelFilter::Info)
}
