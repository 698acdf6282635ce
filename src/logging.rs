//! Minimal stderr backend for the `log` facade, used by the CLI.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Writes `LEVEL file:line - message` lines to stderr.
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    fn format(record: &Record) -> String {
        format!(
            "{} {}:{} - {}",
            record.level(),
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        )
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {
        std::io::stderr().flush().ok();
    }
}

/// Install the stderr logger: debug output when `verbose`, warnings otherwise.
///
/// Only the first call per process takes effect.
pub fn init_logger(verbose: bool) {
    static VERBOSE: StderrLogger = StderrLogger::new(LevelFilter::Debug);
    static QUIET: StderrLogger = StderrLogger::new(LevelFilter::Warn);

    let (logger, level) = if verbose {
        (&VERBOSE, LevelFilter::Debug)
    } else {
        (&QUIET, LevelFilter::Warn)
    };

    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}
