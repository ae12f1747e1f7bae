//! Minimal [log] backend writing to standard error, used by the binaries.
//!
//! Library code only talks to the `log` facade, applications are free to
//! install any other backend instead.

use log::{Level, LevelFilter, Log, Metadata, Record};

use std::{io::Write, time};

use crate::{Error, Result};

struct Logger {
    level: LevelFilter,
    start: time::Instant,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.start.elapsed();
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        writeln!(
            handle,
            "[{:>5}.{:06} {:<5} {}] {}",
            elapsed.as_secs(),
            elapsed.subsec_micros(),
            record.level(),
            record.target(),
            record.args()
        )
        .ok();
    }

    fn flush(&self) {
        std::io::stderr().flush().ok();
    }
}

/// Install the stderr logger, can be called only once per process.
pub fn init(level: LevelFilter) -> Result<()> {
    let logger = Logger {
        level,
        start: time::Instant::now(),
    };
    err_at!(Fatal, log::set_boxed_logger(Box::new(logger)))?;
    log::set_max_level(level);
    Ok(())
}

/// Map the number of `-v` flags to a level filter.
pub fn level_for(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => Level::Trace.to_level_filter(),
    }
}

#[cfg(test)]
#[path = "logger_test.rs"]
mod logger_test;
