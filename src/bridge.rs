//! Adapter for the [`log`] facade
//!
//! Records from `log::info!` and friends become lines in a [`Logger`]: the
//! record target is the category, and the level name is the upper-case
//! `log` level (`ERROR`, `WARN`, `INFO`, `DEBUG`, `TRACE`). `TRACE` is not in
//! the default level table; add it with [`Logger::set_level_map`] to filter it.

use crate::core::{CallSite, Logger};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::Arc;

pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Register as the global `log` backend. This should only be called once per program.
    pub fn install(logger: Arc<Logger>) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(logger)))?;
        log::set_max_level(LevelFilter::Trace);
        Ok(())
    }

    fn site(record: &Record<'_>) -> CallSite {
        CallSite::new(
            0,
            record.file_static().unwrap_or(""),
            record.line().unwrap_or(0),
            record.module_path_static().unwrap_or(""),
        )
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.logger
            .is_printable(metadata.target(), metadata.level().as_str())
    }

    fn log(&self, record: &Record<'_>) {
        // Errors have nowhere to go from here
        let _ = self.logger.at(Self::site(record)).writef(
            record.target(),
            record.level().as_str(),
            format_args!("{}\n", record.args()),
        );
    }

    // Lines go straight to the file
    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use tempfile::TempDir;

    fn bridge(dir: &TempDir) -> LogBridge {
        let logger = Logger::open(dir.path().join("bridge.log")).expect("Failed to open");
        logger.set_prefix("%L %c %F:%l ");
        LogBridge::new(Arc::new(logger))
    }

    #[test]
    fn test_enabled_follows_filter() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let bridge = bridge(&temp_dir);
        bridge.logger().set_category("net", "DEBUG").expect("known level");

        let meta = |target: &'static str, level: Level| {
            Metadata::builder().target(target).level(level).build()
        };
        assert!(bridge.enabled(&meta("app", Level::Error)));
        assert!(!bridge.enabled(&meta("app", Level::Info)));
        assert!(bridge.enabled(&meta("net", Level::Debug)));
    }

    #[test]
    fn test_record_written_with_location() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let bridge = bridge(&temp_dir);

        bridge.log(
            &Record::builder()
                .args(format_args!("refused {}", 3))
                .level(Level::Warn)
                .target("net")
                .file_static(Some("src/net.rs"))
                .line(Some(17))
                .build(),
        );
        bridge.log(
            &Record::builder()
                .args(format_args!("hidden"))
                .level(Level::Info)
                .target("net")
                .build(),
        );
        bridge.flush();

        let content =
            std::fs::read_to_string(bridge.logger().path()).expect("Failed to read log file");
        assert_eq!(content, "WARN net src/net.rs:17 refused 3\n");
    }
}
