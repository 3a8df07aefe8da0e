//! Main logger implementation

use super::{
    call_site::{CallSite, FrameCapture, Origin, SourceFrames},
    error::{LoggerError, Result},
    filter::{FilterPolicy, LevelPolicy},
    header::{CallContext, Directive, HeaderTemplate},
    level_table::{LevelTable, Severity},
    metrics::LoggerMetrics,
    timestamp::TimestampFormat,
};
use crate::appenders::FileAppender;
use parking_lot::{Mutex, RwLock};
use std::fmt::{self, Display, Write as _};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Level used as the default threshold when none is configured
pub const DEFAULT_LEVEL: &str = "WARN";

/// Category-aware file logger
///
/// Every write goes through the same steps: the level is checked against the
/// category's threshold, the header template is rendered for the call site,
/// and header plus body are written to the file as one unit under the sink
/// lock.
///
/// # Concurrency
///
/// All methods take `&self` and the logger is `Send + Sync`. Only the sink is
/// serialized by the write lock. Level table, category overrides, default
/// threshold, header template and time format sit behind their own short-lived
/// locks; configure the logger before logging traffic starts. Reconfiguring
/// while other threads log is last-writer-wins, and a line in flight may see a
/// mix of old and new settings.
///
/// # Example
///
/// ```no_run
/// use category_logger::Logger;
///
/// let logger = Logger::open("/var/log/app.log")?;
/// logger.set_prefix("%t [%L] %c %f:%l ");
/// logger.set_category("db", "DEBUG")?;
///
/// logger.writef("db", "DEBUG", format_args!("pool size {}\n", 8))?;
/// logger.writeln("http", "ERROR", &[&"status", &503])?;
/// # Ok::<(), category_logger::LoggerError>(())
/// ```
pub struct Logger {
    path: PathBuf,
    sink: Mutex<Option<FileAppender>>,
    levels: RwLock<Arc<LevelTable>>,
    filter: RwLock<FilterPolicy>,
    prefix: RwLock<Arc<HeaderTemplate>>,
    time_format: RwLock<Arc<TimestampFormat>>,
    level_policy: LevelPolicy,
    frames: Box<dyn FrameCapture>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Open (or create) `path` for appending with the default configuration:
    /// default level table, `WARN` threshold, empty header, RFC 3339 time.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        LoggerBuilder::new().open(path)
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the logger currently has a usable sink
    pub fn is_open(&self) -> bool {
        self.sink.lock().is_some()
    }

    /// Release the sink. Closing an already closed logger reports
    /// [`LoggerError::SinkClosed`].
    pub fn close(&self) -> Result<()> {
        let sink = self.sink.lock().take();
        match sink {
            Some(sink) => sink.close(),
            None => Err(LoggerError::SinkClosed),
        }
    }

    /// Close the sink and open a fresh one at the same path.
    ///
    /// Intended for external rotation tools that rename the file away. If the
    /// new file cannot be opened the logger is left without a sink and later
    /// writes fail with [`LoggerError::SinkClosed`].
    pub fn reopen(&self) -> Result<()> {
        let mut sink = self.sink.lock();
        drop(sink.take());
        *sink = Some(FileAppender::open(&self.path)?);
        Ok(())
    }

    pub fn set_prefix(&self, template: impl Into<HeaderTemplate>) {
        *self.prefix.write() = Arc::new(template.into());
    }

    pub fn prefix(&self) -> Arc<HeaderTemplate> {
        self.prefix.read().clone()
    }

    pub fn set_time_format(&self, format: impl Into<TimestampFormat>) {
        *self.time_format.write() = Arc::new(format.into());
    }

    pub fn time_format(&self) -> Arc<TimestampFormat> {
        self.time_format.read().clone()
    }

    /// Replace the whole level table.
    ///
    /// Thresholds already set keep their numeric value; they are not
    /// re-resolved against the new table.
    pub fn set_level_map(&self, levels: impl Into<LevelTable>) {
        *self.levels.write() = Arc::new(levels.into());
    }

    pub fn level_table(&self) -> Arc<LevelTable> {
        self.levels.read().clone()
    }

    pub fn level_policy(&self) -> LevelPolicy {
        self.level_policy
    }

    /// Resolve `level` through the current table and use it as the threshold
    /// for categories without an override
    pub fn set_default_level(&self, level: &str) -> Result<()> {
        let threshold = self.resolve(level)?;
        self.filter.write().set_default_threshold(threshold);
        Ok(())
    }

    pub fn default_threshold(&self) -> Severity {
        self.filter.read().default_threshold()
    }

    /// Resolve `level` through the current table and store it as the
    /// threshold for `category` (exact name match)
    pub fn set_category(&self, category: impl Into<String>, level: &str) -> Result<()> {
        let threshold = self.resolve(level)?;
        self.filter.write().set_category(category, threshold);
        Ok(())
    }

    pub fn category_threshold(&self, category: &str) -> Option<Severity> {
        self.filter.read().category(category)
    }

    /// Whether a line at `level` in `category` would be written.
    ///
    /// Under [`LevelPolicy::Strict`] unknown level names are never printable.
    pub fn is_printable(&self, category: &str, level: &str) -> bool {
        match self.resolve(level) {
            Ok(severity) => self.filter.read().allows(category, severity),
            Err(_) => false,
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Pin the call site for the next write; used by the crate's macros
    pub fn at(&self, site: CallSite) -> At<'_> {
        At { logger: self, site }
    }

    /// Write a header followed by the formatted body.
    ///
    /// Returns the number of bytes written, or `Ok(0)` when the line is
    /// filtered out.
    #[track_caller]
    pub fn writef(&self, category: &str, level: &str, args: fmt::Arguments<'_>) -> Result<usize> {
        self.write_line(Origin::Caller(Location::caller()), category, level, |out| {
            let _ = out.write_fmt(args);
        })
    }

    /// Write a header followed by `args` joined with spaces and a newline
    #[track_caller]
    pub fn writeln(&self, category: &str, level: &str, args: &[&dyn Display]) -> Result<usize> {
        self.write_line(Origin::Caller(Location::caller()), category, level, |out| {
            join_line(out, args)
        })
    }

    /// Compose the same line as [`Logger::writef`] without writing it.
    ///
    /// Returns an empty string when the line is filtered out.
    #[track_caller]
    pub fn sprintf(&self, category: &str, level: &str, args: fmt::Arguments<'_>) -> String {
        self.format_line(Origin::Caller(Location::caller()), category, level, |out| {
            let _ = out.write_fmt(args);
        })
    }

    /// Compose the same line as [`Logger::writeln`] without writing it
    #[track_caller]
    pub fn sprintln(&self, category: &str, level: &str, args: &[&dyn Display]) -> String {
        self.format_line(Origin::Caller(Location::caller()), category, level, |out| {
            join_line(out, args)
        })
    }

    fn resolve(&self, level: &str) -> Result<Severity> {
        let levels = self.levels.read();
        self.level_policy.resolve(&levels, level)
    }

    /// Filter decision for one call. Runs before any call-site capture.
    fn admit(&self, category: &str, level: &str) -> Result<bool> {
        let severity = self.resolve(level)?;
        let printable = self.filter.read().allows(category, severity);
        if !printable {
            self.metrics.record_filtered();
        }
        Ok(printable)
    }

    fn compose<F>(&self, origin: Origin, category: &str, level: &str, body: F) -> String
    where
        F: FnOnce(&mut String),
    {
        let prefix = self.prefix();
        let mut site = self.frames.capture(origin);
        if let Origin::Caller(location) = origin {
            if site.function.is_empty() && prefix.uses(Directive::Function) {
                site.function = self.frames.function_name(location);
            }
        }
        let ctx = CallContext::now(site, category, level);
        let time_format = self.time_format();

        let mut line = String::new();
        prefix.render_into(&ctx, &time_format, &mut line);
        body(&mut line);
        line
    }

    fn write_line<F>(&self, origin: Origin, category: &str, level: &str, body: F) -> Result<usize>
    where
        F: FnOnce(&mut String),
    {
        if !self.admit(category, level)? {
            return Ok(0);
        }
        let line = self.compose(origin, category, level, body);
        self.emit(line.as_bytes())
    }

    fn format_line<F>(&self, origin: Origin, category: &str, level: &str, body: F) -> String
    where
        F: FnOnce(&mut String),
    {
        match self.admit(category, level) {
            Ok(true) => self.compose(origin, category, level, body),
            Ok(false) | Err(_) => String::new(),
        }
    }

    fn emit(&self, bytes: &[u8]) -> Result<usize> {
        let result = {
            let mut sink = self.sink.lock();
            match sink.as_mut() {
                Some(sink) => sink.append(bytes),
                None => Err(LoggerError::SinkClosed),
            }
        };

        match &result {
            Ok(written) => {
                self.metrics.record_written(*written);
            }
            Err(_) => {
                self.metrics.record_failure();
            }
        }
        result
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .field("prefix", &self.prefix().as_str())
            .field("level_policy", &self.level_policy)
            .finish_non_exhaustive()
    }
}

/// Operands separated by single spaces, terminated by a newline
fn join_line(out: &mut String, args: &[&dyn Display]) {
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", arg);
    }
    out.push('\n');
}

/// A logger bound to a call site captured by a macro
///
/// Created by [`Logger::at`]; offers the same four writes as [`Logger`].
#[derive(Clone, Copy)]
pub struct At<'a> {
    logger: &'a Logger,
    site: CallSite,
}

impl At<'_> {
    pub fn writef(&self, category: &str, level: &str, args: fmt::Arguments<'_>) -> Result<usize> {
        self.logger
            .write_line(Origin::Site(self.site), category, level, |out| {
                let _ = out.write_fmt(args);
            })
    }

    pub fn writeln(&self, category: &str, level: &str, args: &[&dyn Display]) -> Result<usize> {
        self.logger
            .write_line(Origin::Site(self.site), category, level, |out| {
                join_line(out, args)
            })
    }

    pub fn sprintf(&self, category: &str, level: &str, args: fmt::Arguments<'_>) -> String {
        self.logger
            .format_line(Origin::Site(self.site), category, level, |out| {
                let _ = out.write_fmt(args);
            })
    }

    pub fn sprintln(&self, category: &str, level: &str, args: &[&dyn Display]) -> String {
        self.logger
            .format_line(Origin::Site(self.site), category, level, |out| {
                join_line(out, args)
            })
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use category_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .prefix("%t %L [%c] ")
///     .time_format("%H:%M:%S")
///     .default_level("INFO")
///     .category("db", "DEBUG")
///     .open("/var/log/app.log")?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct LoggerBuilder {
    prefix: HeaderTemplate,
    time_format: TimestampFormat,
    levels: LevelTable,
    default_level: Option<String>,
    categories: Vec<(String, String)>,
    level_policy: LevelPolicy,
    frames: Box<dyn FrameCapture>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            prefix: HeaderTemplate::default(),
            time_format: TimestampFormat::default(),
            levels: LevelTable::default(),
            default_level: None,
            categories: Vec::new(),
            level_policy: LevelPolicy::default(),
            frames: Box::new(SourceFrames),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, template: impl Into<HeaderTemplate>) -> Self {
        self.prefix = template.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: impl Into<TimestampFormat>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Replace the level table used to resolve every level name
    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: impl Into<LevelTable>) -> Self {
        self.levels = levels.into();
        self
    }

    /// Default threshold by level name.
    ///
    /// Without this call the threshold is `WARN` from the default table.
    #[must_use = "builder methods return a new value"]
    pub fn default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = Some(level.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn category(mut self, category: impl Into<String>, level: impl Into<String>) -> Self {
        self.categories.push((category.into(), level.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_policy(mut self, policy: LevelPolicy) -> Self {
        self.level_policy = policy;
        self
    }

    /// Shorthand for `level_policy(LevelPolicy::Strict)`
    #[must_use = "builder methods return a new value"]
    pub fn strict_levels(self) -> Self {
        self.level_policy(LevelPolicy::Strict)
    }

    /// Replace how call sites are resolved
    #[must_use = "builder methods return a new value"]
    pub fn frame_capture<C: FrameCapture + 'static>(mut self, frames: C) -> Self {
        self.frames = Box::new(frames);
        self
    }

    /// Open the log file and build the Logger
    pub fn open(self, path: impl Into<PathBuf>) -> Result<Logger> {
        let default_threshold = match &self.default_level {
            Some(level) => self.level_policy.resolve(&self.levels, level)?,
            None => LevelTable::default().resolve(DEFAULT_LEVEL),
        };
        let mut filter = FilterPolicy::new(default_threshold);
        for (category, level) in self.categories {
            let threshold = self.level_policy.resolve(&self.levels, &level)?;
            filter.set_category(category, threshold);
        }

        let path = path.into();
        let sink = FileAppender::open(&path)?;

        Ok(Logger {
            path,
            sink: Mutex::new(Some(sink)),
            levels: RwLock::new(Arc::new(self.levels)),
            filter: RwLock::new(filter),
            prefix: RwLock::new(Arc::new(self.prefix)),
            time_format: RwLock::new(Arc::new(self.time_format)),
            level_policy: self.level_policy,
            frames: self.frames,
            metrics: LoggerMetrics::new(),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
