//! # Category Logger
//!
//! A small file logger that filters lines by category and level and prefixes
//! each line with a header rendered from a template.
//!
//! ## Features
//!
//! - **Category Filtering**: per-category thresholds over a default threshold
//! - **Custom Levels**: any name-to-severity table, smaller is more severe
//! - **Header Templates**: `%t %L %c %f:%l %m` style line prefixes
//! - **Thread Safe**: lines are written whole under a single lock
//! - **Reopen**: cooperates with external log rotation tools
//!
//! ```no_run
//! use category_logger::prelude::*;
//!
//! let logger = Logger::open("/var/log/app.log")?;
//! logger.set_prefix("%t [%L] %c: ");
//! logger.set_category("db", "DEBUG")?;
//!
//! logger.writef("db", "DEBUG", format_args!("query took {}ms\n", 12))?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
#[cfg(feature = "log-bridge")]
pub mod bridge;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::FileAppender;
    pub use crate::core::{
        CallSite, FrameCapture, HeaderTemplate, LevelPolicy, LevelTable, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Result, Severity, TimestampFormat,
    };
    pub use crate::{logf, logln, slogf, slogln};
}

pub use appenders::FileAppender;
#[cfg(feature = "log-bridge")]
pub use bridge::LogBridge;
pub use core::{
    At, CallContext, CallSite, Directive, FilterPolicy, FixedFrame, FrameCapture, HeaderTemplate,
    LevelPolicy, LevelTable, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    Origin, Result, Severity, SourceFrames, TimestampFormat, DEFAULT_LEVEL, DEFAULT_LEVELS,
};
