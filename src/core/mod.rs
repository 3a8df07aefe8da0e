//! Core logger types and traits

pub mod call_site;
pub mod config;
pub mod error;
pub mod filter;
pub mod header;
pub mod level_table;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use call_site::{CallSite, FixedFrame, FrameCapture, Origin, SourceFrames};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use filter::{FilterPolicy, LevelPolicy};
pub use header::{CallContext, Directive, HeaderTemplate};
pub use level_table::{LevelTable, Severity, DEFAULT_LEVELS};
pub use logger::{At, Logger, LoggerBuilder, DEFAULT_LEVEL};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
