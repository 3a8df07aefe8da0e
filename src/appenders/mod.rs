//! Output sinks

pub mod file;

pub use file::FileAppender;
