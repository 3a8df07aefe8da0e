//! File sink

use crate::core::{LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-mode log file
///
/// Opened with create, append and read-write access (mode `0644` on Unix).
/// Every line goes straight to the file with a single `write_all`; there is
/// no buffering, so concurrent writers never see torn lines once the caller
/// serializes access.
#[derive(Debug)]
pub struct FileAppender {
    path: PathBuf,
    file: File,
}

impl FileAppender {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = Self::open_options()
            .open(&path)
            .map_err(|e| LoggerError::open(&path, e))?;

        Ok(Self { path, file })
    }

    fn open_options() -> OpenOptions {
        let mut options = OpenOptions::new();
        options.create(true).append(true).read(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        options
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one complete line, returning the number of bytes written
    pub fn append(&mut self, bytes: &[u8]) -> Result<usize> {
        self.file.write_all(bytes)?;
        Ok(bytes.len())
    }

    /// Flush file contents to disk and release the handle
    pub fn close(self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}
