//! File-backed audit log writer.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use warfront_game::GameLogWriter;
use warfront_protocol::GameLog;

/// Appends game log records to a plain-text file, one line per record,
/// and echoes them to the console.
pub struct FileLogWriter {
    file: File,
}

impl FileLogWriter {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "audit log open");
        Ok(FileLogWriter { file })
    }
}

impl GameLogWriter for FileLogWriter {
    fn append(&mut self, log: &GameLog) -> std::io::Result<()> {
        let line = format!(
            "{} {}: {}",
            log.timestamp.format("%Y-%m-%d %H:%M:%S"),
            log.username,
            log.message
        );
        writeln!(self.file, "{line}")?;
        self.file.flush()?;
        println!("{line}");
        Ok(())
    }
}
