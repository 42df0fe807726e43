//! File logger
//!
//! The terminal belongs to the UI, so log records go to
//! `<data_dir>/rhetoric-cards/rhetoric-cards.log` instead of stderr.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

use crate::error::AppError;

pub const LOG_FILE_NAME: &str = "rhetoric-cards.log";

/// Appends one line per record: `<unix secs> LEVEL target: message`
pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    pub fn open(path: &Path, level: LevelFilter) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }
}

fn format_line(secs: u64, record: &Record) -> String {
    format!(
        "{} {:<5} {}: {}\n",
        secs,
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let line = format_line(secs, record);
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file logger as the global `log` backend
pub fn init(dir: &Path, level: LevelFilter) -> Result<(), AppError> {
    let logger = FileLogger::open(&dir.join(LOG_FILE_NAME), level)?;
    if let Err(e) = log::set_boxed_logger(Box::new(logger)) {
        return Err(AppError::Logger(e.to_string()));
    }
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use tempfile::tempdir;

    #[test]
    fn test_logger_filters_and_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join(LOG_FILE_NAME);
        let logger = FileLogger::open(&path, LevelFilter::Info).unwrap();

        let mut builder = Record::builder();
        builder.target("rhetoric_cards::export");
        builder.level(Level::Info);
        logger.log(&builder.args(format_args!("saved {}", 3)).build());
        builder.level(Level::Debug);
        logger.log(&builder.args(format_args!("hidden")).build());
        logger.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("INFO  rhetoric_cards::export: saved 3"));
        assert!(!content.contains("hidden"));
        assert_eq!(content.lines().count(), 1);
    }
}
