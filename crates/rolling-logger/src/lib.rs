//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to stdout and to a size-capped
//! log file. When the active file would exceed its size limit it is renamed to
//! `<app>.log.1`, older backups shift up by one, and the oldest is dropped so
//! that at most `max_files` files exist on disk.
//!
//! Records emitted through the `log` crate are bridged into the same
//! subscriber.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing_subscriber::fmt::{self, time::ChronoLocal, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Errors raised while installing the logger
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to prepare log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a global logger is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Tunables for [`init_logger_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerOptions {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Size at which the active file is rotated
    pub max_file_bytes: u64,
    /// Total number of files kept, active file included
    pub max_files: usize,
    /// Mirror events to stdout
    pub stdout: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            max_file_bytes: 5 * 1024 * 1024,
            max_files: 5,
            stdout: true,
        }
    }
}

/// Initialize logging into `log_dir/<app_name>.log` with default options
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, LoggerOptions::default())
}

/// Initialize logging with explicit options
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    options: LoggerOptions,
) -> Result<(), LoggerError> {
    let writer = RollingWriter::open(
        log_dir.as_ref(),
        app_name,
        options.max_file_bytes,
        options.max_files,
    )?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.level));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_writer(writer.clone());

    let stdout_layer = options.stdout.then(|| {
        fmt::layer()
            .with_target(true)
            .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))?;

    info(&format!(
        "{} logging started at {}",
        app_name,
        chrono::Local::now().format(TIME_FORMAT)
    ));
    Ok(())
}

/// Emit an info event under the `app` target
pub fn info(message: &str) {
    tracing::info!(target: "app", "{}", message);
}

/// Emit a warning event under the `app` target
pub fn warn(message: &str) {
    tracing::warn!(target: "app", "{}", message);
}

/// Emit an error event under the `app` target
pub fn error(message: &str) {
    tracing::error!(target: "app", "{}", message);
}

/// Flush whatever `log`-crate backend is installed
pub fn flush() {
    log::logger().flush();
}

// ========================
// Rolling file writer
// ========================

struct RollingFile {
    dir: PathBuf,
    base_name: String,
    file: File,
    written: u64,
    max_bytes: u64,
    max_files: usize,
}

impl RollingFile {
    fn active_path(&self) -> PathBuf {
        self.dir.join(&self.base_name)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", self.base_name, index))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let backups = self.max_files.saturating_sub(1);

        if backups == 0 {
            // Only the active file is kept: truncate in place.
            self.file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(self.active_path())?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.backup_path(backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(self.active_path(), self.backup_path(1))?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.active_path())?;
        self.written = 0;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(buf.len())
    }
}

/// Shared handle to a rolling log file
///
/// Cheap to clone; every clone writes to the same file.
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl RollingWriter {
    /// Open (or create) `dir/<app_name>.log` in append mode
    pub fn open(
        dir: &Path,
        app_name: &str,
        max_bytes: u64,
        max_files: usize,
    ) -> Result<Self, LoggerError> {
        fs::create_dir_all(dir).map_err(|source| LoggerError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;

        let base_name = format!("{}.log", app_name);
        let path = dir.join(&base_name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggerError::Open {
                path: path.clone(),
                source,
            })?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            inner: Arc::new(Mutex::new(RollingFile {
                dir: dir.to_path_buf(),
                base_name,
                file,
                written,
                max_bytes: max_bytes.max(1),
                max_files: max_files.max(1),
            })),
        })
    }

    /// Path of the file currently written to
    pub fn active_path(&self) -> PathBuf {
        match self.inner.lock() {
            Ok(guard) => guard.active_path(),
            Err(poisoned) => poisoned.into_inner().active_path(),
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        guard.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_log_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("test.log"))
            .count()
    }

    #[test]
    fn test_writes_to_active_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::open(dir.path(), "test", 1024, 3).unwrap();

        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        let content = fs::read_to_string(dir.path().join("test.log")).unwrap();
        assert_eq!(content, "hello\n");
        assert_eq!(writer.active_path(), dir.path().join("test.log"));
    }

    #[test]
    fn test_rotates_when_size_exceeded() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::open(dir.path(), "test", 10, 3).unwrap();

        writer.write_all(b"first-line\n").unwrap();
        writer.write_all(b"second-line\n").unwrap();

        let active = fs::read_to_string(dir.path().join("test.log")).unwrap();
        let backup = fs::read_to_string(dir.path().join("test.log.1")).unwrap();
        assert_eq!(active, "second-line\n");
        assert_eq!(backup, "first-line\n");
    }

    #[test]
    fn test_keeps_at_most_max_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::open(dir.path(), "test", 4, 3).unwrap();

        for i in 0..10 {
            writer.write_all(format!("line{}\n", i).as_bytes()).unwrap();
        }

        assert_eq!(count_log_files(dir.path()), 3);
        let newest_backup = fs::read_to_string(dir.path().join("test.log.1")).unwrap();
        let oldest_backup = fs::read_to_string(dir.path().join("test.log.2")).unwrap();
        assert_eq!(newest_backup, "line8\n");
        assert_eq!(oldest_backup, "line7\n");
        assert!(!dir.path().join("test.log.3").exists());
    }

    #[test]
    fn test_single_file_truncates_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::open(dir.path(), "test", 6, 1).unwrap();

        writer.write_all(b"aaaaa\n").unwrap();
        writer.write_all(b"bbbbb\n").unwrap();

        assert_eq!(count_log_files(dir.path()), 1);
        let active = fs::read_to_string(dir.path().join("test.log")).unwrap();
        assert_eq!(active, "bbbbb\n");
    }

    #[test]
    fn test_reopen_appends_and_counts_existing_size() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut writer = RollingWriter::open(dir.path(), "test", 12, 2).unwrap();
            writer.write_all(b"previous\n").unwrap();
        }

        let mut writer = RollingWriter::open(dir.path(), "test", 12, 2).unwrap();
        writer.write_all(b"next\n").unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("test.log.1")).unwrap(),
            "previous\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("test.log")).unwrap(),
            "next\n"
        );
    }

    #[test]
    fn test_init_logger_bridges_log_records() {
        let dir = tempfile::tempdir().unwrap();
        let options = LoggerOptions {
            level: "info".to_string(),
            stdout: false,
            ..LoggerOptions::default()
        };
        init_logger_with(dir.path(), "bridge", options).unwrap();

        log::info!("from the log crate");
        info("from the helper");
        flush();

        let content = fs::read_to_string(dir.path().join("bridge.log")).unwrap();
        assert!(content.contains("bridge logging started"));
        assert!(content.contains("from the log crate"));
        assert!(content.contains("from the helper"));
    }
}
