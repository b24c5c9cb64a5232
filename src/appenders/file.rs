//! File appender implementation

use super::write_event;
use crate::core::{Appender, FileConfig, FormatSpec, LogEvent, LogLevel, LoggerError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileAppender {
    path: PathBuf,
    label: String,
    threshold: LogLevel,
    format: FormatSpec,
    file: Option<File>,
}

impl FileAppender {
    /// Create an unopened appender for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            label: format!("file:{}", path.display()),
            path,
            threshold: LogLevel::Debug,
            format: FormatSpec::default(),
            file: None,
        }
    }

    pub fn from_config(config: &FileConfig) -> Self {
        let mut appender = Self::new(config.path.clone().unwrap_or_default());
        appender.threshold = config.threshold;
        if let Some(format) = config.format.as_deref() {
            appender.format = FormatSpec::parse(format);
        }
        appender
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl Appender for FileAppender {
    fn open(&mut self) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| {
            LoggerError::io_operation("opening log file", self.path.display().to_string(), e)
        })?;
        self.file = Some(file);
        Ok(())
    }

    fn append(&mut self, event: &LogEvent<'_>) -> Result<()> {
        let file = self.file.as_mut().ok_or(LoggerError::NotInitialized)?;
        // The record and its backtrace are staged and written in one call,
        // so a failed event leaves nothing behind for the next one.
        let mut record = Vec::with_capacity(256);
        write_event(&mut record, &self.format, event)?;
        file.write_all(&record)?;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        // Writes are unbuffered; dropping the handle closes the file.
        self.file.take();
        Ok(())
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn name(&self) -> &str {
        &self.label
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceLocation;
    use tempfile::TempDir;

    fn event(level: LogLevel, message: &str) -> LogEvent<'static> {
        LogEvent::new(
            level,
            SourceLocation::new("file.rs", 7, "tests::event"),
            format_args!("{}", message),
        )
    }

    #[test]
    fn test_open_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "stale contents\n").unwrap();

        let mut appender = FileAppender::new(&path);
        appender.open().unwrap();
        appender.release().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_append_writes_formatted_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let config = FileConfig {
            threshold: LogLevel::Info,
            format: Some("%l5|%m".to_string()),
            path: Some(path.clone()),
        };

        let mut appender = FileAppender::from_config(&config);
        assert_eq!(appender.threshold(), LogLevel::Info);
        appender.open().unwrap();
        appender.append(&event(LogLevel::Info, "first")).unwrap();
        appender.append(&event(LogLevel::Warning, "second")).unwrap();

        // Visible before release because each event is flushed.
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "INFO |first\nWARN |second\n");
        appender.release().unwrap();
    }

    #[test]
    fn test_error_event_followed_by_frames() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("err.log");
        let mut appender = FileAppender::from_config(&FileConfig {
            format: Some("%m".to_string()),
            path: Some(path.clone()),
            ..FileConfig::default()
        });
        appender.open().unwrap();
        appender.append(&event(LogLevel::Error, "bad")).unwrap();
        appender.release().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("bad"));
        assert!(lines.all(|l| l.starts_with('#')));
    }

    #[test]
    fn test_open_fails_for_missing_directory() {
        let dir = TempDir::new().unwrap();
        let mut appender = FileAppender::new(dir.path().join("missing").join("app.log"));
        let err = appender.open().unwrap_err();
        assert!(err.is_io());
        assert!(!appender.is_open());
    }

    #[test]
    fn test_append_before_open_fails() {
        let mut appender = FileAppender::new("never-opened.log");
        let err = appender.append(&event(LogLevel::Info, "x")).unwrap_err();
        assert!(matches!(err, LoggerError::NotInitialized));
    }

    #[test]
    fn test_release_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut appender = FileAppender::new(dir.path().join("app.log"));
        appender.release().unwrap();
        appender.open().unwrap();
        appender.release().unwrap();
        appender.release().unwrap();
        assert!(!appender.is_open());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_event_is_never_resent() {
        use std::ffi::CString;
        use std::io::Read;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let fifo = dir.path().join("sink.fifo");
        let c_path = CString::new(fifo.as_os_str().as_bytes()).unwrap();
        // SAFETY: c_path is a valid NUL-terminated path.
        assert_eq!(unsafe { libc::mkfifo(c_path.as_ptr(), 0o600) }, 0);

        // Opening the write end blocks until a reader arrives.
        let first_reader = {
            let fifo = fifo.clone();
            std::thread::spawn(move || drop(File::open(fifo).unwrap()))
        };
        let mut appender = FileAppender::from_config(&FileConfig {
            format: Some("%m".to_string()),
            path: Some(fifo.clone()),
            ..FileConfig::default()
        });
        appender.open().unwrap();
        first_reader.join().unwrap();

        // Nobody is reading: broken pipe
        let err = appender.append(&event(LogLevel::Info, "lost")).unwrap_err();
        assert!(err.is_io());

        let mut reader = File::open(&fifo).unwrap();
        appender.append(&event(LogLevel::Info, "next")).unwrap();
        appender.release().unwrap();

        let mut received = String::new();
        reader.read_to_string(&mut received).unwrap();
        assert_eq!(received, "next\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_reported() {
        let mut appender = FileAppender::new("/dev/full");
        appender.open().unwrap();
        let err = appender.append(&event(LogLevel::Info, "no space")).unwrap_err();
        assert!(err.is_io());
        // The next write fails on its own, without the earlier record.
        assert!(appender.append(&event(LogLevel::Info, "again")).is_err());
    }
}
