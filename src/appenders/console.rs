//! Console appender implementation

use super::write_event;
use crate::core::{Appender, ConsoleConfig, FormatSpec, LogEvent, LogLevel, Result};
use std::io::{self, Write};

pub struct ConsoleAppender {
    threshold: LogLevel,
    format: FormatSpec,
    error_to_stderr: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            threshold: LogLevel::Debug,
            format: FormatSpec::default(),
            error_to_stderr: false,
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        let format = config
            .format
            .as_deref()
            .map(FormatSpec::parse)
            .unwrap_or_default();
        Self {
            threshold: config.threshold,
            format,
            error_to_stderr: config.error_to_stderr,
        }
    }

    /// Whether `level` goes to the error stream instead of stdout
    pub fn routes_to_stderr(&self, level: LogLevel) -> bool {
        self.error_to_stderr && level == LogLevel::Error
    }

    pub fn format(&self) -> &FormatSpec {
        &self.format
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    fn append(&mut self, event: &LogEvent<'_>) -> Result<()> {
        if self.routes_to_stderr(event.level) {
            let mut err = io::stderr().lock();
            write_event(&mut err, &self.format, event)?;
            err.flush()?;
        } else {
            let mut out = io::stdout().lock();
            write_event(&mut out, &self.format, event)?;
            out.flush()?;
        }
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
