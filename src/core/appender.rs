//! Appender trait for log output destinations

use super::{error::Result, log_event::LogEvent, log_level::LogLevel};

/// Capability set shared by every output sink.
///
/// The registry only builds appenders from [`AppenderConfig`](super::AppenderConfig),
/// so the set of implementors is closed to the console and file sinks.
pub trait Appender: Send {
    /// Acquire the underlying sink.
    fn open(&mut self) -> Result<()>;

    /// Render `event` into the sink, followed by a backtrace for errors.
    fn append(&mut self, event: &LogEvent<'_>) -> Result<()>;

    /// Flush and close the sink. Safe to call on an unopened or released
    /// appender.
    fn release(&mut self) -> Result<()>;

    /// Minimum severity this appender emits.
    fn threshold(&self) -> LogLevel;

    fn name(&self) -> &str;
}
