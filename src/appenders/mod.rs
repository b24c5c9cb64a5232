//! Appender implementations

pub mod console;
pub mod file;

pub use console::ConsoleAppender;
pub use file::FileAppender;

// Re-export trait for convenience
pub use crate::core::Appender;

use crate::core::{backtrace::write_backtrace, format, FormatSpec, LogEvent, LogLevel};
use std::io::{self, Write};

/// Render `event` into `out`, followed by a stack trace for errors.
pub(crate) fn write_event(
    out: &mut dyn Write,
    spec: &FormatSpec,
    event: &LogEvent<'_>,
) -> io::Result<()> {
    spec.render_to(event, format::level_color_enabled(), &mut *out)?;
    if event.level == LogLevel::Error {
        write_backtrace(out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceLocation;

    #[test]
    fn test_write_event_plain() {
        let spec = FormatSpec::parse("%l %m");
        let event = LogEvent::new(
            LogLevel::Info,
            SourceLocation::new("a.rs", 1, "f"),
            format_args!("hi"),
        );
        let mut out = Vec::new();
        write_event(&mut out, &spec, &event).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("hi\n"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_write_event_error_appends_frames() {
        let spec = FormatSpec::parse("%m");
        let event = LogEvent::new(
            LogLevel::Error,
            SourceLocation::new("a.rs", 1, "f"),
            format_args!("failed"),
        );
        let mut out = Vec::new();
        write_event(&mut out, &spec, &event).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("failed"));
        assert!(lines.all(|l| l.starts_with('#')));
    }
}
