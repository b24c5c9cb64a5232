//! Event dispatch: fan one event out to every admitting appender
//!
//! The registry lock is held for the whole fan-out, so every appender sees
//! events in the same global order and no two events interleave.

use super::log_event::{LogEvent, SourceLocation};
use super::log_level::LogLevel;
use super::registry::Registry;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Registry {
    /// Log a message at `level` from `location`.
    ///
    /// Never fails: events are dropped silently when the registry has not
    /// been (and cannot be) initialized, or after finalize. Appender write
    /// failures are reported on stderr together with the message text.
    pub fn log(&self, level: LogLevel, location: SourceLocation<'_>, args: fmt::Arguments<'_>) {
        if self.init_failed() {
            self.metrics.record_dropped();
            return;
        }
        let event = LogEvent::new(level, location, args);
        self.dispatch(&event);
    }

    /// Deliver a prepared event. Returns the number of appenders that
    /// wrote it successfully.
    ///
    /// Never inlined: stack traces for error events start after this frame.
    #[inline(never)]
    pub fn dispatch(&self, event: &LogEvent<'_>) -> usize {
        let mut state = self.state.lock();
        if !self.ensure_ready_locked(&mut state) {
            self.metrics.record_dropped();
            return 0;
        }
        self.metrics.record_dispatched();

        let mut delivered = 0;
        for (idx, appender) in state.appenders.iter_mut().enumerate() {
            if !appender.threshold().admits(event.level) {
                continue;
            }

            // Per-appender panic isolation: one broken sink never silences the rest
            let result = catch_unwind(AssertUnwindSafe(|| appender.append(event)));
            match result {
                Ok(Ok(())) => {
                    delivered += 1;
                    self.metrics.record_write();
                }
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Error writing message to appender #{} ({}): {}",
                        idx,
                        appender.name(),
                        e
                    );
                    eprintln!("{}", event.message);
                    self.metrics.record_write_failure();
                }
                Err(panic) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} ({}) panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        appender.name(),
                        panic_message(panic.as_ref())
                    );
                    eprintln!("{}", event.message);
                    self.metrics.record_write_failure();
                }
            }
        }
        delivered
    }

    #[inline]
    pub fn debug(&self, location: SourceLocation<'_>, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, location, args);
    }

    #[inline]
    pub fn info(&self, location: SourceLocation<'_>, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, location, args);
    }

    #[inline]
    pub fn warning(&self, location: SourceLocation<'_>, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warning, location, args);
    }

    #[inline]
    pub fn error(&self, location: SourceLocation<'_>, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, location, args);
    }
}
