//! Log event structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::fmt::{self, Write as _};

/// Capacity of the rendered message text, in bytes.
pub const MAX_MESSAGE_SIZE: usize = 1024;

// Thread-local cache for the rendered thread identifier
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[cfg(unix)]
fn current_thread_id() -> String {
    // SAFETY: pthread_self has no preconditions and cannot fail.
    let id = unsafe { libc::pthread_self() } as usize as u64;
    format!("{:016x}", id)
}

#[cfg(not(unix))]
fn current_thread_id() -> String {
    let debug = format!("{:?}", std::thread::current().id());
    let digits: String = debug.chars().filter(char::is_ascii_digit).collect();
    let id: u64 = digits.parse().unwrap_or(0);
    format!("{:016x}", id)
}

/// Get cached thread ID, computing and caching it on first access
pub(crate) fn thread_id() -> String {
    THREAD_ID_CACHE
        .try_with(|cache| {
            cache
                .borrow_mut()
                .get_or_insert_with(current_thread_id)
                .clone()
        })
        .unwrap_or_else(|_| current_thread_id())
}

/// Where a log call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation<'a> {
    pub file: &'a str,
    pub line: u32,
    pub function: &'a str,
}

impl<'a> SourceLocation<'a> {
    pub const fn new(file: &'a str, line: u32, function: &'a str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

/// One log call, alive only for the duration of its dispatch.
#[derive(Debug, Clone)]
pub struct LogEvent<'a> {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub location: SourceLocation<'a>,
    pub thread_id: String,
    pub message: String,
}

impl<'a> LogEvent<'a> {
    /// Build an event stamped with the current time and calling thread.
    pub fn new(level: LogLevel, location: SourceLocation<'a>, args: fmt::Arguments<'_>) -> Self {
        Self::at(Local::now(), level, location, args)
    }

    /// Build an event with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Local>,
        level: LogLevel,
        location: SourceLocation<'a>,
        args: fmt::Arguments<'_>,
    ) -> Self {
        Self {
            timestamp,
            level,
            location,
            thread_id: thread_id(),
            message: render_message(args),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Current local time without touching thread-local state.
///
/// `Local::now` caches time zone data per thread, which is unavailable once
/// the thread's locals have been destroyed (for example inside process-exit
/// handlers).
#[cfg(unix)]
pub(crate) fn local_now_detached() -> DateTime<Local> {
    use chrono::{FixedOffset, Offset, Utc};

    let utc = Utc::now();
    let secs = utc.timestamp() as libc::time_t;
    // SAFETY: an all-zero `tm` is a valid value for localtime_r to overwrite.
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    // SAFETY: both pointers are valid for the duration of the call.
    let converted = unsafe { !libc::localtime_r(&secs, &mut tm).is_null() };
    let offset = if converted {
        FixedOffset::east_opt(tm.tm_gmtoff as i32)
    } else {
        None
    };
    DateTime::from_naive_utc_and_offset(utc.naive_utc(), offset.unwrap_or_else(|| Utc.fix()))
}

/// `fmt::Write` sink that stops accepting text once `MAX_MESSAGE_SIZE` is
/// reached. The cut always lands on a char boundary.
struct BoundedWriter {
    buf: String,
}

impl fmt::Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = MAX_MESSAGE_SIZE - self.buf.len();
        if s.len() <= remaining {
            self.buf.push_str(s);
            return Ok(());
        }
        let mut cut = remaining;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf.push_str(&s[..cut]);
        // Abort formatting; nothing more fits.
        Err(fmt::Error)
    }
}

/// Format the caller's message, truncating silently at `MAX_MESSAGE_SIZE`.
pub fn render_message(args: fmt::Arguments<'_>) -> String {
    if let Some(s) = args.as_str() {
        if s.len() <= MAX_MESSAGE_SIZE {
            return s.to_string();
        }
    }
    let mut writer = BoundedWriter {
        buf: String::with_capacity(64),
    };
    // An Err here is either our own truncation or a failing Display impl;
    // both keep whatever was rendered so far.
    let _ = writer.write_fmt(args);
    writer.buf
}
