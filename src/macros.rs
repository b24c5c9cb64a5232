//! Logging macros that capture the call site.
//!
//! Each macro records `file!()`, `line!()` and the enclosing function name,
//! then formats its arguments like `format!`. Without a `registry:` prefix
//! they log through the process-wide registry.
//!
//! # Examples
//!
//! ```no_run
//! use fanout_logger::{debug, info, warn, error};
//!
//! info!("Server started");
//!
//! let port = 8080;
//! debug!("Listening on port {}", port);
//! warn!("Retry attempt {} of {}", 3, 5);
//! error!("Failed to connect to database");
//! ```
//!
//! Targeting a specific registry:
//!
//! ```
//! use fanout_logger::{info, Registry};
//!
//! let registry = Registry::new();
//! registry.finalize();
//! info!(registry: registry, "dropped silently after finalize");
//! ```

/// Name of the enclosing function, e.g. `my_app::worker::run`.
#[doc(hidden)]
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// The current [`SourceLocation`](crate::core::SourceLocation).
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::core::SourceLocation::new(file!(), line!(), $crate::function_name!())
    };
}

/// Log at an explicit level through `registry`.
///
/// ```
/// # use fanout_logger::{LogLevel, Registry};
/// use fanout_logger::log;
/// let registry = Registry::new();
/// # registry.finalize();
/// log!(registry, LogLevel::Warning, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($registry:expr, $level:expr, $($arg:tt)+) => {
        $registry.log($level, $crate::source_location!(), format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    (registry: $registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::global(), $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    (registry: $registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::global(), $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    (registry: $registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Warning, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::global(), $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message. A backtrace follows the line in every
/// admitting appender.
#[macro_export]
macro_rules! error {
    (registry: $registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::LogLevel::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::global(), $crate::LogLevel::Error, $($arg)+)
    };
}
