//! # Fanout Logger
//!
//! A process-wide logging facility that dispatches each event to a small,
//! fixed set of appenders, each with its own severity threshold and message
//! format.
//!
//! ## Features
//!
//! - **Thread Safe**: events are fanned out under one lock, so every
//!   appender observes the same global order
//! - **Multiple Appenders**: up to 16 console and file sinks
//! - **Format Mini-Language**: `%t %l14 %p %f30 %c25 %m` style layouts
//! - **Lazy Setup**: the first log call installs a default console appender
//! - **Graceful Failure**: a broken sink is reported, never fatal
//!
//! ## Example
//!
//! ```no_run
//! use fanout_logger::{info, error, AppenderConfig, LogLevel};
//!
//! fanout_logger::install(&[
//!     AppenderConfig::stdout().threshold(LogLevel::Info),
//!     AppenderConfig::file("app.log").format("%t %l5 %m"),
//! ])
//! .expect("logger configuration");
//!
//! info!("Server listening on port {}", 8080);
//! error!("Lost connection to {}", "db-1");
//!
//! fanout_logger::finalize();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        Appender, AppenderConfig, ConsoleConfig, FileConfig, FormatSpec, Lifecycle, LogEvent,
        LogLevel, LoggerError, Registry, RegistryMetrics, Result, SourceLocation,
        DEFAULT_MESSAGE_FORMAT,
    };
}

pub use crate::appenders::{ConsoleAppender, FileAppender};
pub use crate::core::{
    ensure_initialized, finalize, global, install, lifecycle, log, set_level_color,
    setup_cmdline, Appender, AppenderConfig, ConsoleConfig, FileConfig, FormatSpec, Lifecycle,
    LogEvent, LogLevel, LoggerError, Registry, RegistryMetrics, Result, SourceLocation,
    DEFAULT_MESSAGE_FORMAT, MAX_APPENDER_COUNT, MAX_MESSAGE_SIZE,
};
