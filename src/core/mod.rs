//! Core logger types and the dispatch engine

pub mod appender;
pub mod backtrace;
pub mod cmdline;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod lifecycle;
pub mod log_event;
pub mod log_level;
pub mod metrics;
pub mod registry;

pub use appender::Appender;
pub use self::backtrace::write_backtrace;
pub use cmdline::{parse_args, setup_cmdline, CMDLINE_PREFIX};
pub use config::{validate_list, AppenderConfig, ConsoleConfig, FileConfig, MAX_APPENDER_COUNT};
pub use error::{LoggerError, Result};
pub use format::{
    level_color_enabled, set_level_color, Directive, FormatSpec, Token, DEFAULT_MESSAGE_FORMAT,
    MAX_FIELD_WIDTH,
};
pub use lifecycle::{ensure_initialized, finalize, global, install, lifecycle, log};
pub use log_event::{render_message, LogEvent, SourceLocation, MAX_MESSAGE_SIZE};
pub use log_level::LogLevel;
pub use metrics::RegistryMetrics;
pub use registry::{Lifecycle, Registry};
