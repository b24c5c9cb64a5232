//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The registry already left the uninitialized state
    #[error("Logger already initialized")]
    AlreadyInitialized,

    /// An operation needed an opened sink or a ready registry
    #[error("Logger not initialized")]
    NotInitialized,

    /// An allocation for an appender or event failed
    #[error("Out of memory")]
    OutOfMemory,

    /// Invalid appender configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// None of the configured appenders could be opened
    #[error("Failed to initialize logger: none of {attempted} appender(s) could be opened")]
    InitError { attempted: usize },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an initialization error after `attempted` appenders failed to open
    pub fn init(attempted: usize) -> Self {
        LoggerError::InitError { attempted }
    }

    /// Legacy status code for callers bridging to integer return values.
    ///
    /// JSON errors are configuration errors and share their code.
    pub fn code(&self) -> i32 {
        match self {
            LoggerError::AlreadyInitialized => -1,
            LoggerError::NotInitialized => -2,
            LoggerError::OutOfMemory => -3,
            LoggerError::InvalidConfiguration { .. } | LoggerError::JsonError(_) => -4,
            LoggerError::InitError { .. } => -5,
            LoggerError::IoOperation { .. } | LoggerError::IoError(_) => -6,
        }
    }

    /// Whether this error belongs to a single sink rather than the configuration
    pub fn is_io(&self) -> bool {
        matches!(self, LoggerError::IoOperation { .. } | LoggerError::IoError(_))
    }
}
