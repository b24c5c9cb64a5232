//! Appender configuration from command-line arguments
//!
//! Recognised arguments have the form
//! `-Dlogger.appender<N>.<key>=<value>`, with `N` in `1..=16` and `key` one
//! of `type`, `format`, `threshold`, `filename`, `error_to_stderr`:
//!
//! ```text
//! app -Dlogger.appender1.type=stdout -Dlogger.appender1.threshold=INFO \
//!     -Dlogger.appender2.type=file -Dlogger.appender2.filename=app.log
//! ```
//!
//! Anything else on the command line is ignored.

use super::config::{AppenderConfig, ConsoleConfig, FileConfig, MAX_APPENDER_COUNT};
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::registry::{Lifecycle, Registry};
use std::path::PathBuf;

pub const CMDLINE_PREFIX: &str = "-Dlogger.appender";

#[derive(Debug, Default, Clone)]
struct RawAppender {
    kind: Option<String>,
    format: Option<String>,
    threshold: Option<String>,
    filename: Option<String>,
    error_to_stderr: Option<String>,
}

impl RawAppender {
    fn set(&mut self, key: &str, value: &str) {
        let slot = match key {
            "type" => &mut self.kind,
            "format" => &mut self.format,
            "threshold" => &mut self.threshold,
            "filename" => &mut self.filename,
            "error_to_stderr" => &mut self.error_to_stderr,
            _ => return,
        };
        *slot = Some(value.to_string());
    }

    fn into_config(self, number: usize) -> Result<AppenderConfig> {
        let threshold = self
            .threshold
            .as_deref()
            .map_or(LogLevel::Debug, LogLevel::parse_threshold);
        match self.kind.as_deref() {
            Some("stdout") => Ok(AppenderConfig::Stdout(ConsoleConfig {
                threshold,
                format: self.format,
                error_to_stderr: self.error_to_stderr.as_deref() == Some("true"),
            })),
            Some("file") => Ok(AppenderConfig::File(FileConfig {
                threshold,
                format: self.format,
                path: self.filename.map(PathBuf::from),
            })),
            other => Err(LoggerError::config(
                format!("appender #{}", number),
                format!("wrong appender type '{}'", other.unwrap_or_default()),
            )),
        }
    }
}

/// Split `<N>.<key>=<value>` (the text after the prefix).
fn split_argument(rest: &str) -> Option<(usize, &str, &str)> {
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let number: usize = rest[..digits].parse().ok()?;
    if number == 0 || number > MAX_APPENDER_COUNT {
        return None;
    }
    let (key, value) = rest[digits..].strip_prefix('.')?.split_once('=')?;
    Some((number, key, value))
}

/// Build appender configurations from command-line arguments.
///
/// Appenders are numbered from 1 and collected until the first number
/// without a `type`. With no appender defined, the default console
/// appender is returned.
pub fn parse_args<I, S>(args: I) -> Result<Vec<AppenderConfig>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut raw = vec![RawAppender::default(); MAX_APPENDER_COUNT];
    for arg in args {
        let Some(rest) = arg.as_ref().strip_prefix(CMDLINE_PREFIX) else {
            continue;
        };
        if let Some((number, key, value)) = split_argument(rest) {
            raw[number - 1].set(key, value);
        }
    }

    let mut configs = Vec::new();
    for (idx, appender) in raw.into_iter().enumerate() {
        if appender.kind.is_none() {
            break;
        }
        configs.push(appender.into_config(idx + 1)?);
    }

    if configs.is_empty() {
        eprintln!("[LOGGER] No appenders defined - using default one");
        configs.push(AppenderConfig::default_console());
    }
    Ok(configs)
}

impl Registry {
    /// Parse command-line arguments and install the resulting appenders.
    pub fn install_from_args<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.lifecycle() != Lifecycle::Uninitialized {
            return Err(LoggerError::AlreadyInitialized);
        }
        let configs = parse_args(args)?;
        self.install(&configs)
    }
}

/// Configure the process-wide registry from command-line arguments,
/// typically `std::env::args()`.
pub fn setup_cmdline<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    super::lifecycle::global().install_from_args(args)
}
