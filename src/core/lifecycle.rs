//! Process-wide logging facility
//!
//! The free functions here operate on a single global [`Registry`]. The
//! first successful installation registers a process-exit hook that
//! finalizes the registry, so files are flushed and closed even when the
//! application never calls [`finalize`] itself.

use super::config::AppenderConfig;
use super::error::Result;
use super::log_event::SourceLocation;
#[cfg(unix)]
use super::log_event::{local_now_detached, LogEvent};
use super::log_level::LogLevel;
use super::registry::{Lifecycle, Registry};
use std::fmt;
use std::sync::Once;

static GLOBAL: Registry = Registry::with_ready_hook(register_exit_hook);

static EXIT_HOOK: Once = Once::new();

/// The process-wide registry.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Install the process-wide appenders. Must precede the first log call to
/// take effect; otherwise a default console appender is already in place.
pub fn install(configs: &[AppenderConfig]) -> Result<()> {
    GLOBAL.install(configs)
}

/// Lazily install the default console appender if nothing is configured.
pub fn ensure_initialized() -> bool {
    GLOBAL.ensure_initialized()
}

/// Release all process-wide appenders. Safe to call any number of times.
pub fn finalize() {
    GLOBAL.finalize();
}

pub fn lifecycle() -> Lifecycle {
    GLOBAL.lifecycle()
}

/// Log through the process-wide registry. Prefer the `debug!`, `info!`,
/// `warn!` and `error!` macros, which fill in the source location.
pub fn log(level: LogLevel, location: SourceLocation<'_>, args: fmt::Arguments<'_>) {
    GLOBAL.log(level, location, args);
}

fn register_exit_hook() {
    EXIT_HOOK.call_once(|| {
        #[cfg(unix)]
        {
            // SAFETY: finalize_at_exit is a plain extern "C" fn that never unwinds.
            if unsafe { libc::atexit(finalize_at_exit) } != 0 {
                eprintln!("[LOGGER WARNING] Cannot register exit hook; call finalize() explicitly");
            }
        }
    });
}

#[cfg(unix)]
extern "C" fn finalize_at_exit() {
    let _ = std::panic::catch_unwind(|| {
        if GLOBAL.lifecycle() != Lifecycle::Ready {
            return;
        }
        // The exiting thread's locals are already destroyed here.
        let event = LogEvent::at(
            local_now_detached(),
            LogLevel::Debug,
            SourceLocation::new(file!(), line!(), "fanout_logger::core::lifecycle::finalize_at_exit"),
            format_args!("Finalizing logger"),
        );
        GLOBAL.dispatch(&event);
    });
    let _ = std::panic::catch_unwind(|| GLOBAL.finalize());
}
