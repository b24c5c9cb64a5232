//! Appender registry and its lifecycle
//!
//! A [`Registry`] owns the opened appenders behind a single mutex. It moves
//! through `Uninitialized -> Initializing -> Ready -> Finalized`; the
//! transition to `Finalized` happens once and is final.

use super::appender::Appender;
use super::config::{validate_list, AppenderConfig};
use super::error::{LoggerError, Result};
use super::metrics::RegistryMetrics;
use parking_lot::{const_mutex, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    /// Appenders are being opened; only observable under the registry lock.
    Initializing,
    Ready,
    Finalized,
}

pub(crate) struct RegistryState {
    pub(crate) lifecycle: Lifecycle,
    pub(crate) appenders: Vec<Box<dyn Appender>>,
}

pub struct Registry {
    pub(crate) state: Mutex<RegistryState>,
    /// Set when an installation opened no appender; events are dropped
    /// until a later install succeeds.
    init_failed: AtomicBool,
    on_ready: Option<fn()>,
    pub(crate) metrics: RegistryMetrics,
}

impl Registry {
    pub const fn new() -> Self {
        Self::build(None)
    }

    /// Registry that calls `hook` every time it becomes ready.
    pub const fn with_ready_hook(hook: fn()) -> Self {
        Self::build(Some(hook))
    }

    const fn build(on_ready: Option<fn()>) -> Self {
        Self {
            state: const_mutex(RegistryState {
                lifecycle: Lifecycle::Uninitialized,
                appenders: Vec::new(),
            }),
            init_failed: AtomicBool::new(false),
            on_ready,
            metrics: RegistryMetrics::new(),
        }
    }

    /// Validate `configs` and open each appender in order.
    ///
    /// Appenders that fail to open are reported and left out. Fails with
    /// `InitError` when none could be opened, leaving the registry
    /// uninitialized.
    pub fn install(&self, configs: &[AppenderConfig]) -> Result<()> {
        let mut state = self.state.lock();
        self.install_locked(&mut state, configs)
    }

    pub(crate) fn install_locked(
        &self,
        state: &mut RegistryState,
        configs: &[AppenderConfig],
    ) -> Result<()> {
        if state.lifecycle != Lifecycle::Uninitialized {
            return Err(LoggerError::AlreadyInitialized);
        }
        validate_list(configs)?;

        state.lifecycle = Lifecycle::Initializing;
        let mut opened = Vec::with_capacity(configs.len());
        for (idx, config) in configs.iter().enumerate() {
            let mut appender = config.build();
            match appender.open() {
                Ok(()) => opened.push(appender),
                Err(e) => eprintln!(
                    "[LOGGER ERROR] Cannot open appender #{} ({}): {}",
                    idx,
                    appender.name(),
                    e
                ),
            }
        }

        if opened.is_empty() {
            state.lifecycle = Lifecycle::Uninitialized;
            self.init_failed.store(true, Ordering::Release);
            return Err(LoggerError::init(configs.len()));
        }

        state.appenders = opened;
        state.lifecycle = Lifecycle::Ready;
        self.init_failed.store(false, Ordering::Release);
        self.metrics.record_installation();
        if let Some(hook) = self.on_ready {
            hook();
        }
        Ok(())
    }

    /// Install the default console appender unless the registry is already
    /// ready. Returns whether the registry can accept events.
    pub fn ensure_initialized(&self) -> bool {
        let mut state = self.state.lock();
        self.ensure_ready_locked(&mut state)
    }

    pub(crate) fn ensure_ready_locked(&self, state: &mut RegistryState) -> bool {
        match state.lifecycle {
            Lifecycle::Ready => true,
            Lifecycle::Initializing | Lifecycle::Finalized => false,
            Lifecycle::Uninitialized => {
                if self.init_failed() {
                    return false;
                }
                eprintln!("[LOGGER] No configuration installed, using default console appender");
                match self.install_locked(state, &[AppenderConfig::default_console()]) {
                    Ok(()) => true,
                    Err(e) => {
                        eprintln!("[LOGGER ERROR] Default initialization failed: {}", e);
                        false
                    }
                }
            }
        }
    }

    /// Release every appender in registration order and mark the registry
    /// finalized. Further calls are no-ops.
    pub fn finalize(&self) {
        let mut state = self.state.lock();
        if state.lifecycle == Lifecycle::Finalized {
            return;
        }
        for (idx, appender) in state.appenders.iter_mut().enumerate() {
            if let Err(e) = appender.release() {
                eprintln!(
                    "[LOGGER ERROR] Error closing appender #{} ({}): {}",
                    idx,
                    appender.name(),
                    e
                );
            }
            self.metrics.record_released();
        }
        state.appenders.clear();
        state.lifecycle = Lifecycle::Finalized;
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lock().lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle() == Lifecycle::Ready
    }

    /// Whether the last installation attempt opened no appender
    pub fn init_failed(&self) -> bool {
        self.init_failed.load(Ordering::Acquire)
    }

    pub fn appender_count(&self) -> usize {
        self.state.lock().appenders.len()
    }

    /// Names of the active appenders, in registration order
    pub fn appender_names(&self) -> Vec<String> {
        self.state
            .lock()
            .appenders
            .iter()
            .map(|a| a.name().to_string())
            .collect()
    }

    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.finalize();
    }
}
