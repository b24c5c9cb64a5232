//! Registry metrics for observability
//!
//! Counters for monitoring the health of a registry: how many events were
//! fanned out or dropped, and how appender writes fared.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for registry observability
///
/// # Example
///
/// ```
/// use fanout_logger::core::RegistryMetrics;
///
/// let metrics = RegistryMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_write();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.events_dispatched(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct RegistryMetrics {
    /// Events that reached the fan-out loop
    events_dispatched: AtomicU64,

    /// Events dropped before fan-out (not ready, finalized, init failed)
    events_dropped: AtomicU64,

    /// Successful appender writes
    writes: AtomicU64,

    /// Appender writes that returned an error or panicked
    write_failures: AtomicU64,

    /// Successful transitions to the ready state
    installations: AtomicU64,

    /// Appenders released during finalize
    appenders_released: AtomicU64,
}

impl RegistryMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            events_dispatched: AtomicU64::new(0),
            events_dropped: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            installations: AtomicU64::new(0),
            appenders_released: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_dropped(&self) -> u64 {
        self.events_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn installations(&self) -> u64 {
        self.installations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn appenders_released(&self) -> u64 {
        self.appenders_released.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.events_dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write(&self) -> u64 {
        self.writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_installation(&self) -> u64 {
        self.installations.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_released(&self) -> u64 {
        self.appenders_released.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes as a percentage (0.0 - 100.0) of all attempted writes
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.writes() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }
}

impl Default for RegistryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RegistryMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            events_dispatched: AtomicU64::new(self.events_dispatched()),
            events_dropped: AtomicU64::new(self.events_dropped()),
            writes: AtomicU64::new(self.writes()),
            write_failures: AtomicU64::new(self.write_failures()),
            installations: AtomicU64::new(self.installations()),
            appenders_released: AtomicU64::new(self.appenders_released()),
        }
    }
}
