//! First-use initialization under contention
//!
//! Many threads log into an unconfigured registry at the same moment.
//! Exactly one default console appender must be installed.

use fanout_logger::prelude::*;
use fanout_logger::debug;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;

#[test]
fn test_concurrent_first_use_installs_once() {
    let registry = Arc::new(Registry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Debug passes the default threshold, so every call is delivered
                debug!(registry: registry, "first use from thread {}", t);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.lifecycle(), Lifecycle::Ready);
    assert_eq!(registry.appender_count(), 1);
    assert_eq!(registry.appender_names(), vec!["stdout".to_string()]);
    assert_eq!(registry.metrics().installations(), 1);
    assert_eq!(registry.metrics().events_dispatched(), THREADS as u64);

    registry.finalize();
    assert_eq!(registry.lifecycle(), Lifecycle::Finalized);
}
