//! Worker threads logging through the process-wide registry
//!
//! Appenders come from the command line, for example:
//!
//! ```text
//! cargo run --example worker_threads -- \
//!     -Dlogger.appender1.type=stdout -Dlogger.appender1.threshold=INFO \
//!     -Dlogger.appender2.type=file -Dlogger.appender2.filename=workers.log
//! ```
//!
//! Without any `-Dlogger.*` argument a default console appender is used.

use crossbeam_channel::{bounded, select, tick, Receiver};
use fanout_logger::{debug, error, info, warn};
use std::thread;
use std::time::Duration;

const WORKERS: usize = 4;
const RUN_TIME: Duration = Duration::from_secs(3);

fn worker(id: usize, stop: Receiver<()>) -> u64 {
    let ticker = tick(Duration::from_millis(100 + 25 * id as u64));
    let mut iteration = 0u64;

    info!("Worker {} started", id);
    loop {
        select! {
            recv(stop) -> _ => break,
            recv(ticker) -> _ => {
                iteration += 1;
                match iteration % 10 {
                    0 => error!("Worker {}: simulated failure at iteration {}", id, iteration),
                    3 | 7 => warn!("Worker {}: slow iteration {}", id, iteration),
                    5 => info!("Worker {}: checkpoint {}", id, iteration),
                    _ => debug!("Worker {}: iteration {}", id, iteration),
                }
            }
        }
    }
    info!("Worker {} stopping after {} iterations", id, iteration);
    iteration
}

fn main() -> fanout_logger::Result<()> {
    println!("=== Fanout Logger - Worker Threads Example ===\n");

    fanout_logger::setup_cmdline(std::env::args())?;
    fanout_logger::set_level_color(true);

    // Dropping the sender disconnects every receiver at once
    let (stop_tx, stop_rx) = bounded::<()>(0);
    let handles: Vec<_> = (0..WORKERS)
        .map(|id| {
            let stop = stop_rx.clone();
            thread::spawn(move || worker(id, stop))
        })
        .collect();

    info!("{} workers running for {:?}", WORKERS, RUN_TIME);
    thread::sleep(RUN_TIME);
    drop(stop_tx);

    let mut total = 0;
    for handle in handles {
        match handle.join() {
            Ok(iterations) => total += iterations,
            Err(_) => error!("A worker thread panicked"),
        }
    }
    info!("All workers finished, {} iterations in total", total);

    fanout_logger::finalize();

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
