//! Periodic sensor snapshot reporting
//!
//! A background thread that serializes the sensor store to JSON at a fixed
//! interval and writes it to the log, so operators can see the latest
//! readings without attaching a debugger to the store.

use can_sensor_listener::SensorStore;
use crossbeam_channel::{bounded, select, tick, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Handle to a running stats reporter thread
pub struct StatsReporter {
    shutdown: Sender<()>,
    thread: JoinHandle<()>,
}

impl StatsReporter {
    /// Spawn a reporter logging one snapshot every `interval`.
    pub fn spawn(store: Arc<SensorStore>, interval: Duration) -> Self {
        let (shutdown, shutdown_rx) = bounded::<()>(1);
        let thread = std::thread::spawn(move || {
            let ticker = tick(interval);
            loop {
                select! {
                    recv(ticker) -> _ => log_snapshot(&store),
                    recv(shutdown_rx) -> _ => break,
                }
            }
        });

        Self { shutdown, thread }
    }

    /// Stop the reporter and wait for its thread to exit.
    pub fn shutdown(self) {
        // Ignore a send failure; the thread is already gone then
        let _ = self.shutdown.send(());
        if self.thread.join().is_err() {
            log::warn!("Stats reporter thread panicked");
        }
    }
}

fn log_snapshot(store: &SensorStore) {
    match serde_json::to_string(&store.snapshot()) {
        Ok(json) => log::info!("Sensor snapshot: {}", json),
        Err(e) => log::warn!("Could not serialize sensor snapshot: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_shuts_down_promptly() {
        let store = Arc::new(SensorStore::new());
        let reporter = StatsReporter::spawn(Arc::clone(&store), Duration::from_secs(3600));

        let start = std::time::Instant::now();
        reporter.shutdown();
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
