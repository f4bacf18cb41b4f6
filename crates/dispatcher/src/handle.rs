//! SinkHandle - manages a sink with isolated queue and worker task

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument, warn};

use contracts::{PoseRecord, RecordSink};
use observability::{record_record_dispatched, record_sink_queue_depth};

use crate::metrics::SinkMetrics;

/// Handle to a running sink worker
pub struct SinkHandle {
    /// Sink name
    name: String,
    /// Channel to send records to worker
    tx: mpsc::Sender<PoseRecord>,
    /// Shared metrics
    metrics: Arc<SinkMetrics>,
    /// Worker task handle
    worker_handle: JoinHandle<()>,
}

impl SinkHandle {
    /// Create a new SinkHandle and spawn the worker task
    pub fn spawn<S: RecordSink + Send + 'static>(sink: S, queue_capacity: usize) -> Self {
        let name = sink.name().to_string();
        let (tx, rx) = mpsc::channel(queue_capacity);
        let metrics = Arc::new(SinkMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker_name = name.clone();

        let worker_handle = tokio::spawn(async move {
            sink_worker(sink, rx, worker_metrics, worker_name).await;
        });

        Self {
            name,
            tx,
            metrics,
            worker_handle,
        }
    }

    /// Get sink name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Send a record to the sink (non-blocking)
    ///
    /// Returns true if sent, false if queue full (record dropped)
    pub fn try_send(&self, record: PoseRecord) -> bool {
        match self.tx.try_send(record) {
            Ok(()) => {
                // Update queue length approximation
                self.metrics.set_queue_len(self.tx.capacity());
                true
            }
            Err(mpsc::error::TrySendError::Full(r)) => {
                self.metrics.inc_dropped_count();
                warn!(
                    sink = %self.name,
                    kind = r.kind(),
                    timestamp = r.timestamp(),
                    "Queue full, record dropped"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!(sink = %self.name, "Sink worker closed unexpectedly");
                false
            }
        }
    }

    /// Shutdown the sink worker gracefully
    #[instrument(name = "sink_handle_shutdown", skip(self))]
    pub async fn shutdown(self) {
        // Drop sender to signal worker to stop
        drop(self.tx);
        // Wait for worker to finish
        if let Err(e) = self.worker_handle.await {
            error!(sink = %self.name, error = ?e, "Worker task panicked");
        }
        debug!(sink = %self.name, "SinkHandle shutdown complete");
    }
}

/// Worker task that consumes records and writes to the sink
#[instrument(
    name = "sink_worker_loop",
    skip(sink, rx, metrics),
    fields(sink = %name)
)]
async fn sink_worker<S: RecordSink>(
    mut sink: S,
    mut rx: mpsc::Receiver<PoseRecord>,
    metrics: Arc<SinkMetrics>,
    name: String,
) {
    debug!(sink = %name, "Sink worker started");

    while let Some(record) = rx.recv().await {
        // Update queue length
        metrics.set_queue_len(rx.len());
        record_sink_queue_depth(&name, rx.len());

        match sink.write(&record).await {
            Ok(()) => {
                metrics.inc_write_count();
                record_record_dispatched(&name, true);
            }
            Err(e) => {
                metrics.inc_failure_count();
                record_record_dispatched(&name, false);
                error!(
                    sink = %name,
                    kind = record.kind(),
                    timestamp = record.timestamp(),
                    error = %e,
                    "Write failed"
                );
                // Continue processing - don't crash on single failure
            }
        }
    }

    // Cleanup
    if let Err(e) = sink.flush().await {
        error!(sink = %name, error = %e, "Flush failed on shutdown");
    }
    if let Err(e) = sink.close().await {
        error!(sink = %name, error = %e, "Close failed on shutdown");
    }

    debug!(sink = %name, "Sink worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{AngleDelta, PoseError};
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::time::{sleep, Duration};

    fn delta_record(t: f64) -> PoseRecord {
        PoseRecord::AngleDelta(AngleDelta {
            timestamp_sec: t,
            joint: "left_elbow".to_string(),
            angle_diff_deg: 1.5,
        })
    }

    /// Mock sink for testing
    struct MockSink {
        name: String,
        write_count: Arc<AtomicU64>,
        should_fail: bool,
        delay_ms: u64,
    }

    impl RecordSink for MockSink {
        fn name(&self) -> &str {
            &self.name
        }

        async fn write(&mut self, _record: &PoseRecord) -> Result<(), PoseError> {
            if self.delay_ms > 0 {
                sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.should_fail {
                return Err(PoseError::sink_write(&self.name, "mock failure"));
            }
            self.write_count.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), PoseError> {
            Ok(())
        }

        async fn close(&mut self) -> Result<(), PoseError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sink_handle_basic() {
        let write_count = Arc::new(AtomicU64::new(0));
        let sink = MockSink {
            name: "test".to_string(),
            write_count: Arc::clone(&write_count),
            should_fail: false,
            delay_ms: 0,
        };

        let handle = SinkHandle::spawn(sink, 10);

        for i in 0..5 {
            assert!(handle.try_send(delta_record(i as f64)));
        }

        handle.shutdown().await;
        assert_eq!(write_count.load(Ordering::Relaxed), 5);
    }

    #[tokio::test]
    async fn test_sink_handle_queue_full() {
        let write_count = Arc::new(AtomicU64::new(0));
        let sink = MockSink {
            name: "slow".to_string(),
            write_count: Arc::clone(&write_count),
            should_fail: false,
            delay_ms: 100, // Slow sink
        };

        // Small queue capacity
        let handle = SinkHandle::spawn(sink, 2);

        // Send more than the queue can hold
        for i in 0..10 {
            handle.try_send(delta_record(i as f64));
        }

        // Some should have been dropped
        assert!(handle.metrics().dropped_count() > 0);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_sink_handle_failure_isolation() {
        let sink = MockSink {
            name: "failing".to_string(),
            write_count: Arc::new(AtomicU64::new(0)),
            should_fail: true,
            delay_ms: 0,
        };

        let handle = SinkHandle::spawn(sink, 10);

        for i in 0..3 {
            handle.try_send(delta_record(i as f64));
        }

        // Give the worker time to process
        sleep(Duration::from_millis(50)).await;

        // Should have recorded failures
        assert!(handle.metrics().failure_count() > 0);

        handle.shutdown().await;
    }
}
