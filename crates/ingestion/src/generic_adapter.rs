//! Generic source adapter
//!
//! Adapts any `PoseSource` implementation to the `SourceAdapter`
//! interface, so the pipeline handles mock and real detector backends the
//! same way.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_channel::Sender;
use contracts::{PoseCallback, PoseFrame, PoseSource};
use tracing::{debug, trace};

use crate::adapter::{send_frame, SourceAdapter};
use crate::config::{BackpressureConfig, IngestionMetrics};

/// Generic source adapter
pub struct GenericSourceAdapter {
    source_id: String,
    source: Box<dyn PoseSource>,
    config: BackpressureConfig,
    listening: Arc<AtomicBool>,
}

impl GenericSourceAdapter {
    /// Create a new generic adapter
    pub fn new(source_id: String, source: Box<dyn PoseSource>, config: BackpressureConfig) -> Self {
        Self {
            source_id,
            source,
            config,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl SourceAdapter for GenericSourceAdapter {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn start(&self, tx: Sender<PoseFrame>, metrics: Arc<IngestionMetrics>) {
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }

        let source_id = self.source_id.clone();
        let drop_policy = self.config.drop_policy;
        let listening = self.listening.clone();

        debug!(source_id = %source_id, "starting generic adapter");

        let callback: PoseCallback = Arc::new(move |frame| {
            if !listening.load(Ordering::Relaxed) {
                return;
            }

            metrics.record_received();
            if frame.is_empty() {
                metrics.record_empty();
            }
            trace!(source_id = %source_id, timestamp = frame.timestamp, "adapter received frame");
            send_frame(&tx, frame, &metrics, &source_id, drop_policy);
        });

        self.source.listen(callback);
    }

    fn stop(&self) {
        if self.listening.swap(false, Ordering::SeqCst) {
            debug!(source_id = %self.source_id, "stopping generic adapter");
            self.source.stop();
        }
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DropPolicy;
    use async_channel::bounded;
    use contracts::Landmark;
    use std::time::Duration;

    /// Thread-backed source producing a short fixed frame sequence
    struct TestPoseSource {
        source_id: String,
        listening: Arc<AtomicBool>,
    }

    impl TestPoseSource {
        fn new(source_id: &str) -> Self {
            Self {
                source_id: source_id.to_string(),
                listening: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    impl PoseSource for TestPoseSource {
        fn source_id(&self) -> &str {
            &self.source_id
        }

        fn listen(&self, callback: PoseCallback) {
            if self.listening.swap(true, Ordering::SeqCst) {
                return;
            }

            let listening = self.listening.clone();

            std::thread::spawn(move || {
                let mut frame_idx = 0u64;
                while listening.load(Ordering::Relaxed) && frame_idx < 50 {
                    let timestamp = frame_idx as f64 * 0.033;
                    let frame = PoseFrame::from_landmarks(
                        timestamp,
                        vec![Landmark::planar(0, 100.0, 100.0)],
                    );
                    callback(frame);
                    frame_idx += 1;
                    std::thread::sleep(Duration::from_millis(2));
                }
            });
        }

        fn stop(&self) {
            self.listening.store(false, Ordering::SeqCst);
        }

        fn is_listening(&self) -> bool {
            self.listening.load(Ordering::Relaxed)
        }
    }

    #[test]
    fn test_generic_adapter_forwards_frames() {
        let source = TestPoseSource::new("test");
        let adapter = GenericSourceAdapter::new(
            "test".to_string(),
            Box::new(source),
            BackpressureConfig {
                channel_capacity: 100,
                drop_policy: DropPolicy::DropNewest,
            },
        );

        let (tx, rx) = bounded(100);
        let metrics = Arc::new(IngestionMetrics::new());

        adapter.start(tx, metrics.clone());
        assert!(adapter.is_listening());

        std::thread::sleep(Duration::from_millis(50));

        adapter.stop();
        assert!(!adapter.is_listening());

        let mut count = 0u64;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert!(count > 0);
        assert_eq!(metrics.snapshot().frames_received, count);
    }

    #[test]
    fn test_start_is_idempotent() {
        let adapter = GenericSourceAdapter::new(
            "test".to_string(),
            Box::new(TestPoseSource::new("test")),
            BackpressureConfig::default(),
        );

        let (tx, _rx) = bounded(10);
        let metrics = Arc::new(IngestionMetrics::new());

        adapter.start(tx.clone(), metrics.clone());
        adapter.start(tx, metrics);
        assert!(adapter.is_listening());
        adapter.stop();
    }
}
