//! Backpressure configuration and metrics

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Drop policy when the frame channel is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPolicy {
    /// Drop the frame that just arrived
    #[default]
    DropNewest,
    /// Drop the oldest queued frame
    DropOldest,
}

/// Backpressure configuration
#[derive(Debug, Clone)]
pub struct BackpressureConfig {
    /// Channel capacity
    pub channel_capacity: usize,

    /// Drop policy when full
    pub drop_policy: DropPolicy,
}

impl Default for BackpressureConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 100,
            drop_policy: DropPolicy::DropNewest,
        }
    }
}

impl BackpressureConfig {
    /// Create new backpressure configuration
    pub fn new(channel_capacity: usize, drop_policy: DropPolicy) -> Self {
        Self {
            channel_capacity,
            drop_policy,
        }
    }
}

/// Ingestion metrics
#[derive(Debug, Default)]
pub struct IngestionMetrics {
    /// Total frames received
    pub frames_received: AtomicU64,

    /// Total frames dropped
    pub frames_dropped: AtomicU64,

    /// Empty detections received
    pub empty_frames: AtomicU64,

    /// Current queue length
    pub queue_len: AtomicUsize,
}

impl IngestionMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record frame received
    pub fn record_received(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record frame dropped
    pub fn record_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record empty detection
    pub fn record_empty(&self) {
        self.empty_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Update queue length
    pub fn update_queue_len(&self, len: usize) {
        self.queue_len.store(len, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_received: self.frames_received.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            empty_frames: self.empty_frames.load(Ordering::Relaxed),
            queue_len: self.queue_len.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Total frames received
    pub frames_received: u64,

    /// Total frames dropped
    pub frames_dropped: u64,

    /// Empty detections received
    pub empty_frames: u64,

    /// Current queue length
    pub queue_len: usize,
}
