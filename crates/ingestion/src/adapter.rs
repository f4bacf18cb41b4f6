//! Source adapter trait and channel helpers

use std::sync::Arc;

use async_channel::{Sender, TrySendError};
use contracts::PoseFrame;
use tracing::trace;

use crate::config::{DropPolicy, IngestionMetrics};

/// Pose source adapter trait
///
/// Bridges a registered source to the shared frame channel:
/// 1. Register the source callback
/// 2. Wrap detections as `PoseFrame`
/// 3. Send to the channel (handling backpressure)
pub trait SourceAdapter: Send + Sync {
    /// Get source ID
    fn source_id(&self) -> &str;

    /// Start frame collection
    ///
    /// # Arguments
    /// * `tx` - frame sender channel
    /// * `metrics` - shared ingestion metrics
    fn start(&self, tx: Sender<PoseFrame>, metrics: Arc<IngestionMetrics>);

    /// Stop frame collection
    fn stop(&self);

    /// Check if the source is listening
    fn is_listening(&self) -> bool;
}

/// Send a frame, handling the backpressure policy
#[inline]
pub(crate) fn send_frame(
    tx: &Sender<PoseFrame>,
    frame: PoseFrame,
    metrics: &Arc<IngestionMetrics>,
    source_id: &str,
    drop_policy: DropPolicy,
) {
    match tx.try_send(frame) {
        Ok(_) => {
            trace!(source_id = %source_id, "frame sent");
        }
        Err(TrySendError::Full(frame)) => {
            metrics.record_dropped();
            metrics::counter!(
                "ingestion_frames_dropped_total",
                "source_id" => source_id.to_string()
            )
            .increment(1);

            match drop_policy {
                DropPolicy::DropNewest => {
                    trace!(source_id = %source_id, timestamp = frame.timestamp, "frame dropped (newest)");
                }
                DropPolicy::DropOldest => {
                    // TODO: needs a channel exposing pop on the send side for true DropOldest
                    trace!(source_id = %source_id, "frame dropped (oldest fallback)");
                }
            }
        }
        Err(TrySendError::Closed(_)) => {
            tracing::warn!(source_id = %source_id, "channel closed");
        }
    }
}
