//! PoseSource trait - pose data source abstraction
//!
//! Defines a unified interface for pose producers, decoupling the pipeline
//! from how landmark sets are acquired (video file, webcam, live stream,
//! synthetic mock). The detector itself is an opaque upstream collaborator;
//! the pipeline only ever sees `(timestamp, landmark_set)` pairs.

use std::sync::Arc;

use crate::PoseFrame;

/// Pose data callback type
///
/// When a source produces a detection result, it sends a `PoseFrame`
/// through this callback. Uses `Arc` to allow callback sharing across
/// multiple contexts.
pub type PoseCallback = Arc<dyn Fn(PoseFrame) + Send + Sync>;

/// Pose data source trait
///
/// Abstracts the common behavior of real capture backends and mock sources.
/// The callback pattern keeps the presentation layer (drawing, live
/// display) swappable for a headless exporter without touching the
/// angle/diff logic.
pub trait PoseSource: Send + Sync {
    /// Get source ID
    fn source_id(&self) -> &str;

    /// Register data callback
    ///
    /// When the source produces a detection result, it calls the callback
    /// with a `PoseFrame`. Repeated calls while already listening are
    /// idempotent (no duplicate callback registration).
    fn listen(&self, callback: PoseCallback);

    /// Stop producing frames
    fn stop(&self);

    /// Check if currently listening
    fn is_listening(&self) -> bool;
}
