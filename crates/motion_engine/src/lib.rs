//! # Motion Engine
//!
//! Temporal keypoint alignment and differencing core.
//!
//! Responsibilities:
//! - Per-frame joint angle computation (2-D, bounded [0, 180])
//! - Timestamp-keyed frame storage with exact-match lookup
//! - Temporal alignment at a fixed offset delta
//! - Per-landmark displacement and per-joint angle deltas over aligned pairs
//!
//! ## Example
//!
//! ```ignore
//! use motion_engine::MotionEngine;
//! use contracts::EngineConfig;
//!
//! let mut engine = MotionEngine::new(EngineConfig::default());
//!
//! // Live pass: push frames as they arrive
//! for record in engine.ingest(frame) {
//!     // Hand records to the dispatcher
//! }
//!
//! // Batch pass: diffs + angle deltas once ingest is done
//! let records = engine.finalize();
//! ```

mod aligner;
mod angle;
mod diff;
mod engine;
mod store;

// Re-exports
pub use aligner::TemporalAligner;
pub use angle::{joint_angle, round_to};
pub use diff::diff_frames;
pub use engine::{EngineStats, MotionEngine};
pub use store::{FrameStore, TimeKey};

// Re-export contracts types
pub use contracts::{AlignedPair, EngineConfig, KeypointDiff, PoseFrame, PoseRecord};
