//! # Ingestion Pipeline
//!
//! Pose frame ingestion module.
//!
//! Responsibilities:
//! - Register pose data sources (mock or real detector backends)
//! - Backpressure management and drop policy
//! - Send frames downstream via async-channel
//!
//! ## Usage Example (Unified Interface)
//!
//! ```ignore
//! use ingestion::IngestionPipeline;
//! use contracts::PoseSource;
//!
//! let mut pipeline = IngestionPipeline::new(100);
//!
//! let source: Box<dyn PoseSource> = Box::new(MockPoseSource::new(config));
//! pipeline.register_pose_source("webcam".to_string(), source, None);
//!
//! pipeline.start_all();
//! let rx = pipeline.take_receiver().unwrap();
//! while let Ok(frame) = rx.recv().await {
//!     // Process frame
//! }
//! ```

mod adapter;
mod config;
mod generic_adapter;
mod mock;
mod pipeline;

// Re-exports
pub use adapter::SourceAdapter;
pub use config::{BackpressureConfig, DropPolicy, IngestionMetrics, MetricsSnapshot};
pub use contracts::PoseFrame;
pub use generic_adapter::GenericSourceAdapter;
pub use mock::{MockPoseSource, MockSourceConfig};
pub use pipeline::IngestionPipeline;
