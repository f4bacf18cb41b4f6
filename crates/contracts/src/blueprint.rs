//! CaptureBlueprint - Config Loader output
//!
//! Describes a complete capture session: source, joint set, alignment
//! offset, and output routing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{reference_joints, EngineConfig, JointSpec, DEFAULT_DELTA_S};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete capture session blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Capture source settings
    pub capture: CaptureConfig,

    /// Temporal alignment settings
    #[serde(default)]
    pub align: AlignConfig,

    /// Joint set; empty means the reference six-joint set
    #[serde(default)]
    pub joints: Vec<JointSpec>,

    /// Output routing configuration
    pub sinks: Vec<SinkConfig>,
}

/// Capture source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Unique source identifier
    pub source_id: String,

    /// Capture rate (Hz), must be > 0
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f64,

    /// Frame width in pixels (landmark coordinate space)
    #[serde(default = "default_frame_width")]
    pub frame_width: u32,

    /// Frame height in pixels
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,

    /// Stop after this many frames (None = until source stops)
    #[serde(default)]
    pub max_frames: Option<u64>,

    /// Simulated landmark dropout (mock sources only)
    #[serde(default)]
    pub dropout: Option<DropoutConfig>,
}

/// Periodic landmark dropout, used to exercise partial-detection paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropoutConfig {
    /// Drop the listed landmarks on every n-th frame
    pub every_nth_frame: u64,

    /// Landmark ids to drop
    pub landmark_ids: Vec<u32>,
}

fn default_frequency_hz() -> f64 {
    30.0
}

fn default_frame_width() -> u32 {
    640
}

fn default_frame_height() -> u32 {
    480
}

/// Temporal alignment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Offset between diffed frames (seconds)
    #[serde(default = "default_delta_s")]
    pub delta_s: f64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            delta_s: DEFAULT_DELTA_S,
        }
    }
}

fn default_delta_s() -> f64 {
    DEFAULT_DELTA_S
}

/// Sink output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// Queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_queue_capacity() -> usize {
    100
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Log record summaries
    Log,
    /// CSV row files
    Csv,
    /// JSON document files
    Json,
}

impl CaptureBlueprint {
    /// Build an EngineConfig from blueprint data.
    pub fn to_engine_config(&self) -> EngineConfig {
        let joints = if self.joints.is_empty() {
            reference_joints()
        } else {
            self.joints.clone()
        };

        EngineConfig {
            delta_s: self.align.delta_s,
            joints,
        }
    }
}
