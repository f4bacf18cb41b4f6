//! Skeleton topology - static landmark naming and joint definitions
//!
//! Compile-time table mapping detector landmark ids to human-readable names,
//! plus the reference joint set (elbows, shoulders, knees). Mirrors the
//! 33-point pose topology used by the upstream detector.

use serde::{Deserialize, Serialize};

/// Number of landmarks in the reference skeleton topology.
pub const LANDMARK_COUNT: u32 = 33;

/// Landmark names indexed by detector id.
pub const LANDMARK_NAMES: [&str; LANDMARK_COUNT as usize] = [
    "NOSE",
    "LEFT_EYE_INNER",
    "LEFT_EYE",
    "LEFT_EYE_OUTER",
    "RIGHT_EYE_INNER",
    "RIGHT_EYE",
    "RIGHT_EYE_OUTER",
    "LEFT_EAR",
    "RIGHT_EAR",
    "MOUTH_LEFT",
    "MOUTH_RIGHT",
    "LEFT_SHOULDER",
    "RIGHT_SHOULDER",
    "LEFT_ELBOW",
    "RIGHT_ELBOW",
    "LEFT_WRIST",
    "RIGHT_WRIST",
    "LEFT_PINKY",
    "RIGHT_PINKY",
    "LEFT_INDEX",
    "RIGHT_INDEX",
    "LEFT_THUMB",
    "RIGHT_THUMB",
    "LEFT_HIP",
    "RIGHT_HIP",
    "LEFT_KNEE",
    "RIGHT_KNEE",
    "LEFT_ANKLE",
    "RIGHT_ANKLE",
    "LEFT_HEEL",
    "RIGHT_HEEL",
    "LEFT_FOOT_INDEX",
    "RIGHT_FOOT_INDEX",
];

/// Well-known landmark ids used by the reference joint set.
pub mod landmark_ids {
    pub const LEFT_SHOULDER: u32 = 11;
    pub const RIGHT_SHOULDER: u32 = 12;
    pub const LEFT_ELBOW: u32 = 13;
    pub const RIGHT_ELBOW: u32 = 14;
    pub const LEFT_WRIST: u32 = 15;
    pub const RIGHT_WRIST: u32 = 16;
    pub const LEFT_HIP: u32 = 23;
    pub const RIGHT_HIP: u32 = 24;
    pub const LEFT_KNEE: u32 = 25;
    pub const RIGHT_KNEE: u32 = 26;
    pub const LEFT_ANKLE: u32 = 27;
    pub const RIGHT_ANKLE: u32 = 28;
}

/// Resolve a landmark id to its name, falling back to `id_<n>` for ids
/// outside the reference topology.
pub fn landmark_name(id: u32) -> String {
    LANDMARK_NAMES
        .get(id as usize)
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| format!("id_{id}"))
}

/// A named joint angle formed by three landmarks, vertex at `b_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointSpec {
    /// Joint name (e.g., "left_elbow")
    pub name: String,

    /// First ray endpoint
    pub a_id: u32,

    /// Angle vertex
    pub b_id: u32,

    /// Second ray endpoint
    pub c_id: u32,
}

impl JointSpec {
    /// Create a joint spec.
    pub fn new(name: impl Into<String>, a_id: u32, b_id: u32, c_id: u32) -> Self {
        Self {
            name: name.into(),
            a_id,
            b_id,
            c_id,
        }
    }
}

/// The six-joint reference set: elbows, shoulders, knees.
pub fn reference_joints() -> Vec<JointSpec> {
    use landmark_ids::*;

    vec![
        JointSpec::new("left_elbow", LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST),
        JointSpec::new("right_elbow", RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
        JointSpec::new("left_shoulder", LEFT_HIP, LEFT_SHOULDER, LEFT_ELBOW),
        JointSpec::new("right_shoulder", RIGHT_HIP, RIGHT_SHOULDER, RIGHT_ELBOW),
        JointSpec::new("left_knee", LEFT_HIP, LEFT_KNEE, LEFT_ANKLE),
        JointSpec::new("right_knee", RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE),
    ]
}
