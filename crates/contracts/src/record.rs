//! PoseRecord - engine output
//!
//! Plain structured records handed to the exporter layer. Field names and
//! rounding precision are load-bearing: existing downstream consumers parse
//! these shapes byte-for-byte.

use serde::{Deserialize, Serialize};

use crate::landmark_name;

/// One exported keypoint: planar coords at 2 decimals, depth at 4,
/// visibility at 3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeypointRecord {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub visibility: f64,
}

/// All keypoints exported for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub timestamp_sec: f64,
    pub keypoints: Vec<KeypointRecord>,
}

/// One joint-angle row: `x`/`y` are the integer vertex position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointAngleRecord {
    pub timestamp_sec: f64,

    /// Joint name from the configured joint set
    pub joint: String,

    /// Vertex x (pixels, truncated)
    pub x: i64,

    /// Vertex y (pixels, truncated)
    pub y: i64,

    /// Bounded angle in [0, 180], 2 decimals
    pub angle_deg: f64,
}

/// Two timestamps exactly delta apart, both present in the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub t_start: f64,
    pub t_end: f64,
}

/// Per-landmark displacement over one aligned pair.
///
/// `dx`/`dy` are rounded to 2 decimals, `dz` to 4 - the asymmetric
/// precision between planar and depth axes is intentional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeypointDiff {
    pub keypoint_id: u32,
    pub from_timestamp: f64,
    pub to_timestamp: f64,
    pub start_pos: [f64; 3],
    pub end_pos: [f64; 3],
    pub diff: [f64; 3],
}

/// Per-joint angle change over one aligned pair, keyed by the later
/// timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleDelta {
    pub timestamp_sec: f64,
    pub joint: String,
    pub angle_diff_deg: f64,
}

/// The record stream consumed by sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoseRecord {
    /// Raw keypoints for one frame (live pass)
    Frame(FrameRecord),

    /// One joint angle for one frame (live pass)
    JointAngle(JointAngleRecord),

    /// One keypoint displacement (alignment pass)
    Diff(KeypointDiff),

    /// One joint angle change (alignment pass)
    AngleDelta(AngleDelta),
}

impl KeypointRecord {
    /// Display name for this keypoint's landmark id.
    pub fn joint_name(&self) -> String {
        landmark_name(self.id)
    }
}

impl PoseRecord {
    /// The timestamp a record is keyed by (start timestamp for diffs).
    pub fn timestamp(&self) -> f64 {
        match self {
            PoseRecord::Frame(r) => r.timestamp_sec,
            PoseRecord::JointAngle(r) => r.timestamp_sec,
            PoseRecord::Diff(r) => r.from_timestamp,
            PoseRecord::AngleDelta(r) => r.timestamp_sec,
        }
    }

    /// Record kind, matching the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            PoseRecord::Frame(_) => "frame",
            PoseRecord::JointAngle(_) => "joint_angle",
            PoseRecord::Diff(_) => "diff",
            PoseRecord::AngleDelta(_) => "angle_delta",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_json_shape() {
        let diff = KeypointDiff {
            keypoint_id: 0,
            from_timestamp: 0.0,
            to_timestamp: 5.0,
            start_pos: [10.0, 10.0, 0.0],
            end_pos: [13.0, 14.0, 0.0],
            diff: [3.0, 4.0, 0.0],
        };

        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["keypoint_id"], 0);
        assert_eq!(json["from_timestamp"], 0.0);
        assert_eq!(json["to_timestamp"], 5.0);
        assert_eq!(json["start_pos"][0], 10.0);
        assert_eq!(json["diff"][1], 4.0);
    }

    #[test]
    fn test_frame_record_json_shape() {
        let record = FrameRecord {
            timestamp_sec: 1.233,
            keypoints: vec![KeypointRecord {
                id: 0,
                x: 120.0,
                y: 88.0,
                z: -0.1234,
                visibility: 0.998,
            }],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["timestamp_sec"], 1.233);
        assert_eq!(json["keypoints"][0]["id"], 0);
        assert_eq!(json["keypoints"][0]["visibility"], 0.998);
    }

    #[test]
    fn test_record_timestamp_key() {
        let record = PoseRecord::Diff(KeypointDiff {
            keypoint_id: 1,
            from_timestamp: 2.0,
            to_timestamp: 7.0,
            start_pos: [0.0; 3],
            end_pos: [0.0; 3],
            diff: [0.0; 3],
        });
        assert_eq!(record.timestamp(), 2.0);
    }
}
