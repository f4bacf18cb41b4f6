//! PoseFrame - Ingestion output
//!
//! One detector result per capture tick: a timestamp plus the landmark set
//! found at that tick. A frame with zero landmarks is a valid detection
//! failure, not an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single tracked body point.
///
/// Identity is the detector-assigned index (0..N-1, N fixed by the skeleton
/// topology). Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Detector-assigned landmark index
    pub id: u32,

    /// Horizontal position (pixels)
    pub x: f64,

    /// Vertical position (pixels)
    pub y: f64,

    /// Depth proxy, unitless (optional upstream, defaults to 0)
    #[serde(default)]
    pub z: f64,

    /// Detection confidence in [0, 1] (optional upstream, defaults to 0)
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    /// Create a landmark with only planar coordinates.
    pub fn planar(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            z: 0.0,
            visibility: 0.0,
        }
    }

    /// Position as an `[x, y, z]` triple.
    #[inline]
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// The complete landmark set detected at one timestamp.
///
/// Owned by the frame store after append; never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Capture timestamp (seconds since session start, quantized to 1 ms)
    pub timestamp: f64,

    /// Landmarks keyed by detector id
    pub landmarks: BTreeMap<u32, Landmark>,
}

impl PoseFrame {
    /// Create an empty frame at the given timestamp.
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            landmarks: BTreeMap::new(),
        }
    }

    /// Build a frame from an unordered landmark list.
    pub fn from_landmarks(timestamp: f64, landmarks: impl IntoIterator<Item = Landmark>) -> Self {
        Self {
            timestamp,
            landmarks: landmarks.into_iter().map(|lm| (lm.id, lm)).collect(),
        }
    }

    /// Insert or replace a landmark.
    pub fn insert(&mut self, landmark: Landmark) {
        self.landmarks.insert(landmark.id, landmark);
    }

    /// Get a landmark by id.
    #[inline]
    pub fn get(&self, id: u32) -> Option<&Landmark> {
        self.landmarks.get(&id)
    }

    /// Number of detected landmarks.
    #[inline]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// True if detection failed for this tick.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Landmark ids present in this frame, ascending.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.landmarks.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default() {
        // Upstream JSON without z/visibility must still parse
        let json = r#"{"id": 3, "x": 120.0, "y": 45.5}"#;
        let lm: Landmark = serde_json::from_str(json).unwrap();
        assert_eq!(lm.id, 3);
        assert_eq!(lm.z, 0.0);
        assert_eq!(lm.visibility, 0.0);
    }

    #[test]
    fn test_frame_from_landmarks() {
        let frame = PoseFrame::from_landmarks(
            1.5,
            vec![Landmark::planar(2, 10.0, 20.0), Landmark::planar(0, 1.0, 2.0)],
        );
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.ids().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(frame.get(2).unwrap().x, 10.0);
    }

    #[test]
    fn test_empty_frame_is_valid() {
        let frame = PoseFrame::new(0.0);
        assert!(frame.is_empty());
        assert_eq!(frame.ids().count(), 0);
    }
}
