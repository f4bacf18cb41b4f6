//! Timestamp-keyed frame storage with exact-match lookup.
//!
//! Uses index-based separation:
//! - BTreeMap stores lightweight keys (quantized timestamp -> slab key)
//! - Slab stores actual PoseFrame data
//!
//! This keeps iteration over timestamps cheap and avoids moving landmark
//! sets during reordering. Timestamps are quantized to 1 ms on the way in,
//! matching the upstream 3-decimal rounding, so lookups computed as
//! `t + delta` land on exactly the same key as the stored frame.

use std::collections::BTreeMap;
use std::fmt;

use contracts::PoseFrame;
use slab::Slab;

const KEY_SCALE: f64 = 1000.0;

/// Timestamp quantized to 1 ms, usable as an ordered exact-match key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeKey(i64);

impl TimeKey {
    /// Quantize a second-resolution timestamp.
    #[inline]
    pub fn from_seconds(t: f64) -> Self {
        Self((t * KEY_SCALE).round() as i64)
    }

    /// Back to seconds.
    #[inline]
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / KEY_SCALE
    }
}

/// Append-mostly frame store
///
/// Later writes win on duplicate timestamps; the overwrite is counted but
/// not treated as an error.
pub struct FrameStore {
    /// Ordered index (quantized timestamp -> slab key)
    index: BTreeMap<TimeKey, usize>,
    /// Actual frame storage
    storage: Slab<PoseFrame>,
    overwrite_count: u64,
}

impl fmt::Debug for FrameStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameStore")
            .field("len", &self.index.len())
            .field("overwrites", &self.overwrite_count)
            .finish()
    }
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
            storage: Slab::new(),
            overwrite_count: 0,
        }
    }

    /// Insert a frame at its timestamp
    ///
    /// A frame already stored at the same (quantized) timestamp is
    /// replaced.
    pub fn append(&mut self, frame: PoseFrame) {
        let key = TimeKey::from_seconds(frame.timestamp);

        if let Some(&old_slab_key) = self.index.get(&key) {
            self.storage.remove(old_slab_key);
            self.overwrite_count += 1;
        }

        let slab_key = self.storage.insert(frame);
        self.index.insert(key, slab_key);
    }

    /// Exact-match lookup by timestamp
    ///
    /// Absence is `None`, never an error.
    #[inline]
    pub fn get(&self, timestamp: f64) -> Option<&PoseFrame> {
        let key = TimeKey::from_seconds(timestamp);
        self.index
            .get(&key)
            .and_then(|&slab_key| self.storage.get(slab_key))
    }

    /// Stored timestamps, ascending
    ///
    /// This is the iteration order for every downstream pass.
    pub fn sorted_timestamps(&self) -> Vec<f64> {
        self.index
            .iter()
            .filter_map(|(_, &slab_key)| self.storage.get(slab_key))
            .map(|frame| frame.timestamp)
            .collect()
    }

    /// Frames in timestamp order
    pub fn iter(&self) -> impl Iterator<Item = &PoseFrame> + '_ {
        self.index
            .values()
            .filter_map(|&slab_key| self.storage.get(slab_key))
    }

    /// Number of stored frames
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if nothing has been stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of duplicate-timestamp overwrites
    #[inline]
    pub fn overwrite_count(&self) -> u64 {
        self.overwrite_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Landmark;

    fn frame_at(t: f64, x: f64) -> PoseFrame {
        PoseFrame::from_landmarks(t, vec![Landmark::planar(0, x, 0.0)])
    }

    #[test]
    fn test_append_and_exact_get() {
        let mut store = FrameStore::new();
        store.append(frame_at(0.0, 1.0));
        store.append(frame_at(5.0, 2.0));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0.0).unwrap().get(0).unwrap().x, 1.0);
        assert_eq!(store.get(5.0).unwrap().get(0).unwrap().x, 2.0);
        assert!(store.get(2.5).is_none());
    }

    #[test]
    fn test_later_write_wins() {
        let mut store = FrameStore::new();
        store.append(frame_at(1.0, 1.0));
        store.append(frame_at(1.0, 9.0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.overwrite_count(), 1);
        assert_eq!(store.get(1.0).unwrap().get(0).unwrap().x, 9.0);
    }

    #[test]
    fn test_sorted_timestamps_ascending() {
        let mut store = FrameStore::new();
        store.append(frame_at(5.0, 0.0));
        store.append(frame_at(0.033, 0.0));
        store.append(frame_at(2.5, 0.0));

        assert_eq!(store.sorted_timestamps(), vec![0.033, 2.5, 5.0]);
    }

    #[test]
    fn test_quantized_lookup_absorbs_float_noise() {
        let mut store = FrameStore::new();
        store.append(frame_at(0.3, 0.0));

        // 0.1 + 0.2 != 0.3 in f64, but quantization makes the lookup land
        assert!(store.get(0.1 + 0.2).is_some());
    }

    #[test]
    fn test_iter_order_matches_timestamps() {
        let mut store = FrameStore::new();
        store.append(frame_at(2.0, 0.0));
        store.append(frame_at(1.0, 0.0));

        let order: Vec<f64> = store.iter().map(|f| f.timestamp).collect();
        assert_eq!(order, vec![1.0, 2.0]);
    }
}
