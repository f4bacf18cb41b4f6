//! Temporal alignment at a fixed offset.

use contracts::AlignedPair;
use tracing::instrument;

use crate::angle::round_to;
use crate::store::FrameStore;

/// Pairs every stored timestamp with the one exactly `delta_s` later.
///
/// Strict exact match against the store: no tolerance window, no
/// interpolation. A timestamp whose target is absent simply produces no
/// pair.
#[derive(Debug, Clone, Copy)]
pub struct TemporalAligner {
    delta_s: f64,
}

impl TemporalAligner {
    /// Create an aligner with the given offset (seconds)
    pub fn new(delta_s: f64) -> Self {
        Self { delta_s }
    }

    /// The configured offset
    #[inline]
    pub fn delta_s(&self) -> f64 {
        self.delta_s
    }

    /// Compute all aligned pairs, ascending by start timestamp.
    ///
    /// The target is computed as `round(t + delta, 3)` to stay on the same
    /// 1 ms grid the store keys by. Zero delta pairs every frame with
    /// itself; negative delta pairs frames with earlier ones.
    #[instrument(name = "aligner_align", level = "debug", skip(self, store), fields(delta_s = self.delta_s))]
    pub fn align(&self, store: &FrameStore) -> Vec<AlignedPair> {
        store
            .sorted_timestamps()
            .into_iter()
            .filter_map(|t_start| {
                let t_end = round_to(t_start + self.delta_s, 3);
                store.get(t_end).map(|_| AlignedPair { t_start, t_end })
            })
            .collect()
    }
}
