//! Pipeline metrics collection
//!
//! Prometheus-facing helpers plus an in-memory aggregator used for the
//! end-of-run summary.

use std::collections::HashMap;

use metrics::{counter, gauge, histogram};

/// Record one ingested frame
///
/// Call this for every `PoseFrame` handed to the engine, including empty
/// detections.
pub fn record_frame_ingested(source_id: &str, landmark_count: usize) {
    counter!(
        "pose_syncer_frames_total",
        "source_id" => source_id.to_string()
    )
    .increment(1);

    gauge!("pose_syncer_landmarks_current").set(landmark_count as f64);
    histogram!("pose_syncer_landmarks_per_frame").record(landmark_count as f64);

    if landmark_count == 0 {
        counter!(
            "pose_syncer_frames_empty_total",
            "source_id" => source_id.to_string()
        )
        .increment(1);
    }
}

/// Record one computed joint angle
pub fn record_joint_angle(joint: &str, angle_deg: f64) {
    histogram!(
        "pose_syncer_joint_angle_deg",
        "joint" => joint.to_string()
    )
    .record(angle_deg);
}

/// Record the outcome of one alignment pass
pub fn record_alignment_pass(pair_count: usize, diff_count: u64, delta_count: u64) {
    counter!("pose_syncer_aligned_pairs_total").increment(pair_count as u64);
    counter!("pose_syncer_keypoint_diffs_total").increment(diff_count);
    counter!("pose_syncer_angle_deltas_total").increment(delta_count);
}

/// Record one record dispatched to a sink
pub fn record_record_dispatched(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "pose_syncer_records_dispatched_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record sink queue depth
pub fn record_sink_queue_depth(sink_name: &str, depth: usize) {
    gauge!(
        "pose_syncer_sink_queue_depth",
        "sink" => sink_name.to_string()
    )
    .set(depth as f64);
}

/// Motion metrics aggregator
///
/// Aggregates pipeline metrics in memory for the end-of-run summary.
#[derive(Debug, Clone, Default)]
pub struct MotionMetricsAggregator {
    /// Total ingested frames
    pub total_frames: u64,

    /// Empty detections
    pub empty_frames: u64,

    /// Landmarks-per-frame statistics
    pub landmark_stats: RunningStats,

    /// Per-joint angle statistics (degrees)
    pub angle_stats: HashMap<String, RunningStats>,

    /// Aligned pairs found during the alignment pass
    pub aligned_pairs: u64,

    /// Keypoint diffs emitted
    pub total_diffs: u64,

    /// Joint-angle deltas emitted
    pub total_angle_deltas: u64,
}

impl MotionMetricsAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Update per-frame statistics
    pub fn on_frame(&mut self, landmark_count: usize) {
        self.total_frames += 1;
        if landmark_count == 0 {
            self.empty_frames += 1;
        }
        self.landmark_stats.push(landmark_count as f64);
    }

    /// Update per-joint angle statistics
    pub fn on_joint_angle(&mut self, joint: &str, angle_deg: f64) {
        self.angle_stats
            .entry(joint.to_string())
            .or_default()
            .push(angle_deg);
    }

    /// Update alignment-pass statistics
    pub fn on_alignment(&mut self, pair_count: usize, diff_count: u64, delta_count: u64) {
        self.aligned_pairs += pair_count as u64;
        self.total_diffs += diff_count;
        self.total_angle_deltas += delta_count;
    }

    /// Produce a summary report
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_frames: self.total_frames,
            empty_frames: self.empty_frames,
            empty_rate: if self.total_frames > 0 {
                self.empty_frames as f64 / self.total_frames as f64 * 100.0
            } else {
                0.0
            },
            landmarks_per_frame: StatsSummary::from(&self.landmark_stats),
            aligned_pairs: self.aligned_pairs,
            total_diffs: self.total_diffs,
            total_angle_deltas: self.total_angle_deltas,
            joint_angles: self
                .angle_stats
                .iter()
                .map(|(joint, stats)| (joint.clone(), StatsSummary::from(stats)))
                .collect(),
        }
    }

    /// Reset statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Metrics summary
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_frames: u64,
    pub empty_frames: u64,
    pub empty_rate: f64,
    pub landmarks_per_frame: StatsSummary,
    pub aligned_pairs: u64,
    pub total_diffs: u64,
    pub total_angle_deltas: u64,
    pub joint_angles: HashMap<String, StatsSummary>,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Pose Pipeline Summary ===")?;
        writeln!(f, "Total frames: {}", self.total_frames)?;
        writeln!(
            f,
            "Empty detections: {} ({:.2}%)",
            self.empty_frames, self.empty_rate
        )?;
        writeln!(f, "Landmarks per frame: {}", self.landmarks_per_frame)?;
        writeln!(f, "Aligned pairs: {}", self.aligned_pairs)?;
        writeln!(f, "Keypoint diffs: {}", self.total_diffs)?;
        writeln!(f, "Joint-angle deltas: {}", self.total_angle_deltas)?;

        if !self.joint_angles.is_empty() {
            writeln!(f, "Joint angles (deg):")?;
            let mut joints: Vec<_> = self.joint_angles.iter().collect();
            joints.sort_by(|a, b| a.0.cmp(b.0));
            for (joint, stats) in joints {
                writeln!(f, "  {}: {}", joint, stats)?;
            }
        }

        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Push a new value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// Sample count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Minimum
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum
    pub fn max(&self) -> f64 {
        self.max
    }
}
