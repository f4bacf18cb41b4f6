//! Pipeline statistics and metrics.

use std::time::Duration;

use observability::MotionMetricsAggregator;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Total frames ingested from the capture source
    pub frames_ingested: u64,

    /// Total frames dropped at the ingestion channel
    pub frames_dropped: u64,

    /// Total records sent to the dispatcher (live and alignment pass)
    pub records_emitted: u64,

    /// Total duration of the pipeline run
    pub duration: Duration,

    /// Number of sinks that received data
    pub active_sinks: usize,

    /// Motion metrics aggregator
    pub motion_metrics: MotionMetricsAggregator,
}

impl PipelineStats {
    /// Calculate frames per second throughput
    pub fn fps(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.frames_ingested as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate drop rate as percentage
    #[allow(dead_code)]
    pub fn drop_rate(&self) -> f64 {
        let total = self.frames_ingested + self.frames_dropped;
        if total > 0 {
            (self.frames_dropped as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Pipeline Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Frames ingested: {}", self.frames_ingested);
        println!("   ├─ Frames dropped: {}", self.frames_dropped);
        println!("   ├─ Records emitted: {}", self.records_emitted);
        println!("   ├─ FPS: {:.2}", self.fps());
        println!("   └─ Active sinks: {}", self.active_sinks);

        let summary = self.motion_metrics.summary();

        println!("\n📈 Motion Metrics");
        println!(
            "   ├─ Empty detections: {} ({:.2}%)",
            summary.empty_frames, summary.empty_rate
        );
        println!(
            "   ├─ Landmarks per frame: {}",
            summary.landmarks_per_frame
        );
        println!("   ├─ Aligned pairs: {}", summary.aligned_pairs);
        println!("   ├─ Keypoint diffs: {}", summary.total_diffs);
        println!("   └─ Joint-angle deltas: {}", summary.total_angle_deltas);

        if !summary.joint_angles.is_empty() {
            println!("\n📐 Joint Angles (deg)");
            let mut joints: Vec<_> = summary.joint_angles.iter().collect();
            joints.sort_by(|a, b| a.0.cmp(b.0));
            for (i, (joint, stats)) in joints.iter().enumerate() {
                let prefix = if i == joints.len() - 1 { "└─" } else { "├─" };
                println!("   {} {}: {}", prefix, joint, stats);
            }
        }

        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_calculation() {
        let stats = PipelineStats {
            frames_ingested: 300,
            duration: Duration::from_secs(10),
            ..Default::default()
        };
        assert!((stats.fps() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_fps_zero_duration() {
        let stats = PipelineStats::default();
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_drop_rate() {
        let stats = PipelineStats {
            frames_ingested: 90,
            frames_dropped: 10,
            ..Default::default()
        };
        assert!((stats.drop_rate() - 10.0).abs() < 1e-9);
    }
}
