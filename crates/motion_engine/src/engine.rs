//! Main motion engine implementation.

use contracts::{
    AngleDelta, EngineConfig, FrameRecord, JointAngleRecord, JointSpec, KeypointRecord, Landmark,
    PoseFrame, PoseRecord,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::aligner::TemporalAligner;
use crate::angle::{joint_angle, round_to};
use crate::diff::diff_frames;
use crate::store::FrameStore;

/// Engine counters, snapshot at any point
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EngineStats {
    /// Frames handed to `ingest`
    pub frames_ingested: u64,
    /// Frames with zero landmarks
    pub empty_frames: u64,
    /// Frames currently stored
    pub stored_frames: usize,
    /// Duplicate-timestamp overwrites
    pub overwrites: u64,
}

/// Temporal keypoint alignment and differencing engine
///
/// Two-phase: `ingest` runs live per frame (storage + per-frame records),
/// `finalize` runs once after ingest completes (alignment pass producing
/// diff and angle-delta records).
#[derive(Debug)]
pub struct MotionEngine {
    /// Configuration
    config: EngineConfig,
    /// Alignment offset, fixed at construction
    aligner: TemporalAligner,
    /// Frame storage
    store: FrameStore,
    /// Frames handed to ingest
    frame_count: u64,
    /// Empty detections
    empty_frame_count: u64,
}

impl MotionEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        let aligner = TemporalAligner::new(config.delta_s);
        Self {
            config,
            aligner,
            store: FrameStore::new(),
            frame_count: 0,
            empty_frame_count: 0,
        }
    }

    /// Ingest one frame (live pass)
    ///
    /// Stores the frame and returns the records it produces: one
    /// `FrameRecord` with rounded keypoints, plus one `JointAngleRecord`
    /// per configured joint whose three landmarks were all detected. An
    /// empty detection is stored but produces no records.
    #[instrument(
        level = "trace",
        name = "motion_engine_ingest",
        skip(self, frame),
        fields(timestamp = frame.timestamp, landmarks = frame.len())
    )]
    pub fn ingest(&mut self, frame: PoseFrame) -> Vec<PoseRecord> {
        self.frame_count += 1;
        metrics::counter!("motion_engine_frames_total").increment(1);

        let mut records = Vec::new();

        if frame.is_empty() {
            self.empty_frame_count += 1;
            metrics::counter!("motion_engine_frames_empty_total").increment(1);
            debug!(timestamp = frame.timestamp, "empty detection");
        } else {
            records.push(PoseRecord::Frame(export_frame(&frame)));

            for joint in &self.config.joints {
                if let Some((vertex, angle_deg)) = vertex_angle(&frame, joint) {
                    metrics::histogram!(
                        "motion_engine_joint_angle_deg",
                        "joint" => joint.name.clone()
                    )
                    .record(angle_deg);

                    records.push(PoseRecord::JointAngle(JointAngleRecord {
                        timestamp_sec: frame.timestamp,
                        joint: joint.name.clone(),
                        x: vertex.x as i64,
                        y: vertex.y as i64,
                        angle_deg,
                    }));
                }
            }
        }

        self.store.append(frame);
        records
    }

    /// Alignment pass (batch), run once ingest is complete.
    ///
    /// For every pair of stored timestamps exactly `delta_s` apart:
    /// per-landmark `Diff` records over the id intersection, then one
    /// `AngleDelta` per joint resolvable in both frames, keyed by the
    /// later timestamp. Pairs over empty or disjoint frames contribute
    /// nothing.
    #[instrument(name = "motion_engine_finalize", skip(self))]
    pub fn finalize(&self) -> Vec<PoseRecord> {
        let pairs = self.aligner.align(&self.store);
        let mut records = Vec::new();
        let mut diff_count: u64 = 0;
        let mut delta_count: u64 = 0;

        for pair in &pairs {
            // Both lookups succeed: align only emits pairs present in the store
            let (Some(start), Some(end)) = (self.store.get(pair.t_start), self.store.get(pair.t_end))
            else {
                continue;
            };

            for diff in diff_frames(start, end) {
                diff_count += 1;
                records.push(PoseRecord::Diff(diff));
            }

            for joint in &self.config.joints {
                let (Some((_, angle_start)), Some((_, angle_end))) =
                    (vertex_angle(start, joint), vertex_angle(end, joint))
                else {
                    continue;
                };

                delta_count += 1;
                records.push(PoseRecord::AngleDelta(AngleDelta {
                    timestamp_sec: pair.t_end,
                    joint: joint.name.clone(),
                    angle_diff_deg: round_to(angle_end - angle_start, 2),
                }));
            }
        }

        metrics::counter!("motion_engine_aligned_pairs_total").increment(pairs.len() as u64);
        metrics::counter!("motion_engine_keypoint_diffs_total").increment(diff_count);
        metrics::counter!("motion_engine_angle_deltas_total").increment(delta_count);

        debug!(
            pairs = pairs.len(),
            diffs = diff_count,
            angle_deltas = delta_count,
            "alignment pass complete"
        );

        records
    }

    /// Aligned pairs over the current store, without record expansion
    pub fn aligned_pairs(&self) -> Vec<contracts::AlignedPair> {
        self.aligner.align(&self.store)
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frame storage (read-only)
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// Counter snapshot
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            frames_ingested: self.frame_count,
            empty_frames: self.empty_frame_count,
            stored_frames: self.store.len(),
            overwrites: self.store.overwrite_count(),
        }
    }
}

/// Export one frame's keypoints with the output rounding applied.
fn export_frame(frame: &PoseFrame) -> FrameRecord {
    FrameRecord {
        timestamp_sec: frame.timestamp,
        keypoints: frame
            .landmarks
            .values()
            .map(|lm| KeypointRecord {
                id: lm.id,
                x: round_to(lm.x, 2),
                y: round_to(lm.y, 2),
                z: round_to(lm.z, 4),
                visibility: round_to(lm.visibility, 3),
            })
            .collect(),
    }
}

/// Vertex landmark and angle for one joint, if all three landmarks are
/// present in the frame.
fn vertex_angle(frame: &PoseFrame, joint: &JointSpec) -> Option<(Landmark, f64)> {
    let a = frame.get(joint.a_id)?;
    let b = frame.get(joint.b_id)?;
    let c = frame.get(joint.c_id)?;
    Some((*b, joint_angle(a, b, c)))
}
