//! LogSink - logs record summaries via tracing

use contracts::{PoseError, PoseRecord, RecordSink};
use tracing::{info, instrument};

/// Sink that logs record summaries for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_record_summary(&self, record: &PoseRecord) {
        match record {
            PoseRecord::Frame(frame) => {
                info!(
                    sink = %self.name,
                    timestamp = frame.timestamp_sec,
                    keypoints = frame.keypoints.len(),
                    "frame record"
                );
            }
            PoseRecord::JointAngle(angle) => {
                info!(
                    sink = %self.name,
                    timestamp = angle.timestamp_sec,
                    joint = %angle.joint,
                    angle_deg = angle.angle_deg,
                    "joint angle record"
                );
            }
            PoseRecord::Diff(diff) => {
                info!(
                    sink = %self.name,
                    keypoint_id = diff.keypoint_id,
                    from = diff.from_timestamp,
                    to = diff.to_timestamp,
                    dx = diff.diff[0],
                    dy = diff.diff[1],
                    dz = diff.diff[2],
                    "keypoint diff record"
                );
            }
            PoseRecord::AngleDelta(delta) => {
                info!(
                    sink = %self.name,
                    timestamp = delta.timestamp_sec,
                    joint = %delta.joint,
                    angle_diff_deg = delta.angle_diff_deg,
                    "angle delta record"
                );
            }
        }
    }
}

impl RecordSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, record),
        fields(sink = %self.name, kind = record.kind())
    )]
    async fn write(&mut self, record: &PoseRecord) -> Result<(), PoseError> {
        self.log_record_summary(record);
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), PoseError> {
        // Nothing to flush for log sink
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), PoseError> {
        info!(sink = %self.name, "LogSink closed");
        Ok(())
    }
}
