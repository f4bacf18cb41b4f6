//! JsonSink - accumulates records and writes JSON documents on flush
//!
//! Output layout matches the downstream analysis scripts:
//! - `pose_data.json` - array of per-frame keypoint records
//! - `pose_diff_5s.json` - array of keypoint displacement records
//!
//! Joint-angle records are CSV-only and are ignored here.

use contracts::{FrameRecord, KeypointDiff, PoseError, PoseRecord, RecordSink};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{debug, error, instrument};

/// Configuration for JsonSink
#[derive(Debug, Clone)]
pub struct JsonSinkConfig {
    /// Base output directory
    pub base_path: PathBuf,
    /// Per-frame keypoint document
    pub pose_file: String,
    /// Displacement document
    pub diff_file: String,
}

impl JsonSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |key: &str, default: &str| {
            params
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            base_path: params
                .get("base_path")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./output")),
            pose_file: get("pose_file", "pose_data.json"),
            diff_file: get("diff_file", "pose_diff_5s.json"),
        }
    }
}

/// Sink that buffers records and writes JSON arrays
///
/// The documents are complete arrays, so they are rewritten wholesale on
/// every flush rather than appended to.
pub struct JsonSink {
    name: String,
    config: JsonSinkConfig,
    frames: Vec<FrameRecord>,
    diffs: Vec<KeypointDiff>,
}

impl JsonSink {
    /// Create a new JsonSink
    pub fn new(name: impl Into<String>, config: JsonSinkConfig) -> std::io::Result<Self> {
        fs::create_dir_all(&config.base_path)?;

        Ok(Self {
            name: name.into(),
            config,
            frames: Vec::new(),
            diffs: Vec::new(),
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        Self::new(name, JsonSinkConfig::from_params(params))
    }

    /// Number of buffered frame records
    pub fn buffered_frames(&self) -> usize {
        self.frames.len()
    }

    fn write_documents(&self) -> std::io::Result<()> {
        if !self.frames.is_empty() {
            let path = self.config.base_path.join(&self.config.pose_file);
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &self.frames)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        }

        if !self.diffs.is_empty() {
            let path = self.config.base_path.join(&self.config.diff_file);
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &self.diffs)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        }

        Ok(())
    }
}

impl RecordSink for JsonSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "json_sink_write",
        skip(self, record),
        fields(sink = %self.name, kind = record.kind())
    )]
    async fn write(&mut self, record: &PoseRecord) -> Result<(), PoseError> {
        match record {
            PoseRecord::Frame(frame) => self.frames.push(frame.clone()),
            PoseRecord::Diff(diff) => self.diffs.push(*diff),
            PoseRecord::JointAngle(_) | PoseRecord::AngleDelta(_) => {}
        }
        Ok(())
    }

    #[instrument(name = "json_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), PoseError> {
        self.write_documents().map_err(|e| {
            error!(sink = %self.name, error = %e, "Flush failed");
            PoseError::sink_write(&self.name, e.to_string())
        })
    }

    #[instrument(name = "json_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), PoseError> {
        self.write_documents()
            .map_err(|e| PoseError::sink_write(&self.name, e.to_string()))?;
        debug!(
            sink = %self.name,
            frames = self.frames.len(),
            diffs = self.diffs.len(),
            "JsonSink closed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::KeypointRecord;
    use tempfile::tempdir;

    fn sink_in(dir: &std::path::Path) -> JsonSink {
        let config = JsonSinkConfig {
            base_path: dir.to_path_buf(),
            pose_file: "pose_data.json".to_string(),
            diff_file: "pose_diff_5s.json".to_string(),
        };
        JsonSink::new("test_json", config).unwrap()
    }

    #[tokio::test]
    async fn test_frames_written_on_close() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.write(&PoseRecord::Frame(FrameRecord {
            timestamp_sec: 0.033,
            keypoints: vec![KeypointRecord {
                id: 0,
                x: 320.0,
                y: 57.6,
                z: -0.05,
                visibility: 0.998,
            }],
        }))
        .await
        .unwrap();

        sink.close().await.unwrap();

        let content = fs::read_to_string(dir.path().join("pose_data.json")).unwrap();
        let parsed: Vec<FrameRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].timestamp_sec, 0.033);
        assert_eq!(parsed[0].keypoints[0].id, 0);
    }

    #[tokio::test]
    async fn test_diffs_written_separately() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.write(&PoseRecord::Diff(KeypointDiff {
            keypoint_id: 15,
            from_timestamp: 0.0,
            to_timestamp: 5.0,
            start_pos: [224.0, 264.0, -0.06],
            end_pos: [230.0, 260.0, -0.06],
            diff: [6.0, -4.0, 0.0],
        }))
        .await
        .unwrap();

        sink.flush().await.unwrap();

        let content = fs::read_to_string(dir.path().join("pose_diff_5s.json")).unwrap();
        let parsed: Vec<KeypointDiff> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0].keypoint_id, 15);
        assert_eq!(parsed[0].diff, [6.0, -4.0, 0.0]);
        assert!(!dir.path().join("pose_data.json").exists());
    }

    #[tokio::test]
    async fn test_angle_records_ignored() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.write(&PoseRecord::AngleDelta(contracts::AngleDelta {
            timestamp_sec: 5.0,
            joint: "left_elbow".to_string(),
            angle_diff_deg: 3.0,
        }))
        .await
        .unwrap();

        sink.close().await.unwrap();
        assert_eq!(sink.buffered_frames(), 0);
        assert!(!dir.path().join("pose_data.json").exists());
    }
}
