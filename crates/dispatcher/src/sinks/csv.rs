//! CsvSink - writes records as CSV rows, one file per record family
//!
//! Output layout matches the downstream analysis scripts:
//! - `pose_joint_data.csv` - one row per keypoint (angle column empty) plus
//!   one row per joint angle
//! - `pose_diff_5s.csv` - one row per keypoint displacement
//! - `joint_angles_every_5s.csv` - one row per joint-angle delta

use contracts::{landmark_name, PoseError, PoseRecord, RecordSink};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, error, instrument};

const POSE_HEADER: &str = "timestamp_sec,joint,x,y,angle_deg";
const DIFF_HEADER: &str =
    "timestamp_start,timestamp_end,keypoint_id,x_start,y_start,z_start,x_end,y_end,z_end,dx,dy,dz";
const ANGLE_DELTA_HEADER: &str = "timestamp_sec,joint,angle_diff_deg";

/// Render a float the way the downstream scripts' CSV writer does:
/// shortest round-trip digits, with whole values keeping one decimal
/// (`5.0`, not `5` or `5.00`). Pixel x/y columns stay integer.
fn fmt_float(v: f64) -> String {
    if v.is_finite() && v == v.trunc() {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Configuration for CsvSink
#[derive(Debug, Clone)]
pub struct CsvSinkConfig {
    /// Base output directory
    pub base_path: PathBuf,
    /// Keypoint + joint-angle rows
    pub pose_file: String,
    /// Displacement rows
    pub diff_file: String,
    /// Angle-delta rows
    pub angle_delta_file: String,
}

impl CsvSinkConfig {
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
            pose_file: get("pose_file", "pose_joint_data.csv"),
            diff_file: get("diff_file", "pose_diff_5s.csv"),
            angle_delta_file: get("angle_delta_file", "joint_angles_every_5s.csv"),
        }
    }
}

/// One lazily-created CSV output file
struct CsvFile {
    path: PathBuf,
    header: &'static str,
    writer: Option<BufWriter<File>>,
}

impl CsvFile {
    fn new(path: PathBuf, header: &'static str) -> Self {
        Self {
            path,
            header,
            writer: None,
        }
    }

    /// Writer for this file, creating it with the header on first use.
    fn writer(&mut self) -> std::io::Result<&mut BufWriter<File>> {
        if self.writer.is_none() {
            let file = File::create(&self.path)?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{}", self.header)?;
            self.writer = Some(writer);
        }
        Ok(self.writer.as_mut().unwrap())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Sink that writes records to CSV files
pub struct CsvSink {
    name: String,
    pose: CsvFile,
    diff: CsvFile,
    angle_delta: CsvFile,
}

impl CsvSink {
    /// Create a new CsvSink
    pub fn new(name: impl Into<String>, config: CsvSinkConfig) -> std::io::Result<Self> {
        fs::create_dir_all(&config.base_path)?;

        Ok(Self {
            name: name.into(),
            pose: CsvFile::new(config.base_path.join(&config.pose_file), POSE_HEADER),
            diff: CsvFile::new(config.base_path.join(&config.diff_file), DIFF_HEADER),
            angle_delta: CsvFile::new(
                config.base_path.join(&config.angle_delta_file),
                ANGLE_DELTA_HEADER,
            ),
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        Self::new(name, CsvSinkConfig::from_params(params))
    }

    fn write_row(&mut self, record: &PoseRecord) -> std::io::Result<()> {
        match record {
            PoseRecord::Frame(frame) => {
                let writer = self.pose.writer()?;
                for kp in &frame.keypoints {
                    // Keypoint rows carry no angle; the column stays empty
                    writeln!(
                        writer,
                        "{},{},{},{},",
                        fmt_float(frame.timestamp_sec),
                        landmark_name(kp.id),
                        kp.x as i64,
                        kp.y as i64
                    )?;
                }
            }
            PoseRecord::JointAngle(angle) => {
                let writer = self.pose.writer()?;
                writeln!(
                    writer,
                    "{},{},{},{},{}",
                    fmt_float(angle.timestamp_sec),
                    angle.joint,
                    angle.x,
                    angle.y,
                    fmt_float(angle.angle_deg)
                )?;
            }
            PoseRecord::Diff(diff) => {
                let writer = self.diff.writer()?;
                // Pixel x/y are integer columns; timestamps, z, and the
                // deltas are float columns
                writeln!(
                    writer,
                    "{},{},{},{},{},{},{},{},{},{},{},{}",
                    fmt_float(diff.from_timestamp),
                    fmt_float(diff.to_timestamp),
                    diff.keypoint_id,
                    diff.start_pos[0] as i64,
                    diff.start_pos[1] as i64,
                    fmt_float(diff.start_pos[2]),
                    diff.end_pos[0] as i64,
                    diff.end_pos[1] as i64,
                    fmt_float(diff.end_pos[2]),
                    fmt_float(diff.diff[0]),
                    fmt_float(diff.diff[1]),
                    fmt_float(diff.diff[2])
                )?;
            }
            PoseRecord::AngleDelta(delta) => {
                let writer = self.angle_delta.writer()?;
                writeln!(
                    writer,
                    "{},{},{}",
                    fmt_float(delta.timestamp_sec),
                    delta.joint,
                    fmt_float(delta.angle_diff_deg)
                )?;
            }
        }
        Ok(())
    }

    fn flush_all(&mut self) -> std::io::Result<()> {
        self.pose.flush()?;
        self.diff.flush()?;
        self.angle_delta.flush()
    }
}

impl RecordSink for CsvSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "csv_sink_write",
        skip(self, record),
        fields(sink = %self.name, kind = record.kind())
    )]
    async fn write(&mut self, record: &PoseRecord) -> Result<(), PoseError> {
        self.write_row(record).map_err(|e| {
            error!(sink = %self.name, error = %e, "Write failed");
            PoseError::sink_write(&self.name, e.to_string())
        })
    }

    #[instrument(name = "csv_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), PoseError> {
        self.flush_all()
            .map_err(|e| PoseError::sink_write(&self.name, e.to_string()))
    }

    #[instrument(name = "csv_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), PoseError> {
        self.flush_all()
            .map_err(|e| PoseError::sink_write(&self.name, e.to_string()))?;
        debug!(sink = %self.name, "CsvSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{AngleDelta, FrameRecord, JointAngleRecord, KeypointDiff, KeypointRecord};
    use tempfile::tempdir;

    fn sink_in(dir: &std::path::Path) -> CsvSink {
        let config = CsvSinkConfig {
            base_path: dir.to_path_buf(),
            pose_file: "pose_joint_data.csv".to_string(),
            diff_file: "pose_diff_5s.csv".to_string(),
            angle_delta_file: "joint_angles_every_5s.csv".to_string(),
        };
        CsvSink::new("test_csv", config).unwrap()
    }

    #[tokio::test]
    async fn test_keypoint_and_angle_rows_share_file() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.write(&PoseRecord::Frame(FrameRecord {
            timestamp_sec: 0.033,
            keypoints: vec![KeypointRecord {
                id: 11,
                x: 268.8,
                y: 134.4,
                z: -0.05,
                visibility: 0.99,
            }],
        }))
        .await
        .unwrap();

        sink.write(&PoseRecord::JointAngle(JointAngleRecord {
            timestamp_sec: 0.033,
            joint: "left_elbow".to_string(),
            x: 243,
            y: 201,
            angle_deg: 90.0,
        }))
        .await
        .unwrap();

        sink.close().await.unwrap();

        let content = fs::read_to_string(dir.path().join("pose_joint_data.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "timestamp_sec,joint,x,y,angle_deg");
        assert_eq!(lines[1], "0.033,LEFT_SHOULDER,268,134,");
        assert_eq!(lines[2], "0.033,left_elbow,243,201,90.0");
    }

    #[test]
    fn test_float_columns_keep_one_decimal() {
        // Whole values render as `5.0`, not `5` or `5.00`
        assert_eq!(fmt_float(5.0), "5.0");
        assert_eq!(fmt_float(90.0), "90.0");
        assert_eq!(fmt_float(0.0), "0.0");
        assert_eq!(fmt_float(-12.5), "-12.5");
        assert_eq!(fmt_float(172.33), "172.33");
        assert_eq!(fmt_float(0.033), "0.033");
    }

    #[tokio::test]
    async fn test_diff_rows() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.write(&PoseRecord::Diff(KeypointDiff {
            keypoint_id: 0,
            from_timestamp: 0.0,
            to_timestamp: 5.0,
            start_pos: [10.0, 10.0, 0.0],
            end_pos: [13.0, 14.0, 0.0],
            diff: [3.0, 4.0, 0.0],
        }))
        .await
        .unwrap();

        sink.close().await.unwrap();

        let content = fs::read_to_string(dir.path().join("pose_diff_5s.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "0.0,5.0,0,10,10,0.0,13,14,0.0,3.0,4.0,0.0");
    }

    #[tokio::test]
    async fn test_angle_delta_rows() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.write(&PoseRecord::AngleDelta(AngleDelta {
            timestamp_sec: 5.0,
            joint: "right_knee".to_string(),
            angle_diff_deg: -12.5,
        }))
        .await
        .unwrap();

        sink.close().await.unwrap();

        let content =
            fs::read_to_string(dir.path().join("joint_angles_every_5s.csv")).unwrap();
        assert!(content.contains("5.0,right_knee,-12.5"));
    }

    #[tokio::test]
    async fn test_untouched_files_not_created() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.write(&PoseRecord::AngleDelta(AngleDelta {
            timestamp_sec: 5.0,
            joint: "left_knee".to_string(),
            angle_diff_deg: 0.0,
        }))
        .await
        .unwrap();
        sink.close().await.unwrap();

        assert!(dir.path().join("joint_angles_every_5s.csv").exists());
        assert!(!dir.path().join("pose_joint_data.csv").exists());
        assert!(!dir.path().join("pose_diff_5s.csv").exists());
    }
}
