//! # Integration Tests
//!
//! End-to-end tests across crate boundaries.
//!
//! Covers:
//! - Contract smoke tests
//! - Mock e2e capture tests (no pose detector required)
//! - Sink output verification

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_reference_joint_set() {
        let joints = contracts::reference_joints();
        assert_eq!(joints.len(), 6);
        assert!(joints.iter().any(|j| j.name == "left_elbow"));
        assert!(joints.iter().any(|j| j.name == "right_knee"));
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use contracts::{EngineConfig, Landmark, PoseFrame, PoseRecord, SinkConfig, SinkType};
    use dispatcher::create_dispatcher;
    use ingestion::{IngestionPipeline, MockPoseSource};
    use motion_engine::MotionEngine;
    use tokio::sync::mpsc;

    fn landmark(id: u32, x: f64, y: f64, z: f64) -> Landmark {
        Landmark {
            id,
            x,
            y,
            z,
            visibility: 1.0,
        }
    }

    /// End-to-end test: MockPoseSource -> IngestionPipeline -> MotionEngine -> Dispatcher
    ///
    /// Verifies the complete data flow:
    /// 1. MockPoseSource generates skeleton frames
    /// 2. MotionEngine emits live records and runs the alignment pass
    /// 3. Dispatcher fans records out to sinks
    #[tokio::test]
    async fn test_e2e_mock_pipeline() {
        let target_frames = 20u64;

        let mut ingestion = IngestionPipeline::new(100);
        ingestion.register_pose_source(
            "cam".to_string(),
            Box::new(MockPoseSource::burst("cam", 30.0, target_frames)),
            None,
        );

        // Short offset so the 20-frame window still produces pairs
        let mut engine = MotionEngine::new(EngineConfig::with_delta(0.1));

        let (record_tx, record_rx) = mpsc::channel::<PoseRecord>(100);
        let sink_configs = vec![SinkConfig {
            name: "test_log".to_string(),
            sink_type: SinkType::Log,
            queue_capacity: 50,
            params: HashMap::new(),
        }];

        let dispatcher = create_dispatcher(sink_configs, record_rx).unwrap();
        let dispatcher_handle = dispatcher.spawn();

        let frame_rx = ingestion.take_receiver().unwrap();
        ingestion.start_all();

        let mut ingested = 0u64;
        let mut live_records = 0u64;

        while ingested < target_frames {
            let frame = tokio::time::timeout(Duration::from_secs(2), frame_rx.recv())
                .await
                .expect("frame channel timed out")
                .expect("frame channel closed");

            ingested += 1;
            for record in engine.ingest(frame) {
                live_records += 1;
                record_tx.send(record).await.unwrap();
            }
        }

        ingestion.stop_all();

        // Alignment pass: 30 Hz grid with 0.1 s offset pairs most frames
        let batch = engine.finalize();
        assert!(!batch.is_empty(), "alignment pass should produce records");

        let diff_count = batch
            .iter()
            .filter(|r| matches!(r, PoseRecord::Diff(_)))
            .count();
        assert!(diff_count > 0, "should produce keypoint diffs");

        for record in batch {
            record_tx.send(record).await.unwrap();
        }

        drop(record_tx);
        let _ = tokio::time::timeout(Duration::from_secs(2), dispatcher_handle).await;

        assert_eq!(ingested, target_frames);
        // One Frame record plus six JointAngle records per non-empty frame
        assert_eq!(live_records, target_frames * 7);
        assert_eq!(engine.store().len(), target_frames as usize);
    }

    /// The canonical displacement scenario, verified through the CSV sink.
    ///
    /// A keypoint moves from (10, 10, 0) to (13, 14, 0) across a 5 s offset,
    /// so the diff row carries dx=3, dy=4, dz=0.
    #[tokio::test]
    async fn test_displacement_through_csv_sink() {
        let out_dir = tempfile::tempdir().unwrap();

        let mut engine = MotionEngine::new(EngineConfig {
            delta_s: 5.0,
            joints: Vec::new(),
        });

        let live_a = engine.ingest(PoseFrame::from_landmarks(
            0.0,
            [landmark(0, 10.0, 10.0, 0.0)],
        ));
        let live_b = engine.ingest(PoseFrame::from_landmarks(
            5.0,
            [landmark(0, 13.0, 14.0, 0.0)],
        ));

        let (record_tx, record_rx) = mpsc::channel::<PoseRecord>(100);

        let mut params = HashMap::new();
        params.insert(
            "base_path".to_string(),
            out_dir.path().to_string_lossy().to_string(),
        );
        let sink_configs = vec![SinkConfig {
            name: "csv_out".to_string(),
            sink_type: SinkType::Csv,
            queue_capacity: 50,
            params,
        }];

        let dispatcher = create_dispatcher(sink_configs, record_rx).unwrap();
        let dispatcher_handle = dispatcher.spawn();

        for record in live_a.into_iter().chain(live_b).chain(engine.finalize()) {
            record_tx.send(record).await.unwrap();
        }

        drop(record_tx);
        let _ = tokio::time::timeout(Duration::from_secs(2), dispatcher_handle).await;

        let diff_csv = std::fs::read_to_string(out_dir.path().join("pose_diff_5s.csv")).unwrap();
        let lines: Vec<&str> = diff_csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("timestamp_start"));
        assert_eq!(lines[1], "0.0,5.0,0,10,10,0.0,13,14,0.0,3.0,4.0,0.0");

        // Live pass also lands in the keypoint file
        let pose_csv =
            std::fs::read_to_string(out_dir.path().join("pose_joint_data.csv")).unwrap();
        assert!(pose_csv.lines().any(|l| l.starts_with("0.0,NOSE,10,10")));
    }

    /// Configuration drives the joint set end to end.
    #[tokio::test]
    async fn test_config_to_engine_flow() {
        let content = r#"
[capture]
source_id = "webcam"

[align]
delta_s = 5.0

[[joints]]
name = "left_elbow"
a_id = 11
b_id = 13
c_id = 15

[[sinks]]
name = "log"
sink_type = "log"
"#;
        let blueprint =
            config_loader::ConfigLoader::load_from_str(content, config_loader::ConfigFormat::Toml)
                .unwrap();
        let mut engine = MotionEngine::new(blueprint.to_engine_config());

        let records = engine.ingest(PoseFrame::from_landmarks(
            0.0,
            [
                landmark(11, 100.0, 100.0, 0.0),
                landmark(13, 100.0, 200.0, 0.0),
                landmark(15, 200.0, 200.0, 0.0),
            ],
        ));

        let angle = records
            .iter()
            .find_map(|r| match r {
                PoseRecord::JointAngle(a) => Some(a),
                _ => None,
            })
            .expect("joint angle record");

        assert_eq!(angle.joint, "left_elbow");
        assert_eq!(angle.angle_deg, 90.0);
        assert_eq!((angle.x, angle.y), (100, 200));
    }

    /// Dispatcher fan-out across multiple sinks
    #[tokio::test]
    async fn test_dispatcher_multiple_sinks() {
        let (tx, rx) = mpsc::channel::<PoseRecord>(10);

        let sink_configs = vec![
            SinkConfig {
                name: "log1".to_string(),
                sink_type: SinkType::Log,
                queue_capacity: 50,
                params: HashMap::new(),
            },
            SinkConfig {
                name: "log2".to_string(),
                sink_type: SinkType::Log,
                queue_capacity: 50,
                params: HashMap::new(),
            },
        ];

        let dispatcher = create_dispatcher(sink_configs, rx).unwrap();

        let metrics = dispatcher.metrics();
        assert_eq!(metrics.len(), 2);

        let handle = dispatcher.spawn();

        for i in 0..5 {
            let record = PoseRecord::AngleDelta(contracts::AngleDelta {
                timestamp_sec: i as f64 * 0.1,
                joint: "left_elbow".to_string(),
                angle_diff_deg: 1.5,
            });
            tx.send(record).await.unwrap();
        }

        drop(tx);

        let _ = tokio::time::timeout(std::time::Duration::from_secs(2), handle).await;
    }
}
