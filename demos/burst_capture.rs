//! Burst Capture Demo
//!
//! Runs the motion engine directly over a synthetic burst, without config
//! or dispatcher. Prints the first few keypoint diffs from the alignment
//! pass.
//!
//! Run with: cargo run --bin burst_capture

use contracts::{EngineConfig, PoseRecord};
use ingestion::{MockPoseSource, MockSourceConfig};
use motion_engine::MotionEngine;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Burst Capture Demo");

    // Five seconds of synthetic skeleton at 30 Hz
    let source_config = MockSourceConfig {
        source_id: "burst".to_string(),
        frequency_hz: 30.0,
        ..Default::default()
    };

    let mut engine = MotionEngine::new(EngineConfig::with_delta(1.0));

    for frame_idx in 0..150 {
        let frame = MockPoseSource::frame_at(&source_config, frame_idx);
        engine.ingest(frame);
    }

    let pairs = engine.aligned_pairs();
    info!(
        frames = engine.store().len(),
        pairs = pairs.len(),
        "Alignment pass ready"
    );

    let mut shown = 0;
    for record in engine.finalize() {
        match record {
            PoseRecord::Diff(diff) if shown < 10 => {
                shown += 1;
                info!(
                    keypoint = diff.keypoint_id,
                    from = diff.from_timestamp,
                    to = diff.to_timestamp,
                    dx = diff.diff[0],
                    dy = diff.diff[1],
                    dz = diff.diff[2],
                    "Keypoint displacement"
                );
            }
            _ => {}
        }
    }

    info!("Burst Capture Demo finished");
    Ok(())
}
