//! Complete Pipeline Demo
//!
//! Demonstrates reading a single configuration file, wiring the synthetic
//! capture source, running the motion engine, and fanning out via the
//! dispatcher.
//!
//! Run with: cargo run --bin complete_pipeline [config_path]

use std::path::PathBuf;
use std::time::Duration;

use config_loader::ConfigLoader;
use contracts::PoseRecord;
use dispatcher::create_dispatcher;
use ingestion::{IngestionPipeline, MockPoseSource, MockSourceConfig};
use motion_engine::MotionEngine;
use tokio::sync::mpsc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Complete Pipeline Demo");

    let config_path = resolve_config_path();
    info!(path = %config_path.display(), "Loading unified config file");
    let blueprint = ConfigLoader::load_from_path(config_path.as_path())?;
    info!(source_id = %blueprint.capture.source_id, "Blueprint loaded");

    // ==== Stage 1: Configure Motion Engine ====
    let engine_config = blueprint.to_engine_config();
    info!(
        delta_s = engine_config.delta_s,
        joints = engine_config.joints.len(),
        "Motion engine configured"
    );
    let mut engine = MotionEngine::new(engine_config);

    // ==== Stage 2: Create Dispatcher with sinks from config ====
    let (record_tx, record_rx) = mpsc::channel::<PoseRecord>(100);
    let dispatcher = create_dispatcher(blueprint.sinks.clone(), record_rx)?;
    let dispatcher_handle = dispatcher.spawn();

    // ==== Stage 3: Start the capture source described by config ====
    let capture = &blueprint.capture;
    let target_frames = capture.max_frames.unwrap_or(300);
    let source_config = MockSourceConfig {
        source_id: capture.source_id.clone(),
        frequency_hz: capture.frequency_hz,
        frame_width: capture.frame_width,
        frame_height: capture.frame_height,
        max_frames: Some(target_frames),
        dropout: capture.dropout.clone(),
        // Burst through the sequence instead of pacing at wall-clock
        realtime: false,
    };

    let mut ingestion = IngestionPipeline::new(512);
    ingestion.register_pose_source(
        capture.source_id.clone(),
        Box::new(MockPoseSource::new(source_config)),
        None,
    );

    let frame_rx = ingestion.take_receiver().expect("fresh pipeline");
    ingestion.start_all();

    info!(target_frames, "Running pipeline");

    // ==== Stage 4: Live pass ====
    let mut ingested = 0u64;
    let mut live_records = 0u64;

    while ingested < target_frames {
        let frame = match tokio::time::timeout(Duration::from_secs(5), frame_rx.recv()).await {
            Ok(Ok(frame)) => frame,
            _ => break,
        };

        ingested += 1;
        for record in engine.ingest(frame) {
            live_records += 1;
            if record_tx.send(record).await.is_err() {
                break;
            }
        }
    }

    ingestion.stop_all();
    info!(ingested, live_records, "Live pass complete");

    // ==== Stage 5: Alignment pass and graceful shutdown ====
    let batch = engine.finalize();
    info!(records = batch.len(), "Alignment pass complete");

    for record in batch {
        if record_tx.send(record).await.is_err() {
            break;
        }
    }

    drop(record_tx);
    let _ = tokio::time::timeout(Duration::from_secs(2), dispatcher_handle).await;

    let stats = engine.stats();
    info!(
        frames = stats.frames_ingested,
        stored = stats.stored_frames,
        "Complete Pipeline Demo finished"
    );
    Ok(())
}

fn resolve_config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demos/full.toml"))
}
