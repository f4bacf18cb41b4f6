//! Pipeline orchestrator - coordinates all components.
//!
//! Wires the synthetic capture source through ingestion into the motion
//! engine, then streams live and alignment-pass records to the dispatcher.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{CaptureBlueprint, PoseRecord};
use ingestion::{IngestionPipeline, MockPoseSource, MockSourceConfig};
use motion_engine::MotionEngine;
use observability::{record_alignment_pass, record_frame_ingested, record_joint_angle};
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::PipelineStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The capture blueprint configuration
    pub blueprint: CaptureBlueprint,

    /// Maximum number of frames to ingest (None = blueprint setting)
    pub max_frames: Option<u64>,

    /// Pipeline timeout (None = no timeout)
    pub timeout: Option<Duration>,

    /// Channel buffer size
    pub buffer_size: usize,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // CLI limit wins over the blueprint setting
        let max_frames = self.config.max_frames.or(blueprint.capture.max_frames);

        // Setup capture source
        let source_config = MockSourceConfig {
            source_id: blueprint.capture.source_id.clone(),
            frequency_hz: blueprint.capture.frequency_hz,
            frame_width: blueprint.capture.frame_width,
            frame_height: blueprint.capture.frame_height,
            max_frames,
            dropout: blueprint.capture.dropout.clone(),
            realtime: true,
        };

        info!(
            source_id = %source_config.source_id,
            frequency_hz = source_config.frequency_hz,
            max_frames = ?max_frames,
            "Capture source configured (synthetic skeleton)"
        );

        let mut ingestion = IngestionPipeline::new(self.config.buffer_size);
        ingestion.register_pose_source(
            blueprint.capture.source_id.clone(),
            Box::new(MockPoseSource::new(source_config)),
            None,
        );

        // Setup Motion Engine
        let engine_config = blueprint.to_engine_config();
        info!(
            delta_s = engine_config.delta_s,
            joints = engine_config.joints.len(),
            "Motion engine configured"
        );
        let mut engine = MotionEngine::new(engine_config);

        // Setup Dispatcher
        info!("Setting up dispatcher...");
        let (record_tx, record_rx) = mpsc::channel::<PoseRecord>(self.config.buffer_size);

        if blueprint.sinks.is_empty() {
            warn!("No sinks configured - records will be dropped");
        }

        let dispatcher = dispatcher::create_dispatcher(blueprint.sinks.clone(), record_rx)
            .context("Failed to create dispatcher")?;

        let active_sinks = blueprint.sinks.len();
        let dispatcher_handle = dispatcher.spawn();

        info!(active_sinks, "Dispatcher started");

        // Start Pipeline
        info!("Starting frame ingestion...");
        ingestion.start_all();
        let frame_rx = ingestion
            .take_receiver()
            .context("Failed to get ingestion receiver")?;

        let deadline = self
            .config
            .timeout
            .map(|t| tokio::time::Instant::now() + t);

        info!(max_frames = ?max_frames, "Pipeline running");

        let mut stats = PipelineStats {
            active_sinks,
            ..Default::default()
        };

        // Live pass: per-frame records as frames arrive
        'live: loop {
            let frame = if let Some(deadline) = deadline {
                match tokio::time::timeout_at(deadline, frame_rx.recv()).await {
                    Ok(Ok(frame)) => frame,
                    Ok(Err(_)) => break 'live,
                    Err(_) => {
                        warn!(
                            timeout_secs = self.config.timeout.map(|t| t.as_secs()),
                            "Capture window elapsed"
                        );
                        break 'live;
                    }
                }
            } else {
                match frame_rx.recv().await {
                    Ok(frame) => frame,
                    Err(_) => break 'live,
                }
            };

            stats.frames_ingested += 1;
            stats.motion_metrics.on_frame(frame.len());
            record_frame_ingested(&blueprint.capture.source_id, frame.len());

            for record in engine.ingest(frame) {
                if let PoseRecord::JointAngle(r) = &record {
                    stats.motion_metrics.on_joint_angle(&r.joint, r.angle_deg);
                    record_joint_angle(&r.joint, r.angle_deg);
                }

                stats.records_emitted += 1;
                if record_tx.send(record).await.is_err() {
                    warn!("Dispatcher channel closed");
                    break 'live;
                }
            }

            if let Some(max) = max_frames {
                if stats.frames_ingested >= max {
                    info!(frames = stats.frames_ingested, "Reached max frames limit");
                    break 'live;
                }
            }
        }

        // Alignment pass over the completed store
        info!("Live capture finished, running alignment pass");
        ingestion.stop_all();

        let pair_count = engine.aligned_pairs().len();
        let (mut diff_count, mut delta_count) = (0u64, 0u64);

        for record in engine.finalize() {
            match &record {
                PoseRecord::Diff(_) => diff_count += 1,
                PoseRecord::AngleDelta(_) => delta_count += 1,
                _ => {}
            }

            stats.records_emitted += 1;
            if record_tx.send(record).await.is_err() {
                warn!("Dispatcher channel closed during alignment pass");
                break;
            }
        }

        stats
            .motion_metrics
            .on_alignment(pair_count, diff_count, delta_count);
        record_alignment_pass(pair_count, diff_count, delta_count);

        info!(
            pairs = pair_count,
            diffs = diff_count,
            deltas = delta_count,
            "Alignment pass complete"
        );

        stats.frames_dropped = ingestion.metrics().snapshot().frames_dropped;

        // Shutdown: close the record channel and wait for sinks to flush
        info!("Shutting down pipeline...");
        drop(record_tx);
        let _ = tokio::time::timeout(Duration::from_secs(5), dispatcher_handle).await;

        stats.duration = start_time.elapsed();

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            fps = format!("{:.2}", stats.fps()),
            "Pipeline shutdown complete"
        );

        Ok(stats)
    }
}
