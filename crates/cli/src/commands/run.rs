//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(delta) = args.delta {
        if !delta.is_finite() {
            anyhow::bail!("--delta must be finite, got {delta}");
        }
        info!(delta_s = delta, "Overriding alignment offset from CLI");
        blueprint.align.delta_s = delta;
    }
    if let Some(frequency) = args.frequency {
        if !(frequency > 0.0) {
            anyhow::bail!("--frequency must be > 0, got {frequency}");
        }
        info!(frequency_hz = frequency, "Overriding capture frequency from CLI");
        blueprint.capture.frequency_hz = frequency;
    }

    info!(
        source_id = %blueprint.capture.source_id,
        frequency_hz = blueprint.capture.frequency_hz,
        delta_s = blueprint.align.delta_s,
        joints = blueprint.to_engine_config().joints.len(),
        sinks = blueprint.sinks.len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        blueprint,
        max_frames: if args.max_frames == 0 {
            None
        } else {
            Some(args.max_frames)
        },
        timeout: if args.timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(args.timeout))
        },
        buffer_size: args.buffer_size,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    // Create and run pipeline
    let pipeline = Pipeline::new(pipeline_config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting pipeline...");

    // Run pipeline with shutdown signal
    tokio::select! {
        result = pipeline.run() => {
            match result {
                Ok(stats) => {
                    info!(
                        frames_ingested = stats.frames_ingested,
                        records_emitted = stats.records_emitted,
                        duration_secs = stats.duration.as_secs_f64(),
                        fps = format!("{:.2}", stats.fps()),
                        "Pipeline completed successfully"
                    );

                    // Print detailed statistics
                    stats.print_summary();
                }
                Err(e) => {
                    return Err(e).context("Pipeline execution failed");
                }
            }
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping pipeline...");
        }
    }

    info!("Pose Syncer finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::CaptureBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Capture:");
    println!("  Source: {}", blueprint.capture.source_id);
    println!("  Frequency: {} Hz", blueprint.capture.frequency_hz);
    println!(
        "  Frame size: {}x{}",
        blueprint.capture.frame_width, blueprint.capture.frame_height
    );
    if let Some(max) = blueprint.capture.max_frames {
        println!("  Max frames: {max}");
    }

    println!("\nAlignment:");
    println!("  Delta: {} s", blueprint.align.delta_s);

    let joints = blueprint.to_engine_config().joints;
    let origin = if blueprint.joints.is_empty() {
        " (reference set)"
    } else {
        ""
    };
    println!("\nJoints ({}){origin}:", joints.len());
    for joint in &joints {
        println!(
            "  - {} ({} -> {} -> {})",
            joint.name, joint.a_id, joint.b_id, joint.c_id
        );
    }

    if !blueprint.sinks.is_empty() {
        println!("\nSinks ({}):", blueprint.sinks.len());
        for sink in &blueprint.sinks {
            println!("  - {} ({:?})", sink.name, sink.sink_type);
        }
    }

    println!();
}
