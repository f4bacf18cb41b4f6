//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::landmark_name;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    capture: CaptureInfo,
    align_delta_s: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    joints: Vec<JointInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sinks: Vec<SinkInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    landmarks: Vec<LandmarkInfo>,
}

#[derive(Serialize)]
struct CaptureInfo {
    source_id: String,
    frequency_hz: f64,
    frame_width: u32,
    frame_height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_frames: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dropout: Option<DropoutInfo>,
}

#[derive(Serialize)]
struct DropoutInfo {
    every_nth_frame: u64,
    landmark_ids: Vec<u32>,
}

#[derive(Serialize)]
struct JointInfo {
    name: String,
    a: String,
    b: String,
    c: String,
}

#[derive(Serialize)]
struct SinkInfo {
    name: String,
    sink_type: String,
    queue_capacity: usize,
}

#[derive(Serialize)]
struct LandmarkInfo {
    id: u32,
    name: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args);
    }

    Ok(())
}

fn build_config_info(blueprint: &contracts::CaptureBlueprint, args: &InfoArgs) -> ConfigInfo {
    let capture = &blueprint.capture;

    let joints = if args.joints {
        blueprint
            .to_engine_config()
            .joints
            .iter()
            .map(|j| JointInfo {
                name: j.name.clone(),
                a: format!("{} ({})", landmark_name(j.a_id), j.a_id),
                b: format!("{} ({})", landmark_name(j.b_id), j.b_id),
                c: format!("{} ({})", landmark_name(j.c_id), j.c_id),
            })
            .collect()
    } else {
        Vec::new()
    };

    let sinks = if args.sinks {
        blueprint
            .sinks
            .iter()
            .map(|s| SinkInfo {
                name: s.name.clone(),
                sink_type: format!("{:?}", s.sink_type),
                queue_capacity: s.queue_capacity,
            })
            .collect()
    } else {
        Vec::new()
    };

    let landmarks = if args.landmarks {
        (0..contracts::LANDMARK_COUNT)
            .map(|id| LandmarkInfo {
                id,
                name: landmark_name(id),
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        capture: CaptureInfo {
            source_id: capture.source_id.clone(),
            frequency_hz: capture.frequency_hz,
            frame_width: capture.frame_width,
            frame_height: capture.frame_height,
            max_frames: capture.max_frames,
            dropout: capture.dropout.as_ref().map(|d| DropoutInfo {
                every_nth_frame: d.every_nth_frame,
                landmark_ids: d.landmark_ids.clone(),
            }),
        },
        align_delta_s: blueprint.align.delta_s,
        joints,
        sinks,
        landmarks,
    }
}

fn print_config_info(blueprint: &contracts::CaptureBlueprint, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Pose Syncer Configuration                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Capture info
    let capture = &blueprint.capture;
    println!("🎥 Capture");
    println!("   ├─ Version: {:?}", blueprint.version);
    println!("   ├─ Source: {}", capture.source_id);
    println!("   ├─ Frequency: {} Hz", capture.frequency_hz);
    println!(
        "   ├─ Frame size: {}x{}",
        capture.frame_width, capture.frame_height
    );
    match capture.max_frames {
        Some(max) => println!("   ├─ Max frames: {max}"),
        None => println!("   ├─ Max frames: unlimited"),
    }
    match &capture.dropout {
        Some(d) => println!(
            "   └─ Dropout: every {} frames, landmarks {:?}",
            d.every_nth_frame, d.landmark_ids
        ),
        None => println!("   └─ Dropout: none"),
    }

    // Alignment
    println!("\n⚙️  Alignment");
    println!("   └─ Delta: {} s", blueprint.align.delta_s);

    // Joints
    let joints = blueprint.to_engine_config().joints;
    let origin = if blueprint.joints.is_empty() {
        " [reference set]"
    } else {
        ""
    };
    println!("\n🦴 Joints ({}){origin}", joints.len());
    for (i, joint) in joints.iter().enumerate() {
        let is_last = i == joints.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };

        if args.joints {
            println!(
                "   {} {}: {} -> {} -> {}",
                prefix,
                joint.name,
                landmark_name(joint.a_id),
                landmark_name(joint.b_id),
                landmark_name(joint.c_id)
            );
        } else {
            println!(
                "   {} {} ({}, {}, {})",
                prefix, joint.name, joint.a_id, joint.b_id, joint.c_id
            );
        }
    }

    // Sinks
    if !blueprint.sinks.is_empty() {
        println!("\n📤 Sinks ({})", blueprint.sinks.len());
        for (i, sink) in blueprint.sinks.iter().enumerate() {
            let is_last = i == blueprint.sinks.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            if args.sinks {
                println!(
                    "   {} {} ({:?}, queue {})",
                    prefix, sink.name, sink.sink_type, sink.queue_capacity
                );
            } else {
                println!("   {} {} ({:?})", prefix, sink.name, sink.sink_type);
            }
        }
    }

    // Landmark table
    if args.landmarks {
        println!("\n📍 Landmarks ({})", contracts::LANDMARK_COUNT);
        for id in 0..contracts::LANDMARK_COUNT {
            println!("   {:>2}  {}", id, landmark_name(id));
        }
    }

    println!();
}
