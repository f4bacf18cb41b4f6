//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    source_id: String,
    frequency_hz: f64,
    delta_s: f64,
    joint_count: usize,
    sink_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            let engine_config = blueprint.to_engine_config();

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    source_id: blueprint.capture.source_id.clone(),
                    frequency_hz: blueprint.capture.frequency_hz,
                    delta_s: blueprint.align.delta_s,
                    joint_count: engine_config.joints.len(),
                    sink_count: blueprint.sinks.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &contracts::CaptureBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    // Check for empty sinks
    if blueprint.sinks.is_empty() {
        warnings.push("No sinks configured - records will be dropped".to_string());
    }

    // Joint set defaults
    if blueprint.joints.is_empty() {
        warnings.push("joints is empty - using the reference joint set".to_string());
    }

    // Alignment offset oddities
    if blueprint.align.delta_s == 0.0 {
        warnings.push(
            "align.delta_s is 0 - every frame will pair with itself and all diffs will be zero"
                .to_string(),
        );
    } else if blueprint.align.delta_s < 0.0 {
        warnings.push(format!(
            "align.delta_s is negative ({}) - frames will pair with earlier frames",
            blueprint.align.delta_s
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Source: {}", summary.source_id);
            println!("  Frequency: {} Hz", summary.frequency_hz);
            println!("  Alignment delta: {} s", summary.delta_s);
            println!("  Joints: {}", summary.joint_count);
            println!("  Sinks: {}", summary.sink_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
