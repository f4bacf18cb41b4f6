//! Configuration validation module
//!
//! Validation rules:
//! - capture.source_id non-empty
//! - capture.frequency_hz > 0, frame dimensions > 0
//! - align.delta_s finite (zero/negative are legal alignment offsets)
//! - joint names unique, joint landmark ids pairwise distinct
//! - dropout period > 0 when configured
//! - sink names non-empty and unique

use std::collections::HashSet;

use contracts::{CaptureBlueprint, PoseError};

/// Validate a CaptureBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &CaptureBlueprint) -> Result<(), PoseError> {
    validate_capture(blueprint)?;
    validate_align(blueprint)?;
    validate_joints(blueprint)?;
    validate_sinks(blueprint)?;
    Ok(())
}

fn validate_capture(blueprint: &CaptureBlueprint) -> Result<(), PoseError> {
    let capture = &blueprint.capture;

    if capture.source_id.is_empty() {
        return Err(PoseError::config_validation(
            "capture.source_id",
            "source_id cannot be empty",
        ));
    }

    if !(capture.frequency_hz > 0.0) {
        return Err(PoseError::config_validation(
            "capture.frequency_hz",
            format!("frequency_hz must be > 0, got {}", capture.frequency_hz),
        ));
    }

    if capture.frame_width == 0 || capture.frame_height == 0 {
        return Err(PoseError::config_validation(
            "capture.frame_width / capture.frame_height",
            format!(
                "frame dimensions must be > 0, got {}x{}",
                capture.frame_width, capture.frame_height
            ),
        ));
    }

    if let Some(dropout) = &capture.dropout {
        if dropout.every_nth_frame == 0 {
            return Err(PoseError::config_validation(
                "capture.dropout.every_nth_frame",
                "dropout period must be > 0",
            ));
        }
    }

    Ok(())
}

fn validate_align(blueprint: &CaptureBlueprint) -> Result<(), PoseError> {
    if !blueprint.align.delta_s.is_finite() {
        return Err(PoseError::config_validation(
            "align.delta_s",
            format!("delta_s must be finite, got {}", blueprint.align.delta_s),
        ));
    }
    Ok(())
}

fn validate_joints(blueprint: &CaptureBlueprint) -> Result<(), PoseError> {
    let mut seen = HashSet::new();
    for joint in &blueprint.joints {
        if joint.name.is_empty() {
            return Err(PoseError::config_validation(
                "joints[].name",
                "joint name cannot be empty",
            ));
        }

        if !seen.insert(&joint.name) {
            return Err(PoseError::config_validation(
                format!("joints[name={}]", joint.name),
                "duplicate joint name",
            ));
        }

        if joint.a_id == joint.b_id || joint.b_id == joint.c_id || joint.a_id == joint.c_id {
            return Err(PoseError::config_validation(
                format!("joints[name={}]", joint.name),
                format!(
                    "landmark ids must be pairwise distinct, got ({}, {}, {})",
                    joint.a_id, joint.b_id, joint.c_id
                ),
            ));
        }
    }
    Ok(())
}

fn validate_sinks(blueprint: &CaptureBlueprint) -> Result<(), PoseError> {
    let mut seen = HashSet::new();
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        if sink.name.is_empty() {
            return Err(PoseError::config_validation(
                format!("sinks[{idx}].name"),
                "sink name cannot be empty",
            ));
        }

        if !seen.insert(&sink.name) {
            return Err(PoseError::config_validation(
                format!("sinks[{idx}].name"),
                format!("duplicate sink name '{}'", sink.name),
            ));
        }

        if sink.queue_capacity == 0 {
            return Err(PoseError::config_validation(
                format!("sinks[{idx}].queue_capacity"),
                "queue_capacity must be > 0",
            ));
        }
    }
    Ok(())
}
