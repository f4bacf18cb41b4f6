//! Configuration parsing module
//!
//! Supports TOML (primary) and JSON (optional) formats.

use contracts::{CaptureBlueprint, PoseError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<CaptureBlueprint, PoseError> {
    toml::from_str(content).map_err(|e| PoseError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<CaptureBlueprint, PoseError> {
    serde_json::from_str(content).map_err(|e| PoseError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration content by format
pub fn parse(content: &str, format: ConfigFormat) -> Result<CaptureBlueprint, PoseError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[capture]
source_id = "webcam"

[[sinks]]
name = "log_sink"
sink_type = "log"
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.capture.source_id, "webcam");
        assert_eq!(bp.capture.frequency_hz, 30.0);
        assert_eq!(bp.align.delta_s, 5.0);
        assert!(bp.joints.is_empty());
    }

    #[test]
    fn test_parse_toml_full() {
        let content = r#"
[capture]
source_id = "session_01"
frequency_hz = 24.0
frame_width = 1280
frame_height = 720
max_frames = 240

[capture.dropout]
every_nth_frame = 10
landmark_ids = [15, 16]

[align]
delta_s = 2.5

[[joints]]
name = "left_elbow"
a_id = 11
b_id = 13
c_id = 15

[[sinks]]
name = "csv_out"
sink_type = "csv"
queue_capacity = 200

[sinks.params]
base_path = "./output"
"#;
        let bp = parse_toml(content).unwrap();
        assert_eq!(bp.capture.frequency_hz, 24.0);
        assert_eq!(bp.capture.max_frames, Some(240));
        assert_eq!(bp.align.delta_s, 2.5);
        assert_eq!(bp.joints.len(), 1);
        assert_eq!(bp.sinks[0].queue_capacity, 200);
        assert_eq!(bp.sinks[0].params["base_path"], "./output");
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "capture": { "source_id": "webcam" },
            "sinks": [{ "name": "log", "sink_type": "log" }]
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, PoseError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
