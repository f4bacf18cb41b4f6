//! Layered error definitions
//!
//! Categorized by source: config / source / engine / sink.
//!
//! Expected absences (missing delta target, landmark absent from one frame,
//! degenerate geometry) are modeled as empty results, never as errors.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum PoseError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Source Errors =====
    /// Capture source unavailable - fatal, aborts the run
    #[error("source '{source_id}' acquisition error: {message}")]
    SourceAcquisition { source_id: String, message: String },

    /// Malformed detector payload
    #[error("payload parse error for source '{source_id}': {message}")]
    PayloadParse { source_id: String, message: String },

    // ===== Sink Errors =====
    /// Sink write error - fatal, surfaced to the host
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    /// Sink creation error
    #[error("sink '{sink_name}' creation error: {message}")]
    SinkCreation { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl PoseError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create source acquisition error
    pub fn source_acquisition(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceAcquisition {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create sink creation error
    pub fn sink_creation(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}
