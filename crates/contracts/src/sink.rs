//! RecordSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for Sinks.

use crate::{PoseError, PoseRecord};

/// Record output trait
///
/// All sink implementations must implement this trait.
#[trait_variant::make(RecordSink: Send)]
pub trait LocalRecordSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one record
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, record: &PoseRecord) -> Result<(), PoseError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), PoseError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), PoseError>;
}
