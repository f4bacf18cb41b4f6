//! # Dispatcher
//!
//! Record fan-out module.
//!
//! Responsibilities:
//! - Consume `PoseRecord`s
//! - Fan out to multiple sinks
//! - Isolate slow sinks so they never block the main path

pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod metrics;
pub mod sinks;

pub use contracts::{PoseRecord, RecordSink};
pub use dispatcher::{create_dispatcher, Dispatcher, DispatcherBuilder, DispatcherConfig};
pub use error::DispatcherError;
pub use handle::SinkHandle;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{CsvSink, JsonSink, LogSink};
