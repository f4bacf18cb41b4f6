//! Sink implementations
//!
//! Contains LogSink, CsvSink, and JsonSink.

mod csv;
mod json;
mod log;

pub use self::csv::CsvSink;
pub use self::json::JsonSink;
pub use self::log::LogSink;
