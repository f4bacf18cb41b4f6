//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Uses capture timestamp (seconds since session start, f64) as primary clock
//! - Timestamps are quantized to 3 decimals (1 ms) upstream; lookups are exact-match

mod blueprint;
mod engine_config;
mod error;
mod frame;
mod record;
mod sink;
mod skeleton;
mod source;

pub use blueprint::*;
pub use engine_config::*;
pub use error::*;
pub use frame::*;
pub use record::*;
pub use sink::*;
pub use skeleton::*;
pub use source::{PoseCallback, PoseSource};
