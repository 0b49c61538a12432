//! Shared utilities for `steptree`.
//!
//! - Duration accumulation and formatting

pub mod duration;

pub use duration::{format_duration, total_duration};
