//! Inter-stage latches, hazard forwarding, and the five stage drivers.

/// Pipeline hazard forwarding: selector computation and application.
pub mod hazards;

/// The `PipelineReg` latch shape and read-view/write-view pairs.
pub mod latches;

/// The five stage driver functions (fetch, decode, execute, memory, writeback).
pub mod stages;

pub use latches::{Latch, PipelineReg};
