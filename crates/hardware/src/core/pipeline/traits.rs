//! Pipeline Stage and Latch Interfaces.
//!
//! This module defines the common traits for pipeline components. It provides:
//! 1. **Pipeline Stage Interface:** The registered output and reset of each stage.
//! 2. **Pipeline Latch Interface:** Flushing an inter-stage register.

use crate::core::pipeline::latches::Latch;

/// A stage in the instruction pipeline.
///
/// Every stage output is a register, so the top level can read all of them
/// and compute the whole handshake chain before committing any stage.
pub trait PipelineStage {
    /// Payload this stage presents to the next one.
    type Output: Copy + Default;

    /// Registered output towards the next stage.
    fn output(&self) -> &Latch<Self::Output>;

    /// Returns the stage to its reset state.
    fn reset(&mut self);
}

/// Represents a pipeline latch (inter-stage buffer).
pub trait PipelineLatch {
    /// Drops the held payload and deasserts valid.
    fn flush(&mut self);
}
