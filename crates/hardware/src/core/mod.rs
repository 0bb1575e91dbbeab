//! Core processor implementation.
//!
//! This module contains the ECAP5-DPROC core: the instruction pipeline, the
//! ALU, and the architectural register file.

/// Architecture-specific components (register file).
pub mod arch;

/// Instruction pipeline implementation (stages, latches, hazards, signals, top level).
pub mod pipeline;

/// Execution units (ALU).
pub mod units;

pub use self::pipeline::engine::{Core, CoreInputs, TickReport};
