//! Simulation harness.
//!
//! Provides program loading, the tick-budgeted simulator that pairs the core
//! with its memory, and the RV32UI conformance sweep.

/// RV32UI conformance test runner.
pub mod conformance;

/// ELF and raw binary loading.
pub mod loader;

/// Core plus memory, clocked together.
pub mod simulator;

pub use simulator::{RunOutcome, Simulator};
