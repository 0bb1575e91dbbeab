//! ECAP5-DPROC core model.
//!
//! This crate implements a cycle-accurate model of the ECAP5-DPROC, a 5-stage
//! pipelined RV32I processor with a Wishbone master interface:
//! 1. **Core:** Fetch, decode, execute, load-store and writeback stages joined by
//!    valid/ready handshakes, the register file, and the hazard unit.
//! 2. **ISA:** RV32I field extraction and immediate decoding.
//! 3. **SoC:** Wishbone signal bundles, the two-master arbiter, and a flat memory.
//! 4. **Simulation:** Loader, configuration, conformance sweep and statistics.
//!
//! One [`Core::tick`] is one rising clock edge. Every bus-visible signal is a
//! registered output, so a harness can sample [`Core::bus`], answer it, and
//! clock the core with the answer.

/// Common types and constants (access widths, bus constants, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (pipeline, register file, ALU).
pub mod core;
/// Instruction set (field extraction, immediates, ABI names, RV32I encodings).
pub mod isa;
/// Program loading, simulator and conformance runner.
pub mod sim;
/// System-on-chip (Wishbone bundles, arbiter, memory).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The core model.
pub use crate::core::Core;
/// Core plus memory; the usual entry point.
pub use crate::sim::Simulator;
