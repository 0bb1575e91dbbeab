//! Execution units.
//!
//! The ECAP5-DPROC has a single integer ALU shared by every instruction
//! class; address generation and jump-link computation also go through it.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;
