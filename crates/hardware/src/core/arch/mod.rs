//! Architectural state of the core.
//!
//! The ECAP5-DPROC only exposes the integer register file; the program
//! counter lives inside the fetch unit.

/// General-Purpose Register file implementation.
pub mod gpr;
