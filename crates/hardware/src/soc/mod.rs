//! System-on-Chip (SoC) Components.
//!
//! This module organizes everything on the core's side of the Wishbone
//! interface: the bus signal types, the two-master arbiter inside the core,
//! and the flat memory the core is simulated against.

/// Two-master fixed-priority arbiter.
pub mod arbiter;

/// Flat memory with console and end-of-test MMIO.
pub mod memory;

/// Slave trait for bus-attached models.
pub mod traits;

/// Wishbone request/response signal bundles.
pub mod wishbone;

pub use memory::FlatMemory;
