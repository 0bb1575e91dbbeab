//! RISC-V General-Purpose Register File.
//!
//! This module implements the 32x32-bit register file of the core.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Provides utilities for dumping the complete register state.
//!
//! Reads are combinational and writes land on the clock edge. The pipeline
//! performs all decode reads of a tick before the writeback write of that
//! same tick, which yields read-before-write behaviour.

use std::fmt;

use crate::common::constants::NUM_REGS;
use crate::isa::abi;

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers. Register `x0` is hardwired to
/// zero and cannot be modified.
///
/// # Examples
///
/// ```
/// use dproc_core::core::arch::gpr::Gpr;
///
/// let mut regs = Gpr::new();
/// regs.write(0, 0xDEAD_BEEF);
/// regs.write(5, 42);
/// assert_eq!(regs.read(0), 0);
/// assert_eq!(regs.read(5), 42);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_REGS],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `x0` always returns 0.
    pub const fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx % NUM_REGS] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// Writes to `x0` are discarded.
    pub const fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx % NUM_REGS] = val;
        }
    }

    /// Clears every register to zero.
    pub const fn clear(&mut self) {
        self.regs = [0; NUM_REGS];
    }

    /// Returns a copy of all 32 registers, `x0` included.
    pub const fn snapshot(&self) -> [u32; NUM_REGS] {
        self.regs
    }

    /// Dumps the contents of all general-purpose registers to stdout.
    ///
    /// Displays registers in pairs with their ABI names.
    pub fn dump(&self) {
        print!("{self}");
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..NUM_REGS).step_by(2) {
            writeln!(
                f,
                "x{:<2} {:>4}={:#010x}  x{:<2} {:>4}={:#010x}",
                i,
                abi::NAMES[i],
                self.regs[i],
                i + 1,
                abi::NAMES[i + 1],
                self.regs[i + 1]
            )?;
        }
        Ok(())
    }
}

impl fmt::Debug for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gpr").field("regs", &self.regs).finish()
    }
}
