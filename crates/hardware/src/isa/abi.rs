//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Used for register dumps and for locating the conformance result register.

/// Register x3 (global pointer, gp). The riscv-tests environment keeps the
/// test number here and sets it to 1 on success.
pub const REG_GP: usize = 3;
/// ABI names of `x0`-`x31`, indexed by register number.
pub const NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];
