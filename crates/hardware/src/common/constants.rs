//! Global Core Constants.
//!
//! This module defines constants shared across the model. It includes:
//! 1. **Instruction Constants:** Instruction size and the canonical NOP.
//! 2. **Register Constants:** Register file geometry.
//! 3. **Bus Constants:** Wishbone byte-select patterns.

/// Size of an RV32I instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Canonical NOP encoding (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// Byte-select for a single byte lane.
pub const SEL_BYTE: u8 = 0x1;

/// Byte-select for the two low byte lanes (halfword).
pub const SEL_HALF: u8 = 0x3;

/// Byte-select for all four byte lanes (word).
pub const SEL_WORD: u8 = 0xF;

/// Jump targets always have bit 0 cleared.
pub const JUMP_TARGET_MASK: u32 = !1;

/// Conditional branch offsets travel down the pipeline masked to 20 bits.
pub const BRANCH_OFFSET_MASK: u32 = 0xF_FFFF;

/// Width of the branch offset field carried from decode to execute.
pub const BRANCH_OFFSET_BITS: u32 = 20;
