//! Instruction encoding and field extraction.
//!
//! RV32I keeps every register and function field at a fixed bit position
//! across formats, so they can be sliced out before the opcode is known.
//! Immediates depend on the format and live in [`crate::isa::decode`].

use crate::isa::rv32i::funct7;

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register field (5 bits).
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Bit positions of the fixed fields.
mod pos {
    pub const RD: u32 = 7;
    pub const FUNCT3: u32 = 12;
    pub const RS1: u32 = 15;
    pub const RS2: u32 = 20;
    pub const FUNCT7: u32 = 25;
}

/// Fixed-position field accessors for a raw instruction word.
pub trait InstructionBits {
    /// Opcode, bits 6:0.
    fn opcode(&self) -> u32;
    /// Destination register, bits 11:7.
    fn rd(&self) -> usize;
    /// First source register, bits 19:15.
    fn rs1(&self) -> usize;
    /// Second source register, bits 24:20.
    ///
    /// For I-type encodings these bits belong to the immediate; callers decide
    /// whether the field is meaningful. Shift-immediates read their shift
    /// amount from the same position.
    fn rs2(&self) -> usize;
    /// funct3, bits 14:12.
    fn funct3(&self) -> u32;
    /// funct7, bits 31:25.
    fn funct7(&self) -> u32;
    /// Bit 30: selects SUB over ADD and SRA/SRAI over SRL/SRLI.
    fn alt(&self) -> bool {
        self.funct7() & funct7::ALT != 0
    }
}

#[inline(always)]
const fn field(word: u32, lsb: u32, mask: u32) -> u32 {
    (word >> lsb) & mask
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        field(*self, 0, OPCODE_MASK)
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        field(*self, pos::RD, REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        field(*self, pos::RS1, REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        field(*self, pos::RS2, REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        field(*self, pos::FUNCT3, FUNCT3_MASK)
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        field(*self, pos::FUNCT7, FUNCT7_MASK)
    }
}

/// An instruction split into its fields.
///
/// `imm` is sign-extended to 32 bits according to the format (I, S, B, U
/// or J) and is zero for R-type and the opcodes the core does not execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Instruction word as fetched.
    pub raw: u32,
    /// Bits 6:0.
    pub opcode: u32,
    /// Destination register.
    pub rd: usize,
    /// First source register.
    pub rs1: usize,
    /// Second source register.
    pub rs2: usize,
    /// Bits 14:12.
    pub funct3: u32,
    /// Bits 31:25.
    pub funct7: u32,
    /// Format-dependent immediate.
    pub imm: u32,
}
