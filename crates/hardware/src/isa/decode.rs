//! RISC-V Instruction Field Decoder.
//!
//! This module splits a 32-bit RV32I encoding into a `Decoded` record. It
//! extracts opcodes, register indices and function codes, and sign-extends
//! the immediate for each of the I, S, B, U and J formats.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::opcodes;

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for extracting the I-Type immediate (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

/// Bit shift and mask for the S-Type immediate low field (imm[4:0]).
const S_IMM_LOW_SHIFT: u32 = 7;
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Bit shift and mask for the S-Type immediate high field (imm[11:5]).
const S_IMM_HIGH_SHIFT: u32 = 25;
const S_IMM_HIGH_MASK: u32 = 0x7F;

/// Total number of bits in an I/S-Type immediate.
pub const I_IMM_BITS: u32 = 12;

/// Total number of bits in a B-Type immediate (13 bits, bit 0 always clear).
pub const B_IMM_BITS: u32 = 13;

/// Total number of bits in a J-Type immediate (21 bits, bit 0 always clear).
pub const J_IMM_BITS: u32 = 21;

/// Bit mask for the U-Type immediate field (bits 12-31).
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Decodes a RISC-V instruction into its component fields.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode
///
/// # Returns
///
/// A `Decoded` structure containing all extracted instruction fields.
///
/// # Examples
///
/// ```
/// use dproc_core::isa::decode::decode;
///
/// // addi x1, x2, -1
/// let d = decode(0xFFF1_0093);
/// assert_eq!(d.rd, 1);
/// assert_eq!(d.rs1, 2);
/// assert_eq!(d.imm, 0xFFFF_FFFF);
/// ```
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();
    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => imm_i(inst),
        opcodes::OP_STORE => imm_s(inst),
        opcodes::OP_BRANCH => imm_b(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => imm_u(inst),
        opcodes::OP_JAL => imm_j(inst),
        _ => 0,
    };
    Decoded {
        raw: inst,
        opcode,
        rd: InstructionBits::rd(&inst),
        rs1: InstructionBits::rs1(&inst),
        rs2: InstructionBits::rs2(&inst),
        funct3: InstructionBits::funct3(&inst),
        funct7: InstructionBits::funct7(&inst),
        imm,
    }
}

/// I-Type immediate: `imm[11:0] | rs1 | funct3 | rd | opcode`.
pub const fn imm_i(inst: u32) -> u32 {
    ((inst as i32) >> I_IMM_SHIFT) as u32
}

/// S-Type immediate: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
pub const fn imm_s(inst: u32) -> u32 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    sign_extend((high << 5) | low, I_IMM_BITS)
}

/// B-Type immediate: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
pub const fn imm_b(inst: u32) -> u32 {
    let bit_11 = (inst >> 7) & 0x1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 0x1;
    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// U-Type immediate: `imm[31:12] | rd | opcode`, already shifted into place.
pub const fn imm_u(inst: u32) -> u32 {
    inst & U_IMM_MASK
}

/// J-Type immediate: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
pub const fn imm_j(inst: u32) -> u32 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 0x1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 0x1;
    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign extends the low `bits` bits of `val` to 32 bits.
///
/// # Arguments
///
/// * `val` - The value to extend; bits above `bits` are ignored.
/// * `bits` - The number of valid bits in `val` (1-32).
///
/// # Examples
///
/// ```
/// use dproc_core::isa::decode::sign_extend;
///
/// assert_eq!(sign_extend(0x800, 12), 0xFFFF_F800);
/// assert_eq!(sign_extend(0x7FF, 12), 0x7FF);
/// assert_eq!(sign_extend(0x1_0080, 8), 0xFFFF_FF80);
/// ```
pub const fn sign_extend(val: u32, bits: u32) -> u32 {
    let shift = INSTRUCTION_WIDTH - bits;
    (((val << shift) as i32) >> shift) as u32
}
