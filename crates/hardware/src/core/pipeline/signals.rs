//! Pipeline control signals and operation types.
//!
//! This module defines the signals that steer an instruction through the
//! pipeline. It performs:
//! 1. **Operation Classification:** The ALU operation and its modifier flags.
//! 2. **Operand Selection:** Sources for the two ALU inputs.
//! 3. **Branch Control:** The condition evaluated by the execute stage.

/// ALU operation selected by the decode stage.
///
/// Subtraction and the shift direction/kind are not separate operations;
/// they are modifiers carried in [`AluFlags`], as in the hardware.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Addition, or subtraction when `AluFlags::sub` is set. Bubble default.
    #[default]
    Add,

    /// Bitwise XOR.
    Xor,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Shift; direction and kind come from the flags.
    Shift,
}

/// Modifier flags for [`AluOp`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AluFlags {
    /// Turns `Add` into a subtraction.
    pub sub: bool,
    /// Shift left (logical) instead of right.
    pub shift_left: bool,
    /// Right shifts are arithmetic instead of logical.
    pub shift_signed: bool,
}

/// Condition evaluated by the execute stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BranchCond {
    /// Not a control-transfer instruction.
    #[default]
    None,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Branch if less than (signed).
    Blt,
    /// Branch if greater or equal (signed).
    Bge,
    /// Branch if less than (unsigned).
    Bltu,
    /// Branch if greater or equal (unsigned).
    Bgeu,
    /// Unconditional jump (`JAL`/`JALR`).
    Uncond,
}

impl BranchCond {
    /// Maps a BRANCH funct3 field onto its condition.
    ///
    /// Returns `None` (the enum variant) for the two reserved encodings.
    pub const fn from_funct3(funct3: u32) -> Self {
        use crate::isa::rv32i::funct3;
        match funct3 {
            funct3::BEQ => Self::Beq,
            funct3::BNE => Self::Bne,
            funct3::BLT => Self::Blt,
            funct3::BGE => Self::Bge,
            funct3::BLTU => Self::Bltu,
            funct3::BGEU => Self::Bgeu,
            _ => Self::None,
        }
    }

    /// Evaluates the condition on the two branch operands.
    pub const fn taken(self, a: u32, b: u32) -> bool {
        match self {
            Self::None => false,
            Self::Beq => a == b,
            Self::Bne => a != b,
            Self::Blt => (a as i32) < (b as i32),
            Self::Bge => (a as i32) >= (b as i32),
            Self::Bltu => a < b,
            Self::Bgeu => a >= b,
            Self::Uncond => true,
        }
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use `rs1` register value.
    #[default]
    Reg1,
    /// Use program counter value.
    Pc,
    /// Use zero.
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use the decoded immediate.
    #[default]
    Imm,
    /// Use `rs2` register value.
    Reg2,
}
