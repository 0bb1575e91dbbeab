//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage.
//! The ALU is purely combinational and has no error conditions.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::core::pipeline::signals::{AluFlags, AluOp};

/// Arithmetic Logic Unit (ALU) for integer operations.
///
/// Implements the RV32I integer arithmetic and logical operations.
#[derive(Debug, Clone, Copy)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// Dispatches to the appropriate submodule based on the operation type.
    ///
    /// # Arguments
    ///
    /// * `op`    - The ALU operation to perform
    /// * `a`     - First operand
    /// * `b`     - Second operand (also the shift amount, of which only bits 4:0 are used)
    /// * `flags` - Subtract and shift modifiers
    ///
    /// # Examples
    ///
    /// ```
    /// use dproc_core::core::units::alu::Alu;
    /// use dproc_core::core::pipeline::signals::{AluFlags, AluOp};
    ///
    /// let plain = AluFlags::default();
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8, plain), 50);
    ///
    /// // Addition wraps around
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1, plain), 0);
    ///
    /// let sub = AluFlags { sub: true, ..AluFlags::default() };
    /// assert_eq!(Alu::execute(AluOp::Add, 0, 1, sub), 0xFFFF_FFFF);
    ///
    /// let sll = AluFlags { shift_left: true, ..AluFlags::default() };
    /// assert_eq!(Alu::execute(AluOp::Shift, 0x1, 4, sll), 0x10);
    ///
    /// let sra = AluFlags { shift_signed: true, ..AluFlags::default() };
    /// assert_eq!(Alu::execute(AluOp::Shift, 0x8000_0000, 31, sra), 0xFFFF_FFFF);
    ///
    /// // -5 < 10
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10, plain), 1);
    /// ```
    pub const fn execute(op: AluOp, a: u32, b: u32, flags: AluFlags) -> u32 {
        match op {
            AluOp::Add => arithmetic::execute(a, b, flags.sub),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Shift => shifts::execute(a, b, flags.shift_left, flags.shift_signed),
        }
    }
}
