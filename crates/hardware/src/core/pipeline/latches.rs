//! Pipeline registers for inter-stage communication.
//!
//! This module defines the payloads carried between the five stages:
//! Fetch → Decode → Execute → Load-Store → Writeback.
//!
//! 1. **Handshake:** Every payload sits in a [`Latch`] that pairs it with its `valid` bit.
//! 2. **Bubbles:** Every payload's `Default` is the bubble. A bubble never writes a
//!    register, never touches the bus and never takes a branch.
//! 3. **Tracing:** `pc` and `instr` ride along with each instruction for logs and
//!    statistics; they do not influence the datapath.

use crate::common::data::AccessWidth;
use crate::core::pipeline::signals::{AluFlags, AluOp, BranchCond};
use crate::core::pipeline::traits::PipelineLatch;

/// A pipeline register: payload plus the producer's `valid` bit.
///
/// # Examples
///
/// ```
/// use dproc_core::core::pipeline::latches::{FetchOutput, Latch};
/// use dproc_core::core::pipeline::traits::PipelineLatch;
///
/// let mut latch = Latch::new(FetchOutput { pc: 0x40, instr: 0x13 });
/// assert!(latch.valid);
/// latch.flush();
/// assert!(!latch.valid);
/// assert_eq!(latch.data, FetchOutput::default());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latch<T> {
    /// The producer asserts this while `data` is meaningful.
    pub valid: bool,
    /// Registered payload.
    pub data: T,
}

impl<T> Latch<T> {
    /// Creates a valid latch holding `data`.
    pub const fn new(data: T) -> Self {
        Self { valid: true, data }
    }
}

impl<T: Default> Latch<T> {
    /// Creates a valid latch holding a bubble.
    pub fn bubble() -> Self {
        Self::new(T::default())
    }
}

impl<T: Default> PipelineLatch for Latch<T> {
    fn flush(&mut self) {
        self.valid = false;
        self.data = T::default();
    }
}

/// IF → DEC payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchOutput {
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// Raw 32-bit instruction word.
    pub instr: u32,
}

/// DEC → EX payload.
///
/// Operands are already resolved to values: the register file is read in
/// decode, so execute never looks at register indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOutput {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw instruction word (0 for a bubble).
    pub instr: u32,
    /// ALU operation.
    pub alu_op: AluOp,
    /// First ALU operand.
    pub alu_op1: u32,
    /// Second ALU operand.
    pub alu_op2: u32,
    /// Subtract and shift modifiers.
    pub alu_flags: AluFlags,
    /// Condition resolved by execute.
    pub branch_cond: BranchCond,
    /// Conditional branch offset, masked to 20 bits.
    pub branch_offset: u32,
    /// The instruction accesses memory.
    pub ls_enable: bool,
    /// The memory access is a store.
    pub ls_write: bool,
    /// Store data (the rs2 value).
    pub ls_write_data: u32,
    /// Access width.
    pub ls_width: AccessWidth,
    /// Loads zero-extend instead of sign-extending.
    pub ls_unsigned: bool,
    /// The instruction writes `reg_addr`.
    pub reg_write: bool,
    /// Destination register.
    pub reg_addr: usize,
}

/// EX → LS payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw instruction word (0 for a bubble).
    pub instr: u32,
    /// ALU result, memory address, or link address for jumps.
    pub result: u32,
    /// The branch is taken.
    pub branch: bool,
    /// Target address when `branch` is set.
    pub branch_target: u32,
    /// The instruction accesses memory.
    pub ls_enable: bool,
    /// The memory access is a store.
    pub ls_write: bool,
    /// Store data.
    pub ls_write_data: u32,
    /// Access width.
    pub ls_width: AccessWidth,
    /// Loads zero-extend instead of sign-extending.
    pub ls_unsigned: bool,
    /// The instruction writes `reg_addr`.
    pub reg_write: bool,
    /// Destination register.
    pub reg_addr: usize,
}

/// LS → WB payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStoreOutput {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw instruction word (0 for a bubble).
    pub instr: u32,
    /// The instruction writes `reg_addr`.
    pub reg_write: bool,
    /// Destination register.
    pub reg_addr: usize,
    /// Value to write.
    pub reg_data: u32,
}

impl LoadStoreOutput {
    /// True for an instruction, false for a bubble.
    pub const fn is_instruction(&self) -> bool {
        self.instr != 0
    }
}
