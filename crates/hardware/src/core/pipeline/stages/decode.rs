//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Decoding:** Converts raw 32-bit instruction bits into control signals using the ISA decoder.
//! 2. **Register Read:** Reads source operands (rs1, rs2) from the register file.
//! 3. **Operand Selection:** Resolves the two ALU operands to values for the Execute stage.
//!
//! FENCE, SYSTEM and unknown opcodes decode to a bubble; the core has no
//! illegal-instruction trap.

use tracing::trace;

use crate::common::constants::BRANCH_OFFSET_MASK;
use crate::common::data::AccessWidth;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::{DecodeOutput, FetchOutput, Latch};
use crate::core::pipeline::signals::{AluFlags, AluOp, BranchCond, OpASrc, OpBSrc};
use crate::core::pipeline::traits::{PipelineLatch, PipelineStage};
use crate::isa::decode::decode as instruction_decode;
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::{funct3, opcodes};

/// Control signals derived from the opcode and function fields alone.
#[derive(Clone, Copy, Debug, Default)]
struct Control {
    a_src: OpASrc,
    b_src: OpBSrc,
    alu: AluOp,
    flags: AluFlags,
    branch: BranchCond,
    ls_enable: bool,
    ls_write: bool,
    reg_write: bool,
    reads_rs1: bool,
    reads_rs2: bool,
}

/// Maps OP / OP-IMM `funct3` onto the ALU operation and its flags.
///
/// `alt` is bit 5 of funct7; `allow_sub` is false for OP-IMM, where that bit
/// belongs to the immediate except for SRAI.
const fn alu_for(f3: u32, alt: bool, allow_sub: bool) -> (AluOp, AluFlags) {
    let mut flags = AluFlags {
        sub: false,
        shift_left: false,
        shift_signed: false,
    };
    let op = match f3 {
        funct3::ADD_SUB => {
            flags.sub = allow_sub && alt;
            AluOp::Add
        }
        funct3::SLL => {
            flags.shift_left = true;
            AluOp::Shift
        }
        funct3::SLT => AluOp::Slt,
        funct3::SLTU => AluOp::Sltu,
        funct3::XOR => AluOp::Xor,
        funct3::SRL_SRA => {
            flags.shift_signed = alt;
            AluOp::Shift
        }
        funct3::OR => AluOp::Or,
        _ => AluOp::And,
    };
    (op, flags)
}

/// Builds the control signals for a decoded instruction.
///
/// Returns `None` for instructions that decode to a bubble.
fn control(d: &Decoded) -> Option<Control> {
    let alt = d.raw.alt();
    let mut c = Control::default();
    match d.opcode {
        opcodes::OP_IMM => {
            (c.alu, c.flags) = alu_for(d.funct3, alt, false);
            c.reads_rs1 = true;
            c.reg_write = true;
        }
        opcodes::OP_REG => {
            (c.alu, c.flags) = alu_for(d.funct3, alt, true);
            c.b_src = OpBSrc::Reg2;
            c.reads_rs1 = true;
            c.reads_rs2 = true;
            c.reg_write = true;
        }
        opcodes::OP_LOAD => {
            c.ls_enable = true;
            c.reads_rs1 = true;
            c.reg_write = true;
        }
        opcodes::OP_STORE => {
            c.ls_enable = true;
            c.ls_write = true;
            c.reads_rs1 = true;
            c.reads_rs2 = true;
        }
        opcodes::OP_BRANCH => {
            c.branch = BranchCond::from_funct3(d.funct3);
            if c.branch == BranchCond::None {
                return None;
            }
            c.b_src = OpBSrc::Reg2;
            c.reads_rs1 = true;
            c.reads_rs2 = true;
        }
        opcodes::OP_JAL => {
            c.a_src = OpASrc::Pc;
            c.branch = BranchCond::Uncond;
            c.reg_write = true;
        }
        opcodes::OP_JALR => {
            c.branch = BranchCond::Uncond;
            c.reads_rs1 = true;
            c.reg_write = true;
        }
        opcodes::OP_LUI => {
            c.a_src = OpASrc::Zero;
            c.reg_write = true;
        }
        opcodes::OP_AUIPC => {
            c.a_src = OpASrc::Pc;
            c.reg_write = true;
        }
        _ => return None,
    }
    Some(c)
}

/// Source registers the hazard unit must check for `instr`.
///
/// A source the instruction does not read is reported as register 0, which
/// never conflicts.
///
/// # Examples
///
/// ```
/// use dproc_core::core::pipeline::stages::decode::source_registers;
///
/// assert_eq!(source_registers(0x0020_81B3), (1, 2)); // add x3, x1, x2
/// assert_eq!(source_registers(0x0050_8193), (1, 0)); // addi x3, x1, 5
/// assert_eq!(source_registers(0x0000_10B7), (0, 0)); // lui x1, 1
/// ```
pub fn source_registers(instr: u32) -> (usize, usize) {
    let d = instruction_decode(instr);
    control(&d).map_or((0, 0), |c| {
        (
            if c.reads_rs1 { d.rs1 } else { 0 },
            if c.reads_rs2 { d.rs2 } else { 0 },
        )
    })
}

/// Decodes `instr` at `pc`, reading its operands from `regs`.
///
/// # Returns
///
/// The decode output register payload; a bubble for FENCE, SYSTEM and
/// unknown opcodes.
pub fn decode(instr: u32, pc: u32, regs: &Gpr) -> DecodeOutput {
    let d = instruction_decode(instr);
    let Some(c) = control(&d) else {
        trace!(target: "decode", "{pc:#010x}: {instr:#010x} decodes to a bubble");
        return DecodeOutput {
            pc,
            instr,
            ..DecodeOutput::default()
        };
    };

    let rs1 = regs.read(d.rs1);
    let rs2 = regs.read(d.rs2);
    let alu_op1 = match c.a_src {
        OpASrc::Reg1 => rs1,
        OpASrc::Pc => pc,
        OpASrc::Zero => 0,
    };
    let alu_op2 = match c.b_src {
        OpBSrc::Imm => d.imm,
        OpBSrc::Reg2 => rs2,
    };
    let is_branch = d.opcode == opcodes::OP_BRANCH;

    DecodeOutput {
        pc,
        instr,
        alu_op: c.alu,
        alu_op1,
        alu_op2,
        alu_flags: c.flags,
        branch_cond: c.branch,
        branch_offset: if is_branch { d.imm & BRANCH_OFFSET_MASK } else { 0 },
        ls_enable: c.ls_enable,
        ls_write: c.ls_write,
        ls_write_data: if c.ls_write { rs2 } else { 0 },
        ls_width: if c.ls_enable {
            AccessWidth::from_funct3(d.funct3)
        } else {
            AccessWidth::default()
        },
        ls_unsigned: c.ls_enable && !c.ls_write && d.funct3 & funct3::LOAD_UNSIGNED_BIT != 0,
        reg_write: c.reg_write,
        reg_addr: if c.reg_write { d.rd } else { 0 },
    }
}

/// Signals sampled by the decode stage at a clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeInputs {
    /// Fetch output register.
    pub input: Latch<FetchOutput>,
    /// Execute accepts a new instruction at this edge.
    pub output_ready: bool,
    /// The hazard unit holds the fetch output back.
    pub data_stall: bool,
    /// The hazard unit discards whatever decode accepts.
    pub discard: bool,
}

impl DecodeInputs {
    /// Decode accepts the fetch output at this edge (when it is valid).
    pub const fn input_ready(&self) -> bool {
        self.output_ready && !self.data_stall
    }
}

/// Decode stage with its output register.
#[derive(Clone, Debug, Default)]
pub struct DecodeUnit {
    output: Latch<DecodeOutput>,
}

impl DecodeUnit {
    /// Creates a decode stage in its reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the decode stage by one clock edge.
    ///
    /// `regs` must hold the register file contents from before this edge's
    /// writeback.
    pub fn tick(&mut self, inputs: &DecodeInputs, regs: &Gpr) {
        if !inputs.output_ready {
            return;
        }
        let accept = inputs.input.valid && inputs.input_ready() && !inputs.discard;
        self.output = if accept {
            let FetchOutput { pc, instr } = inputs.input.data;
            Latch::new(decode(instr, pc, regs))
        } else {
            Latch::bubble()
        };
    }
}

impl PipelineStage for DecodeUnit {
    type Output = DecodeOutput;

    fn output(&self) -> &Latch<DecodeOutput> {
        &self.output
    }

    fn reset(&mut self) {
        self.output.flush();
    }
}
