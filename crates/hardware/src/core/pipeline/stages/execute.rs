//! Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It
//! runs the ALU, resolves branches and jumps, and registers the result for
//! the load-store stage. Branch resolution feeds both the fetch unit (new
//! target) and the hazard unit (discard of the younger instructions).

use tracing::debug;

use crate::common::constants::{BRANCH_OFFSET_BITS, INSTRUCTION_SIZE, JUMP_TARGET_MASK};
use crate::core::pipeline::latches::{DecodeOutput, ExecuteOutput, Latch};
use crate::core::pipeline::signals::BranchCond;
use crate::core::pipeline::traits::{PipelineLatch, PipelineStage};
use crate::core::units::alu::Alu;
use crate::isa::decode::sign_extend;

/// Computes the execute output for one decoded instruction.
///
/// # Examples
///
/// ```
/// use dproc_core::core::pipeline::latches::DecodeOutput;
/// use dproc_core::core::pipeline::signals::BranchCond;
/// use dproc_core::core::pipeline::stages::execute::execute;
///
/// // jal at 0x100 with offset +0x20
/// let jal = DecodeOutput {
///     pc: 0x100,
///     alu_op1: 0x100,
///     alu_op2: 0x20,
///     branch_cond: BranchCond::Uncond,
///     reg_write: true,
///     reg_addr: 1,
///     ..DecodeOutput::default()
/// };
/// let out = execute(&jal);
/// assert!(out.branch);
/// assert_eq!(out.branch_target, 0x120);
/// assert_eq!(out.result, 0x104);
/// ```
pub fn execute(d: &DecodeOutput) -> ExecuteOutput {
    let alu = Alu::execute(d.alu_op, d.alu_op1, d.alu_op2, d.alu_flags);
    let (result, branch_target) = match d.branch_cond {
        // Jumps decode with the ADD operation, so the ALU output is the target.
        BranchCond::Uncond => (d.pc.wrapping_add(INSTRUCTION_SIZE), alu & JUMP_TARGET_MASK),
        BranchCond::None => (alu, 0),
        _ => (
            alu,
            d.pc.wrapping_add(sign_extend(d.branch_offset, BRANCH_OFFSET_BITS)),
        ),
    };
    let branch = d.branch_cond.taken(d.alu_op1, d.alu_op2);

    ExecuteOutput {
        pc: d.pc,
        instr: d.instr,
        result,
        branch,
        branch_target,
        ls_enable: d.ls_enable,
        ls_write: d.ls_write,
        ls_write_data: d.ls_write_data,
        ls_width: d.ls_width,
        ls_unsigned: d.ls_unsigned,
        reg_write: d.reg_write,
        reg_addr: d.reg_addr,
    }
}

/// Signals sampled by the execute stage at a clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteInputs {
    /// Decode output register.
    pub input: Latch<DecodeOutput>,
    /// Load-store accepts a new instruction at this edge.
    pub output_ready: bool,
    /// The hazard unit discards whatever execute accepts.
    pub discard: bool,
}

/// Execute stage with its output register.
#[derive(Clone, Debug, Default)]
pub struct ExecuteUnit {
    output: Latch<ExecuteOutput>,
}

impl ExecuteUnit {
    /// Creates an execute stage in its reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the execute stage by one clock edge.
    pub fn tick(&mut self, inputs: &ExecuteInputs) {
        if !inputs.output_ready {
            return;
        }
        self.output = if inputs.input.valid && !inputs.discard {
            let out = execute(&inputs.input.data);
            if out.branch {
                debug!(target: "execute", "{:#010x}: taken to {:#010x}", out.pc, out.branch_target);
            }
            Latch::new(out)
        } else {
            Latch::bubble()
        };
    }
}

impl PipelineStage for ExecuteUnit {
    type Output = ExecuteOutput;

    fn output(&self) -> &Latch<ExecuteOutput> {
        &self.output
    }

    fn reset(&mut self) {
        self.output.flush();
    }
}
