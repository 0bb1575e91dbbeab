//! Hazard Detection.
//!
//! The core has no forwarding network. It resolves hazards in two ways:
//! 1. **Control hazards:** A taken branch in execute discards the instructions
//!    behind it (decode output and fetch output) for as long as it is visible,
//!    and for one more cycle after it leaves execute.
//! 2. **Data hazards:** Decode is stalled while any older in-flight instruction
//!    still has to write one of the registers it reads.

/// A pending register write seen by the hazard unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritePort {
    /// The stage holds an instruction that writes `addr`.
    pub enable: bool,
    /// Destination register.
    pub addr: usize,
}

impl WritePort {
    /// Creates a port.
    pub const fn new(enable: bool, addr: usize) -> Self {
        Self { enable, addr }
    }

    /// The port would overwrite `rs` before it is read from the register file.
    ///
    /// `x0` never conflicts since it is never written.
    pub const fn conflicts_with(&self, rs: usize) -> bool {
        self.enable && self.addr != 0 && self.addr == rs
    }
}

/// Combinational inputs of the hazard unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardInputs {
    /// First source of the instruction waiting in front of decode (0 if unused).
    pub rs1: usize,
    /// Second source of the instruction waiting in front of decode (0 if unused).
    pub rs2: usize,
    /// Instruction about to execute (decode output register).
    pub ex: WritePort,
    /// Instruction entering load-store (execute output register).
    pub ls: WritePort,
    /// Instruction held by load-store, in flight or in its output register.
    pub wb: WritePort,
    /// Execute resolved a taken branch or jump.
    pub branch: bool,
}

/// Outputs of the hazard unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardOutputs {
    /// Decode and execute must turn what they accept into bubbles.
    pub control_discard: bool,
    /// Decode must not accept the fetch output this cycle.
    pub data_stall: bool,
}

/// Hazard detection unit.
///
/// The stall is purely combinational. The discard also depends on the branch
/// flag registered at the previous edge, so it drops one cycle after the
/// branch clears.
///
/// # Examples
///
/// ```
/// use dproc_core::core::pipeline::hazards::{HazardInputs, HazardUnit, WritePort};
///
/// let mut unit = HazardUnit::new();
/// let inputs = HazardInputs {
///     rs1: 5,
///     ls: WritePort::new(true, 5),
///     ..HazardInputs::default()
/// };
/// let out = unit.evaluate(&inputs);
/// assert!(out.data_stall);
/// assert!(!out.control_discard);
///
/// let branch = HazardInputs { branch: true, ..HazardInputs::default() };
/// unit.tick(&branch);
/// assert!(unit.evaluate(&HazardInputs::default()).control_discard);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HazardUnit {
    branch_q: bool,
}

impl HazardUnit {
    /// Creates a hazard unit in its reset state.
    pub const fn new() -> Self {
        Self { branch_q: false }
    }

    /// Computes the stall and discard signals for the current cycle.
    pub fn evaluate(&self, inputs: &HazardInputs) -> HazardOutputs {
        let data_stall = [inputs.ex, inputs.ls, inputs.wb]
            .iter()
            .any(|port| port.conflicts_with(inputs.rs1) || port.conflicts_with(inputs.rs2));
        HazardOutputs {
            control_discard: inputs.branch || self.branch_q,
            data_stall,
        }
    }

    /// Registers the branch flag at a clock edge.
    pub const fn tick(&mut self, inputs: &HazardInputs) {
        self.branch_q = inputs.branch;
    }

    /// Clears the registered branch flag.
    pub const fn reset(&mut self) {
        self.branch_q = false;
    }
}
