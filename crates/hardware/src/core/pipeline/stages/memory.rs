//! Load-Store (LS) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It
//! performs the following:
//! 1. **Bypass:** Instructions without a memory access pass their execute
//!    result straight to the writeback register.
//! 2. **Bus FSM:** Loads and stores become a single Wishbone transaction on the
//!    data port. The stage is blocking: it accepts nothing else until the
//!    acknowledge arrives.
//! 3. **Load Extension:** The returned lane is sign- or zero-extended per width.

use tracing::trace;

use crate::common::data::AccessWidth;
use crate::core::pipeline::hazards::WritePort;
use crate::core::pipeline::latches::{ExecuteOutput, Latch, LoadStoreOutput};
use crate::core::pipeline::traits::{PipelineLatch, PipelineStage};
use crate::soc::wishbone::{BusRequest, BusResponse, MasterStep};

/// Load-store FSM states. Encodings match the fetch unit's bus states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoadStoreState {
    /// Ready for a new instruction.
    #[default]
    Idle,
    /// Request driven on the bus.
    Request,
    /// Request accepted, waiting for the acknowledge.
    Wait,
    /// Acknowledge received, read data latched.
    Latched,
    /// Request presented again after the slave stalled it.
    RequestStalled,
}

impl LoadStoreState {
    /// State number as encoded in the hardware.
    pub const fn encoding(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Request => 1,
            Self::Wait => 2,
            Self::Latched => 3,
            Self::RequestStalled => 4,
        }
    }

    /// `stb` is driven in this state.
    pub const fn strobe(self) -> bool {
        matches!(self, Self::Request | Self::RequestStalled)
    }

    /// `cyc` is driven in this state.
    pub const fn cycle(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// The memory instruction currently owned by the stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Access {
    pc: u32,
    instr: u32,
    adr: u32,
    dat: u32,
    we: bool,
    width: AccessWidth,
    unsigned: bool,
    reg_write: bool,
    reg_addr: usize,
}

/// Signals sampled by the load-store stage at a clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStoreInputs {
    /// Execute output register.
    pub input: Latch<ExecuteOutput>,
    /// Data-port response routed by the arbiter.
    pub bus: BusResponse,
}

/// Load-store unit.
///
/// # Examples
///
/// ```
/// use dproc_core::core::pipeline::latches::{ExecuteOutput, Latch};
/// use dproc_core::core::pipeline::stages::memory::{LoadStoreInputs, LoadStoreUnit};
/// use dproc_core::core::pipeline::traits::PipelineStage;
///
/// let mut ls = LoadStoreUnit::new();
/// let addi = ExecuteOutput { result: 7, reg_write: true, reg_addr: 5, ..ExecuteOutput::default() };
/// ls.tick(&LoadStoreInputs { input: Latch::new(addi), ..LoadStoreInputs::default() });
///
/// assert!(ls.input_ready());
/// assert!(ls.output().valid);
/// assert_eq!(ls.output().data.reg_data, 7);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoadStoreUnit {
    state: LoadStoreState,
    access: Access,
    buffer: u32,
    output: Latch<LoadStoreOutput>,
}

impl LoadStoreUnit {
    /// Creates a load-store unit in its reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current FSM state.
    pub const fn state(&self) -> LoadStoreState {
        self.state
    }

    /// The stage accepts a new instruction at the coming edge.
    pub const fn input_ready(&self) -> bool {
        matches!(self.state, LoadStoreState::Idle)
    }

    /// Registered Wishbone master outputs of the data port.
    pub const fn bus(&self) -> BusRequest {
        BusRequest {
            adr: self.access.adr,
            dat: self.access.dat,
            we: self.access.we,
            sel: self.access.width.sel(),
            stb: self.state.strobe(),
            cyc: self.state.cycle(),
        }
    }

    /// Register write still owed by the stage.
    ///
    /// While a transaction is open this is the in-flight instruction;
    /// otherwise it is the instruction in the output register.
    pub const fn pending_write(&self) -> WritePort {
        if self.input_ready() {
            WritePort::new(
                self.output.valid && self.output.data.reg_write,
                self.output.data.reg_addr,
            )
        } else {
            WritePort::new(self.access.reg_write, self.access.reg_addr)
        }
    }

    /// Advances the load-store unit by one clock edge.
    pub fn tick(&mut self, inputs: &LoadStoreInputs) {
        match self.state {
            LoadStoreState::Idle => {
                let input = &inputs.input;
                if input.valid && input.data.ls_enable {
                    let ex = &input.data;
                    self.access = Access {
                        pc: ex.pc,
                        instr: ex.instr,
                        adr: ex.result,
                        dat: ex.ls_write_data,
                        we: ex.ls_write,
                        width: ex.ls_width,
                        unsigned: ex.ls_unsigned,
                        reg_write: ex.reg_write,
                        reg_addr: ex.reg_addr,
                    };
                    trace!(
                        target: "loadstore",
                        "{:#010x}: {} {:?} at {:#010x}",
                        ex.pc,
                        if ex.ls_write { "store" } else { "load" },
                        ex.ls_width,
                        ex.result
                    );
                    self.output.flush();
                    self.state = LoadStoreState::Request;
                } else {
                    self.output = Latch::new(LoadStoreOutput {
                        pc: input.data.pc,
                        instr: input.data.instr,
                        reg_write: input.valid && input.data.reg_write,
                        reg_addr: input.data.reg_addr,
                        reg_data: input.data.result,
                    });
                }
            }
            LoadStoreState::Request | LoadStoreState::RequestStalled | LoadStoreState::Wait => {
                match MasterStep::sample(self.state.strobe(), &inputs.bus) {
                    MasterStep::Acked(word) => {
                        self.buffer = word;
                        self.state = LoadStoreState::Latched;
                    }
                    MasterStep::Stalled => self.state = LoadStoreState::RequestStalled,
                    MasterStep::Waiting => self.state = LoadStoreState::Wait,
                }
            }
            LoadStoreState::Latched => {
                let a = &self.access;
                self.output = Latch::new(LoadStoreOutput {
                    pc: a.pc,
                    instr: a.instr,
                    reg_write: a.reg_write && !a.we,
                    reg_addr: a.reg_addr,
                    reg_data: if a.we {
                        0
                    } else {
                        a.width.extend(self.buffer, a.unsigned)
                    },
                });
                self.state = LoadStoreState::Idle;
            }
        }
    }
}

impl PipelineStage for LoadStoreUnit {
    type Output = LoadStoreOutput;

    fn output(&self) -> &Latch<LoadStoreOutput> {
        &self.output
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
