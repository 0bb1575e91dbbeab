//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! The fetch unit is a Wishbone master that issues one word read per
//! instruction, buffers the returned word, and presents it to decode.
//!
//! 1. **Program counter:** Chooses each request address by precedence:
//!    debug > interrupt > branch > sequential.
//! 2. **Bus FSM:** Request, stall and wait handling for the instruction port.
//! 3. **Output buffer:** Holds a fetched word until decode accepts it, or drops
//!    it when a redirect makes it stale.

use tracing::{debug, trace};

use crate::common::constants::INSTRUCTION_SIZE;
use crate::config::CoreConfig;
use crate::core::pipeline::latches::{FetchOutput, Latch};
use crate::core::pipeline::traits::{PipelineLatch, PipelineStage};
use crate::soc::wishbone::{BusRequest, BusResponse, MasterStep};

/// Fetch FSM states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FetchState {
    /// About to issue the next request.
    #[default]
    Idle,
    /// Request driven on the bus.
    Request,
    /// Request accepted, waiting for the acknowledge.
    Wait,
    /// Acknowledge received, instruction word latched.
    Latched,
    /// Request presented again after the slave stalled it.
    RequestStalled,
    /// Output valid and waiting for decode to accept it.
    OutputHeld,
}

impl FetchState {
    /// State number as encoded in the hardware.
    pub const fn encoding(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Request => 1,
            Self::Wait => 2,
            Self::Latched => 3,
            Self::RequestStalled => 4,
            Self::OutputHeld => 5,
        }
    }

    /// `stb` is driven in this state.
    pub const fn strobe(self) -> bool {
        matches!(self, Self::Request | Self::RequestStalled)
    }

    /// `cyc` is driven in this state.
    pub const fn cycle(self) -> bool {
        matches!(
            self,
            Self::Request | Self::Wait | Self::Latched | Self::RequestStalled
        )
    }
}

/// Why a request did not go to the sequential address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Redirect {
    /// Debug request (`drq`).
    Debug,
    /// Interrupt request (`irq`).
    Interrupt,
    /// Taken branch or jump from execute.
    Branch,
}

/// Signals sampled by the fetch unit at a clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchInputs {
    /// Interrupt request line.
    pub irq: bool,
    /// Debug request line.
    pub drq: bool,
    /// Execute resolved a taken branch.
    pub branch: bool,
    /// Branch destination, meaningful with `branch`.
    pub branch_target: u32,
    /// Decode will accept the output at this edge.
    pub output_ready: bool,
    /// Instruction-port response routed by the arbiter.
    pub bus: BusResponse,
}

/// Redirect requests collected between two request issues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Pending {
    irq: bool,
    drq: bool,
    branch: bool,
    branch_target: u32,
}

impl Pending {
    const fn any(&self) -> bool {
        self.irq || self.drq || self.branch
    }

    const fn sample(inputs: &FetchInputs) -> Self {
        Self {
            irq: inputs.irq,
            drq: inputs.drq,
            branch: inputs.branch,
            branch_target: inputs.branch_target,
        }
    }

    const fn merge(&mut self, inputs: &FetchInputs) {
        self.irq |= inputs.irq;
        self.drq |= inputs.drq;
        if inputs.branch {
            self.branch = true;
            self.branch_target = inputs.branch_target;
        }
    }
}

/// Instruction fetch unit.
///
/// # Examples
///
/// ```
/// use dproc_core::config::CoreConfig;
/// use dproc_core::core::pipeline::stages::fetch::{FetchInputs, FetchState, FetchUnit};
///
/// let mut fetch = FetchUnit::new(&CoreConfig::default());
/// fetch.tick(&FetchInputs { output_ready: true, ..FetchInputs::default() });
/// assert_eq!(fetch.state(), FetchState::Request);
/// assert!(fetch.bus().stb);
/// assert_eq!(fetch.bus().adr, 0);
/// ```
#[derive(Clone, Debug)]
pub struct FetchUnit {
    vectors: CoreConfig,
    state: FetchState,
    next_pc: u32,
    req_pc: u32,
    buffer: u32,
    pending: Pending,
    output: Latch<FetchOutput>,
}

impl FetchUnit {
    /// Creates a fetch unit in its reset state.
    pub fn new(vectors: &CoreConfig) -> Self {
        Self {
            vectors: *vectors,
            state: FetchState::Idle,
            next_pc: vectors.boot_address,
            req_pc: vectors.boot_address,
            buffer: 0,
            pending: Pending::default(),
            output: Latch::default(),
        }
    }

    /// Current FSM state.
    pub const fn state(&self) -> FetchState {
        self.state
    }

    /// Address of the most recently issued request.
    pub const fn request_pc(&self) -> u32 {
        self.req_pc
    }

    /// Registered Wishbone master outputs of the instruction port.
    pub const fn bus(&self) -> BusRequest {
        let mut req = BusRequest::read_word(self.req_pc);
        req.stb = self.state.strobe();
        req.cyc = self.state.cycle();
        req
    }

    /// Chooses the address of the next request from the pending redirects.
    const fn select_address(&self) -> (u32, Option<Redirect>) {
        if self.pending.drq {
            (self.vectors.debug_address, Some(Redirect::Debug))
        } else if self.pending.irq {
            (self.vectors.interrupt_address, Some(Redirect::Interrupt))
        } else if self.pending.branch {
            (self.pending.branch_target, Some(Redirect::Branch))
        } else {
            (self.next_pc, None)
        }
    }

    /// Advances the fetch unit by one clock edge.
    ///
    /// # Returns
    ///
    /// The redirect applied if a request was issued to a non-sequential address.
    pub fn tick(&mut self, inputs: &FetchInputs) -> Option<Redirect> {
        // A redirect sampled at this edge cancels only through the branch line;
        // irq/drq need to have been pending already.
        let cancel = self.pending.any() || inputs.branch;
        let mut redirect = None;

        match self.state {
            FetchState::Idle => {
                if self.output.valid && !inputs.output_ready && !cancel {
                    self.state = FetchState::OutputHeld;
                } else {
                    let (adr, why) = self.select_address();
                    if let Some(why) = why {
                        debug!(target: "fetch", "redirect ({why:?}) to {adr:#010x}");
                    }
                    redirect = why;
                    self.req_pc = adr;
                    self.next_pc = adr.wrapping_add(INSTRUCTION_SIZE);
                    self.output.flush();
                    self.pending = Pending::sample(inputs);
                    self.state = FetchState::Request;
                }
                return redirect;
            }
            FetchState::Request | FetchState::RequestStalled | FetchState::Wait => {
                match MasterStep::sample(self.state.strobe(), &inputs.bus) {
                    MasterStep::Acked(word) => {
                        self.buffer = word;
                        self.state = FetchState::Latched;
                    }
                    MasterStep::Stalled => self.state = FetchState::RequestStalled,
                    MasterStep::Waiting => self.state = FetchState::Wait,
                }
            }
            FetchState::Latched => {
                if cancel {
                    trace!(target: "fetch", "drop stale word from {:#010x}", self.req_pc);
                    self.output.flush();
                    self.state = FetchState::Idle;
                } else {
                    self.output = Latch::new(FetchOutput {
                        pc: self.req_pc,
                        instr: self.buffer,
                    });
                    self.state = if inputs.output_ready {
                        FetchState::Idle
                    } else {
                        FetchState::OutputHeld
                    };
                }
            }
            FetchState::OutputHeld => {
                if cancel || inputs.output_ready {
                    self.output.flush();
                    self.state = FetchState::Idle;
                }
            }
        }

        self.pending.merge(inputs);
        redirect
    }
}

impl PipelineStage for FetchUnit {
    type Output = FetchOutput;

    fn output(&self) -> &Latch<FetchOutput> {
        &self.output
    }

    fn reset(&mut self) {
        *self = Self::new(&self.vectors);
    }
}
