//! Pipeline top level.
//!
//! This module wires the five stages, the register file, the hazard unit and
//! the bus arbiter into the `Core`. One call to [`Core::tick`] is one rising
//! clock edge:
//! 1. **Combinational phase:** Every stage output is read from its register,
//!    then the writeback port, the ready chain, the hazard signals and the
//!    arbiter routing are computed from those values only.
//! 2. **Register phase:** Each stage commits its next state. Decode reads the
//!    register file before the writeback write of the same edge.

use tracing::trace;

use crate::config::CoreConfig;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards::{HazardInputs, HazardOutputs, HazardUnit, WritePort};
use crate::core::pipeline::latches::LoadStoreOutput;
use crate::core::pipeline::stages::decode::{DecodeInputs, source_registers};
use crate::core::pipeline::stages::execute::ExecuteInputs;
use crate::core::pipeline::stages::fetch::{FetchInputs, Redirect};
use crate::core::pipeline::stages::memory::LoadStoreInputs;
use crate::core::pipeline::stages::writeback::{RegisterWrite, writeback};
use crate::core::pipeline::stages::{DecodeUnit, ExecuteUnit, FetchUnit, LoadStoreUnit};
use crate::core::pipeline::traits::PipelineStage;
use crate::soc::arbiter::{Arbiter, Port};
use crate::soc::wishbone::{BusRequest, BusResponse};

/// External inputs of the core for one clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreInputs {
    /// Synchronous reset.
    pub rst: bool,
    /// Interrupt request.
    pub irq: bool,
    /// Debug request.
    pub drq: bool,
    /// Slave response to the request returned by [`Core::bus`] this cycle.
    pub bus: BusResponse,
}

/// What the core did at one clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Instruction that left writeback, with its register write.
    pub retired: Option<(LoadStoreOutput, RegisterWrite)>,
    /// Hazard signals in effect during the cycle.
    pub hazards: HazardOutputs,
    /// Load-store held the pipeline (transaction open).
    pub memory_wait: bool,
    /// Fetch issued a request to a non-sequential address.
    pub redirect: Option<Redirect>,
    /// Port that owned the bus.
    pub grant: Option<Port>,
    /// The owning port received an acknowledge.
    pub acked: bool,
}

/// The ECAP5-DPROC core.
///
/// # Examples
///
/// ```
/// use dproc_core::config::CoreConfig;
/// use dproc_core::core::pipeline::engine::{Core, CoreInputs};
///
/// let mut core = Core::new(&CoreConfig::default());
/// let _ = core.tick(&CoreInputs { rst: true, ..CoreInputs::default() });
/// let _ = core.tick(&CoreInputs::default());
///
/// // The first request goes to the boot address.
/// let bus = core.bus();
/// assert!(bus.stb && bus.cyc);
/// assert_eq!(bus.adr, 0);
/// ```
#[derive(Clone, Debug)]
pub struct Core {
    fetch: FetchUnit,
    decode: DecodeUnit,
    execute: ExecuteUnit,
    load_store: LoadStoreUnit,
    regs: Gpr,
    hazard: HazardUnit,
    arbiter: Arbiter,
}

impl Core {
    /// Creates a core in its reset state.
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            fetch: FetchUnit::new(config),
            decode: DecodeUnit::new(),
            execute: ExecuteUnit::new(),
            load_store: LoadStoreUnit::new(),
            regs: Gpr::new(),
            hazard: HazardUnit::new(),
            arbiter: Arbiter::new(),
        }
    }

    /// Returns every stage and the arbiter to their reset state.
    ///
    /// The register file is not reset.
    pub fn reset(&mut self) {
        self.fetch.reset();
        self.decode.reset();
        self.execute.reset();
        self.load_store.reset();
        self.hazard.reset();
        self.arbiter.reset();
    }

    /// Request presented on the core's Wishbone interface this cycle.
    pub const fn bus(&self) -> BusRequest {
        let fetch = self.fetch.bus();
        let load_store = self.load_store.bus();
        let grant = self.arbiter.grant(&fetch, &load_store);
        Arbiter::route(grant, &fetch, &load_store, &BusResponse::BLOCKED).slave
    }

    /// Hazard unit inputs for the current cycle.
    pub fn hazard_inputs(&self) -> HazardInputs {
        let f_out = self.fetch.output();
        let d_out = self.decode.output();
        let e_out = self.execute.output();
        let (rs1, rs2) = if f_out.valid {
            source_registers(f_out.data.instr)
        } else {
            (0, 0)
        };
        HazardInputs {
            rs1,
            rs2,
            ex: WritePort::new(d_out.valid && d_out.data.reg_write, d_out.data.reg_addr),
            ls: WritePort::new(e_out.valid && e_out.data.reg_write, e_out.data.reg_addr),
            wb: self.load_store.pending_write(),
            branch: e_out.valid && e_out.data.branch,
        }
    }

    /// Hazard unit outputs for the current cycle.
    pub fn hazards(&self) -> HazardOutputs {
        self.hazard.evaluate(&self.hazard_inputs())
    }

    /// Advances the core by one rising clock edge.
    pub fn tick(&mut self, inputs: &CoreInputs) -> TickReport {
        if inputs.rst {
            self.reset();
            return TickReport::default();
        }

        let f_out = *self.fetch.output();
        let d_out = *self.decode.output();
        let e_out = *self.execute.output();
        let l_out = *self.load_store.output();

        let wb = writeback(&l_out);
        let ls_ready = self.load_store.input_ready();
        let hazard_inputs = self.hazard_inputs();
        let hazards = self.hazard.evaluate(&hazard_inputs);

        let fetch_req = self.fetch.bus();
        let ls_req = self.load_store.bus();
        let grant = self.arbiter.grant(&fetch_req, &ls_req);
        let routed = Arbiter::route(grant, &fetch_req, &ls_req, &inputs.bus);

        let decode_inputs = DecodeInputs {
            input: f_out,
            output_ready: ls_ready,
            data_stall: hazards.data_stall,
            discard: hazards.control_discard,
        };
        let fetch_inputs = FetchInputs {
            irq: inputs.irq,
            drq: inputs.drq,
            branch: e_out.valid && e_out.data.branch,
            branch_target: e_out.data.branch_target,
            output_ready: decode_inputs.input_ready(),
            bus: routed.fetch,
        };

        trace!(
            target: "core",
            "fetch={:?} ls={:?} grant={grant:?} stall={} discard={}",
            self.fetch.state(),
            self.load_store.state(),
            hazards.data_stall,
            hazards.control_discard
        );

        let redirect = self.fetch.tick(&fetch_inputs);
        self.decode.tick(&decode_inputs, &self.regs);
        self.execute.tick(&ExecuteInputs {
            input: d_out,
            output_ready: ls_ready,
            discard: hazards.control_discard,
        });
        self.load_store.tick(&LoadStoreInputs {
            input: e_out,
            bus: routed.load_store,
        });
        if wb.enable {
            self.regs.write(wb.addr, wb.data);
        }
        self.hazard.tick(&hazard_inputs);
        self.arbiter.tick(&fetch_req, &ls_req);

        TickReport {
            retired: (l_out.valid && l_out.data.is_instruction()).then_some((l_out.data, wb)),
            hazards,
            memory_wait: !ls_ready,
            redirect,
            grant,
            acked: grant.is_some() && inputs.bus.ack,
        }
    }

    /// Register file.
    pub const fn regs(&self) -> &Gpr {
        &self.regs
    }

    /// Fetch unit.
    pub const fn fetch(&self) -> &FetchUnit {
        &self.fetch
    }

    /// Decode stage.
    pub const fn decode(&self) -> &DecodeUnit {
        &self.decode
    }

    /// Execute stage.
    pub const fn execute(&self) -> &ExecuteUnit {
        &self.execute
    }

    /// Load-store unit.
    pub const fn load_store(&self) -> &LoadStoreUnit {
        &self.load_store
    }

    /// Bus arbiter.
    pub const fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }
}
