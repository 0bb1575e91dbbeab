//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the core model. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI, MIPS).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, system).
//! 3. **Stalls:** Memory, control, and data hazard cycle counts, and fetch redirects.
//! 4. **Bus:** Transactions completed per arbiter port.

use std::fmt::Write as _;
use std::time::Instant;

use crate::core::TickReport;
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::opcodes;
use crate::soc::arbiter::Port;

/// Separator line used between report sections.
const RULE: &str = "==========================================================";
const THIN_RULE: &str = "----------------------------------------------------------";

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed (reset cycles excluded).
    pub cycles: u64,
    /// Number of instructions that left writeback.
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of ALU instructions retired (OP, OP-IMM, LUI, AUIPC).
    pub inst_alu: u64,
    /// Count of FENCE and SYSTEM instructions retired as bubbles.
    pub inst_system: u64,

    /// Cycles the load-store unit held the pipeline.
    pub stalls_mem: u64,
    /// Cycles the hazard unit discarded younger instructions.
    pub stalls_control: u64,
    /// Cycles decode was stalled on a RAW dependency.
    pub stalls_data: u64,

    /// Requests issued to a non-sequential address.
    pub fetch_redirects: u64,

    /// Bus transactions acknowledged on the fetch port.
    pub bus_fetch: u64,
    /// Bus transactions acknowledged on the load-store port.
    pub bus_load_store: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_alu: 0,
            inst_system: 0,
            stalls_mem: 0,
            stalls_control: 0,
            stalls_data: 0,
            fetch_redirects: 0,
            bus_fetch: 0,
            bus_load_store: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"instruction_mix"`, `"bus"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "bus"];

fn percent(part: u64, whole: u64) -> f64 {
    (part as f64 / whole.max(1) as f64) * 100.0
}

impl SimStats {
    /// Accounts for one non-reset clock edge.
    pub fn record(&mut self, report: &TickReport) {
        self.cycles += 1;
        if report.memory_wait {
            self.stalls_mem += 1;
        }
        if report.hazards.control_discard {
            self.stalls_control += 1;
        }
        if report.hazards.data_stall {
            self.stalls_data += 1;
        }
        if report.redirect.is_some() {
            self.fetch_redirects += 1;
        }
        if report.acked {
            match report.grant {
                Some(Port::Fetch) => self.bus_fetch += 1,
                Some(Port::LoadStore) => self.bus_load_store += 1,
                None => {}
            }
        }
        if let Some((retired, _)) = report.retired {
            self.instructions_retired += 1;
            match retired.instr.opcode() {
                opcodes::OP_LOAD => self.inst_load += 1,
                opcodes::OP_STORE => self.inst_store += 1,
                opcodes::OP_BRANCH | opcodes::OP_JAL | opcodes::OP_JALR => self.inst_branch += 1,
                opcodes::OP_IMM | opcodes::OP_REG | opcodes::OP_LUI | opcodes::OP_AUIPC => {
                    self.inst_alu += 1;
                }
                _ => self.inst_system += 1,
            }
        }
    }

    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to render all sections.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64().max(f64::EPSILON);
        let cyc = self.cycles;
        let instr = self.instructions_retired;
        let mut out = String::new();

        // Writing into a String cannot fail.
        if want("summary") {
            let ipc = instr as f64 / cyc.max(1) as f64;
            let cpi = cyc as f64 / instr.max(1) as f64;
            let mips = (instr as f64 / seconds) / 1_000_000.0;
            let khz = (cyc as f64 / seconds) / 1000.0;
            let _ = writeln!(out, "\n{RULE}");
            let _ = writeln!(out, "ECAP5-DPROC SIMULATION STATISTICS");
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {cyc}");
            let _ = writeln!(out, "sim_freq                 {khz:.2} kHz");
            let _ = writeln!(out, "sim_insts                {instr}");
            let _ = writeln!(out, "sim_ipc                  {ipc:.4}");
            let _ = writeln!(out, "sim_cpi                  {cpi:.4}");
            let _ = writeln!(out, "sim_mips                 {mips:.2}");
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("core") {
            let _ = writeln!(out, "CORE BREAKDOWN");
            for (name, count) in [
                ("stalls.memory ", self.stalls_mem),
                ("stalls.control", self.stalls_control),
                ("stalls.data   ", self.stalls_data),
            ] {
                let _ = writeln!(
                    out,
                    "  {name}         {count} ({:.2}%)",
                    percent(count, cyc)
                );
            }
            let _ = writeln!(out, "  fetch.redirects        {}", self.fetch_redirects);
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu   ", self.inst_alu),
                ("op.load  ", self.inst_load),
                ("op.store ", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.system", self.inst_system),
            ] {
                let _ = writeln!(
                    out,
                    "  {name}              {count} ({:.2}%)",
                    percent(count, instr)
                );
            }
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("bus") {
            let _ = writeln!(out, "BUS TRANSACTIONS");
            let _ = writeln!(out, "  port1.fetch            {}", self.bus_fetch);
            let _ = writeln!(out, "  port2.load_store       {}", self.bus_load_store);
        }
        let _ = writeln!(out, "{RULE}");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
