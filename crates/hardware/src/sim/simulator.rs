//! Simulator: owns the core, the memory it talks to, and the statistics.
//!
//! Each tick evaluates the memory against the request the core presents this
//! cycle, then clocks the core with that response. The memory therefore
//! answers within the same cycle, like a combinational Wishbone slave.

use std::path::Path;

use tracing::info;

use crate::common::error::{LoadError, SimError};
use crate::config::Config;
use crate::core::{Core, CoreInputs, TickReport};
use crate::sim::loader::{self, LoadedImage};
use crate::soc::memory::FlatMemory;
use crate::soc::traits::WishboneSlave;
use crate::stats::SimStats;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Ticks executed after reset, including the one that reached the end address.
    pub ticks: u64,
    /// Value of the configured result register at the end of the run.
    pub result: u32,
}

impl RunOutcome {
    /// Conformance tests leave 1 in the result register on success.
    pub const fn passed(&self) -> bool {
        self.result == 1
    }
}

/// Top-level simulator: core plus flat memory.
///
/// # Examples
///
/// ```
/// use dproc_core::config::Config;
/// use dproc_core::sim::Simulator;
///
/// let mut sim = Simulator::new(&Config::default());
/// // li gp, 1 ; lui t0, 0xA0000 ; sw zero, 0(t0)
/// sim.load_words(0, &[0x0010_0193, 0xA000_02B7, 0x0002_A023]).unwrap();
///
/// let outcome = sim.run().unwrap();
/// assert!(outcome.passed());
/// ```
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    core: Core,
    memory: FlatMemory,
    stats: SimStats,
    ticks: u64,
    irq: bool,
    drq: bool,
}

impl Simulator {
    /// Creates a simulator with zeroed memory. Call [`Simulator::reset`] or
    /// [`Simulator::run`] before ticking.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            core: Core::new(&config.core),
            memory: FlatMemory::new(&config.memory),
            stats: SimStats::default(),
            ticks: 0,
            irq: false,
            drq: false,
        }
    }

    /// Loads an ELF image into memory.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`], wrapped in `SimError::Load`.
    pub fn load_elf(&mut self, path: impl AsRef<Path>) -> Result<LoadedImage, SimError> {
        Ok(loader::load_elf(path, &mut self.memory)?)
    }

    /// Stores instruction or data words at consecutive addresses from `adr`.
    ///
    /// # Errors
    ///
    /// `SimError::Load` with a segment overflow if the words do not fit.
    pub fn load_words(&mut self, adr: u32, words: &[u32]) -> Result<(), SimError> {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.memory
            .write_bytes(adr, &bytes)
            .map_err(|_| LoadError::SegmentOverflow {
                index: 0,
                end: u64::from(adr) + bytes.len() as u64,
                memory_end: self.memory.size() as u64,
            })?;
        Ok(())
    }

    /// Holds reset for the configured number of cycles and clears the tick count.
    pub fn reset(&mut self) {
        self.memory.reset();
        for _ in 0..self.config.general.reset_cycles {
            let _ = self.core.tick(&CoreInputs {
                rst: true,
                ..CoreInputs::default()
            });
        }
        self.ticks = 0;
        self.stats = SimStats::default();
    }

    /// Drives the interrupt request line for the following ticks.
    pub const fn set_irq(&mut self, level: bool) {
        self.irq = level;
    }

    /// Drives the debug request line for the following ticks.
    pub const fn set_drq(&mut self, level: bool) {
        self.drq = level;
    }

    /// Advances core and memory by one clock cycle.
    pub fn tick(&mut self) -> TickReport {
        let response = self.memory.respond(&self.core.bus());
        let report = self.core.tick(&CoreInputs {
            rst: false,
            irq: self.irq,
            drq: self.drq,
            bus: response,
        });
        self.ticks += 1;
        self.stats.record(&report);

        #[cfg(feature = "commit-log")]
        if let Some((retired, write)) = report.retired {
            if write.enable {
                info!(
                    target: "commit",
                    "{:#010x} ({:#010x}) x{:<2} <- {:#010x}",
                    retired.pc,
                    retired.instr,
                    write.addr,
                    write.data
                );
            } else {
                info!(target: "commit", "{:#010x} ({:#010x})", retired.pc, retired.instr);
            }
        }

        report
    }

    /// Resets, then ticks until the end address is accessed.
    ///
    /// # Errors
    ///
    /// `SimError::Timeout` when `general.max_ticks` ticks elapse first.
    pub fn run(&mut self) -> Result<RunOutcome, SimError> {
        self.reset();
        while !self.memory.ended() {
            if self.ticks >= self.config.general.max_ticks {
                info!(target: "sim", "timeout after {} ticks", self.ticks);
                return Err(SimError::Timeout { ticks: self.ticks });
            }
            let _ = self.tick();
        }
        let outcome = RunOutcome {
            ticks: self.ticks,
            result: self.core.regs().read(self.config.general.result_register),
        };
        info!(target: "sim", "finished after {} ticks, result {}", outcome.ticks, outcome.result);
        Ok(outcome)
    }

    /// Ticks executed since the last reset.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The core.
    pub const fn core(&self) -> &Core {
        &self.core
    }

    /// The memory.
    pub const fn memory(&self) -> &FlatMemory {
        &self.memory
    }

    /// Mutable memory, for preloading data or draining the console.
    pub const fn memory_mut(&mut self) -> &mut FlatMemory {
        &mut self.memory
    }

    /// Statistics since the last reset.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
