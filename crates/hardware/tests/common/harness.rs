use dproc_core::Simulator;
use dproc_core::config::Config;
use dproc_core::core::{Core, TickReport};
use dproc_core::soc::memory::FlatMemory;

/// Simulator wrapper for pipeline-level tests.
///
/// Build it up with the `with_*` methods, call [`TestContext::start`] to hold
/// reset, then clock it cycle by cycle.
#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
        Self {
            sim: Simulator::new(config),
        }
    }

    /// Context whose memory acknowledges after `n` wait states.
    pub fn with_wait_states(n: u32) -> Self {
        let mut config = Config::default();
        config.memory.wait_states = n;
        Self::with_config(&config)
    }

    /// Load a sequence of 32-bit words into memory at `addr`.
    pub fn load_program(mut self, addr: u32, instructions: &[u32]) -> Self {
        self.sim.load_words(addr, instructions).unwrap();
        self
    }

    /// Store a data word before the run starts.
    pub fn with_word(mut self, addr: u32, word: u32) -> Self {
        self.sim.memory_mut().write_word(addr, word).unwrap();
        self
    }

    /// Hold reset for the configured number of cycles.
    pub fn start(mut self) -> Self {
        self.sim.reset();
        self
    }

    pub fn core(&self) -> &Core {
        self.sim.core()
    }

    pub fn memory(&self) -> &FlatMemory {
        self.sim.memory()
    }

    pub fn get_reg(&self, reg: usize) -> u32 {
        self.sim.core().regs().read(reg)
    }

    /// Clock one edge.
    pub fn tick(&mut self) -> TickReport {
        self.sim.tick()
    }

    /// Clock `cycles` edges and return every report.
    pub fn step(&mut self, cycles: u64) -> Vec<TickReport> {
        (0..cycles).map(|_| self.sim.tick()).collect()
    }

    /// Clock until the memory sees the end address, at most `limit` edges.
    ///
    /// Returns the number of edges clocked.
    pub fn run_until_end(&mut self, limit: u64) -> u64 {
        let mut ticks = 0;
        while !self.sim.memory().ended() && ticks < limit {
            let _ = self.sim.tick();
            ticks += 1;
        }
        ticks
    }

    /// Clock with the interrupt line high for exactly one edge.
    pub fn pulse_irq(&mut self) -> TickReport {
        self.sim.set_irq(true);
        let report = self.sim.tick();
        self.sim.set_irq(false);
        report
    }

    /// Clock with both request lines high for exactly one edge.
    pub fn pulse_irq_and_drq(&mut self) -> TickReport {
        self.sim.set_irq(true);
        self.sim.set_drq(true);
        let report = self.sim.tick();
        self.sim.set_irq(false);
        self.sim.set_drq(false);
        report
    }
}
