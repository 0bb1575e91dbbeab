//! RV32UI conformance sweep.
//!
//! Runs the user-level integer tests from riscv-tests, each built for a
//! bare environment that sets `gp` to 1 and then accesses the end address.

use std::path::{Path, PathBuf};

use crate::common::error::SimError;
use crate::config::Config;
use crate::sim::simulator::{RunOutcome, Simulator};

/// Test names, in riscv-tests order. `ma_data` and `fence_i` are not supported.
pub const RV32UI_TESTS: [&str; 37] = [
    "add", "addi", "and", "andi", "auipc", "beq", "bge", "bgeu", "blt", "bltu", "bne", "jal",
    "jalr", "lb", "lbu", "lh", "lhu", "lw", "lui", "or", "ori", "sb", "sh", "sw", "sll", "slli",
    "slt", "slti", "sltiu", "sltu", "sra", "srai", "srl", "srli", "sub", "xor", "xori",
];

/// Prefix of the riscv-tests binaries for the RV32UI physical-memory environment.
pub const TEST_PREFIX: &str = "rv32ui-p-";

/// Result of one conformance test.
#[derive(Debug)]
pub struct TestResult {
    /// Short test name (e.g. `"addi"`).
    pub name: &'static str,
    /// Path of the ELF that was run.
    pub path: PathBuf,
    /// Outcome, or why the run failed.
    pub outcome: Result<RunOutcome, SimError>,
}

impl TestResult {
    /// The test reached the end address with the result register set to 1.
    pub fn passed(&self) -> bool {
        self.outcome.as_ref().is_ok_and(RunOutcome::passed)
    }
}

/// Runs a single test ELF on a fresh simulator.
///
/// # Errors
///
/// Loader failures and timeouts.
pub fn run_test(path: impl AsRef<Path>, config: &Config) -> Result<RunOutcome, SimError> {
    let mut sim = Simulator::new(config);
    let _ = sim.load_elf(path)?;
    sim.run()
}

/// Runs every test of [`RV32UI_TESTS`] found in `dir`.
///
/// Tests whose ELF is missing are skipped.
pub fn run_suite(dir: impl AsRef<Path>, config: &Config) -> Vec<TestResult> {
    let dir = dir.as_ref();
    RV32UI_TESTS
        .iter()
        .map(|name| (*name, dir.join(format!("{TEST_PREFIX}{name}"))))
        .filter(|(_, path)| path.is_file())
        .map(|(name, path)| {
            let outcome = run_test(&path, config);
            TestResult {
                name,
                path,
                outcome,
            }
        })
        .collect()
}
