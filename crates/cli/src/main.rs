//! ECAP5-DPROC simulator CLI.
//!
//! This binary provides two simulation modes. It performs:
//! 1. **Run:** Execute one ELF program until it accesses the end address, streaming
//!    its console output.
//! 2. **Conformance:** Run every RV32UI test found in a directory and report pass/fail.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use dproc_core::config::Config;
use dproc_core::sim::Simulator;
use dproc_core::sim::conformance::{self, RV32UI_TESTS};

#[derive(Parser, Debug)]
#[command(
    name = "dproc",
    author,
    version,
    about = "ECAP5-DPROC cycle-accurate simulator",
    long_about = "Run an RV32I program on the ECAP5-DPROC pipeline model, or sweep the RV32UI conformance tests.\n\nExamples:\n  dproc run program.elf --stats\n  dproc run program.elf --dump-memory 256\n  dproc conformance riscv-tests/isa --max-ticks 5000\n  RUST_LOG=fetch=debug dproc run program.elf"
)]
struct Cli {
    /// JSON configuration file; unset fields keep their defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Tick budget, overriding the configuration.
    #[arg(long, global = true)]
    max_ticks: Option<u64>,

    /// Log pipeline redirects and bus faults (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single ELF program.
    Run {
        /// ELF image to execute.
        elf: PathBuf,

        /// Print statistics at the end of the run.
        #[arg(long)]
        stats: bool,

        /// Print the register file at the end of the run.
        #[arg(long)]
        dump_regs: bool,

        /// Hex-dump the first BYTES bytes of memory at the end of the run.
        #[arg(long, value_name = "BYTES")]
        dump_memory: Option<usize>,
    },

    /// Run the RV32UI tests (`rv32ui-p-<name>`) found in a directory.
    Conformance {
        /// Directory containing the test ELFs.
        dir: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, max_ticks: Option<u64>) -> Config {
    let mut config = match path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("[!] {e}");
            process::exit(2);
        }),
        None => Config::default(),
    };
    if let Some(ticks) = max_ticks {
        config.general.max_ticks = ticks;
    }
    config
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref(), cli.max_ticks);

    let code = match cli.command {
        Commands::Run {
            elf,
            stats,
            dump_regs,
            dump_memory,
        } => cmd_run(
            &config,
            &elf,
            &RunReport {
                stats,
                dump_regs,
                dump_memory,
            },
        ),
        Commands::Conformance { dir } => cmd_conformance(&config, &dir),
    };
    process::exit(code);
}

/// What `run` prints once the program stops.
struct RunReport {
    stats: bool,
    dump_regs: bool,
    dump_memory: Option<usize>,
}

/// Runs one program, streaming console bytes as they are written.
///
/// Returns the process exit code: 0 on reaching the end address, 1 on
/// timeout or load failure.
fn cmd_run(config: &Config, elf: &Path, report: &RunReport) -> i32 {
    let mut sim = Simulator::new(config);
    match sim.load_elf(elf) {
        Ok(image) => println!(
            "[*] Loaded {} ({} segments, {} bytes, entry {:#010x})",
            elf.display(),
            image.segments,
            image.bytes,
            image.entry
        ),
        Err(e) => {
            error!("{e}");
            eprintln!("[!] {e}");
            return 1;
        }
    }

    sim.reset();
    let mut stdout = std::io::stdout();
    let code = loop {
        if sim.memory().ended() {
            println!("\n[*] End address reached after {} ticks", sim.ticks());
            break 0;
        }
        if sim.ticks() >= config.general.max_ticks {
            eprintln!("\n[!] Killed: Timeout after {} ticks", sim.ticks());
            break 1;
        }
        let _ = sim.tick();
        let out = sim.memory_mut().take_console();
        if !out.is_empty() {
            let _ = stdout.write_all(&out);
            let _ = stdout.flush();
        }
    };

    let faults = sim.memory().faults();
    if !faults.is_empty() {
        eprintln!("[!] {} bus fault(s), first: {}", faults.len(), faults[0]);
    }
    if report.dump_regs {
        sim.core().regs().dump();
    }
    if let Some(len) = report.dump_memory {
        print!("{}", sim.memory().hexdump(0, len));
    }
    if report.stats {
        sim.stats().print();
    }
    code
}

/// Runs the conformance sweep and prints one line per test.
///
/// Returns 0 when every test found passed.
fn cmd_conformance(config: &Config, dir: &Path) -> i32 {
    let results = conformance::run_suite(dir, config);
    if results.is_empty() {
        eprintln!(
            "[!] No rv32ui-p-* tests found in {} (expected up to {})",
            dir.display(),
            RV32UI_TESTS.len()
        );
        return 1;
    }

    let mut failed = 0;
    for result in &results {
        match &result.outcome {
            Ok(outcome) if outcome.passed() => {
                println!("[RISCV-TESTS] {:<6} : PASS ({} ticks)", result.name, outcome.ticks);
            }
            Ok(outcome) => {
                failed += 1;
                println!(
                    "[RISCV-TESTS] {:<6} : FAIL (result register = {})",
                    result.name, outcome.result
                );
            }
            Err(e) => {
                failed += 1;
                println!("[RISCV-TESTS] {:<6} : FAIL ({e})", result.name);
            }
        }
    }
    println!(
        "\n{} / {} passed ({} missing)",
        results.len() - failed,
        results.len(),
        RV32UI_TESTS.len() - results.len()
    );
    i32::from(failed != 0)
}
