//! Configuration for the core model and its harness.
//!
//! This module defines all configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Reset vectors, memory geometry, MMIO addresses and tick budget.
//! 2. **Structures:** Hierarchical config for general run control, the core and the memory.
//! 3. **Loading:** JSON deserialization from a string or a file.
//!
//! Every field is optional in JSON; missing fields take their value from `defaults`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the model.
mod defaults {
    /// PC loaded on reset.
    pub const BOOT_ADDRESS: u32 = 0x0000_0000;

    /// PC loaded when an interrupt request redirects fetch.
    pub const INTERRUPT_ADDRESS: u32 = 0x0000_0010;

    /// PC loaded when a debug request redirects fetch.
    pub const DEBUG_ADDRESS: u32 = 0x0000_0020;

    /// Size of the flat memory array (32 KiB).
    pub const MEMORY_SIZE: usize = 32 * 1024;

    /// A write here prints the low data byte to the console.
    pub const OUTPUT_ADDRESS: u32 = 0x8000_0000;

    /// Any access here ends the run.
    pub const END_ADDRESS: u32 = 0xA000_0000;

    /// Cycles between a request being accepted and its acknowledge.
    pub const WAIT_STATES: u32 = 0;

    /// Tick budget before a run is declared timed out.
    pub const MAX_TICKS: u64 = 3000;

    /// Number of cycles `rst` is held high before a run.
    pub const RESET_CYCLES: u32 = 5;

    /// Register holding the pass/fail result of a conformance test (gp).
    pub const RESULT_REGISTER: usize = crate::isa::abi::REG_GP;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use dproc_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.core.boot_address, 0);
/// assert_eq!(config.memory.size, 32 * 1024);
/// ```
///
/// Deserializing a partial configuration from JSON:
///
/// ```
/// use dproc_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_ticks": 10000 },
///     "core": { "boot_address": 256, "interrupt_address": 512 },
///     "memory": { "wait_states": 2 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_ticks, 10000);
/// assert_eq!(config.core.boot_address, 0x100);
/// assert_eq!(config.core.debug_address, 0x20);
/// assert_eq!(config.memory.wait_states, 2);
/// assert_eq!(config.memory.end_address, 0xA000_0000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Run control settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Core parameters (reset and redirect vectors)
    #[serde(default)]
    pub core: CoreConfig,
    /// Memory collaborator geometry and MMIO map
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON text; every field may be omitted.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or `ConfigError::Parse` on malformed input.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Run control settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Tick budget; a run that has not reached the end address by then times out
    #[serde(default = "GeneralConfig::default_max_ticks")]
    pub max_ticks: u64,
    /// Number of cycles reset is held before the run starts
    #[serde(default = "GeneralConfig::default_reset_cycles")]
    pub reset_cycles: u32,
    /// Register that must read 1 at the end of a passing conformance test
    #[serde(default = "GeneralConfig::default_result_register")]
    pub result_register: usize,
}

impl GeneralConfig {
    fn default_max_ticks() -> u64 {
        defaults::MAX_TICKS
    }

    fn default_reset_cycles() -> u32 {
        defaults::RESET_CYCLES
    }

    fn default_result_register() -> usize {
        defaults::RESULT_REGISTER
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_ticks: defaults::MAX_TICKS,
            reset_cycles: defaults::RESET_CYCLES,
            result_register: defaults::RESULT_REGISTER,
        }
    }
}

/// Core parameters fixed at elaboration time in the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CoreConfig {
    /// PC value after reset
    #[serde(default = "CoreConfig::default_boot_address")]
    pub boot_address: u32,
    /// PC value after an interrupt request
    #[serde(default = "CoreConfig::default_interrupt_address")]
    pub interrupt_address: u32,
    /// PC value after a debug request
    #[serde(default = "CoreConfig::default_debug_address")]
    pub debug_address: u32,
}

impl CoreConfig {
    fn default_boot_address() -> u32 {
        defaults::BOOT_ADDRESS
    }

    fn default_interrupt_address() -> u32 {
        defaults::INTERRUPT_ADDRESS
    }

    fn default_debug_address() -> u32 {
        defaults::DEBUG_ADDRESS
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            boot_address: defaults::BOOT_ADDRESS,
            interrupt_address: defaults::INTERRUPT_ADDRESS,
            debug_address: defaults::DEBUG_ADDRESS,
        }
    }
}

/// Memory collaborator configuration.
///
/// Specifies the size of the flat memory array, the MMIO addresses it
/// special-cases, and the acknowledge latency it models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Memory size in bytes, starting at address 0
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
    /// Console output register
    #[serde(default = "MemoryConfig::default_output_address")]
    pub output_address: u32,
    /// End-of-test address
    #[serde(default = "MemoryConfig::default_end_address")]
    pub end_address: u32,
    /// Extra cycles before each acknowledge (0 acks in the request cycle)
    #[serde(default = "MemoryConfig::default_wait_states")]
    pub wait_states: u32,
}

impl MemoryConfig {
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    fn default_output_address() -> u32 {
        defaults::OUTPUT_ADDRESS
    }

    fn default_end_address() -> u32 {
        defaults::END_ADDRESS
    }

    fn default_wait_states() -> u32 {
        defaults::WAIT_STATES
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            output_address: defaults::OUTPUT_ADDRESS,
            end_address: defaults::END_ADDRESS,
            wait_states: defaults::WAIT_STATES,
        }
    }
}
