//! Error and diagnostic types.
//!
//! The core itself has no architectural exceptions. This module covers the host side:
//! 1. **Loader Errors:** Missing files, malformed ELF images and oversized segments.
//! 2. **Configuration Errors:** Unreadable or malformed JSON configuration.
//! 3. **Simulation Errors:** Tick-budget exhaustion and wrapped setup failures.
//! 4. **Bus Faults:** Protocol violations seen by the memory collaborator. These are
//!    diagnostics that get logged and counted; they never stop the core.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to place a program image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a parseable ELF image.
    #[error("'{}' is not a valid ELF image: {source}", .path.display())]
    Parse {
        /// Path that was requested.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: object::read::Error,
    },

    /// A program header points outside the file.
    #[error("'{}': segment {index} is truncated", .path.display())]
    Truncated {
        /// Path that was requested.
        path: PathBuf,
        /// Program header index.
        index: usize,
    },

    /// The ELF image is not a 32-bit little-endian RISC-V executable.
    #[error("'{}' is not a 32-bit RISC-V ELF image", .path.display())]
    WrongArchitecture {
        /// Path that was requested.
        path: PathBuf,
    },

    /// A loadable segment does not fit inside the memory array.
    #[error(
        "memory overflow with segment {index}: segment end {end:#010x}, memory end {memory_end:#010x}"
    )]
    SegmentOverflow {
        /// Program header index.
        index: usize,
        /// One past the last byte the segment occupies.
        end: u64,
        /// One past the last byte of memory.
        memory_end: u64,
    },
}

/// Failure to obtain a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read configuration '{}': {source}", .path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON did not match the configuration schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure of a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The tick budget ran out before the program reached the end address.
    #[error("Killed: Timeout after {ticks} ticks")]
    Timeout {
        /// Number of ticks executed.
        ticks: u64,
    },

    /// The program image could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A Wishbone protocol violation observed by the memory collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BusFault {
    /// Access outside the memory array and outside every MMIO address.
    #[error("runtime memory overflow: requested address {adr:#010x}, memory end address {memory_end:#010x}")]
    OutOfRange {
        /// Address driven by the master.
        adr: u32,
        /// Last valid byte address.
        memory_end: u32,
    },

    /// A byte-select that is not 0x1, 0x3 or 0xF.
    #[error("invalid wishbone sel signal: {sel:#x} at {adr:#010x}")]
    InvalidSel {
        /// Address driven by the master.
        adr: u32,
        /// Offending byte-select.
        sel: u8,
    },
}
