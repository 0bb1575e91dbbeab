//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the RV32I opcodes, function codes and field decoding consumed by
//! the decode stage.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Field and immediate decoding for the RV32I instruction formats.
pub mod decode;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;
