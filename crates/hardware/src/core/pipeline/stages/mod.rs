//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Retrieves instructions from memory based on the PC.
//! 2. **Decode:** Decodes instructions into control signals and reads operands.
//! 3. **Execute:** Performs ALU operations and resolves branch targets.
//! 4. **Memory:** Handles data load and store operations.
//! 5. **Writeback:** Produces the register-file write.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Load-store stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::DecodeUnit;
pub use execute::ExecuteUnit;
pub use fetch::FetchUnit;
pub use memory::LoadStoreUnit;
pub use writeback::writeback;
