//! Common types and constants shared by every part of the model.
//!
//! It includes:
//! 1. **Constants:** Instruction, register-file and byte-select constants.
//! 2. **Access Widths:** Byte/halfword/word access encoding and load extension.
//! 3. **Error Handling:** Loader, configuration and simulation errors plus bus faults.

/// Common constants used throughout the model.
pub mod constants;

/// Memory access width definitions.
pub mod data;

/// Error and diagnostic types.
pub mod error;

pub use data::AccessWidth;
pub use error::{BusFault, ConfigError, LoadError, SimError};
