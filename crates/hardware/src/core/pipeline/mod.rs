//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Engine:** The `Core` top level that wires stages, hazards and arbiter.
//! 2. **Hazards:** Detection of control and data hazards.
//! 3. **Latches:** Inter-stage registers for communication between pipeline stages.
//! 4. **Signals:** Control signals generated during instruction decoding.
//! 5. **Stages:** Implementation of Fetch, Decode, Execute, Load-Store, and Writeback stages.
//! 6. **Traits:** Common interfaces for pipeline components and stages.

/// Core top level (stage wiring and clocking).
pub mod engine;

/// Pipeline hazard detection logic.
pub mod hazards;

/// Inter-stage pipeline registers (IF/DEC, DEC/EX, EX/LS, LS/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, load-store, writeback).
pub mod stages;

/// Traits for pipeline stage components.
pub mod traits;
