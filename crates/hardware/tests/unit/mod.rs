//! # Unit Components
//!
//! This module is the hub for the tests of every part of the model: shared
//! types, the ISA decoder, the core and its pipeline, the bus collaborators,
//! and the simulation harness.
