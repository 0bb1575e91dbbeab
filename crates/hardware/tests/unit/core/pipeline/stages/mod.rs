//! Stage tests.

pub mod fetch;
pub mod memory;
pub mod writeback;
