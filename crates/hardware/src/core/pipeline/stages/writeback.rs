//! Writeback (WB) Stage.
//!
//! The last stage has no state of its own: it turns the load-store output
//! register into a register-file write port, gated by the valid bit.

use crate::core::pipeline::latches::{Latch, LoadStoreOutput};

/// One register-file write request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Perform the write at this edge.
    pub enable: bool,
    /// Destination register.
    pub addr: usize,
    /// Value written.
    pub data: u32,
}

/// Computes the register-file write for the current cycle.
///
/// # Examples
///
/// ```
/// use dproc_core::core::pipeline::latches::{Latch, LoadStoreOutput};
/// use dproc_core::core::pipeline::stages::writeback::writeback;
///
/// let mut ls = Latch::new(LoadStoreOutput { reg_write: true, reg_addr: 1, reg_data: 9, ..Default::default() });
/// assert!(writeback(&ls).enable);
/// ls.valid = false;
/// assert!(!writeback(&ls).enable);
/// ```
pub const fn writeback(input: &Latch<LoadStoreOutput>) -> RegisterWrite {
    RegisterWrite {
        enable: input.valid && input.data.reg_write,
        addr: input.data.reg_addr,
        data: input.data.reg_data,
    }
}
