//! Bus slave trait.
//!
//! This module defines the interface of everything the core's Wishbone port
//! can talk to. A slave is evaluated once per clock cycle: it sees the request
//! currently driven by the granted master and returns its response for that
//! same cycle, updating any internal state as if the edge had passed.

use crate::soc::wishbone::{BusRequest, BusResponse};

/// A Wishbone slave attached to the core's shared port.
pub trait WishboneSlave {
    /// Samples `req` for the current cycle and returns the response.
    ///
    /// Must be called exactly once per clock cycle, including idle ones.
    fn respond(&mut self, req: &BusRequest) -> BusResponse;

    /// Drops any transaction in progress.
    fn reset(&mut self) {}
}
