//! Two-master Wishbone arbiter.
//!
//! This module multiplexes the fetch and load-store ports onto the core's
//! single Wishbone interface. It provides:
//! 1. **Fixed priority:** Port 1 (fetch) wins over port 2 (load-store).
//! 2. **Atomicity:** Once granted, a port keeps the bus until it drops `cyc`,
//!    so a transaction is never interleaved with another.
//! 3. **Routing:** The slave response reaches only the granted port; the other
//!    port sees a stall.

use crate::soc::wishbone::{BusRequest, BusResponse};

/// Arbiter input port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    /// Port 1: the instruction fetch unit.
    Fetch,
    /// Port 2: the load-store unit.
    LoadStore,
}

/// Result of routing one cycle through the arbiter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Routed {
    /// Request presented to the slave.
    pub slave: BusRequest,
    /// Response seen by the fetch port.
    pub fetch: BusResponse,
    /// Response seen by the load-store port.
    pub load_store: BusResponse,
}

/// Fixed-priority arbiter with a lock on the current owner.
///
/// # Examples
///
/// ```
/// use dproc_core::soc::arbiter::{Arbiter, Port};
/// use dproc_core::soc::wishbone::BusRequest;
///
/// let mut arb = Arbiter::new();
/// let ls = BusRequest { cyc: true, stb: true, ..BusRequest::default() };
/// let fetch = BusRequest::read_word(0x40);
///
/// // Load-store got the bus first and keeps it while it holds cyc.
/// assert_eq!(arb.grant(&BusRequest::IDLE, &ls), Some(Port::LoadStore));
/// arb.tick(&BusRequest::IDLE, &ls);
/// assert_eq!(arb.grant(&fetch, &ls), Some(Port::LoadStore));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Arbiter {
    locked: Option<Port>,
}

impl Arbiter {
    /// Creates an arbiter with no owner.
    pub const fn new() -> Self {
        Self { locked: None }
    }

    /// Port holding the lock from the previous cycle, if any.
    pub const fn locked(&self) -> Option<Port> {
        self.locked
    }

    /// Chooses the port that owns the bus this cycle.
    pub const fn grant(&self, fetch: &BusRequest, load_store: &BusRequest) -> Option<Port> {
        match self.locked {
            Some(Port::Fetch) if fetch.cyc => return Some(Port::Fetch),
            Some(Port::LoadStore) if load_store.cyc => return Some(Port::LoadStore),
            _ => {}
        }
        if fetch.cyc {
            Some(Port::Fetch)
        } else if load_store.cyc {
            Some(Port::LoadStore)
        } else {
            None
        }
    }

    /// Forwards the granted request to the slave and the slave's response back.
    pub const fn route(
        grant: Option<Port>,
        fetch: &BusRequest,
        load_store: &BusRequest,
        slave: &BusResponse,
    ) -> Routed {
        match grant {
            Some(Port::Fetch) => Routed {
                slave: *fetch,
                fetch: *slave,
                load_store: BusResponse::BLOCKED,
            },
            Some(Port::LoadStore) => Routed {
                slave: *load_store,
                fetch: BusResponse::BLOCKED,
                load_store: *slave,
            },
            None => Routed {
                slave: BusRequest::IDLE,
                fetch: BusResponse::BLOCKED,
                load_store: BusResponse::BLOCKED,
            },
        }
    }

    /// Commits the lock at the clock edge.
    pub const fn tick(&mut self, fetch: &BusRequest, load_store: &BusRequest) {
        self.locked = self.grant(fetch, load_store);
    }

    /// Releases the lock.
    pub const fn reset(&mut self) {
        self.locked = None;
    }
}
