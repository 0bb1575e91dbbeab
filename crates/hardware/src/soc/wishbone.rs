//! Wishbone B4 pipelined bus signals.
//!
//! Only the subset the core drives is modelled: a single 32-bit data bus with
//! byte selects, no tags, no burst cycles and no error/retry lines.

use crate::common::constants::SEL_WORD;

/// Master-to-slave half of a Wishbone port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BusRequest {
    /// Byte address.
    pub adr: u32,
    /// Write data (`dat_o` of the master).
    pub dat: u32,
    /// Write enable.
    pub we: bool,
    /// Byte-lane select, one bit per byte of `dat`.
    pub sel: u8,
    /// Strobe: a request is being presented.
    pub stb: bool,
    /// Cycle: the master owns the bus for the current transaction.
    pub cyc: bool,
}

impl BusRequest {
    /// The idle request, as seen by a slave when no master is granted.
    pub const IDLE: Self = Self {
        adr: 0,
        dat: 0,
        we: false,
        sel: 0,
        stb: false,
        cyc: false,
    };

    /// Word read strobe at `adr`, the shape of every instruction fetch.
    pub const fn read_word(adr: u32) -> Self {
        Self {
            adr,
            dat: 0,
            we: false,
            sel: SEL_WORD,
            stb: true,
            cyc: true,
        }
    }

    /// The request is visible to the slave this cycle.
    pub const fn is_strobe(&self) -> bool {
        self.stb && self.cyc
    }
}

/// Slave-to-master half of a Wishbone port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BusResponse {
    /// Read data (`dat_i` of the master).
    pub dat: u32,
    /// Acknowledge: the transaction completes this cycle.
    pub ack: bool,
    /// The slave cannot accept the presented request this cycle.
    pub stall: bool,
}

impl BusResponse {
    /// What a master sees when it does not own the bus.
    pub const BLOCKED: Self = Self {
        dat: 0,
        ack: false,
        stall: true,
    };

    /// An acknowledge carrying `dat`.
    pub const fn ack(dat: u32) -> Self {
        Self {
            dat,
            ack: true,
            stall: false,
        }
    }
}

/// What a master with an open transaction does at the clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterStep {
    /// The slave acknowledged; the read data is captured.
    Acked(u32),
    /// The request was accepted (or had been already); wait for ack.
    Waiting,
    /// The slave stalled a strobed request; it must be presented again.
    Stalled,
}

impl MasterStep {
    /// Classifies the slave's response for a master that is `strobing` or waiting.
    ///
    /// `stall` only has meaning while a strobe is presented.
    pub const fn sample(strobing: bool, resp: &BusResponse) -> Self {
        if resp.ack {
            Self::Acked(resp.dat)
        } else if strobing && resp.stall {
            Self::Stalled
        } else {
            Self::Waiting
        }
    }
}
