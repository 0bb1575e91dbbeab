//! Flat Wishbone memory.
//!
//! This module implements the memory the core is simulated against. It provides:
//! 1. **Storage:** A byte array starting at address 0, little-endian.
//! 2. **MMIO:** A console output register and an end-of-test address.
//! 3. **Timing:** Acknowledge in the request cycle, or after a fixed number of
//!    wait states.
//! 4. **Diagnostics:** Out-of-range accesses and malformed byte selects are
//!    logged and recorded; the core keeps running and reads return 0. The
//!    array can be printed as a hex dump after a run.

use std::fmt::Write;

use tracing::{info, warn};

use crate::common::data::AccessWidth;
use crate::common::error::BusFault;
use crate::config::MemoryConfig;
use crate::soc::traits::WishboneSlave;
use crate::soc::wishbone::{BusRequest, BusResponse};

/// A request accepted by the memory and waiting out its wait states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Accepted {
    request: BusRequest,
    remaining: u32,
}

/// Byte-addressed memory with console and end-of-test MMIO.
///
/// # Examples
///
/// ```
/// use dproc_core::config::MemoryConfig;
/// use dproc_core::soc::memory::FlatMemory;
/// use dproc_core::soc::traits::WishboneSlave;
/// use dproc_core::soc::wishbone::BusRequest;
///
/// let mut mem = FlatMemory::new(&MemoryConfig::default());
/// mem.write_word(0x10, 0xCAFE_F00D).unwrap();
///
/// let resp = mem.respond(&BusRequest::read_word(0x10));
/// assert!(resp.ack);
/// assert_eq!(resp.dat, 0xCAFE_F00D);
/// ```
#[derive(Clone, Debug)]
pub struct FlatMemory {
    data: Vec<u8>,
    output_address: u32,
    end_address: u32,
    wait_states: u32,
    accepted: Option<Accepted>,
    console: Vec<u8>,
    ended: bool,
    faults: Vec<BusFault>,
}

impl FlatMemory {
    /// Creates a zero-filled memory.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            data: vec![0; config.size],
            output_address: config.output_address,
            end_address: config.end_address,
            wait_states: config.wait_states,
            accepted: None,
            console: Vec::new(),
            ended: false,
            faults: Vec::new(),
        }
    }

    /// Size of the memory array in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// The end-of-test address has been accessed.
    pub const fn ended(&self) -> bool {
        self.ended
    }

    /// Bytes written to the console register so far.
    pub fn console(&self) -> &[u8] {
        &self.console
    }

    /// Removes and returns the console bytes written so far.
    pub fn take_console(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.console)
    }

    /// Protocol faults recorded so far.
    pub fn faults(&self) -> &[BusFault] {
        &self.faults
    }

    fn check_range(&self, adr: u32, len: usize) -> Result<usize, BusFault> {
        let start = adr as usize;
        match start.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(start),
            _ => Err(BusFault::OutOfRange {
                adr,
                memory_end: self.data.len().saturating_sub(1) as u32,
            }),
        }
    }

    /// Copies `bytes` into memory starting at `adr`.
    ///
    /// # Errors
    ///
    /// `BusFault::OutOfRange` if any byte falls outside the array; nothing is written then.
    pub fn write_bytes(&mut self, adr: u32, bytes: &[u8]) -> Result<(), BusFault> {
        let start = self.check_range(adr, bytes.len())?;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Writes one little-endian word.
    ///
    /// # Errors
    ///
    /// `BusFault::OutOfRange` if the word does not fit.
    pub fn write_word(&mut self, adr: u32, word: u32) -> Result<(), BusFault> {
        self.write_bytes(adr, &word.to_le_bytes())
    }

    /// Reads `width` bytes at `adr` into the low lanes of a word.
    ///
    /// # Errors
    ///
    /// `BusFault::OutOfRange` if the access does not fit.
    pub fn read(&self, adr: u32, width: AccessWidth) -> Result<u32, BusFault> {
        let start = self.check_range(adr, width.bytes())?;
        let mut word = [0u8; 4];
        word[..width.bytes()].copy_from_slice(&self.data[start..start + width.bytes()]);
        Ok(u32::from_le_bytes(word))
    }

    /// Reads one little-endian word.
    ///
    /// # Errors
    ///
    /// `BusFault::OutOfRange` if the word does not fit.
    pub fn read_word(&self, adr: u32) -> Result<u32, BusFault> {
        self.read(adr, AccessWidth::Word)
    }

    /// Formats `len` bytes from `adr` as a hex dump, 16 bytes per line.
    ///
    /// Each line holds the address, the bytes in 2-byte groups and their
    /// printable characters. The range is clamped to the array.
    ///
    /// # Examples
    ///
    /// ```
    /// use dproc_core::config::MemoryConfig;
    /// use dproc_core::soc::memory::FlatMemory;
    ///
    /// let mut mem = FlatMemory::new(&MemoryConfig::default());
    /// mem.write_bytes(0, b"OK").unwrap();
    /// assert!(mem.hexdump(0, 2).starts_with("00000000: 4F4B"));
    /// ```
    pub fn hexdump(&self, adr: u32, len: usize) -> String {
        let start = (adr as usize).min(self.data.len());
        let end = start.saturating_add(len).min(self.data.len());
        let mut out = String::new();
        for (row, chunk) in self.data[start..end].chunks(16).enumerate() {
            let mut hex = String::with_capacity(39);
            for (i, byte) in chunk.iter().enumerate() {
                if i > 0 && i % 2 == 0 {
                    hex.push(' ');
                }
                let _ = write!(hex, "{byte:02X}");
            }
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { char::from(b) } else { '.' })
                .collect();
            let _ = writeln!(out, "{:08x}: {hex:<39}  {ascii}", start + row * 16);
        }
        out
    }

    fn fault(&mut self, fault: BusFault) -> u32 {
        warn!(target: "memory", "{fault}");
        self.faults.push(fault);
        0
    }

    /// Performs a strobed access and returns the read data.
    fn perform(&mut self, req: &BusRequest) -> u32 {
        if req.adr == self.end_address {
            info!(target: "memory", "end address {:#010x} reached", req.adr);
            self.ended = true;
            return 0;
        }
        if req.adr == self.output_address {
            if req.we {
                self.console.push(req.dat as u8);
            }
            return 0;
        }
        let Some(width) = AccessWidth::from_sel(req.sel) else {
            return self.fault(BusFault::InvalidSel {
                adr: req.adr,
                sel: req.sel,
            });
        };
        let result = if req.we {
            let bytes = req.dat.to_le_bytes();
            self.write_bytes(req.adr, &bytes[..width.bytes()]).map(|()| 0)
        } else {
            self.read(req.adr, width)
        };
        result.unwrap_or_else(|fault| self.fault(fault))
    }
}

impl WishboneSlave for FlatMemory {
    fn respond(&mut self, req: &BusRequest) -> BusResponse {
        if let Some(mut accepted) = self.accepted.take() {
            if accepted.remaining == 0 {
                return BusResponse::ack(self.perform(&accepted.request));
            }
            accepted.remaining -= 1;
            self.accepted = Some(accepted);
            return BusResponse::default();
        }
        if !req.is_strobe() {
            return BusResponse::default();
        }
        if self.wait_states == 0 {
            BusResponse::ack(self.perform(req))
        } else {
            self.accepted = Some(Accepted {
                request: *req,
                remaining: self.wait_states - 1,
            });
            BusResponse::default()
        }
    }

    fn reset(&mut self) {
        self.accepted = None;
        self.ended = false;
        self.console.clear();
        self.faults.clear();
    }
}
