//! Memory Access Widths.
//!
//! This module defines the data widths a load-store access can take. They are used for:
//! 1. **Bus Encoding:** Mapping a width onto the Wishbone `sel` byte mask.
//! 2. **Load Extension:** Extracting and sign- or zero-extending the loaded lane.
//! 3. **Memory Collaborator:** Deciding how many bytes a write copies.

use crate::common::constants::{SEL_BYTE, SEL_HALF, SEL_WORD};
use crate::isa::decode::sign_extend;
use crate::isa::rv32i::funct3;

/// Width of a data memory access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessWidth {
    /// 8-bit access (LB, LBU, SB).
    Byte,
    /// 16-bit access (LH, LHU, SH).
    Half,
    /// 32-bit access (LW, SW). Also the width of every instruction fetch.
    #[default]
    Word,
}

impl AccessWidth {
    /// Decodes the width from bits 1-0 of a load/store `funct3`.
    pub const fn from_funct3(f3: u32) -> Self {
        match f3 & funct3::ACCESS_WIDTH_MASK {
            0 => Self::Byte,
            1 => Self::Half,
            _ => Self::Word,
        }
    }

    /// Decodes a Wishbone byte-select. Returns `None` for masks the core never emits.
    pub const fn from_sel(sel: u8) -> Option<Self> {
        match sel {
            SEL_BYTE => Some(Self::Byte),
            SEL_HALF => Some(Self::Half),
            SEL_WORD => Some(Self::Word),
            _ => None,
        }
    }

    /// Byte-select mask driven on the bus for this width.
    pub const fn sel(self) -> u8 {
        match self {
            Self::Byte => SEL_BYTE,
            Self::Half => SEL_HALF,
            Self::Word => SEL_WORD,
        }
    }

    /// Number of bytes transferred.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }

    /// Low-lane mask covering this width.
    const fn mask(self) -> u32 {
        match self {
            Self::Byte => 0xFF,
            Self::Half => 0xFFFF,
            Self::Word => 0xFFFF_FFFF,
        }
    }

    /// Extracts the low lane of `data` and extends it to 32 bits.
    ///
    /// # Arguments
    ///
    /// * `data` - Raw 32-bit word returned by the bus.
    /// * `unsigned` - Zero-extend instead of sign-extend (LBU/LHU).
    ///
    /// # Returns
    ///
    /// The value written to the destination register.
    pub const fn extend(self, data: u32, unsigned: bool) -> u32 {
        let lane = data & self.mask();
        match self {
            Self::Word => lane,
            Self::Byte | Self::Half if unsigned => lane,
            Self::Byte => sign_extend(lane, 8),
            Self::Half => sign_extend(lane, 16),
        }
    }
}
