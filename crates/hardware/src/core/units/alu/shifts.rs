//! ALU shift operations.
//!
//! Implements shift-left logical (SLL), shift-right logical (SRL), and
//! shift-right arithmetic (SRA). Shift amounts are masked to 5 bits (0-31).

/// Bit mask for the shift amount (5 bits: 0-31).
pub const SHAMT_MASK: u32 = 0x1f;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `a`      - The value to be shifted.
/// * `b`      - The shift amount (bits 4:0 used, upper bits ignored).
/// * `left`   - Shift left instead of right. Left shifts are always logical.
/// * `signed` - Right shifts replicate the sign bit.
pub const fn execute(a: u32, b: u32, left: bool, signed: bool) -> u32 {
    let shamt = b & SHAMT_MASK;
    if left {
        a << shamt
    } else if signed {
        ((a as i32) >> shamt) as u32
    } else {
        a >> shamt
    }
}
