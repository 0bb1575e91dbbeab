//! ALU arithmetic operations.
//!
//! Addition and subtraction share one adder in the hardware; both wrap
//! modulo 2^32.

/// Executes an addition, or a subtraction when `sub` is set.
///
/// # Arguments
///
/// * `a`   - First operand.
/// * `b`   - Second operand.
/// * `sub` - If true, compute `a - b` instead of `a + b`.
pub const fn execute(a: u32, b: u32, sub: bool) -> u32 {
    if sub { a.wrapping_sub(b) } else { a.wrapping_add(b) }
}
