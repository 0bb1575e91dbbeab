//! ALU Arithmetic Tests.
//!
//! ADD and SUB share one adder and wrap modulo 2^32.

use dproc_core::core::pipeline::signals::{AluFlags, AluOp};
use dproc_core::core::units::alu::{Alu, arithmetic};
use rstest::rstest;

const SUB: AluFlags = AluFlags {
    sub: true,
    shift_left: false,
    shift_signed: false,
};

#[rstest]
#[case(1, 2, 3)]
#[case(0xFFFF_FFFF, 1, 0)]
#[case(0x7FFF_FFFF, 1, 0x8000_0000)]
#[case(0x8000_0000, 0x8000_0000, 0)]
fn add(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(AluOp::Add, a, b, AluFlags::default()), expected);
}

#[rstest]
#[case(3, 2, 1)]
#[case(0, 1, 0xFFFF_FFFF)]
#[case(0x8000_0000, 1, 0x7FFF_FFFF)]
fn sub(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(AluOp::Add, a, b, SUB), expected);
    assert_eq!(arithmetic::execute(a, b, true), expected);
}

#[test]
fn shift_flags_do_not_affect_add() {
    let flags = AluFlags {
        sub: false,
        shift_left: true,
        shift_signed: true,
    };
    assert_eq!(Alu::execute(AluOp::Add, 5, 6, flags), 11);
}
