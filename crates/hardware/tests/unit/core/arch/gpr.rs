//! Register File Tests.

use dproc_core::core::arch::gpr::Gpr;
use proptest::prelude::*;

#[test]
fn starts_zeroed() {
    let regs = Gpr::new();
    assert!(regs.snapshot().iter().all(|&r| r == 0));
}

#[test]
fn x0_ignores_writes() {
    let mut regs = Gpr::new();
    regs.write(0, 0xDEAD_BEEF);
    assert_eq!(regs.read(0), 0);
}

#[test]
fn clear_zeroes_every_register() {
    let mut regs = Gpr::new();
    for i in 1..32 {
        regs.write(i, i as u32);
    }
    regs.clear();
    assert_eq!(regs, Gpr::default());
}

#[test]
fn display_lists_abi_names() {
    let mut regs = Gpr::new();
    regs.write(3, 1);
    let text = regs.to_string();
    assert_eq!(text.lines().count(), 16);
    assert!(text.contains("gp=0x00000001"));
    assert!(text.contains("t6=0x00000000"));
}

proptest! {
    #[test]
    fn write_then_read(idx in 1usize..32, val in any::<u32>()) {
        let mut regs = Gpr::new();
        regs.write(idx, val);
        prop_assert_eq!(regs.read(idx), val);
        for other in (1..32).filter(|&i| i != idx) {
            prop_assert_eq!(regs.read(other), 0);
        }
    }
}
