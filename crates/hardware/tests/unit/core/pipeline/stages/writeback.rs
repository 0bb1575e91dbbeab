//! Writeback Stage Unit Tests.

use dproc_core::core::pipeline::latches::{Latch, LoadStoreOutput};
use dproc_core::core::pipeline::stages::writeback::{RegisterWrite, writeback};

#[test]
fn valid_write_is_enabled() {
    let ls = Latch::new(LoadStoreOutput {
        reg_write: true,
        reg_addr: 7,
        reg_data: 0x55,
        ..LoadStoreOutput::default()
    });
    assert_eq!(
        writeback(&ls),
        RegisterWrite {
            enable: true,
            addr: 7,
            data: 0x55
        }
    );
}

#[test]
fn bubble_never_writes() {
    assert!(!writeback(&Latch::<LoadStoreOutput>::bubble()).enable);
    assert!(!writeback(&Latch::<LoadStoreOutput>::default()).enable);
}

#[test]
fn store_retires_without_write() {
    let ls = Latch::new(LoadStoreOutput {
        pc: 0x8,
        instr: 0x0020_A023,
        reg_write: false,
        ..LoadStoreOutput::default()
    });
    assert!(!writeback(&ls).enable);
    assert!(ls.data.is_instruction());
}
