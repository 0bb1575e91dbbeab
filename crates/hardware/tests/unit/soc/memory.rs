//! Flat Memory Tests.
//!
//! Verifies storage, the MMIO console and end addresses, acknowledge timing
//! with and without wait states, and fault recording.

use dproc_core::common::data::AccessWidth;
use dproc_core::common::error::BusFault;
use dproc_core::config::MemoryConfig;
use dproc_core::soc::memory::FlatMemory;
use dproc_core::soc::traits::WishboneSlave;
use dproc_core::soc::wishbone::{BusRequest, BusResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn memory(wait_states: u32) -> FlatMemory {
    FlatMemory::new(&MemoryConfig {
        wait_states,
        ..MemoryConfig::default()
    })
}

fn write(adr: u32, dat: u32, sel: u8) -> BusRequest {
    BusRequest {
        adr,
        dat,
        we: true,
        sel,
        stb: true,
        cyc: true,
    }
}

fn read(adr: u32, sel: u8) -> BusRequest {
    BusRequest {
        sel,
        ..BusRequest::read_word(adr)
    }
}

// ─── Storage ─────────────────────────────────────────────────────────────────

#[test]
fn little_endian_words() {
    let mut mem = memory(0);
    mem.write_word(0x10, 0x1122_3344).unwrap();
    assert_eq!(mem.read(0x10, AccessWidth::Byte).unwrap(), 0x44);
    assert_eq!(mem.read(0x12, AccessWidth::Half).unwrap(), 0x1122);
    assert_eq!(mem.read_word(0x10).unwrap(), 0x1122_3344);
}

#[test]
fn host_access_out_of_range() {
    let mut mem = memory(0);
    let size = mem.size() as u32;
    assert!(mem.write_word(size - 2, 0).is_err());
    assert!(mem.read_word(size).is_err());
    assert_eq!(mem.read(size - 1, AccessWidth::Byte).unwrap(), 0);
}

// ─── Bus timing ──────────────────────────────────────────────────────────────

#[test]
fn zero_wait_states_ack_in_the_request_cycle() {
    let mut mem = memory(0);
    mem.write_word(0x40, 0xDEAD_BEEF).unwrap();
    assert_eq!(mem.respond(&read(0x40, 0xF)), BusResponse::ack(0xDEAD_BEEF));
}

#[test]
fn idle_bus_gets_no_ack() {
    let mut mem = memory(0);
    assert_eq!(mem.respond(&BusRequest::IDLE), BusResponse::default());
    let cyc_only = BusRequest {
        stb: false,
        ..BusRequest::read_word(0)
    };
    assert_eq!(mem.respond(&cyc_only), BusResponse::default());
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
fn wait_states_delay_ack(#[case] n: u32) {
    let mut mem = memory(n);
    mem.write_word(0x40, 7).unwrap();

    assert_eq!(mem.respond(&read(0x40, 0xF)), BusResponse::default());
    let waiting = BusRequest {
        stb: false,
        ..read(0x40, 0xF)
    };
    for _ in 1..n {
        assert!(!mem.respond(&waiting).ack);
    }
    assert_eq!(mem.respond(&waiting), BusResponse::ack(7));
    // Nothing outstanding afterwards.
    assert!(!mem.respond(&waiting).ack);
}

#[test]
fn delayed_write_lands_at_ack() {
    let mut mem = memory(1);
    let _ = mem.respond(&write(0x80, 0x55, 0xF));
    assert_eq!(mem.read_word(0x80).unwrap(), 0);
    let _ = mem.respond(&BusRequest::IDLE);
    assert_eq!(mem.read_word(0x80).unwrap(), 0x55);
}

#[test]
fn reset_drops_accepted_request() {
    let mut mem = memory(2);
    let _ = mem.respond(&read(0, 0xF));
    mem.reset();
    assert_eq!(mem.respond(&BusRequest::IDLE), BusResponse::default());
    assert_eq!(mem.respond(&BusRequest::IDLE), BusResponse::default());
}

// ─── Bus writes ──────────────────────────────────────────────────────────────

#[rstest]
#[case(0x1, 0x0000_00EF)]
#[case(0x3, 0x0000_BEEF)]
#[case(0xF, 0xDEAD_BEEF)]
fn write_width_follows_sel(#[case] sel: u8, #[case] expected: u32) {
    let mut mem = memory(0);
    let resp = mem.respond(&write(0x100, 0xDEAD_BEEF, sel));
    assert!(resp.ack);
    assert_eq!(mem.read_word(0x100).unwrap(), expected);
}

#[test]
fn read_width_follows_sel() {
    let mut mem = memory(0);
    mem.write_word(0x100, 0xDEAD_BEEF).unwrap();
    assert_eq!(mem.respond(&read(0x100, 0x1)).dat, 0xEF);
    assert_eq!(mem.respond(&read(0x100, 0x3)).dat, 0xBEEF);
}

// ─── MMIO ────────────────────────────────────────────────────────────────────

#[test]
fn console_collects_low_byte() {
    let mut mem = memory(0);
    for ch in b"hi\n" {
        let resp = mem.respond(&write(0x8000_0000, 0x100 | u32::from(*ch), 0xF));
        assert!(resp.ack);
    }
    assert_eq!(mem.console(), b"hi\n");
    assert_eq!(mem.take_console(), b"hi\n".to_vec());
    assert!(mem.console().is_empty());
}

#[test]
fn console_read_returns_zero() {
    let mut mem = memory(0);
    assert_eq!(mem.respond(&read(0x8000_0000, 0xF)), BusResponse::ack(0));
    assert!(mem.console().is_empty());
}

#[test]
fn end_address_ends_the_run() {
    let mut mem = memory(0);
    assert!(!mem.ended());
    let resp = mem.respond(&write(0xA000_0000, 0, 0xF));
    assert!(resp.ack);
    assert!(mem.ended());
    assert!(mem.faults().is_empty());
}

#[test]
fn reset_rearms_end_marker_and_clears_log() {
    let mut mem = memory(0);
    let _ = mem.respond(&write(0x8000_0000, u32::from(b'x'), 0xF));
    let _ = mem.respond(&read(0x0001_0000, 0xF));
    let _ = mem.respond(&write(0xA000_0000, 0, 0xF));
    assert!(mem.ended());

    mem.reset();
    assert!(!mem.ended());
    assert!(mem.faults().is_empty());
    assert!(mem.console().is_empty());
}

// ─── Faults ──────────────────────────────────────────────────────────────────

#[test]
fn out_of_range_access_is_recorded_and_acked() {
    let mut mem = memory(0);
    let resp = mem.respond(&read(0x0001_0000, 0xF));
    assert_eq!(resp, BusResponse::ack(0));
    assert_eq!(
        mem.faults(),
        &[BusFault::OutOfRange {
            adr: 0x0001_0000,
            memory_end: 0x7FFF,
        }]
    );
}

#[test]
fn invalid_sel_is_recorded() {
    let mut mem = memory(0);
    mem.write_word(0, 0xFFFF_FFFF).unwrap();
    let resp = mem.respond(&write(0, 0, 0x5));
    assert!(resp.ack);
    assert_eq!(mem.faults(), &[BusFault::InvalidSel { adr: 0, sel: 0x5 }]);
    assert_eq!(mem.read_word(0).unwrap(), 0xFFFF_FFFF);
}

// ─── Hex dump ────────────────────────────────────────────────────────────────

#[test]
fn hexdump_groups_bytes_with_ascii_column() {
    let mut mem = memory(0);
    mem.write_bytes(0, b"ECAP5-DPROC model\x01").unwrap();

    let dump = mem.hexdump(0, 18);
    let lines: Vec<String> = dump.lines().map(str::to_owned).collect();
    assert_eq!(
        lines,
        vec![
            "00000000: 4543 4150 352D 4450 524F 4320 6D6F 6465  ECAP5-DPROC mode".to_string(),
            format!("00000010: {:<39}  l.", "6C01"),
        ]
    );
}

#[test]
fn hexdump_is_clamped_to_memory() {
    let mem = memory(0);
    let end = mem.size() as u32;

    let dump = mem.hexdump(end - 4, 64);
    assert_eq!(dump, format!("{:08x}: {:<39}  ....\n", end - 4, "0000 0000"));
    assert!(mem.hexdump(end, 16).is_empty());
    assert!(mem.hexdump(0, 0).is_empty());
}
