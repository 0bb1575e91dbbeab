//! Program Loader Tests.
//!
//! Verifies ELF segment placement, the whole-image overflow check and
//! the raw binary path.

use dproc_core::common::error::LoadError;
use dproc_core::config::MemoryConfig;
use dproc_core::sim::loader::{load_binary, load_elf};
use dproc_core::soc::memory::FlatMemory;
use pretty_assertions::assert_eq;

use crate::common::builder::elf::{EM_X86_64, ElfBuilder};

fn memory() -> FlatMemory {
    FlatMemory::new(&MemoryConfig::default())
}

#[test]
fn loads_every_segment_at_its_address() {
    let dir = tempfile::tempdir().unwrap();
    let path = ElfBuilder::new()
        .entry(0x0)
        .words(0x0, &[0x0010_0193, 0xA000_02B7])
        .segment(0x1000, b"data")
        .write_to(dir.path(), "prog.elf");

    let mut mem = memory();
    let image = load_elf(&path, &mut mem).unwrap();
    assert_eq!(image.entry, 0);
    assert_eq!(image.segments, 2);
    assert_eq!(image.bytes, 12);
    assert_eq!(mem.read_word(0).unwrap(), 0x0010_0193);
    assert_eq!(mem.read_word(4).unwrap(), 0xA000_02B7);
    assert_eq!(mem.read_word(0x1000).unwrap(), u32::from_le_bytes(*b"data"));
}

#[test]
fn skips_non_load_segments() {
    let dir = tempfile::tempdir().unwrap();
    let path = ElfBuilder::new()
        .note(b"ignored!")
        .words(0x20, &[0x13])
        .write_to(dir.path(), "note.elf");

    let mut mem = memory();
    let image = load_elf(&path, &mut mem).unwrap();
    assert_eq!(image.segments, 1);
    assert_eq!(mem.read_word(0x20).unwrap(), 0x13);
    assert_eq!(mem.read_word(0).unwrap(), 0);
}

#[test]
fn segment_past_memory_end_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = ElfBuilder::new()
        .words(0x0, &[0x1111_1111])
        .segment(0x7FF0, &[0xAA; 0x20])
        .write_to(dir.path(), "big.elf");

    let mut mem = memory();
    let err = load_elf(&path, &mut mem).unwrap_err();
    match err {
        LoadError::SegmentOverflow {
            index,
            end,
            memory_end,
        } => {
            assert_eq!(index, 1);
            assert_eq!(end, 0x8010);
            assert_eq!(memory_end, 0x8000);
        }
        other => panic!("unexpected error: {other}"),
    }
    // Nothing was written.
    assert_eq!(mem.read_word(0).unwrap(), 0);
}

#[test]
fn bss_tail_counts_toward_overflow() {
    let dir = tempfile::tempdir().unwrap();
    let path = ElfBuilder::new()
        .segment_with_memsz(0x7000, &[1, 2, 3, 4], 0x2000)
        .write_to(dir.path(), "bss.elf");

    let err = load_elf(&path, &mut memory()).unwrap_err();
    assert!(matches!(err, LoadError::SegmentOverflow { end: 0x9000, .. }));
}

#[test]
fn rejects_other_architectures() {
    let dir = tempfile::tempdir().unwrap();
    let path = ElfBuilder::new()
        .machine(EM_X86_64)
        .words(0, &[0x13])
        .write_to(dir.path(), "x86.elf");

    let err = load_elf(&path, &mut memory()).unwrap_err();
    assert!(matches!(err, LoadError::WrongArchitecture { .. }));
}

#[test]
fn rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.elf");
    std::fs::write(&path, b"definitely not an ELF file, just some text").unwrap();

    let err = load_elf(&path, &mut memory()).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_elf(dir.path().join("nope.elf"), &mut memory()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("nope.elf"));
}

#[test]
fn raw_binary_at_base() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.bin");
    std::fs::write(&path, 0x0010_0193u32.to_le_bytes()).unwrap();

    let mut mem = memory();
    let image = load_binary(&path, 0x200, &mut mem).unwrap();
    assert_eq!((image.entry, image.bytes), (0x200, 4));
    assert_eq!(mem.read_word(0x200).unwrap(), 0x0010_0193);
}

#[test]
fn raw_binary_too_large() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.bin");
    std::fs::write(&path, vec![0u8; 0x9000]).unwrap();

    let err = load_binary(&path, 0, &mut memory()).unwrap_err();
    assert!(matches!(err, LoadError::SegmentOverflow { .. }));
}
