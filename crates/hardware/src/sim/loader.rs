//! Program Loader.
//!
//! This module places program images into the flat memory. It supports:
//! 1. **ELF images:** 32-bit little-endian RISC-V executables; every `PT_LOAD`
//!    segment's file bytes are copied to its virtual address, and the whole
//!    memory footprint (`p_memsz`) must fit inside the array.
//! 2. **Raw binaries:** A flat image copied to a fixed address.
//!
//! Nothing is written to memory unless every segment fits.

use std::fs;
use std::path::Path;

use object::Endian;
use object::elf::{EM_RISCV, FileHeader32, PT_LOAD};
use object::read::elf::{FileHeader, ProgramHeader};
use tracing::debug;

use crate::common::error::LoadError;
use crate::soc::memory::FlatMemory;

/// Summary of a loaded image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadedImage {
    /// ELF entry point (0 for raw binaries).
    pub entry: u32,
    /// Number of segments copied.
    pub segments: usize,
    /// Number of bytes copied.
    pub bytes: usize,
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads an ELF32 RISC-V image from `path` into `memory`.
///
/// # Errors
///
/// * `LoadError::Io` if the file cannot be read.
/// * `LoadError::Parse` or `LoadError::Truncated` if it is not a well-formed ELF32 file.
/// * `LoadError::WrongArchitecture` if it is not little-endian RISC-V.
/// * `LoadError::SegmentOverflow` if a segment ends past the memory array.
pub fn load_elf(path: impl AsRef<Path>, memory: &mut FlatMemory) -> Result<LoadedImage, LoadError> {
    let path = path.as_ref();
    let file = read_file(path)?;
    let parse_err = |source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let header = FileHeader32::<object::Endianness>::parse(&*file).map_err(parse_err)?;
    let endian = header.endian().map_err(parse_err)?;
    if !endian.is_little_endian() || header.e_machine(endian) != EM_RISCV {
        return Err(LoadError::WrongArchitecture {
            path: path.to_path_buf(),
        });
    }

    let memory_end = memory.size() as u64;
    let mut segments = Vec::new();
    for (index, phdr) in header
        .program_headers(endian, &*file)
        .map_err(parse_err)?
        .iter()
        .enumerate()
    {
        if phdr.p_type(endian) != PT_LOAD {
            continue;
        }
        let bytes = phdr
            .data(endian, &*file)
            .map_err(|()| LoadError::Truncated {
                path: path.to_path_buf(),
                index,
            })?;
        let vaddr = phdr.p_vaddr(endian);
        let end = u64::from(vaddr) + u64::from(phdr.p_memsz(endian)).max(bytes.len() as u64);
        if end > memory_end {
            return Err(LoadError::SegmentOverflow {
                index,
                end,
                memory_end,
            });
        }
        segments.push((vaddr, bytes));
    }

    let mut image = LoadedImage {
        entry: header.e_entry(endian),
        ..LoadedImage::default()
    };
    for (vaddr, bytes) in segments {
        debug!(target: "loader", "segment {:#010x} ({} bytes)", vaddr, bytes.len());
        // Bounds were checked above.
        if memory.write_bytes(vaddr, bytes).is_ok() {
            image.segments += 1;
            image.bytes += bytes.len();
        }
    }
    Ok(image)
}

/// Loads a raw binary from `path` at address `base`.
///
/// # Errors
///
/// * `LoadError::Io` if the file cannot be read.
/// * `LoadError::SegmentOverflow` if the image does not fit.
pub fn load_binary(
    path: impl AsRef<Path>,
    base: u32,
    memory: &mut FlatMemory,
) -> Result<LoadedImage, LoadError> {
    let path = path.as_ref();
    let file = read_file(path)?;
    memory
        .write_bytes(base, &file)
        .map_err(|_| LoadError::SegmentOverflow {
            index: 0,
            end: u64::from(base) + file.len() as u64,
            memory_end: memory.size() as u64,
        })?;
    Ok(LoadedImage {
        entry: base,
        segments: 1,
        bytes: file.len(),
    })
}
