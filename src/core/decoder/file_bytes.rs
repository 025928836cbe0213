//! Reading image files into memory.
//!
//! Large files are memory-mapped to avoid the kernel-to-user copy; small
//! files are read normally since mapping has a fixed setup cost.

use crate::error::DecodeError;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Minimum file size to use memory-mapped I/O (1MB)
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// File bytes that may be either owned or memory-mapped.
pub enum FileBytes {
    /// Standard heap-allocated bytes
    Vec(Vec<u8>),
    /// Memory-mapped bytes (zero-copy from disk)
    Mmap(Mmap),
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            FileBytes::Vec(bytes) => bytes,
            FileBytes::Mmap(mmap) => mmap,
        }
    }
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}

/// Read a whole file, memory-mapping it when it is at least 1MB.
pub fn read_file_bytes(path: &Path) -> Result<FileBytes, DecodeError> {
    let io_error = |source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let len = file.metadata().map_err(io_error)?.len();

    if len >= MMAP_THRESHOLD {
        // SAFETY: the mapping is read-only and `Mmap` keeps its own handle
        // to the file for as long as the bytes are borrowed.
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_error)?;
        Ok(FileBytes::Mmap(mmap))
    } else {
        std::fs::read(path).map(FileBytes::Vec).map_err(io_error)
    }
}

/// Whether the bytes start with a JPEG SOI marker
pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xFF, 0xD8, 0xFF])
}
