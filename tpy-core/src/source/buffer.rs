//! Byte buffers holding one source file
//!
//! Small files are read into an owned, NUL-terminated vector. Files above the
//! configured threshold are memory mapped instead of copied; since a mapping
//! is read-only, its terminator is virtual: [`ByteBuffer::byte_at`] answers
//! `0` for every position at or past the logical end, for both strategies.

use crate::error::{Error, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

enum Storage {
    /// Content followed by one NUL byte.
    Owned(Vec<u8>),
    Mapped(Mmap),
}

pub struct ByteBuffer {
    storage: Storage,
    content_start: usize,
}

impl ByteBuffer {
    /// Wrap an in-memory copy of a source file.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let mut bytes = bytes.into();
        bytes.push(0);
        Self::with_storage(Storage::Owned(bytes))
    }

    /// Load `path`, memory mapping it when it is larger than `mmap_threshold`
    /// bytes.
    pub fn from_file(path: &Path, mmap_threshold: u64) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
        let size = file.metadata().map_err(|e| Error::io(path, e))?.len();

        if size > mmap_threshold {
            // SAFETY: the mapping is read-only and owned by the buffer. Files
            // are not expected to change underneath a running compilation.
            let map = unsafe { Mmap::map(&file) }.map_err(|e| Error::io(path, e))?;
            debug!("Mapped {} ({} bytes)", path.display(), size);
            return Ok(Self::with_storage(Storage::Mapped(map)));
        }

        let mut bytes = Vec::with_capacity(size as usize + 1);
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::io(path, e))?;
        debug!("Read {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::from_bytes(bytes))
    }

    fn with_storage(storage: Storage) -> Self {
        let mut buffer = Self {
            storage,
            content_start: 0,
        };
        if buffer.as_bytes().starts_with(&UTF8_BOM) {
            buffer.content_start = UTF8_BOM.len();
        }
        buffer
    }

    /// Raw file bytes, including a BOM if present, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned(bytes) => &bytes[..bytes.len() - 1],
            Storage::Mapped(map) => &map[..],
        }
    }

    /// File bytes after the BOM.
    pub fn content(&self) -> &[u8] {
        &self.as_bytes()[self.content_start..]
    }

    /// Offset of the first content byte: 3 with a BOM, 0 otherwise.
    pub fn content_start(&self) -> usize {
        self.content_start
    }

    pub fn has_bom(&self) -> bool {
        self.content_start != 0
    }

    /// Raw size in bytes, BOM included.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self.storage, Storage::Mapped(_))
    }

    /// Byte at `pos`, or the NUL terminator at and past the end.
    #[inline]
    pub fn byte_at(&self, pos: usize) -> u8 {
        self.as_bytes().get(pos).copied().unwrap_or(0)
    }
}

impl std::fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("len", &self.len())
            .field("content_start", &self.content_start)
            .field("mapped", &self.is_mapped())
            .finish()
    }
}
