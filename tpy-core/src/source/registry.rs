//! Registry of every source file in a compilation
//!
//! Files are laid end to end in one global address space: each file starts
//! where the previous one ended. A global position is resolved by finding the
//! last file whose offset is not greater than it.

use super::buffer::ByteBuffer;
use super::file::{SourceFile, SourceLocation};
use crate::config::FrontendConfig;
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use std::fmt;
use std::num::NonZeroU32;
use std::ops::Index;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Handle to a registered file.
///
/// Uses NonZeroU32 so `Option<FileId>` stays four bytes. Ids start at 1 and
/// follow registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub NonZeroU32);

impl FileId {
    /// Returns None if the value is 0.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(FileId)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }

    fn index(&self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

#[derive(Debug)]
pub struct SourceRegistry {
    files: Vec<SourceFile>,
    by_path: FxHashMap<PathBuf, FileId>,
    mmap_threshold: u64,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::with_config(&FrontendConfig::default())
    }

    pub fn with_config(config: &FrontendConfig) -> Self {
        Self {
            files: Vec::new(),
            by_path: FxHashMap::default(),
            mmap_threshold: config.mmap_threshold,
        }
    }

    /// Read `path` and register it. Opening an already registered path
    /// returns the existing handle.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<FileId> {
        let path = path.as_ref();
        if let Some(&id) = self.by_path.get(path) {
            return Ok(id);
        }
        let buffer = ByteBuffer::from_file(path, self.mmap_threshold)?;
        self.register(path.to_path_buf(), buffer)
    }

    /// Register an in-memory buffer under `name`. Unlike [`open`](Self::open)
    /// this always creates a new file.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Result<FileId> {
        self.register(name.into(), ByteBuffer::from_bytes(bytes))
    }

    fn register(&mut self, path: PathBuf, buffer: ByteBuffer) -> Result<FileId> {
        let next = u32::try_from(self.files.len() + 1).map_err(|_| Error::FileIdOverflow)?;
        let id = FileId::new(next).ok_or(Error::FileIdOverflow)?;
        let offset = self
            .files
            .last()
            .map_or(0, |last| last.offset() + last.size());

        debug!(
            "Registered {} as {} at offset {} ({} bytes)",
            path.display(),
            id,
            offset,
            buffer.len()
        );

        self.by_path.insert(path.clone(), id);
        self.files.push(SourceFile::new(path, offset, buffer));
        Ok(id)
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files.iter().enumerate().filter_map(|(i, file)| {
            let id = FileId::new(u32::try_from(i + 1).ok()?)?;
            Some((id, file))
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size of the global address space.
    pub fn end(&self) -> usize {
        self.files.last().map_or(0, |last| last.offset() + last.size())
    }

    /// The file owning `global_pos`. Positions past the last file resolve to
    /// the last file.
    pub fn file_at(&self, global_pos: usize) -> Option<&SourceFile> {
        let file = match self.files.as_slice() {
            [] => return None,
            [only] => only,
            files => {
                let owner = files.partition_point(|f| f.offset() <= global_pos);
                &files[owner.saturating_sub(1)]
            }
        };
        if global_pos > self.end() {
            warn!(
                "Position {} is past the end of the registry ({}), resolving to {}",
                global_pos,
                self.end(),
                file.path().display()
            );
        }
        Some(file)
    }

    /// Resolve a global position to a file-relative line and column.
    pub fn location(&self, global_pos: usize) -> Option<SourceLocation<'_>> {
        let file = self.file_at(global_pos)?;
        Some(file.location(global_pos - file.offset()))
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<FileId> for SourceRegistry {
    type Output = SourceFile;

    fn index(&self, id: FileId) -> &SourceFile {
        &self.files[id.index()]
    }
}
