//! Source spans
//!
//! A [`Span`] locates a region of source text twice: once relative to the
//! owning file (`local_pos`) and once in the registry-wide address space
//! (`absolute_pos`). The difference between the two is always the owning
//! file's registered offset.

use serde::Serialize;
use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub local_pos: usize,
    pub absolute_pos: usize,
    pub len: usize,
}

impl Span {
    pub fn new(local_pos: usize, absolute_pos: usize, len: usize) -> Self {
        Self {
            local_pos,
            absolute_pos,
            len,
        }
    }

    /// A zero-length span at the start of the address space.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn local_end(&self) -> usize {
        self.local_pos + self.len
    }

    pub fn absolute_end(&self) -> usize {
        self.absolute_pos + self.len
    }

    /// Offset of the owning file in the registry address space.
    pub fn file_offset(&self) -> usize {
        self.absolute_pos - self.local_pos
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The local byte range covered by this span.
    pub fn local_range(&self) -> std::ops::Range<usize> {
        self.local_pos..self.local_end()
    }

    /// Span from the start of `self` to the end of `other`.
    ///
    /// Both spans must belong to the same file and `other` must not start
    /// before `self`. A reversed pair collapses to `self`.
    pub fn to(self, other: Span) -> Span {
        let end = other.absolute_end().max(self.absolute_end());
        Span {
            local_pos: self.local_pos,
            absolute_pos: self.absolute_pos,
            len: end - self.absolute_pos,
        }
    }
}

impl Add for Span {
    type Output = Span;

    fn add(self, rhs: Span) -> Span {
        self.to(rhs)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.local_pos, self.local_end())
    }
}
