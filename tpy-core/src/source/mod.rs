//! Source management: byte buffers, files with line maps, and the registry
//! that places every file in one global position space

mod buffer;
mod file;
mod registry;

pub use buffer::ByteBuffer;
pub use file::{NewlineRecord, SourceFile, SourceLocation};
pub use registry::{FileId, SourceRegistry};
