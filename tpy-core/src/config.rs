//! Front-end configuration
//!
//! Every field has a default so a partial TOML table (or none at all) yields
//! a usable configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Indentation columns contributed by a tab character.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Files strictly larger than this many bytes are memory mapped.
    #[serde(default = "default_mmap_threshold")]
    pub mmap_threshold: u64,

    /// Maximum expression nesting depth accepted by the parser. The default
    /// fits an 8 MiB thread stack; deeper limits need a parser thread with a
    /// larger stack.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Initial capacity of the AST arena, in bytes.
    #[serde(default = "default_arena_capacity")]
    pub arena_capacity: usize,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
            mmap_threshold: default_mmap_threshold(),
            max_depth: default_max_depth(),
            arena_capacity: default_arena_capacity(),
        }
    }
}

impl FrontendConfig {
    /// Reject values the lexer and parser cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.tab_width == 0 {
            return Err(Error::Config("tab_width must be at least 1".to_string()));
        }
        if self.max_depth == 0 {
            return Err(Error::Config("max_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn default_tab_width() -> usize { 4 }
fn default_mmap_threshold() -> u64 { 16 * 1024 }
fn default_max_depth() -> usize { 200 }
fn default_arena_capacity() -> usize { 4096 }
