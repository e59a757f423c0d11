//! Command implementations

pub mod ast;
pub mod locate;
pub mod tokens;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tpy_core::{FileId, SourceRegistry};
use tracing::debug;

use crate::config::Config;

/// Register every path in order, so global positions follow argument order.
pub fn open_sources(paths: &[PathBuf], config: &Config) -> Result<(SourceRegistry, Vec<FileId>)> {
    let mut registry = SourceRegistry::with_config(&config.frontend);
    let mut ids = Vec::with_capacity(paths.len());
    for path in paths {
        let id = registry
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        debug!("Registered {} as {} at offset {}", path.display(), id, registry[id].offset());
        ids.push(id);
    }
    Ok((registry, ids))
}


#[cfg(test)]
mod tests {
    use super::test_support::temp_source;
    use super::*;

    #[test]
    fn test_sources_are_laid_out_in_order() {
        let first = temp_source("abc\n");
        let second = temp_source("de");
        let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];

        let (registry, ids) = open_sources(&paths, &Config::default()).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(registry[ids[0]].offset(), 0);
        assert_eq!(registry[ids[1]].offset(), 4);
        assert_eq!(registry.end(), 6);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let paths = vec![PathBuf::from("/no/such/source.py")];
        let err = open_sources(&paths, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("/no/such/source.py"));
    }
}
