//! Configuration handling for the tpy CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tpy_core::FrontendConfig;
use tpy_parser::ThreadedParserConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub frontend: FrontendConfig,

    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Stack reserved for the parser thread, in MiB.
    #[serde(default = "default_stack_mib")]
    pub stack_mib: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            stack_mib: default_stack_mib(),
        }
    }
}

impl ParserConfig {
    pub fn thread_config(&self) -> ThreadedParserConfig {
        ThreadedParserConfig::default().with_stack_size(self.stack_mib * 1024 * 1024)
    }
}

fn default_stack_mib() -> usize { 64 }

/// Load configuration from file or use defaults
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = if let Some(path) = path {
        read_config(&path)?
    } else if let Some(home) = dirs::home_dir() {
        let default_path = home.join(".tpy").join("config.toml");
        if default_path.exists() {
            read_config(&default_path)?
        } else {
            Config::default()
        }
    } else {
        Config::default()
    };

    config.frontend.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}
