//! tpy - Python front-end tools

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tpy_core::Diagnostics;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{ast, locate, open_sources, tokens};

#[derive(Parser)]
#[command(name = "tpy")]
#[command(about = "Lexer and expression parser for Python sources", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, env = "TPY_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of each file
    Tokens {
        /// Source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit JSON instead of one line per token
        #[arg(long)]
        json: bool,
    },

    /// Parse a file as one expression and print its tree
    Ast {
        /// Source file
        file: PathBuf,
    },

    /// Resolve a global byte position to path:line:col
    Locate {
        /// Position in the combined address space of all files
        position: usize,

        /// Source files, in registration order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = config::load_config(cli.config)?;
    debug!("Loaded configuration: {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut diagnostics = Diagnostics::to_stderr();

    match cli.command {
        Commands::Tokens { files, json } => {
            let (registry, ids) = open_sources(&files, &config)?;
            tokens::write_tokens(&registry, &ids, json, &config, &mut diagnostics, &mut out)?;
        }
        Commands::Ast { file } => {
            let (registry, ids) = open_sources(std::slice::from_ref(&file), &config)?;
            let Some(&id) = ids.first() else {
                bail!("no source file given");
            };
            ast::write_ast(&registry[id], &config, &mut diagnostics, &mut out)?;
        }
        Commands::Locate { position, files } => {
            let (registry, _) = open_sources(&files, &config)?;
            locate::write_location(&registry, position, &mut out)?;
        }
    }
    out.flush()?;

    if diagnostics.has_errors() {
        debug!("{} diagnostics reported", diagnostics.len());
        std::process::exit(1);
    }
    Ok(())
}
