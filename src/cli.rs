//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use modelink::output::OutputConfig;

use crate::commands;

/// modelink - Stable filesystem aliases for local ML model caches
#[derive(Parser, Debug)]
#[command(name = "modelink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Consolidate cached models into stable symlink aliases
    Consolidate(commands::consolidate::ConsolidateArgs),

    /// Print the resolved root, alias areas and search roots
    Paths(commands::paths::PathsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .init();
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Consolidate(args) => commands::consolidate::execute(args, &output),
            Commands::Paths(args) => commands::paths::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
