//! CLI for navguard resilient navigation.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use navguard_core::config::{self, NavguardConfig};
use std::path::{Path, PathBuf};

use commands::{run_classify, run_completions, run_config, run_goto, run_manpage, GotoArgs};

/// Top-level CLI for navguard.
#[derive(Debug, Parser)]
#[command(name = "navguard")]
#[command(about = "navguard: page navigation with retries and failure-page detection", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/navguard/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Navigate to a URL, retrying gateway errors and failure pages.
    Goto(GotoArgs),

    /// Check a saved HTML page for failure-page text.
    Classify {
        /// Path to the HTML file.
        path: PathBuf,

        /// Failure text to look for (repeatable; replaces configured patterns).
        #[arg(long = "failure-pattern", value_name = "TEXT")]
        failure_pattern: Vec<String>,
    },

    /// Print the effective configuration.
    Config {
        /// Print the config file path instead of its contents.
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Manpage,
}

fn load_config(explicit: Option<&Path>) -> Result<NavguardConfig> {
    match explicit {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Manpage => return run_manpage(),
            _ => {}
        }

        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Goto(args) => run_goto(&cfg, &args).await?,
            CliCommand::Classify {
                path,
                failure_pattern,
            } => run_classify(&cfg, &path, &failure_pattern)?,
            CliCommand::Config { path } => run_config(&cfg, cli.config.as_deref(), path)?,
            CliCommand::Completions { .. } | CliCommand::Manpage => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
