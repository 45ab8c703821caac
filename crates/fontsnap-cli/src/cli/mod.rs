//! CLI for fontsnap.

mod commands;
mod interrupt;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use fontsnap_core::config::{self, FontsnapConfig};
use std::path::PathBuf;

use commands::{run_completions, run_fetch, run_resolve, run_strategies};

/// Top-level CLI for fontsnap.
#[derive(Debug, Parser)]
#[command(name = "fontsnap")]
#[command(about = "fontsnap: find and fetch upstream AUR snapshots for ttf-* font packages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for where snapshots and checkpoint files go.
#[derive(Debug, Default, Clone, Args)]
pub struct OutputArgs {
    /// Directory snapshots are extracted into.
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,
    /// File receiving `package,base` lines.
    #[arg(long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,
    /// File receiving unresolved package names.
    #[arg(long, value_name = "FILE")]
    pub unresolved: Option<PathBuf>,
    /// Seconds to wait after each request.
    #[arg(long, value_name = "SECS")]
    pub pace: Option<f64>,
}

impl OutputArgs {
    pub fn apply(&self, cfg: &mut FontsnapConfig) {
        if let Some(store) = &self.store {
            cfg.store_dir = store.clone();
        }
        if let Some(mapping) = &self.mapping {
            cfg.mapping_path = mapping.clone();
        }
        if let Some(unresolved) = &self.unresolved {
            cfg.unresolved_path = unresolved.clone();
        }
        if let Some(pace) = self.pace {
            cfg.pace_secs = pace;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the registry listing and resolve every matching package.
    Run {
        /// Only process the first N matching packages.
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Resolve the given package names without fetching the listing.
    Resolve {
        /// Package names (e.g. ttf-fira-code).
        #[arg(required = true)]
        names: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List naming strategies in the order they are tried.
    Strategies {
        /// Show each strategy's candidate for this package name.
        name: Option<String>,
    },

    /// Print shell completions.
    Completions {
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run { limit, output } => {
                let cfg = load_config(&output)?;
                run_fetch(cfg, limit).await?;
            }
            CliCommand::Resolve { names, output } => {
                let cfg = load_config(&output)?;
                run_resolve(cfg, names).await?;
            }
            CliCommand::Strategies { name } => run_strategies(name.as_deref()),
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

fn load_config(output: &OutputArgs) -> Result<FontsnapConfig> {
    let mut cfg = config::load_or_init()?;
    output.apply(&mut cfg);
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
