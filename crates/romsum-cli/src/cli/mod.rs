//! CLI for romsum.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use romsum_core::config::{self, RomsumConfig};
use romsum_core::logging::{self, Verbosity};
use romsum_core::source::RegionSource;
use std::path::PathBuf;

use commands::{run_check, run_completions, run_fix};

/// Top-level CLI for romsum.
#[derive(Debug, Parser)]
#[command(name = "romsum", version)]
#[command(about = "Fix the byte-sum checksum of option ROM images", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Read configuration from PATH instead of ~/.config/romsum/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug details.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Correct checksum regions of INPUT and write the result to OUTPUT.
    ///
    /// PARAMS (hex) select the regions: none = whole declared ROM with the
    /// correction byte at 5; one OFFSET = whole declared ROM with the
    /// correction byte at OFFSET; START END OFFSET triples = explicit regions.
    Fix {
        /// ROM image to read.
        input: PathBuf,
        /// Where to write the corrected image.
        output: PathBuf,
        /// Hex region parameters.
        #[arg(value_name = "PARAMS")]
        params: Vec<String>,
    },

    /// Report the current checksum of each region without writing anything.
    Check {
        /// ROM image to read.
        input: PathBuf,
        /// Hex region parameters, as for `fix`.
        #[arg(value_name = "PARAMS")]
        params: Vec<String>,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl Cli {
    /// Dispatch the parsed command. Region parameters are checked before
    /// config or log files are touched.
    pub fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Fix {
                input,
                output,
                params,
            } => {
                let source = RegionSource::from_params(params.as_slice())?;
                let cfg = init(&self.global)?;
                run_fix(&cfg, &source, &input, &output)?;
            }
            CliCommand::Check { input, params } => {
                let source = RegionSource::from_params(params.as_slice())?;
                init(&self.global)?;
                run_check(&source, &input)?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

/// Load config, then start logging with the configured sinks.
fn init(global: &GlobalArgs) -> Result<RomsumConfig> {
    let cfg = config::load(global.config.as_deref())?;
    let verbosity = global.verbosity();
    if let Err(e) = logging::init_logging(verbosity, cfg.log_to_file) {
        logging::init_logging_stderr(verbosity);
        tracing::warn!("log file unavailable, logging to stderr only: {:#}", e);
    }
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
