//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Manifest Merge - Merge per-role MachineConfigs and annotate manifests
#[derive(Parser, Debug)]
#[command(name = "manifest-merge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        env = "MANIFEST_MERGE_LOG"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge the MachineConfigs of a manifest directory into one per role
    Merge(commands::merge::MergeArgs),

    /// Add the provenance annotation to a manifest file
    Annotate(commands::annotate::AnnotateArgs),

    /// Merge the network type into an install-config override
    InstallConfig(commands::install_config::InstallConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .init();

        match self.command {
            Commands::Merge(args) => commands::merge::execute(args),
            Commands::Annotate(args) => commands::annotate::execute(args),
            Commands::InstallConfig(args) => commands::install_config::execute(args),
        }
    }
}
