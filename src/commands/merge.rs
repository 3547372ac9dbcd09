//! Merge command implementation
//!
//! Loads a manifest directory, consolidates its MachineConfigs into one
//! manifest per role, optionally annotates every manifest, and writes the
//! result to an output directory or prints it as a YAML bundle.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use manifest_merge::annotate::annotate_bundle;
use manifest_merge::loader::load_dir;
use manifest_merge::merge::merge_bundle;
use manifest_merge::writer::write_bundle;

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Directory containing the manifests to merge
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Output directory (prints the bundle to stdout when omitted)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// File name to keep out of the merge (repeatable)
    #[arg(short, long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Path to a merge configuration file
    #[arg(short, long, value_name = "PATH", env = "MANIFEST_MERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Add the provenance annotation to every output manifest
    #[arg(short, long)]
    pub annotate: bool,
}

/// Execute the merge command
pub fn execute(args: MergeArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;

    let mut exclusions = config.exclusions();
    exclusions.extend(args.exclude.iter().cloned());

    let bundle = load_dir(&args.dir, &config.patterns)
        .with_context(|| format!("Failed to load manifests from {}", args.dir.display()))?;
    log::info!("Loaded {} manifest(s) from {}", bundle.len(), args.dir.display());

    let mut merged = merge_bundle(&bundle, &exclusions, &config)?;
    if args.annotate {
        merged = annotate_bundle(&merged, &config.annotation)?;
    }

    match args.output {
        Some(output_dir) => {
            write_bundle(&merged, &output_dir)?;
            println!(
                "Wrote {} manifest(s) to {}",
                merged.len(),
                output_dir.display()
            );
        }
        None => print!("{}", merged.to_yaml_string()?),
    }

    Ok(())
}
