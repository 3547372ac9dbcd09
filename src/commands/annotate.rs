//! Annotate command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use manifest_merge::annotate::annotate_manifest_text_with;

/// Arguments for the annotate command
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Manifest file to annotate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a merge configuration file (for a custom annotation)
    #[arg(short, long, value_name = "PATH", env = "MANIFEST_MERGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Execute the annotate command
pub fn execute(args: AnnotateArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let annotated = annotate_manifest_text_with(&text, &config.annotation)
        .with_context(|| format!("Failed to annotate {}", args.file.display()))?;

    match args.output {
        Some(path) => std::fs::write(&path, annotated)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", annotated),
    }

    Ok(())
}
