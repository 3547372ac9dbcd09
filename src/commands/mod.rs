//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `manifest-merge` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args`, reads inputs, calls
//!   into the `manifest_merge` library and emits the result.

pub mod annotate;
pub mod install_config;
pub mod merge;

use anyhow::{Context, Result};
use std::path::Path;

use manifest_merge::config::{self, MergeConfig};

/// Load the merge configuration, falling back to the defaults.
fn load_config(path: Option<&Path>) -> Result<MergeConfig> {
    match path {
        Some(path) => config::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(MergeConfig::default()),
    }
}
