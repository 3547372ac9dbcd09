//! Install-config command implementation
//!
//! Prints the install-config override with the network type merged in.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use manifest_merge::merge::merge_network_type;

/// Arguments for the install-config command
#[derive(Args, Debug)]
pub struct InstallConfigArgs {
    /// Network type written to networking.networkType
    #[arg(long, value_name = "TYPE", default_value = "OVNKubernetes")]
    pub network_type: String,

    /// installConfigOverride JSON
    #[arg(long = "override", value_name = "JSON", conflicts_with = "override_file")]
    pub install_config_override: Option<String>,

    /// File holding the installConfigOverride JSON
    #[arg(long, value_name = "PATH")]
    pub override_file: Option<PathBuf>,
}

/// Execute the install-config command
pub fn execute(args: InstallConfigArgs) -> Result<()> {
    let override_json = match (&args.install_config_override, &args.override_file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => String::new(),
    };

    println!("{}", merge_network_type(&args.network_type, &override_json)?);
    Ok(())
}
