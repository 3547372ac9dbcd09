//! Merge operations
//!
//! Two independent merges live here:
//!
//! - **Role merge** (`roles.rs`): consolidates per-role `MachineConfig`
//!   fragments of a manifest bundle into one manifest per role.
//! - **Install-config override** (`install_config.rs`): folds the network
//!   type into a user supplied `installConfigOverride` JSON string.

pub mod install_config;
pub mod roles;

pub use install_config::merge_network_type;
pub use roles::{merge, merge_bundle};
