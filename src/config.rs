//! # Merge Configuration
//!
//! This module holds the well-known constants that form the wire contract
//! with cluster tooling (the role label, the `MachineConfig` kind, the
//! merged manifest name and the provenance annotation) together with
//! `MergeConfig`, which lets a caller override them from a YAML file.
//!
//! ## File Format
//!
//! Every key is optional; missing keys fall back to the defaults below.
//!
//! ```yaml
//! kind: MachineConfig
//! role-label: machineconfiguration.openshift.io/role
//! merged-name: predefined-extra-manifests
//! version-path: spec.config.ignition.version
//! list-paths:
//!   - spec.config.storage.files
//! exclude:
//!   - 03-workload-partitioning.yaml
//! patterns: ["*.yaml", "*.yml"]
//! annotation:
//!   key: ran.openshift.io/ztp-gitops-generated
//!   value: "{}"
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::document::{parse_path, PathSegment};
use crate::error::{Error, Result};

/// Kind of the documents that are merged per role.
pub const MACHINE_CONFIG_KIND: &str = "MachineConfig";

/// Label (under `metadata.labels`) carrying the role of a `MachineConfig`.
pub const ROLE_LABEL: &str = "machineconfiguration.openshift.io/role";

/// Base name of merged manifests; the role is appended as `<name>-<role>`.
pub const MERGED_MANIFEST_NAME: &str = "predefined-extra-manifests";

/// Path of the ignition format version inside a `MachineConfig`.
pub const IGNITION_VERSION_PATH: &str = "spec.config.ignition.version";

/// Annotation marking resources produced by the GitOps ZTP pipeline.
pub const ZTP_ANNOTATION: &str = "ran.openshift.io/ztp-gitops-generated";

/// Default value written for [`ZTP_ANNOTATION`].
pub const ZTP_ANNOTATION_DEFAULT_VALUE: &str = "{}";

/// List fields concatenated across all members of a role.
pub const DEFAULT_LIST_PATHS: &[&str] = &[
    "spec.config.storage.files",
    "spec.config.storage.directories",
    "spec.config.storage.links",
    "spec.config.systemd.units",
    "spec.config.passwd.users",
    "spec.kernelArguments",
    "spec.extensions",
];

/// File name patterns picked up when loading a manifest directory.
pub const DEFAULT_MANIFEST_PATTERNS: &[&str] = &["*.yaml", "*.yml"];

/// Annotation injected by the annotator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Annotation key under `metadata.annotations`
    pub key: String,
    /// Value stored at `key`; any prior value is overwritten
    pub value: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            key: ZTP_ANNOTATION.to_string(),
            value: ZTP_ANNOTATION_DEFAULT_VALUE.to_string(),
        }
    }
}

/// Settings for the role-based merge and the loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MergeConfig {
    /// Exact `kind` a document must carry to be merged.
    pub kind: String,
    /// Label key under `metadata.labels` holding the role.
    pub role_label: String,
    /// Base name for merged manifests.
    pub merged_name: String,
    /// Path of the scalar version field compared across role members.
    pub version_path: String,
    /// Paths of the list fields concatenated per role.
    pub list_paths: Vec<String>,
    /// File names that are never merged.
    pub exclude: Vec<String>,
    /// Glob patterns (matched against file names) selecting manifests to load.
    pub patterns: Vec<String>,
    /// Annotation applied by the annotator.
    pub annotation: AnnotationConfig,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            kind: MACHINE_CONFIG_KIND.to_string(),
            role_label: ROLE_LABEL.to_string(),
            merged_name: MERGED_MANIFEST_NAME.to_string(),
            version_path: IGNITION_VERSION_PATH.to_string(),
            list_paths: DEFAULT_LIST_PATHS.iter().map(|p| p.to_string()).collect(),
            exclude: Vec::new(),
            patterns: DEFAULT_MANIFEST_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            annotation: AnnotationConfig::default(),
        }
    }
}

impl MergeConfig {
    /// Check that the configuration can drive a merge.
    pub fn validate(&self) -> Result<()> {
        if self.kind.trim().is_empty() {
            return Err(config_error("kind must not be empty"));
        }
        if self.role_label.trim().is_empty() {
            return Err(config_error("role-label must not be empty"));
        }
        if self.merged_name.trim().is_empty() {
            return Err(config_error("merged-name must not be empty"));
        }
        if self.annotation.key.trim().is_empty() {
            return Err(config_error("annotation key must not be empty"));
        }
        for path in &self.list_paths {
            let segments = parse_path(path);
            if segments.is_empty() {
                return Err(config_error(format!("list path '{}' is empty", path)));
            }
            if segments.iter().any(|s| matches!(s, PathSegment::Index(_))) {
                return Err(config_error(format!(
                    "list path '{}' must not contain indices",
                    path
                )));
            }
        }
        for pattern in &self.patterns {
            glob::Pattern::new(pattern)?;
        }
        Ok(())
    }

    /// Path to the role label inside a document.
    pub fn role_label_path(&self) -> Vec<PathSegment> {
        vec![
            PathSegment::key("metadata"),
            PathSegment::key("labels"),
            PathSegment::key(self.role_label.as_str()),
        ]
    }

    /// Parsed list paths.
    pub fn list_path_segments(&self) -> Vec<Vec<PathSegment>> {
        self.list_paths.iter().map(|p| parse_path(p)).collect()
    }

    /// Canonical object name for the merged manifest of `role`.
    pub fn merged_object_name(&self, role: &str) -> String {
        format!("{}-{}", self.merged_name, role)
    }

    /// Canonical bundle key for the merged manifest of `role`.
    pub fn merged_file_name(&self, role: &str) -> String {
        format!("{}.yaml", self.merged_object_name(role))
    }

    /// The configured exclusion set.
    pub fn exclusions(&self) -> HashSet<String> {
        self.exclude.iter().cloned().collect()
    }
}

fn config_error(message: impl Into<String>) -> Error {
    Error::ConfigParse {
        message: message.into(),
    }
}

/// Parse a merge configuration from YAML text.
///
/// Empty text yields the default configuration.
pub fn parse(yaml_content: &str) -> Result<MergeConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(MergeConfig::default());
    }
    let config: MergeConfig =
        serde_yaml::from_str(yaml_content).map_err(|err| config_error(err.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Read and parse a merge configuration file.
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<MergeConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
