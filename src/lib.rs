//! # Manifest Merge Library
//!
//! This library assembles Kubernetes-style manifests into a final bundle for
//! cluster provisioning. It is used by the `manifest-merge` command-line
//! tool but every transformation is a pure function over in-memory text,
//! so it can be embedded in any generator.
//!
//! ## Quick Example
//!
//! ```
//! use std::collections::HashSet;
//! use manifest_merge::bundle::ManifestBundle;
//! use manifest_merge::merge::merge;
//!
//! let bundle = ManifestBundle::from_yaml_str(r#"
//! 01-mc.yaml: |
//!   apiVersion: machineconfiguration.openshift.io/v1
//!   kind: MachineConfig
//!   metadata:
//!     labels:
//!       machineconfiguration.openshift.io/role: master
//!     name: 01-mc
//!   spec:
//!     config:
//!       ignition:
//!         version: 3.2.0
//! ns.yaml: |
//!   kind: Namespace
//! "#).unwrap();
//!
//! let merged = merge(&bundle, &HashSet::new()).unwrap();
//! assert!(merged.contains("ns.yaml"));
//! assert!(merged.contains("predefined-extra-manifests-master.yaml"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Documents (`document`)**: decoding and encoding of YAML/JSON manifests
//!   and checked path access into the decoded tree.
//! - **Bundles (`bundle`)**: ordered file name to manifest text mappings.
//! - **Classification (`classify`)**: decides which documents take part in
//!   role-based merging.
//! - **Merging (`merge`)**: role-based `MachineConfig` consolidation and the
//!   install-config override merge.
//! - **Annotation (`annotate`)**: provenance annotation of documents, text
//!   and bundles.
//! - **Configuration (`config`)**: wire constants and the optional YAML
//!   configuration file.
//! - **I/O (`loader`, `writer`)**: reading a manifest directory into a bundle
//!   and writing a bundle back to disk.

pub mod annotate;
pub mod bundle;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod merge;
pub mod writer;

#[cfg(test)]
mod merge_proptest;
