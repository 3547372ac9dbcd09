//! Role-based `MachineConfig` merging
//!
//! Consolidates every eligible manifest of a bundle into one manifest per
//! role. Manifests are grouped by the value of their role label in the
//! order roles are first seen; each group becomes a single document named
//! `<merged-name>-<role>` whose list fields (ignition files, units, kernel
//! arguments and so on) are the concatenation of the members' lists.
//!
//! ## Rules
//!
//! - Excluded file names are copied through byte-for-byte.
//! - Documents that are not eligible (see [`crate::classify`]) are copied
//!   through byte-for-byte under their original key.
//! - An eligible document without a role label aborts the merge.
//! - A merged file name that is already taken by an excluded or
//!   passed-through entry aborts the merge.
//! - Scalar fields of the merged `spec` come from the first member of the
//!   role; later members that disagree are accepted.
//! - Merged manifests are appended after all pass-through entries.

use std::collections::HashSet;

use log::{debug, info};
use serde_yaml::{Mapping, Value};

use crate::bundle::ManifestBundle;
use crate::classify::{classify, Classification};
use crate::config::MergeConfig;
use crate::document::{self, Document, PathSegment};
use crate::error::{Error, Result};

/// `spec.fips` is enabled on the merged manifest when any member enables it.
const FIPS_PATH: &[&str] = &["spec", "fips"];

/// One eligible manifest waiting to be merged
#[derive(Debug)]
struct Member {
    name: String,
    doc: Document,
}

/// Members grouped by role, in first-encounter order
#[derive(Debug, Default)]
struct RoleGroups {
    groups: Vec<(String, Vec<Member>)>,
}

impl RoleGroups {
    fn push(&mut self, role: String, member: Member) {
        match self.groups.iter_mut().find(|(r, _)| *r == role) {
            Some((_, members)) => members.push(member),
            None => self.groups.push((role, vec![member])),
        }
    }
}

/// Merge `bundle` with the default configuration.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use manifest_merge::bundle::ManifestBundle;
/// use manifest_merge::merge::merge;
///
/// let bundle: ManifestBundle = [("ns.yaml", "kind: Namespace\n")].into_iter().collect();
/// let merged = merge(&bundle, &HashSet::new()).unwrap();
/// assert_eq!(merged, bundle);
/// ```
pub fn merge(bundle: &ManifestBundle, exclusions: &HashSet<String>) -> Result<ManifestBundle> {
    merge_bundle(bundle, exclusions, &MergeConfig::default())
}

/// Merge every eligible manifest of `bundle` into one manifest per role.
///
/// # Errors
///
/// - `Error::Syntax` if a non-excluded entry is not valid YAML/JSON.
/// - `Error::Validation` if an eligible manifest has no role label, a
///   configured list path holds something other than a list, or a merged
///   file name is already used by an excluded or passed-through entry.
///
/// On error no partial bundle is returned.
pub fn merge_bundle(
    bundle: &ManifestBundle,
    exclusions: &HashSet<String>,
    config: &MergeConfig,
) -> Result<ManifestBundle> {
    let role_path = config.role_label_path();
    let mut output = ManifestBundle::new();
    let mut groups = RoleGroups::default();

    for (name, text) in bundle.iter() {
        if exclusions.contains(name) {
            debug!("{}: excluded from merge", name);
            output.insert(name, text);
            continue;
        }

        let doc = document::parse_named(name, text)?;
        match classify(&doc, &config.kind) {
            Classification::Eligible => {
                let role = document::get_str(&doc, &role_path)
                    .ok_or_else(|| {
                        Error::validation(format!(
                            "manifest missing role label: {} has no string label '{}'",
                            name, config.role_label
                        ))
                    })?
                    .to_string();
                debug!("{}: {} for role '{}'", name, config.kind, role);
                groups.push(
                    role,
                    Member {
                        name: name.to_string(),
                        doc,
                    },
                );
            }
            reason => {
                debug!("{}: passed through ({:?})", name, reason);
                output.insert(name, text);
            }
        }
    }

    if groups.groups.is_empty() {
        return Ok(output);
    }

    let list_paths = config.list_path_segments();
    let version_path = document::parse_path(&config.version_path);
    for (role, members) in &groups.groups {
        let fragment = build_fragment(role, members, config, &list_paths, &version_path)?;
        let file_name = config.merged_file_name(role);
        if output.contains(&file_name) {
            let origin = if exclusions.contains(&file_name) {
                "excluded"
            } else {
                "passed-through"
            };
            return Err(Error::validation(format!(
                "merged {} for role '{}' would overwrite {} manifest {}",
                config.kind, role, origin, file_name
            )));
        }
        info!(
            "Merged {} {} manifest(s) for role '{}' into {}",
            members.len(),
            config.kind,
            role,
            file_name
        );
        output.insert(file_name, document::serialize(&fragment)?);
    }

    Ok(output)
}

/// Build the merged manifest for one role.
fn build_fragment(
    role: &str,
    members: &[Member],
    config: &MergeConfig,
    list_paths: &[Vec<PathSegment>],
    version_path: &[PathSegment],
) -> Result<Document> {
    let Some((first, rest)) = members.split_first() else {
        return Err(Error::validation(format!("role '{}' has no members", role)));
    };

    let first_version = document::get_path(&first.doc, version_path);
    for member in rest {
        let version = document::get_path(&member.doc, version_path);
        if version != first_version {
            debug!(
                "{}: '{}' differs from {} ({:?} vs {:?}); keeping the first",
                member.name,
                config.version_path,
                first.name,
                version,
                first_version
            );
        }
    }

    let mut labels = Mapping::new();
    labels.insert(
        Value::String(config.role_label.clone()),
        Value::String(role.to_string()),
    );
    let mut metadata = Mapping::new();
    metadata.insert(
        Value::String("name".to_string()),
        Value::String(config.merged_object_name(role)),
    );
    metadata.insert(Value::String("labels".to_string()), Value::Mapping(labels));

    let spec = match first.doc.get("spec") {
        Some(Value::Null) | None => Value::Mapping(Mapping::new()),
        Some(spec) => spec.clone(),
    };

    let mut fragment = Mapping::new();
    for field in ["apiVersion", "kind"] {
        if let Some(value) = first.doc.get(field) {
            fragment.insert(Value::String(field.to_string()), value.clone());
        }
    }
    fragment.insert(Value::String("metadata".to_string()), Value::Mapping(metadata));
    fragment.insert(Value::String("spec".to_string()), spec);
    let mut fragment = Value::Mapping(fragment);

    for path in list_paths {
        if let Some(combined) = concat_lists(members, path)? {
            document::set_path(&mut fragment, path, Value::Sequence(combined))?;
        }
    }

    let fips_path: Vec<PathSegment> = FIPS_PATH.iter().map(|k| PathSegment::key(*k)).collect();
    let fips: Vec<bool> = members
        .iter()
        .filter_map(|m| document::get_path(&m.doc, &fips_path))
        .filter_map(Value::as_bool)
        .collect();
    if !fips.is_empty() {
        document::set_path(&mut fragment, &fips_path, Value::Bool(fips.contains(&true)))?;
    }

    Ok(fragment)
}

/// Concatenate the list at `path` across members, in member order.
///
/// Returns `None` when no member carries the field.
fn concat_lists(members: &[Member], path: &[PathSegment]) -> Result<Option<Vec<Value>>> {
    let mut combined = Vec::new();
    let mut present = false;
    for member in members {
        match document::get_path(&member.doc, path) {
            None | Some(Value::Null) => {}
            Some(Value::Sequence(items)) => {
                present = true;
                combined.extend(items.iter().cloned());
            }
            Some(other) => {
                return Err(Error::validation(format!(
                    "{}: expected a list at '{}', found {}",
                    member.name,
                    document::display_path(path),
                    document::type_name(other)
                )));
            }
        }
    }
    Ok(present.then_some(combined))
}
