//! Property-based tests for role merging and annotation.
//!
//! These tests use proptest to generate bundles of MachineConfig and
//! unrelated manifests and verify that the merge invariants hold for all
//! of them.

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use crate::annotate::annotate_manifest_text;
    use crate::bundle::ManifestBundle;
    use crate::config::{MergeConfig, ZTP_ANNOTATION};
    use crate::document::parse;
    use crate::merge::merge;

    /// A generated manifest: either a MachineConfig (role, file count) or
    /// an unrelated resource.
    #[derive(Debug, Clone)]
    enum Generated {
        MachineConfig { role: String, files: usize },
        Other,
    }

    fn generated() -> impl Strategy<Value = Generated> {
        prop_oneof![
            3 => ("(master|worker|edge)", 0usize..4)
                .prop_map(|(role, files)| Generated::MachineConfig { role, files }),
            1 => Just(Generated::Other),
        ]
    }

    fn render(idx: usize, manifest: &Generated) -> String {
        match manifest {
            Generated::MachineConfig { role, files } => {
                let mut text = format!(
                    "apiVersion: machineconfiguration.openshift.io/v1\nkind: MachineConfig\nmetadata:\n  labels:\n    machineconfiguration.openshift.io/role: {}\n  name: mc-{}\nspec:\n  config:\n    ignition:\n      version: 3.2.0\n",
                    role, idx
                );
                if *files > 0 {
                    text.push_str("    storage:\n      files:\n");
                    for f in 0..*files {
                        text.push_str(&format!("      - path: /etc/mc-{}-{}\n", idx, f));
                    }
                }
                text
            }
            Generated::Other => format!("apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm-{}\n", idx),
        }
    }

    fn bundle_strategy() -> impl Strategy<Value = (Vec<Generated>, ManifestBundle)> {
        prop::collection::vec(generated(), 0..8).prop_map(|manifests| {
            let bundle: ManifestBundle = manifests
                .iter()
                .enumerate()
                .map(|(idx, m)| (format!("{:02}-manifest.yaml", idx), render(idx, m)))
                .collect();
            (manifests, bundle)
        })
    }

    fn file_count(text: &str) -> usize {
        let doc = parse(text).unwrap();
        doc["spec"]["config"]["storage"]["files"]
            .as_sequence()
            .map(|s| s.len())
            .unwrap_or(0)
    }

    proptest! {
        /// Property: excluded entries come out byte-identical
        #[test]
        fn excluded_entries_are_unchanged(
            (_, bundle) in bundle_strategy(),
            mask in prop::collection::vec(any::<bool>(), 8),
        ) {
            let exclusions: HashSet<String> = bundle
                .names()
                .zip(mask.iter())
                .filter(|(_, excluded)| **excluded)
                .map(|(name, _)| name.to_string())
                .collect();
            let merged = merge(&bundle, &exclusions).unwrap();
            for name in &exclusions {
                prop_assert_eq!(merged.get(name), bundle.get(name));
            }
        }

        /// Property: merged file list length is the sum over contributors
        #[test]
        fn merged_list_length_is_sum((manifests, bundle) in bundle_strategy()) {
            let merged = merge(&bundle, &HashSet::new()).unwrap();
            let config = MergeConfig::default();
            let roles: HashSet<&str> = manifests
                .iter()
                .filter_map(|m| match m {
                    Generated::MachineConfig { role, .. } => Some(role.as_str()),
                    Generated::Other => None,
                })
                .collect();
            for role in &roles {
                let expected: usize = manifests
                    .iter()
                    .filter_map(|m| match m {
                        Generated::MachineConfig { role: r, files } if r.as_str() == *role => Some(*files),
                        _ => None,
                    })
                    .sum();
                let text = merged.get(&config.merged_file_name(role));
                prop_assert!(text.is_some(), "missing merged manifest for {}", role);
                prop_assert_eq!(file_count(text.unwrap_or_default()), expected);
            }
            let others = manifests.iter().filter(|m| matches!(m, Generated::Other)).count();
            prop_assert_eq!(merged.len(), roles.len() + others);
        }

        /// Property: unrelated manifests pass through under the same key
        #[test]
        fn unrelated_manifests_pass_through((manifests, bundle) in bundle_strategy()) {
            let merged = merge(&bundle, &HashSet::new()).unwrap();
            for (idx, manifest) in manifests.iter().enumerate() {
                let name = format!("{:02}-manifest.yaml", idx);
                match manifest {
                    Generated::Other => prop_assert_eq!(merged.get(&name), bundle.get(&name)),
                    Generated::MachineConfig { .. } => prop_assert!(!merged.contains(&name)),
                }
            }
        }

        /// Property: merging is deterministic
        #[test]
        fn merge_is_deterministic((_, bundle) in bundle_strategy()) {
            prop_assert_eq!(
                merge(&bundle, &HashSet::new()).unwrap(),
                merge(&bundle, &HashSet::new()).unwrap()
            );
        }

        /// Property: annotating text is idempotent
        #[test]
        fn annotation_is_idempotent((_, bundle) in bundle_strategy()) {
            for (_, text) in bundle.iter() {
                let once = annotate_manifest_text(text).unwrap();
                let twice = annotate_manifest_text(&once).unwrap();
                prop_assert_eq!(&once, &twice);
                let doc = parse(&once).unwrap();
                prop_assert_eq!(&doc["metadata"]["annotations"][ZTP_ANNOTATION], "{}");
            }
        }
    }
}
