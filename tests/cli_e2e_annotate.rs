//! End-to-end tests for the `annotate` and `install-config` commands.

mod common;

use common::prelude::*;
use manifest_merge::config::ZTP_ANNOTATION;
use manifest_merge::document::parse;

#[test]
fn test_cli_annotate_prints_manifest() {
    let fixture = TestFixture::new().with_fixture_dir(fixtures::USER_EXTRA_MANIFEST);

    let mut cmd = cargo_bin_cmd!("manifest-merge");
    let assert = cmd
        .arg("annotate")
        .arg(fixture.manifests_dir().join("user-extra-manifest.yaml"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let doc = parse(&stdout).unwrap();
    assert_eq!(doc["metadata"]["annotations"][ZTP_ANNOTATION], "{}");
    assert_eq!(doc["metadata"]["name"], "user-extra-manifest");
}

#[test]
fn test_cli_annotate_writes_output_file() {
    let fixture = TestFixture::new().with_file("cm.yaml", "kind: ConfigMap\n");

    let mut cmd = cargo_bin_cmd!("manifest-merge");
    cmd.arg("annotate")
        .arg(fixture.path().join("cm.yaml"))
        .arg("--output")
        .arg(fixture.path().join("out.yaml"))
        .assert()
        .success();

    fixture
        .child("out.yaml")
        .assert(predicate::str::contains(ZTP_ANNOTATION));
}

#[test]
fn test_cli_annotate_invalid_yaml_fails() {
    let fixture = TestFixture::new().with_file("bad.yaml", manifests::INVALID_YAML);

    let mut cmd = cargo_bin_cmd!("manifest-merge");
    cmd.arg("annotate")
        .arg(fixture.path().join("bad.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Syntax error"));
}

#[test]
fn test_cli_install_config_default_override() {
    let mut cmd = cargo_bin_cmd!("manifest-merge");
    cmd.arg("install-config")
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "{\"networking\":{\"networkType\":\"OVNKubernetes\"}}\n",
        ));
}

#[test]
fn test_cli_install_config_merges_override() {
    let mut cmd = cargo_bin_cmd!("manifest-merge");
    cmd.arg("install-config")
        .arg("--network-type")
        .arg("OpenShiftSDN")
        .arg("--override")
        .arg("{\"networking\":{\"networkType\":\"default\",\"clusterNetwork\":[]}}")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "{\"networking\":{\"clusterNetwork\":[],\"networkType\":\"OpenShiftSDN\"}}",
        ));
}

#[test]
fn test_cli_install_config_override_file() {
    let fixture =
        TestFixture::new().with_file("override.json", "{\"fips\":true}");

    let mut cmd = cargo_bin_cmd!("manifest-merge");
    cmd.arg("install-config")
        .arg("--override-file")
        .arg(fixture.path().join("override.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "{\"fips\":true,\"networking\":{\"networkType\":\"OVNKubernetes\"}}",
        ));
}

#[test]
fn test_cli_install_config_invalid_override_fails() {
    let mut cmd = cargo_bin_cmd!("manifest-merge");
    cmd.arg("install-config")
        .arg("--override")
        .arg("{feature:{test:abc}}")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid json parameter set at installConfigOverride",
        ));
}
