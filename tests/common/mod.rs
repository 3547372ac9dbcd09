//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_fixture_dir(fixtures::EXTRA_MANIFESTS);
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{fixtures, manifests, TestFixture};
}

/// Fixture directories under `tests/testdata/`.
#[allow(dead_code)]
pub mod fixtures {
    /// Three MachineConfigs (two master, one worker), a nested kernel
    /// arguments MachineConfig, an unrelated manifest and a README.
    pub const EXTRA_MANIFESTS: &str = "extra-manifests";

    /// A single user supplied manifest.
    pub const USER_EXTRA_MANIFEST: &str = "user-extra-manifest";
}

/// Inline manifest snippets.
#[allow(dead_code)]
pub mod manifests {
    /// A MachineConfig without a role label.
    pub const MC_WITHOUT_ROLE: &str = r#"apiVersion: machineconfiguration.openshift.io/v1
kind: MachineConfig
metadata:
  name: no-role
spec:
  config:
    ignition:
      version: 3.2.0
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "kind: [unclosed";

    /// The bundle used by the upstream merge scenario, as one YAML mapping.
    pub const THREE_FRAGMENTS: &str = r#"
01-test-mc.yaml: |
  apiVersion: machineconfiguration.openshift.io/v1
  kind: MachineConfig
  metadata:
    labels:
      machineconfiguration.openshift.io/role: master
    name: 01-test-mc
  spec:
    config:
      ignition:
        version: 3.2.0
      storage:
        files:
        - contents:
            source: data:,%20
          mode: 384
          path: /root/test1
02-test-mc.yaml: |
  apiVersion: machineconfiguration.openshift.io/v1
  kind: MachineConfig
  metadata:
    labels:
      machineconfiguration.openshift.io/role: worker
    name: 02-test-mc
  spec:
    config:
      ignition:
        version: 3.2.0
      storage:
        files:
        - contents:
            source: data:,%20
          mode: 384
          path: /root/test2
03-test-mc.yaml: |
  apiVersion: machineconfiguration.openshift.io/v1
  kind: MachineConfig
  metadata:
    labels:
      machineconfiguration.openshift.io/role: master
    name: 03-test-mc
  spec:
    config:
      ignition:
        version: 3.2.0
      storage:
        files:
        - contents:
            source: data:,%20
          mode: 384
          path: /root/test3
"#;
}

/// Path of a fixture directory under `tests/testdata/`.
#[allow(dead_code)]
pub fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

/// A test fixture that provides a temporary directory with manifests.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Copy a fixture directory from `tests/testdata/` into `manifests/`.
    pub fn with_fixture_dir(self, name: &str) -> Self {
        let manifests = self.temp_dir.child("manifests");
        manifests
            .create_dir_all()
            .expect("Failed to create manifest directory");
        manifests
            .copy_from(testdata(name), &["**/*"])
            .expect("Failed to copy fixture directory");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the copied manifest directory.
    pub fn manifests_dir(&self) -> PathBuf {
        self.temp_dir.path().join("manifests")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
