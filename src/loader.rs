//! Manifest directory loading
//!
//! Reads every file under a directory whose file name matches one of the
//! configured glob patterns into a [`ManifestBundle`]. Keys are paths
//! relative to the directory, `/`-separated, and entries are added in
//! sorted path order so loading the same tree always yields the same
//! bundle.

use std::path::Path;

use glob::Pattern;
use log::debug;
use walkdir::WalkDir;

use crate::bundle::ManifestBundle;
use crate::error::{Error, Result};

/// Load matching manifests under `dir`.
///
/// # Errors
///
/// Returns `Error::Glob` for an invalid pattern and `Error::Filesystem` if
/// the directory cannot be walked or a file is not valid UTF-8 text.
pub fn load_dir(dir: &Path, patterns: &[String]) -> Result<ManifestBundle> {
    let patterns = patterns
        .iter()
        .map(|p| Pattern::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if !dir.is_dir() {
        return Err(Error::Filesystem {
            message: format!("Manifest directory '{}' does not exist", dir.display()),
        });
    }

    let mut bundle = ManifestBundle::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Filesystem {
            message: format!("Failed to read '{}': {}", dir.display(), e),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !patterns.iter().any(|p| p.matches(&file_name)) {
            debug!("Skipping {}", entry.path().display());
            continue;
        }

        let relative = entry.path().strip_prefix(dir).map_err(|e| Error::Filesystem {
            message: format!("Failed to relativize '{}': {}", entry.path().display(), e),
        })?;
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let text = std::fs::read_to_string(entry.path()).map_err(|e| Error::Filesystem {
            message: format!("Failed to read file '{}': {}", entry.path().display(), e),
        })?;
        debug!("Loaded {}", key);
        bundle.insert(key, text);
    }

    Ok(bundle)
}
