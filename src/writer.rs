//! Writing a bundle to disk
//!
//! Each entry is written to `<output>/<file name>`, creating parent
//! directories as needed. File names must stay inside the output directory.

use std::fs;
use std::path::{Component, Path};

use log::debug;

use crate::bundle::ManifestBundle;
use crate::error::{Error, Result};

/// Write every manifest of `bundle` under `output_path`.
pub fn write_bundle(bundle: &ManifestBundle, output_path: &Path) -> Result<()> {
    for (name, text) in bundle.iter() {
        let relative = Path::new(name);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(Error::Filesystem {
                message: format!("Refusing to write '{}' outside the output directory", name),
            });
        }

        let full_path = output_path.join(relative);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }

        fs::write(&full_path, text).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", full_path.display(), e),
        })?;
        debug!("Wrote {}", full_path.display());
    }

    Ok(())
}
