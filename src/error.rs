//! # Error Handling
//!
//! This module defines the centralized error type for `manifest-merge`. It
//! uses `thiserror` to derive a single `Error` enum covering every failure
//! the library can report.
//!
//! ## Error Classes
//!
//! - **`Syntax`**: malformed YAML or JSON manifest text. The generation run
//!   that supplied the text is expected to abort.
//! - **`Validation`**: a document that takes part in a merge is missing a
//!   field it needs (for example the role label), or a node on a path has
//!   the wrong shape.
//! - **`Format`**: the install-config override is not a JSON object.
//! - **`ConfigParse`**: the merge configuration file is invalid.
//! - **`Filesystem`** / **`Io`** / **`Glob`**: loader and writer failures.
//!
//! Nothing in the library retries or swallows an error; every operation
//! either fully succeeds or returns one of these variants.

use thiserror::Error;

/// Message reported when the install-config override is not valid JSON.
///
/// This text is user-visible and matched by downstream tooling.
pub const INSTALL_CONFIG_OVERRIDE_ERROR: &str =
    "Invalid json parameter set at installConfigOverride";

/// Main error type for manifest-merge operations
#[derive(Error, Debug)]
pub enum Error {
    /// Manifest text could not be decoded as YAML or JSON.
    #[error("Syntax error in {source_name}: {message}")]
    Syntax {
        /// Filename or other label identifying the offending text
        source_name: String,
        message: String,
    },

    /// A document is missing a required field or has a mis-typed node.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The install-config override could not be used.
    #[error("{message}")]
    Format { message: String },

    /// The merge configuration file could not be parsed or is inconsistent.
    #[error("Configuration parsing error: {message}")]
    ConfigParse { message: String },

    /// A manifest directory could not be read or an output could not be written.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// A document could not be encoded back to text.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    /// Build a `Syntax` error from a YAML decoder failure.
    pub fn syntax(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::Syntax {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }

    /// Build a `Validation` error.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// The `Format` error raised for an unusable install-config override.
    pub fn invalid_override() -> Self {
        Error::Format {
            message: INSTALL_CONFIG_OVERRIDE_ERROR.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
