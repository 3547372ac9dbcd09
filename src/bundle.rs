//! Ordered filename to manifest text mapping

use serde_yaml::{Mapping, Value};

use crate::document;
use crate::error::{Error, Result};

/// An ordered set of manifests keyed by file name
///
/// Keys are unique. Insertion order is kept so that output is deterministic;
/// inserting an existing key replaces its text in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestBundle {
    entries: Vec<(String, String)>,
}

impl ManifestBundle {
    /// Create a new empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a bundle carried as a single YAML mapping of file name to
    /// manifest text (block scalars), preserving document order.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value = document::parse_named("<bundle>", text)?;
        let map = match value {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(map) => map,
            other => {
                return Err(Error::validation(format!(
                    "Expected a mapping of file names to manifests, found {}",
                    document::type_name(&other)
                )))
            }
        };

        let mut bundle = Self::new();
        for (key, value) in map {
            let (Value::String(name), Value::String(text)) = (&key, &value) else {
                return Err(Error::validation(format!(
                    "Bundle entries must map a file name to manifest text, found {} -> {}",
                    document::type_name(&key),
                    document::type_name(&value)
                )));
            };
            bundle.insert(name.as_str(), text.as_str());
        }
        Ok(bundle)
    }

    /// Encode the bundle as a YAML mapping of file name to manifest text.
    pub fn to_yaml_string(&self) -> Result<String> {
        let mut map = Mapping::new();
        for (name, text) in &self.entries {
            map.insert(Value::String(name.clone()), Value::String(text.clone()));
        }
        document::serialize(&Value::Mapping(map))
    }

    /// Add or replace a manifest, returning the previous text if any
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) -> Option<String> {
        let name = name.into();
        let text = text.into();
        match self.position(&name) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, text)),
            None => {
                self.entries.push((name, text));
                None
            }
        }
    }

    /// Get a manifest's text by file name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].1.as_str())
    }

    /// Remove a manifest
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Check if a manifest exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// File names in bundle order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entries in bundle order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }

    /// Number of manifests
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bundle is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for ManifestBundle {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for (name, text) in iter {
            bundle.insert(name, text);
        }
        bundle
    }
}

impl IntoIterator for ManifestBundle {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
