//! Document decoding, encoding and checked path access
//!
//! Manifests are handled as schema-less trees (`serde_yaml::Value`). YAML is
//! a superset of the JSON subset that manifests use, so a single decoder
//! covers both: JSON numbers stay numbers and quoted YAML strings stay
//! strings even when they look numeric.
//!
//! Fields are addressed with path expressions such as
//! `metadata.labels["machineconfiguration.openshift.io/role"]`, parsed into
//! [`PathSegment`]s. The traversal helpers never panic: reads return
//! `Option`, and writers return `Error::Validation` when a node on the way
//! has the wrong shape.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// A decoded manifest document.
pub type Document = Value;

/// Label used for text that has no filename attached.
pub(crate) const ANONYMOUS_SOURCE: &str = "<manifest>";

/// Represents a segment in a path expression for navigating nested documents
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A named key for accessing mapping members
    Key(String),
    /// A numeric index for accessing sequence elements
    Index(usize),
}

impl PathSegment {
    /// Shorthand for a `Key` segment.
    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }
}

/// Decode manifest text into a document.
///
/// Empty text decodes to `Value::Null`.
///
/// # Errors
///
/// Returns `Error::Syntax` if the text is not valid YAML or JSON.
pub fn parse(text: &str) -> Result<Document> {
    parse_named(ANONYMOUS_SOURCE, text)
}

/// Decode manifest text, labelling any syntax error with `source_name`.
///
/// Only the first document of a multi-document stream is decoded; anything
/// after the first `---` separator is ignored, so a manifest ending in a
/// bare `---` parses like the same manifest without it.
pub fn parse_named(source_name: &str, text: &str) -> Result<Document> {
    match serde_yaml::Deserializer::from_str(text).next() {
        Some(first) => {
            Document::deserialize(first).map_err(|err| Error::syntax(source_name, err))
        }
        None => Ok(Value::Null),
    }
}

/// Encode a document as YAML text terminated by a newline.
pub fn serialize(doc: &Document) -> Result<String> {
    let text = serde_yaml::to_string(doc).map_err(|err| Error::Serialization {
        message: format!("Failed to serialize YAML: {}", err),
    })?;
    Ok(ensure_trailing_newline(text))
}

fn ensure_trailing_newline(mut content: String) -> String {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

/// Parse a path string into segments for document navigation
///
/// Supports:
/// - Dot notation: `spec.config.storage`
/// - Bracket notation for keys containing dots: `labels["example.io/role"]`
///   or `labels['example.io/role']`, where a backslash escapes the next
///   character inside the quotes
/// - Array indices: `files[0]`
///
/// # Examples
///
/// ```
/// use manifest_merge::document::{parse_path, PathSegment};
///
/// let segments = parse_path(r#"metadata.labels["example.io/role"]"#);
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[2], PathSegment::key("example.io/role"));
/// ```
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.trim().chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => push_key(&mut segments, &mut current),
            '[' => {
                push_key(&mut segments, &mut current);
                if let Some(quote) = chars.next_if(|c| *c == '"' || *c == '\'') {
                    let mut key = String::new();
                    let mut escaped = false;
                    while let Some(ch) = chars.next() {
                        if escaped {
                            key.push(ch);
                            escaped = false;
                        } else if ch == '\\' {
                            escaped = true;
                        } else if ch == quote && chars.next_if_eq(&']').is_some() {
                            break;
                        } else {
                            key.push(ch);
                        }
                    }
                    segments.push(PathSegment::Key(key));
                } else {
                    let inner: String = chars.by_ref().take_while(|c| *c != ']').collect();
                    let inner = inner.trim();
                    match inner.parse::<usize>() {
                        Ok(idx) => segments.push(PathSegment::Index(idx)),
                        Err(_) if !inner.is_empty() => segments.push(PathSegment::key(inner)),
                        Err(_) => {}
                    }
                }
            }
            _ => current.push(ch),
        }
    }
    push_key(&mut segments, &mut current);

    segments
}

fn push_key(segments: &mut Vec<PathSegment>, current: &mut String) {
    if !current.is_empty() {
        segments.push(PathSegment::Key(std::mem::take(current)));
    }
}

/// Render segments back into a readable path for messages.
pub fn display_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) if key.contains(['.', '[', ']']) => {
                out.push_str(&format!("[\"{}\"]", key));
            }
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(idx) => out.push_str(&format!("[{}]", idx)),
        }
    }
    out
}

/// Look up the node at `path`, if every step exists with the right shape.
pub fn get_path<'a>(doc: &'a Document, path: &[PathSegment]) -> Option<&'a Document> {
    let mut current = doc;
    for segment in path {
        current = match segment {
            PathSegment::Key(key) => current.as_mapping()?.get(key.as_str())?,
            PathSegment::Index(idx) => current.as_sequence()?.get(*idx)?,
        };
    }
    Some(current)
}

/// Look up a string scalar at `path`.
pub fn get_str<'a>(doc: &'a Document, path: &[PathSegment]) -> Option<&'a str> {
    get_path(doc, path)?.as_str()
}

/// Walk `path` through mappings, creating empty mappings where a key is
/// missing or null, and return the mapping at the end of the path.
///
/// # Errors
///
/// Returns `Error::Validation` if the path contains an index segment or a
/// node along the way is neither a mapping nor null.
pub fn ensure_mapping_path<'a>(
    doc: &'a mut Document,
    path: &[PathSegment],
) -> Result<&'a mut Mapping> {
    let mut current = doc;
    for (depth, segment) in path.iter().enumerate() {
        let key = match segment {
            PathSegment::Key(key) => key,
            PathSegment::Index(idx) => {
                return Err(Error::validation(format!(
                    "Expected a key but found index {} at '{}'",
                    idx,
                    display_path(&path[..depth])
                )));
            }
        };
        let map = mapping_or_init(current, &path[..depth])?;
        current = map
            .entry(Value::String(key.clone()))
            .or_insert(Value::Null);
    }
    mapping_or_init(current, path)
}

/// Store `value` at `path`, creating intermediate mappings as needed.
pub fn set_path(doc: &mut Document, path: &[PathSegment], value: Document) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        *doc = value;
        return Ok(());
    };
    let PathSegment::Key(key) = last else {
        return Err(Error::validation(format!(
            "Cannot set a value by index at '{}'",
            display_path(path)
        )));
    };
    let parent = ensure_mapping_path(doc, parents)?;
    parent.insert(Value::String(key.clone()), value);
    Ok(())
}

fn mapping_or_init<'a>(value: &'a mut Document, at: &[PathSegment]) -> Result<&'a mut Mapping> {
    if value.is_null() {
        *value = Value::Mapping(Mapping::new());
    }
    match value {
        Value::Mapping(map) => Ok(map),
        other => Err(Error::validation(format!(
            "Expected mapping at '{}', found {}",
            if at.is_empty() {
                "<root>".to_string()
            } else {
                display_path(at)
            },
            type_name(other)
        ))),
    }
}

/// Get a human-readable type name for a document node
///
/// Used in log and error messages.
pub fn type_name(value: &Document) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Sequence(_) => "Sequence",
        Value::Mapping(_) => "Mapping",
        Value::Tagged(_) => "Tagged",
    }
}
