//! Manifest classification
//!
//! Decides whether a decoded document takes part in role-based merging.
//! A document is eligible when its `kind` equals the expected kind exactly
//! (case-sensitive) and it carries a non-empty `apiVersion`. The version is
//! only checked for presence. Classification never fails: anything that
//! does not match is simply passed through by the merger.

use crate::document::Document;

/// Outcome of classifying one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The document is merged with others of its role.
    Eligible,
    /// The document is not a mapping (null, scalar or sequence).
    NotAMapping,
    /// `kind` is missing, empty, not a string, or a different kind.
    WrongKind,
    /// `kind` matches but `apiVersion` is missing or empty.
    MissingApiVersion,
}

/// Classify `doc` against the expected `kind`.
pub fn classify(doc: &Document, kind: &str) -> Classification {
    if !doc.is_mapping() {
        return Classification::NotAMapping;
    }
    match non_empty_str(doc, "kind") {
        Some(found) if found == kind => {}
        _ => return Classification::WrongKind,
    }
    if non_empty_str(doc, "apiVersion").is_none() {
        return Classification::MissingApiVersion;
    }
    Classification::Eligible
}

/// Whether `doc` is merged per role.
pub fn is_eligible(doc: &Document, kind: &str) -> bool {
    classify(doc, kind) == Classification::Eligible
}

fn non_empty_str<'a>(doc: &'a Document, field: &str) -> Option<&'a str> {
    doc.get(field)?.as_str().filter(|s| !s.is_empty())
}
