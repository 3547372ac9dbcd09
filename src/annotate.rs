//! Provenance annotation
//!
//! Every resource emitted by the pipeline carries the
//! `ran.openshift.io/ztp-gitops-generated` annotation. The annotator makes
//! sure `metadata` and `metadata.annotations` exist (creating empty
//! mappings when they are missing or null) and then overwrites the
//! annotation key. Applying it twice is the same as applying it once.
//!
//! Entry points exist for decoded documents, lists of documents, raw
//! manifest text and whole bundles.

use log::debug;
use serde_yaml::Value;

use crate::bundle::ManifestBundle;
use crate::config::AnnotationConfig;
use crate::document::{self, Document, PathSegment};
use crate::error::Result;

fn annotations_path() -> [PathSegment; 2] {
    [PathSegment::key("metadata"), PathSegment::key("annotations")]
}

/// Set the default provenance annotation on `doc`.
///
/// # Examples
///
/// ```
/// use manifest_merge::annotate::annotate_document;
/// use manifest_merge::document::parse;
///
/// let mut doc = parse("kind: Namespace\n").unwrap();
/// annotate_document(&mut doc).unwrap();
/// assert_eq!(
///     doc["metadata"]["annotations"]["ran.openshift.io/ztp-gitops-generated"],
///     "{}"
/// );
/// ```
pub fn annotate_document(doc: &mut Document) -> Result<()> {
    annotate_document_with(doc, &AnnotationConfig::default())
}

/// Set `annotation` on `doc`, leaving unrelated fields alone.
///
/// # Errors
///
/// Returns `Error::Validation` if the document, its `metadata` or its
/// `metadata.annotations` is neither a mapping nor null.
pub fn annotate_document_with(doc: &mut Document, annotation: &AnnotationConfig) -> Result<()> {
    let annotations = document::ensure_mapping_path(doc, &annotations_path())?;
    annotations.insert(
        Value::String(annotation.key.clone()),
        Value::String(annotation.value.clone()),
    );
    Ok(())
}

/// Annotate every document in `docs`, keeping their order.
///
/// No document is skipped, whatever its kind.
pub fn annotate_documents(docs: Vec<Document>) -> Result<Vec<Document>> {
    annotate_documents_with(docs, &AnnotationConfig::default())
}

/// Annotate every document in `docs` with `annotation`.
pub fn annotate_documents_with(
    mut docs: Vec<Document>,
    annotation: &AnnotationConfig,
) -> Result<Vec<Document>> {
    for doc in &mut docs {
        annotate_document_with(doc, annotation)?;
    }
    Ok(docs)
}

/// Parse manifest text, annotate it and encode it again.
///
/// # Errors
///
/// Returns `Error::Syntax` if `text` is not valid YAML or JSON.
pub fn annotate_manifest_text(text: &str) -> Result<String> {
    annotate_manifest_text_with(text, &AnnotationConfig::default())
}

/// Parse manifest text, set `annotation` and encode it again.
///
/// Only the first document of a multi-document stream is kept.
pub fn annotate_manifest_text_with(text: &str, annotation: &AnnotationConfig) -> Result<String> {
    annotate_and_serialize(document::ANONYMOUS_SOURCE, text, annotation)
}

/// Annotate every manifest in a bundle.
///
/// Either every entry is annotated or an error is returned.
pub fn annotate_bundle(
    bundle: &ManifestBundle,
    annotation: &AnnotationConfig,
) -> Result<ManifestBundle> {
    let mut output = ManifestBundle::new();
    for (name, text) in bundle.iter() {
        output.insert(name, annotate_and_serialize(name, text, annotation)?);
        debug!("{}: annotated with {}", name, annotation.key);
    }
    Ok(output)
}

fn annotate_and_serialize(
    source_name: &str,
    text: &str,
    annotation: &AnnotationConfig,
) -> Result<String> {
    let mut doc = document::parse_named(source_name, text)?;
    annotate_document_with(&mut doc, annotation)?;
    document::serialize(&doc)
}
