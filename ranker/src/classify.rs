//! Feature-selection helpers for classification over labeled documents.

use crate::{Document, TermId};
use anyhow::{bail, Context, Result};
use std::collections::{BTreeSet, HashMap};

/// Documents grouped by category label.
pub type Classes<'a> = HashMap<String, Vec<&'a Document>>;

/// Groups `docs` by category. Documents without a category are left out.
pub fn partition_classes(docs: &[Document]) -> Classes<'_> {
    let mut classes = Classes::new();
    for doc in docs {
        match &doc.category {
            Some(label) => classes.entry(label.clone()).or_default().push(doc),
            None => tracing::trace!(id = ?doc.id, "skipping unlabeled document"),
        }
    }
    classes
}

/// Every term that occurs in at least one of `docs`.
pub fn term_space<'a, I>(docs: I) -> BTreeSet<TermId>
where
    I: IntoIterator<Item = &'a Document>,
{
    docs.into_iter().flat_map(|d| d.frequencies().keys().copied()).collect()
}

/// Fraction of the documents labeled `label` that contain `term`.
pub fn term_given_class(term: TermId, label: &str, classes: &Classes<'_>) -> Result<f64> {
    let docs = classes.get(label).with_context(|| format!("unknown class {label:?}"))?;
    if docs.is_empty() {
        bail!("class {label:?} has no documents");
    }
    let hits = docs.iter().filter(|d| d.contains(term)).count();
    Ok(hits as f64 / docs.len() as f64)
}
