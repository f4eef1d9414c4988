use crate::{DocId, TermId};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// The shared unit of text: term counts plus optional raw content and label.
///
/// Queries and stored documents use the same type. A term missing from
/// `frequencies` has count 0, and zero counts are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<DocId>,
    /// Raw text, consumed by [`crate::InvertedIndex::tokenize`].
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "nonzero_counts")]
    frequencies: BTreeMap<TermId, u64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Document {
    pub fn new() -> Self { Self::default() }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { content: Some(text.into()), ..Self::default() }
    }

    pub fn with_id(mut self, id: DocId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds every `(term, count)` pair; repeated terms accumulate.
    pub fn with_frequencies<I>(mut self, counts: I) -> Self
    where
        I: IntoIterator<Item = (TermId, u64)>,
    {
        for (term, n) in counts {
            self.increment(term, n);
        }
        self
    }

    pub fn increment(&mut self, term: TermId, n: u64) {
        if n == 0 { return; }
        *self.frequencies.entry(term).or_insert(0) += n;
    }

    pub fn count(&self, term: TermId) -> u64 {
        self.frequencies.get(&term).copied().unwrap_or(0)
    }

    pub fn contains(&self, term: TermId) -> bool { self.frequencies.contains_key(&term) }

    /// Number of tokens, i.e. the sum of all counts.
    pub fn length(&self) -> u64 { self.frequencies.values().sum() }

    pub fn unique_terms(&self) -> u64 { self.frequencies.len() as u64 }

    /// Term counts in ascending `TermId` order.
    pub fn frequencies(&self) -> &BTreeMap<TermId, u64> { &self.frequencies }
}

/// Drops zero counts so deserialized documents keep the same shape as ones
/// built through [`Document::increment`].
fn nonzero_counts<'de, D>(deserializer: D) -> Result<BTreeMap<TermId, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut counts = BTreeMap::<TermId, u64>::deserialize(deserializer)?;
    counts.retain(|_, n| *n > 0);
    Ok(counts)
}
