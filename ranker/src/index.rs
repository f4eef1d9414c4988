use crate::tokenizer::Tokenizer;
use crate::{DocId, Document, TermId};
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// One entry of a posting list: a document containing the term and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub count: u64,
}

/// Read contract the ranking core consumes from an index.
///
/// Every read must be reentrant: a built index is shared by concurrent
/// ranking calls. Unseen terms and unknown documents read as zero/empty,
/// never as failures.
pub trait InvertedIndex: Send + Sync {
    /// Mean document length in tokens; 0 only for an empty collection.
    fn avg_doc_length(&self) -> f64;
    fn num_docs(&self) -> u64;
    /// Sum of all document lengths.
    fn total_corpus_terms(&self) -> u64;
    /// Non-negative inverse document frequency, 0.0 for unseen terms.
    fn idf(&self, term: TermId) -> f64;
    /// Posting list of `term`, one entry per document, ascending by `DocId`.
    fn counts(&self, term: TermId) -> Cow<'_, [Posting]>;
    fn doc_size(&self, doc: DocId) -> u64;
    fn doc_freq(&self, term: TermId) -> u64;
    /// Occurrences of `term` across the whole collection.
    fn total_term_occurrences(&self, term: TermId) -> u64;
    fn unique_terms(&self, doc: DocId) -> u64;
    /// Fills `doc`'s frequencies from its raw content.
    fn tokenize(&self, doc: &mut Document);
}

#[derive(Debug, Clone, Default)]
struct DocStats {
    size: u64,
    unique_terms: u64,
}

/// In-memory index built from [`Document`]s.
///
/// Raw-text documents are analyzed with the index's [`Tokenizer`] and grow the
/// term dictionary; documents that already carry frequencies are indexed as
/// given.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    tokenizer: Tokenizer,
    dictionary: HashMap<String, TermId>,
    // wider than the ids so the last id can be handed out without wrapping
    next_term_id: u64,
    next_doc_id: u64,
    postings: HashMap<TermId, Vec<Posting>>, // sorted by doc_id
    term_totals: HashMap<TermId, u64>,
    docs: HashMap<DocId, DocStats>,
    total_terms: u64,
}

impl MemoryIndex {
    pub fn new() -> Self { Self::default() }

    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self { tokenizer, ..Self::default() }
    }

    /// Builds an index from raw text, one document per entry.
    pub fn from_texts<I, S>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for text in texts {
            index.insert(Document::from_text(text))?;
        }
        Ok(index)
    }

    /// Adds a document and returns its id. A document without an id gets the
    /// next free one; reusing an id already in the index is an error.
    pub fn insert(&mut self, mut doc: Document) -> Result<DocId> {
        let doc_id = match doc.id {
            Some(id) => {
                ensure!(!self.docs.contains_key(&id), "document {id} is already indexed");
                id
            }
            None => loop {
                let id = DocId::try_from(self.next_doc_id).context("document ids exhausted")?;
                if !self.docs.contains_key(&id) {
                    break id;
                }
                self.next_doc_id += 1;
            },
        };

        if doc.frequencies().is_empty() {
            if let Some(text) = doc.content.take() {
                for word in self.tokenizer.terms(&text) {
                    let tid = self.intern(word)?;
                    doc.increment(tid, 1);
                }
                doc.content = Some(text);
            }
        }

        self.next_doc_id = self.next_doc_id.max(u64::from(doc_id) + 1);
        for (&tid, &count) in doc.frequencies() {
            let plist = self.postings.entry(tid).or_default();
            let at = plist.partition_point(|p| p.doc_id < doc_id);
            plist.insert(at, Posting { doc_id, count });
            *self.term_totals.entry(tid).or_insert(0) += count;
            self.next_term_id = self.next_term_id.max(u64::from(tid) + 1);
        }
        let size = doc.length();
        self.total_terms += size;
        self.docs.insert(doc_id, DocStats { size, unique_terms: doc.unique_terms() });
        tracing::debug!(doc_id, size, "indexed document");
        Ok(doc_id)
    }

    pub fn term_id(&self, word: &str) -> Option<TermId> {
        self.dictionary.get(word).copied()
    }

    fn intern(&mut self, word: String) -> Result<TermId> {
        if let Some(&tid) = self.dictionary.get(&word) {
            return Ok(tid);
        }
        let tid = loop {
            let tid = TermId::try_from(self.next_term_id).context("term ids exhausted")?;
            if !self.postings.contains_key(&tid) {
                break tid;
            }
            self.next_term_id += 1;
        };
        self.next_term_id += 1;
        self.dictionary.insert(word, tid);
        Ok(tid)
    }
}

impl InvertedIndex for MemoryIndex {
    fn avg_doc_length(&self) -> f64 {
        if self.docs.is_empty() { 0.0 } else { self.total_terms as f64 / self.docs.len() as f64 }
    }

    fn num_docs(&self) -> u64 { self.docs.len() as u64 }

    fn total_corpus_terms(&self) -> u64 { self.total_terms }

    fn idf(&self, term: TermId) -> f64 {
        let df = self.doc_freq(term);
        if df == 0 { return 0.0; }
        let n = self.num_docs() as f64;
        let df = df as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    fn counts(&self, term: TermId) -> Cow<'_, [Posting]> {
        match self.postings.get(&term) {
            Some(plist) => Cow::Borrowed(plist.as_slice()),
            None => Cow::Borrowed(&[]),
        }
    }

    fn doc_size(&self, doc: DocId) -> u64 {
        self.docs.get(&doc).map_or(0, |d| d.size)
    }

    fn doc_freq(&self, term: TermId) -> u64 {
        self.postings.get(&term).map_or(0, |p| p.len() as u64)
    }

    fn total_term_occurrences(&self, term: TermId) -> u64 {
        self.term_totals.get(&term).copied().unwrap_or(0)
    }

    fn unique_terms(&self, doc: DocId) -> u64 {
        self.docs.get(&doc).map_or(0, |d| d.unique_terms)
    }

    fn tokenize(&self, doc: &mut Document) {
        let Some(text) = doc.content.as_deref() else { return };
        let mut found = Vec::new();
        for word in self.tokenizer.terms(text) {
            match self.dictionary.get(&word) {
                Some(&tid) => found.push(tid),
                None => tracing::trace!(%word, "query word not in dictionary"),
            }
        }
        for tid in found {
            doc.increment(tid, 1);
        }
    }
}
