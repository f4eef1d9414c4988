use crate::index::InvertedIndex;
use crate::{DocId, Document, TermId};

/// Statistics for one (query term, candidate document) pair.
///
/// The first five fields are fixed for a whole ranking call; the rest are
/// overwritten for every posting. An instance is scratch state owned by a
/// single call and is never shared between calls.
pub struct ScoreContext<'a> {
    pub index: &'a dyn InvertedIndex,
    pub avg_doc_length: f64,
    pub num_docs: u64,
    pub total_corpus_terms: u64,
    pub query: &'a Document,

    pub t_id: TermId,
    pub query_term_count: u64,
    pub idf: f64,
    pub d_id: DocId,
    pub doc_term_count: u64,
    pub doc_size: u64,
}

impl<'a> ScoreContext<'a> {
    /// Context with the corpus-wide fields taken from `index` and the
    /// per-posting fields zeroed.
    pub fn new(index: &'a dyn InvertedIndex, query: &'a Document) -> Self {
        Self {
            index,
            avg_doc_length: index.avg_doc_length(),
            num_docs: index.num_docs(),
            total_corpus_terms: index.total_corpus_terms(),
            query,
            t_id: 0,
            query_term_count: 0,
            idf: 0.0,
            d_id: 0,
            doc_term_count: 0,
            doc_size: 0,
        }
    }

    /// `doc_size / avg_doc_length`, or `None` when there is nothing to
    /// normalize against.
    pub fn relative_doc_length(&self) -> Option<f64> {
        (self.avg_doc_length > 0.0).then(|| self.doc_size as f64 / self.avg_doc_length)
    }

    /// Collection language model P(t|C) for the current term.
    pub fn collection_probability(&self) -> Option<f64> {
        if self.total_corpus_terms == 0 {
            return None;
        }
        let occurrences = self.index.total_term_occurrences(self.t_id);
        (occurrences > 0).then(|| occurrences as f64 / self.total_corpus_terms as f64)
    }
}

/// A term-weighting function.
///
/// `score_one` must be pure and must return a finite value for every context
/// the engine can build; `0.0` marks a non-contributing pair.
pub trait Scorer: Send + Sync {
    fn score_one(&self, ctx: &ScoreContext<'_>) -> f64;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score_one(&self, ctx: &ScoreContext<'_>) -> f64 { (**self).score_one(ctx) }
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn score_one(&self, ctx: &ScoreContext<'_>) -> f64 { (**self).score_one(ctx) }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::MemoryIndex;

    /// Three documents: {0:2, 1:1}, {0:1}, {1:3}.
    pub(crate) fn small_index() -> MemoryIndex {
        let mut idx = MemoryIndex::new();
        for freqs in [vec![(0, 2), (1, 1)], vec![(0, 1)], vec![(1, 3)]] {
            idx.insert(Document::new().with_frequencies(freqs)).unwrap();
        }
        idx
    }

    /// Context for `term` in `doc`, filled the way the engine fills it.
    pub(crate) fn context_for<'a>(
        index: &'a MemoryIndex,
        query: &'a Document,
        term: TermId,
        doc: DocId,
    ) -> ScoreContext<'a> {
        let mut ctx = ScoreContext::new(index, query);
        ctx.t_id = term;
        ctx.query_term_count = query.count(term);
        ctx.idf = index.idf(term);
        ctx.d_id = doc;
        ctx.doc_term_count =
            index.counts(term).iter().find(|p| p.doc_id == doc).map_or(0, |p| p.count);
        ctx.doc_size = index.doc_size(doc);
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::MemoryIndex;

    #[test]
    fn corpus_fields_come_from_index() {
        let idx = small_index();
        let q = Document::new().with_frequencies([(0, 1)]);
        let ctx = ScoreContext::new(&idx, &q);
        assert_eq!(ctx.num_docs, 3);
        assert_eq!(ctx.total_corpus_terms, 7);
        assert_eq!(ctx.doc_size, 0);
    }

    #[test]
    fn collection_probability_guards_unseen() {
        let idx = small_index();
        let q = Document::new();
        let mut ctx = ScoreContext::new(&idx, &q);
        ctx.t_id = 0;
        assert!((ctx.collection_probability().unwrap() - 3.0 / 7.0).abs() < 1e-12);
        ctx.t_id = 99;
        assert!(ctx.collection_probability().is_none());
    }

    #[test]
    fn relative_length_needs_documents() {
        let idx = MemoryIndex::new();
        let q = Document::new();
        let ctx = ScoreContext::new(&idx, &q);
        assert!(ctx.relative_doc_length().is_none());
    }
}
