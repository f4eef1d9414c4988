use crate::index::InvertedIndex;
use crate::score::{ScoreContext, Scorer};
use crate::strategy::ScoringStrategy;
use crate::{DocId, Document};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A scored document in the ranked output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub doc_id: DocId,
    pub score: f64,
}

impl RankedResult {
    /// Score descending, then `doc_id` ascending.
    fn rank_order(&self, other: &Self) -> Ordering {
        other.score.total_cmp(&self.score).then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// Scores a query against an index with one weighting scheme.
///
/// The engine only walks postings and sums contributions; all weighting is
/// delegated to the [`Scorer`]. It holds no per-query state, so one engine can
/// serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine<S: Scorer = ScoringStrategy> {
    strategy: S,
    posting_limit: Option<usize>,
}

impl<S: Scorer> RankingEngine<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy, posting_limit: None }
    }

    /// Visit at most `limit` postings (lowest `DocId`s first) per query term.
    pub fn with_posting_limit(mut self, limit: usize) -> Self {
        self.posting_limit = Some(limit);
        self
    }

    pub fn strategy(&self) -> &S { &self.strategy }

    /// Ranks every document sharing at least one term with `query`.
    ///
    /// An empty `query` is tokenized once through `index` first. Results
    /// hold one entry per document, ordered by score descending with ties
    /// broken by ascending `DocId`. Unseen terms, empty queries and empty
    /// indexes all produce fewer (possibly zero) results, never errors.
    pub fn score(&self, index: &dyn InvertedIndex, query: &mut Document) -> Vec<RankedResult> {
        if query.frequencies().is_empty() {
            index.tokenize(query);
        }
        let query: &Document = query;

        let mut ctx = ScoreContext::new(index, query);
        let mut acc: HashMap<DocId, f64> = HashMap::new();
        let mut scanned = 0usize;

        for (&term, &query_term_count) in query.frequencies() {
            ctx.t_id = term;
            ctx.query_term_count = query_term_count;
            ctx.idf = index.idf(term);

            let postings = index.counts(term);
            if postings.is_empty() {
                tracing::trace!(term, "query term not in index");
                continue;
            }
            let take = match self.posting_limit {
                Some(limit) if postings.len() > limit => {
                    tracing::trace!(term, len = postings.len(), limit, "capping posting list");
                    limit
                }
                _ => postings.len(),
            };
            for posting in &postings[..take] {
                ctx.d_id = posting.doc_id;
                ctx.doc_term_count = posting.count;
                ctx.doc_size = index.doc_size(posting.doc_id);
                let contribution = self.strategy.score_one(&ctx);
                debug_assert!(
                    contribution.is_finite(),
                    "non-finite contribution {contribution} for term {term} in doc {}",
                    posting.doc_id
                );
                // a zero contribution must not pull a document into the results
                if contribution != 0.0 {
                    *acc.entry(posting.doc_id).or_insert(0.0) += contribution;
                }
            }
            scanned += take;
        }

        let mut results: Vec<RankedResult> =
            acc.into_iter().map(|(doc_id, score)| RankedResult { doc_id, score }).collect();
        results.sort_by(RankedResult::rank_order);
        tracing::debug!(
            terms = query.unique_terms(),
            postings = scanned,
            candidates = results.len(),
            "ranked query"
        );
        results
    }

    /// [`score`](Self::score) truncated to the best `k` results.
    pub fn score_top_k(
        &self,
        index: &dyn InvertedIndex,
        query: &mut Document,
        k: usize,
    ) -> Vec<RankedResult> {
        let mut results = self.score(index, query);
        results.truncate(k);
        results
    }
}
