//! Query-time relevance ranking over an inverted index.
//!
//! A query [`Document`] is scored against an [`InvertedIndex`] by a
//! [`RankingEngine`], which walks the posting list of every query term and
//! sums the contributions of a pluggable [`Scorer`]. The built-in weighting
//! schemes live in [`strategy`] and are selected through [`ScoringStrategy`].

pub mod classify;
pub mod document;
pub mod engine;
pub mod index;
pub mod strategy;
pub mod score;
pub mod tokenizer;

pub type TermId = u32;
pub type DocId = u32;

pub use document::Document;
pub use engine::{RankedResult, RankingEngine};
pub use index::{InvertedIndex, MemoryIndex, Posting};
pub use strategy::ScoringStrategy;
pub use score::{ScoreContext, Scorer};
pub use tokenizer::Tokenizer;
