//! Built-in term-weighting schemes.

mod language_model;
mod okapi_bm25;
mod pivoted_length;

pub use language_model::{AbsoluteDiscount, DirichletPrior, JelinekMercer};
pub use okapi_bm25::OkapiBm25;
pub use pivoted_length::PivotedLength;

use crate::score::{ScoreContext, Scorer};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The configurable set of weighting schemes.
///
/// Serialized with a `method` tag, e.g.
/// `{"method": "okapi-bm25", "k1": 1.5}`; omitted parameters keep their
/// defaults. Parameters are range-checked while deserializing, so every
/// value of this type scores to finite numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum ScoringStrategy {
    OkapiBm25(OkapiBm25),
    PivotedLength(PivotedLength),
    DirichletPrior(DirichletPrior),
    JelinekMercer(JelinekMercer),
    AbsoluteDiscount(AbsoluteDiscount),
}

impl Default for ScoringStrategy {
    fn default() -> Self { Self::OkapiBm25(OkapiBm25::default()) }
}

impl ScoringStrategy {
    /// Parses and validates a JSON strategy description.
    pub fn from_json(json: &str) -> Result<Self> {
        let strategy: Self = serde_json::from_str(json).context("invalid scoring strategy")?;
        strategy.validate()?;
        Ok(strategy)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::OkapiBm25(s) => s.validate(),
            Self::PivotedLength(s) => s.validate(),
            Self::DirichletPrior(s) => s.validate(),
            Self::JelinekMercer(s) => s.validate(),
            Self::AbsoluteDiscount(s) => s.validate(),
        }
    }

    /// The `method` tag of this variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OkapiBm25(_) => "okapi-bm25",
            Self::PivotedLength(_) => "pivoted-length",
            Self::DirichletPrior(_) => "dirichlet-prior",
            Self::JelinekMercer(_) => "jelinek-mercer",
            Self::AbsoluteDiscount(_) => "absolute-discount",
        }
    }
}

impl Scorer for ScoringStrategy {
    fn score_one(&self, ctx: &ScoreContext<'_>) -> f64 {
        match self {
            Self::OkapiBm25(s) => s.score_one(ctx),
            Self::PivotedLength(s) => s.score_one(ctx),
            Self::DirichletPrior(s) => s.score_one(ctx),
            Self::JelinekMercer(s) => s.score_one(ctx),
            Self::AbsoluteDiscount(s) => s.score_one(ctx),
        }
    }
}

impl From<OkapiBm25> for ScoringStrategy {
    fn from(s: OkapiBm25) -> Self { Self::OkapiBm25(s) }
}

impl From<PivotedLength> for ScoringStrategy {
    fn from(s: PivotedLength) -> Self { Self::PivotedLength(s) }
}

impl From<DirichletPrior> for ScoringStrategy {
    fn from(s: DirichletPrior) -> Self { Self::DirichletPrior(s) }
}

impl From<JelinekMercer> for ScoringStrategy {
    fn from(s: JelinekMercer) -> Self { Self::JelinekMercer(s) }
}

impl From<AbsoluteDiscount> for ScoringStrategy {
    fn from(s: AbsoluteDiscount) -> Self { Self::AbsoluteDiscount(s) }
}
