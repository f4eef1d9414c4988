//! Okapi BM25.
//!
//! `idf * ((k1 + 1) tf / (k1 ((1 - b) + b dl / avgdl) + tf)) * ((k3 + 1) qtf / (k3 + qtf))`

use crate::score::{ScoreContext, Scorer};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOkapiBm25")]
pub struct OkapiBm25 {
    /// Term-frequency saturation.
    k1: f64,
    /// Length normalization strength in `[0, 1]`.
    b: f64,
    /// Query term-frequency saturation.
    k3: f64,
}

impl Default for OkapiBm25 {
    fn default() -> Self { Self { k1: 1.2, b: 0.75, k3: 500.0 } }
}

/// Unchecked parameters as written in a config; omitted ones take defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawOkapiBm25 {
    k1: f64,
    b: f64,
    k3: f64,
}

impl Default for RawOkapiBm25 {
    fn default() -> Self {
        let OkapiBm25 { k1, b, k3 } = OkapiBm25::default();
        Self { k1, b, k3 }
    }
}

impl TryFrom<RawOkapiBm25> for OkapiBm25 {
    type Error = anyhow::Error;

    fn try_from(raw: RawOkapiBm25) -> Result<Self> { Self::new(raw.k1, raw.b, raw.k3) }
}

impl OkapiBm25 {
    pub fn new(k1: f64, b: f64, k3: f64) -> Result<Self> {
        let bm25 = Self { k1, b, k3 };
        bm25.validate()?;
        Ok(bm25)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.k1.is_finite() && self.k1 >= 0.0, "bm25 k1 must be >= 0, got {}", self.k1);
        ensure!((0.0..=1.0).contains(&self.b), "bm25 b must be in [0, 1], got {}", self.b);
        ensure!(self.k3.is_finite() && self.k3 >= 0.0, "bm25 k3 must be >= 0, got {}", self.k3);
        Ok(())
    }

    pub fn k1(&self) -> f64 { self.k1 }
    pub fn b(&self) -> f64 { self.b }
    pub fn k3(&self) -> f64 { self.k3 }
}

impl Scorer for OkapiBm25 {
    fn score_one(&self, ctx: &ScoreContext<'_>) -> f64 {
        if ctx.doc_term_count == 0 || ctx.query_term_count == 0 || ctx.idf <= 0.0 {
            return 0.0;
        }
        let Some(rel_len) = ctx.relative_doc_length() else { return 0.0 };
        let tf = ctx.doc_term_count as f64;
        let qtf = ctx.query_term_count as f64;

        let norm = self.k1 * ((1.0 - self.b) + self.b * rel_len);
        let doc_weight = ((self.k1 + 1.0) * tf) / (norm + tf);
        let query_weight = ((self.k3 + 1.0) * qtf) / (self.k3 + qtf);
        ctx.idf * doc_weight * query_weight
    }
}
