//! Pivoted document-length normalization.
//!
//! `qtf * (1 + ln(1 + ln tf)) / ((1 - s) + s dl / avgdl) * idf`

use crate::score::{ScoreContext, Scorer};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPivotedLength")]
pub struct PivotedLength {
    /// Slope of the pivot, in `[0, 1]`.
    s: f64,
}

impl Default for PivotedLength {
    fn default() -> Self { Self { s: 0.2 } }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawPivotedLength {
    s: f64,
}

impl Default for RawPivotedLength {
    fn default() -> Self { Self { s: PivotedLength::default().s } }
}

impl TryFrom<RawPivotedLength> for PivotedLength {
    type Error = anyhow::Error;

    fn try_from(raw: RawPivotedLength) -> Result<Self> { Self::new(raw.s) }
}

impl PivotedLength {
    pub fn new(s: f64) -> Result<Self> {
        let pivoted = Self { s };
        pivoted.validate()?;
        Ok(pivoted)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!((0.0..=1.0).contains(&self.s), "pivot slope s must be in [0, 1], got {}", self.s);
        Ok(())
    }

    pub fn s(&self) -> f64 { self.s }
}

impl Scorer for PivotedLength {
    fn score_one(&self, ctx: &ScoreContext<'_>) -> f64 {
        if ctx.doc_term_count == 0 || ctx.idf <= 0.0 {
            return 0.0;
        }
        let Some(rel_len) = ctx.relative_doc_length() else { return 0.0 };
        let norm = (1.0 - self.s) + self.s * rel_len;
        if norm <= 0.0 {
            // s == 1 and an empty document
            return 0.0;
        }
        let tf = 1.0 + (1.0 + (ctx.doc_term_count as f64).ln()).ln();
        ctx.query_term_count as f64 * tf / norm * ctx.idf
    }
}
