//! Query-likelihood language models with collection smoothing.
//!
//! Each smoother mixes the document model with the collection model
//! `p_c = P(t|C)`. A matching term contributes
//! `qtf * ln(p_s(t|d) / (alpha_d * p_c))`, which is non-negative and grows
//! with `tf`. The per-document `|q| ln(alpha_d)` part of the full
//! query-likelihood is not added, since it does not belong to any single
//! posting.

use crate::score::{ScoreContext, Scorer};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// `(tf, qtf, p_c)` for a contributing pair, `None` otherwise. Terms with no
/// idf are treated as non-contributing like in the other schemes.
fn matching_term(ctx: &ScoreContext<'_>) -> Option<(f64, f64, f64)> {
    if ctx.doc_term_count == 0 || ctx.doc_size == 0 || ctx.idf <= 0.0 {
        return None;
    }
    let p_c = ctx.collection_probability()?;
    Some((ctx.doc_term_count as f64, ctx.query_term_count as f64, p_c))
}

/// Bayesian smoothing with a Dirichlet prior of strength `mu`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDirichletPrior")]
pub struct DirichletPrior {
    mu: f64,
}

impl Default for DirichletPrior {
    fn default() -> Self { Self { mu: 2000.0 } }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawDirichletPrior {
    mu: f64,
}

impl Default for RawDirichletPrior {
    fn default() -> Self { Self { mu: DirichletPrior::default().mu } }
}

impl TryFrom<RawDirichletPrior> for DirichletPrior {
    type Error = anyhow::Error;

    fn try_from(raw: RawDirichletPrior) -> Result<Self> { Self::new(raw.mu) }
}

impl DirichletPrior {
    pub fn new(mu: f64) -> Result<Self> {
        let dp = Self { mu };
        dp.validate()?;
        Ok(dp)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.mu.is_finite() && self.mu > 0.0, "dirichlet mu must be > 0, got {}", self.mu);
        Ok(())
    }

    pub fn mu(&self) -> f64 { self.mu }
}

impl Scorer for DirichletPrior {
    fn score_one(&self, ctx: &ScoreContext<'_>) -> f64 {
        let Some((tf, qtf, p_c)) = matching_term(ctx) else { return 0.0 };
        qtf * (tf / (self.mu * p_c)).ln_1p()
    }
}

/// Linear interpolation; `lambda` is the weight given to the collection model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawJelinekMercer")]
pub struct JelinekMercer {
    lambda: f64,
}

impl Default for JelinekMercer {
    fn default() -> Self { Self { lambda: 0.7 } }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawJelinekMercer {
    lambda: f64,
}

impl Default for RawJelinekMercer {
    fn default() -> Self { Self { lambda: JelinekMercer::default().lambda } }
}

impl TryFrom<RawJelinekMercer> for JelinekMercer {
    type Error = anyhow::Error;

    fn try_from(raw: RawJelinekMercer) -> Result<Self> { Self::new(raw.lambda) }
}

impl JelinekMercer {
    pub fn new(lambda: f64) -> Result<Self> {
        let jm = Self { lambda };
        jm.validate()?;
        Ok(jm)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.lambda > 0.0 && self.lambda < 1.0,
            "jelinek-mercer lambda must be in (0, 1), got {}",
            self.lambda
        );
        Ok(())
    }

    pub fn lambda(&self) -> f64 { self.lambda }
}

impl Scorer for JelinekMercer {
    fn score_one(&self, ctx: &ScoreContext<'_>) -> f64 {
        let Some((tf, qtf, p_c)) = matching_term(ctx) else { return 0.0 };
        let p_doc = tf / ctx.doc_size as f64;
        qtf * ((1.0 - self.lambda) * p_doc / (self.lambda * p_c)).ln_1p()
    }
}

/// Absolute discounting: `delta` is subtracted from every seen count and the
/// freed mass goes to the collection model in proportion to the document's
/// unique terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAbsoluteDiscount")]
pub struct AbsoluteDiscount {
    delta: f64,
}

impl Default for AbsoluteDiscount {
    fn default() -> Self { Self { delta: 0.7 } }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawAbsoluteDiscount {
    delta: f64,
}

impl Default for RawAbsoluteDiscount {
    fn default() -> Self { Self { delta: AbsoluteDiscount::default().delta } }
}

impl TryFrom<RawAbsoluteDiscount> for AbsoluteDiscount {
    type Error = anyhow::Error;

    fn try_from(raw: RawAbsoluteDiscount) -> Result<Self> { Self::new(raw.delta) }
}

impl AbsoluteDiscount {
    pub fn new(delta: f64) -> Result<Self> {
        let ad = Self { delta };
        ad.validate()?;
        Ok(ad)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.delta > 0.0 && self.delta < 1.0,
            "absolute-discount delta must be in (0, 1), got {}",
            self.delta
        );
        Ok(())
    }

    pub fn delta(&self) -> f64 { self.delta }
}

impl Scorer for AbsoluteDiscount {
    fn score_one(&self, ctx: &ScoreContext<'_>) -> f64 {
        let Some((tf, qtf, p_c)) = matching_term(ctx) else { return 0.0 };
        let unique = ctx.index.unique_terms(ctx.d_id);
        if unique == 0 {
            return 0.0;
        }
        let discounted = (tf - self.delta).max(0.0);
        qtf * (discounted / (self.delta * unique as f64 * p_c)).ln_1p()
    }
}
