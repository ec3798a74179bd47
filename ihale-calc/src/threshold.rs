//! Threshold value (sınır değer) estimation.
//!
//! Two-pass trimmed mean over the competing bids, corrected by the ratio of
//! that mean to the administration's estimated cost.
//!
//! # Algorithm
//!
//! 1. Drop non-positive bids; at least two must remain.
//! 2. `mean1` = mean of the bids, `std_dev` = Bessel-corrected sample
//!    standard deviation around `mean1`.
//! 3. `mean2` = mean of the bids inside the closed band
//!    `[mean1 - std_dev, mean1 + std_dev]`, or `mean1` if none fall inside.
//! 4. `C = mean2 / estimated_cost`, and
//!    - `C < 0.60`          -> `K = C`
//!    - `0.60 <= C <= 1.00` -> `K = (3.2C - C^2 - 0.6) / (C + 1)`
//!    - `C > 1.00`          -> `K = 1`
//! 5. threshold = `K * mean2`.
//!
//! No rounding happens here; rounding is a display concern.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, CalcError, CalcResult};
use crate::math::{mean, sample_variance};

/// Minimum number of positive bids for a threshold.
pub const MIN_VALID_BIDS: usize = 2;

/// A single competing bid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub firm: Option<String>,
    pub amount: f64,
}

impl Bid {
    pub fn new(firm: impl Into<String>, amount: f64) -> Self {
        Self {
            firm: Some(firm.into()),
            amount,
        }
    }

    pub fn anonymous(amount: f64) -> Self {
        Self { firm: None, amount }
    }

    pub fn is_valid(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }
}

/// Ordered collection of bids as entered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BidSet {
    pub bids: Vec<Bid>,
}

impl BidSet {
    pub fn new(bids: Vec<Bid>) -> Self {
        Self { bids }
    }

    /// Amounts of the bids that take part in the computation, input order kept.
    pub fn valid_amounts(&self) -> Vec<f64> {
        self.bids
            .iter()
            .filter(|b| b.is_valid())
            .map(|b| b.amount)
            .collect()
    }

    pub fn valid_bids(&self) -> impl Iterator<Item = &Bid> {
        self.bids.iter().filter(|b| b.is_valid())
    }
}

impl From<Vec<f64>> for BidSet {
    fn from(amounts: Vec<f64>) -> Self {
        Self::new(amounts.into_iter().map(Bid::anonymous).collect())
    }
}

/// Every intermediate value of one threshold computation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThresholdBreakdown {
    pub valid_bid_count: usize,
    pub mean1: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub band_low: f64,
    pub band_high: f64,
    pub in_band_count: usize,
    pub mean2: f64,
    /// `mean2 / estimated_cost`.
    pub c: f64,
    pub k: f64,
    pub threshold_value: f64,
}

/// The derived threshold, recomputed on every call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThresholdResult {
    pub threshold_value: f64,
}

/// Correction coefficient K for a given C.
pub fn correction_coefficient(c: f64) -> f64 {
    if c < 0.60 {
        c
    } else if c <= 1.00 {
        (3.2 * c - c * c - 0.6) / (c + 1.0)
    } else {
        1.0
    }
}

/// Compute the threshold value from raw bid amounts.
pub fn compute_threshold(bids: &[f64], estimated_cost: f64) -> CalcResult<ThresholdResult> {
    let breakdown = compute_threshold_detailed(bids, estimated_cost)?;
    Ok(ThresholdResult {
        threshold_value: breakdown.threshold_value,
    })
}

/// Compute the threshold value and keep every intermediate figure.
pub fn compute_threshold_detailed(
    bids: &[f64],
    estimated_cost: f64,
) -> CalcResult<ThresholdBreakdown> {
    let valid: Vec<f64> = bids
        .iter()
        .copied()
        .filter(|b| b.is_finite() && *b > 0.0)
        .collect();
    if valid.len() < MIN_VALID_BIDS {
        return Err(CalcError::InsufficientData {
            required: MIN_VALID_BIDS,
            found: valid.len(),
        });
    }
    require_positive("estimated_cost", estimated_cost)?;

    let mean1 = mean(&valid)?;
    let variance = sample_variance(&valid, mean1)?;
    let std_dev = variance.sqrt();
    let band_low = mean1 - std_dev;
    let band_high = mean1 + std_dev;

    let in_band: Vec<f64> = valid
        .iter()
        .copied()
        .filter(|b| *b >= band_low && *b <= band_high)
        .collect();
    let mean2 = if in_band.is_empty() {
        mean1
    } else {
        mean(&in_band)?
    };

    let c = mean2 / estimated_cost;
    let k = correction_coefficient(c);
    let threshold_value = k * mean2;

    log::debug!(
        "threshold: n={} mean1={:.2} sd={:.2} in_band={} mean2={:.2} C={:.4} K={:.4} -> {:.2}",
        valid.len(),
        mean1,
        std_dev,
        in_band.len(),
        mean2,
        c,
        k,
        threshold_value
    );

    Ok(ThresholdBreakdown {
        valid_bid_count: valid.len(),
        mean1,
        variance,
        std_dev,
        band_low,
        band_high,
        in_band_count: in_band.len(),
        mean2,
        c,
        k,
        threshold_value,
    })
}

/// Where a bid stands relative to the threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Standing {
    /// Presumed excessively low; the bidder must justify its cost composition.
    BelowThreshold,
    AtOrAboveThreshold,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BidStanding {
    pub firm: Option<String>,
    pub amount: f64,
    pub standing: Standing,
}

/// Mark each valid bid against a threshold, lowest amount first.
pub fn classify_bids(bids: &BidSet, threshold: f64) -> Vec<BidStanding> {
    let mut standings: Vec<BidStanding> = bids
        .valid_bids()
        .map(|b| BidStanding {
            firm: b.firm.clone(),
            amount: b.amount,
            standing: if b.amount < threshold {
                Standing::BelowThreshold
            } else {
                Standing::AtOrAboveThreshold
            },
        })
        .collect();
    standings.sort_by(|a, b| a.amount.total_cmp(&b.amount));
    standings
}
