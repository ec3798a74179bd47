//! Excessive-discount validation for catering bids.
//!
//! The direct-cost ratio `(main input + labor) / total bid` of a meal-service
//! bid has to fall inside a closed band (0.80..=0.95 in the shipped tariffs).

use serde::Serialize;

use crate::error::{require_non_negative, require_positive, CalcResult};
use crate::tariffs::{DiscountBand, Tariff};

pub const EXPLANATION_VALID: &str = "valid range";

/// Which side of the band the ratio landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiscountVerdict {
    /// Ratio below the band: the bid carries too much margin.
    TooHigh,
    Valid,
    /// Ratio above the band: the bid does not cover its costs.
    TooLow,
}

impl DiscountVerdict {
    /// Message naming the band edge that was crossed.
    pub fn explanation(&self, band: DiscountBand) -> String {
        match self {
            DiscountVerdict::TooHigh => format!(
                "bid is too high, direct-cost ratio below {}%",
                percent(band.min_ratio)
            ),
            DiscountVerdict::Valid => EXPLANATION_VALID.to_string(),
            DiscountVerdict::TooLow => format!(
                "bid is too low, direct-cost ratio above {}%",
                percent(band.max_ratio)
            ),
        }
    }
}

// 0.8 -> "80", 0.825 -> "82.5"
fn percent(ratio: f64) -> String {
    let p = ratio * 100.0;
    if (p - p.round()).abs() < 1e-9 {
        format!("{:.0}", p)
    } else {
        let text = format!("{:.2}", p);
        text.trim_end_matches('0').to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExcessiveDiscountResult {
    pub ratio: f64,
    pub is_valid: bool,
    pub verdict: DiscountVerdict,
    pub explanation: String,
}

/// Validate against the default tariff's band.
pub fn validate_discount(
    main_input_cost: f64,
    labor_cost: f64,
    total_bid: f64,
) -> CalcResult<ExcessiveDiscountResult> {
    validate_discount_with(&Tariff::default(), main_input_cost, labor_cost, total_bid)
}

pub fn validate_discount_with(
    tariff: &Tariff,
    main_input_cost: f64,
    labor_cost: f64,
    total_bid: f64,
) -> CalcResult<ExcessiveDiscountResult> {
    require_positive("total_bid", total_bid)?;
    require_non_negative("main_input_cost", main_input_cost)?;
    require_non_negative("labor_cost", labor_cost)?;

    let ratio = (main_input_cost + labor_cost) / total_bid;
    let verdict = classify_ratio(ratio, tariff.discount_band);

    Ok(ExcessiveDiscountResult {
        ratio,
        is_valid: verdict == DiscountVerdict::Valid,
        verdict,
        explanation: verdict.explanation(tariff.discount_band),
    })
}

fn classify_ratio(ratio: f64, band: DiscountBand) -> DiscountVerdict {
    if ratio < band.min_ratio {
        DiscountVerdict::TooHigh
    } else if ratio <= band.max_ratio {
        DiscountVerdict::Valid
    } else {
        DiscountVerdict::TooLow
    }
}
