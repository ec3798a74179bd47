//! Own-bid assessment against the threshold value.
//!
//! A bid strictly below the threshold is presumed excessively low
//! (aşırı düşük) and needs a written cost justification.

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, CalcResult};

/// Cost build-up of our own bid. Serialized with the keys the tracking
/// record stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostComponents {
    #[serde(rename = "anaCigGirdi", default)]
    pub main_input: f64,
    #[serde(rename = "yardimciGirdi", default)]
    pub auxiliary_input: f64,
    #[serde(rename = "iscilik", default)]
    pub labor: f64,
    #[serde(rename = "nakliye", default)]
    pub transport: f64,
    #[serde(rename = "sozlesmeGideri", default)]
    pub contract_expenses: f64,
    #[serde(rename = "genelGider", default)]
    pub overhead: f64,
    #[serde(rename = "kar", default)]
    pub profit: f64,
}

impl CostComponents {
    pub fn total(&self) -> f64 {
        self.main_input
            + self.auxiliary_input
            + self.labor
            + self.transport
            + self.contract_expenses
            + self.overhead
            + self.profit
    }

    fn validate(&self) -> CalcResult<()> {
        require_non_negative("main_input", self.main_input)?;
        require_non_negative("auxiliary_input", self.auxiliary_input)?;
        require_non_negative("labor", self.labor)?;
        require_non_negative("transport", self.transport)?;
        require_non_negative("contract_expenses", self.contract_expenses)?;
        require_non_negative("overhead", self.overhead)?;
        require_non_negative("profit", self.profit)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BidAssessment {
    pub is_excessively_low: bool,
    /// `threshold - our_bid`; negative when the bid is above the threshold.
    pub gap: f64,
    /// Gap as a percentage of the threshold.
    pub gap_pct: f64,
    pub total_cost: f64,
    /// Set when an excessively low bid does not even cover its own costs.
    pub cost_overrun: bool,
    pub explanation: String,
}

pub fn assess_bid(
    our_bid: f64,
    threshold: f64,
    costs: &CostComponents,
) -> CalcResult<BidAssessment> {
    require_positive("threshold", threshold)?;
    require_positive("our_bid", our_bid)?;
    costs.validate()?;

    let is_excessively_low = our_bid < threshold;
    let gap = threshold - our_bid;
    let gap_pct = gap / threshold * 100.0;
    let total_cost = costs.total();
    let cost_overrun = is_excessively_low && total_cost > 0.0 && total_cost > our_bid;

    let mut explanation = if is_excessively_low {
        format!(
            "bid is {:.1}% below the threshold value; an excessively-low-bid justification is required",
            gap_pct
        )
    } else {
        "bid is at or above the threshold value; no justification required".to_string()
    };
    if cost_overrun {
        explanation.push_str(&format!(
            "; cost components ({:.2}) exceed the bid",
            total_cost
        ));
    }

    Ok(BidAssessment {
        is_excessively_low,
        gap,
        gap_pct,
        total_cost,
        cost_overrun,
        explanation,
    })
}
