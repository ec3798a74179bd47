//! Bid guarantees and stamp duty.

use serde::Serialize;

use crate::error::{require_positive, CalcResult};
use crate::tariffs::Tariff;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GuaranteeBreakdown {
    /// Geçici teminat, submitted with the bid.
    pub provisional: f64,
    /// Kesin teminat, submitted at contract signature.
    pub final_guarantee: f64,
    pub stamp_duty: f64,
}

pub fn compute_guarantees(amount: f64) -> CalcResult<GuaranteeBreakdown> {
    compute_guarantees_with(&Tariff::default(), amount)
}

pub fn compute_guarantees_with(tariff: &Tariff, amount: f64) -> CalcResult<GuaranteeBreakdown> {
    require_positive("amount", amount)?;
    let rates = tariff.guarantee;
    Ok(GuaranteeBreakdown {
        provisional: amount * rates.provisional_rate,
        final_guarantee: amount * rates.final_rate,
        stamp_duty: amount * rates.stamp_duty_rate,
    })
}
