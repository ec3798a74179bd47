//! Appeal fee (itirazen şikayet bedeli) lookup.

use serde::Serialize;

use crate::error::{require_positive, CalcError, CalcResult};
use crate::tariffs::Tariff;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeeResult {
    pub fee: f64,
    pub band_description: String,
    pub tariff_year: i32,
}

/// Look up the fee in the default tariff.
pub fn lookup_fee(estimated_cost: f64) -> CalcResult<FeeResult> {
    lookup_fee_with(&Tariff::default(), estimated_cost)
}

/// First band, in ascending order, whose upper bound is at least the cost.
pub fn lookup_fee_with(tariff: &Tariff, estimated_cost: f64) -> CalcResult<FeeResult> {
    require_positive("estimated_cost", estimated_cost)?;

    let band = tariff
        .appeal_fee_bands
        .iter()
        .find(|b| b.upper.map_or(true, |upper| estimated_cost <= upper))
        .ok_or_else(|| CalcError::InvalidInput {
            field: "tariff",
            reason: format!("no fee band covers {} ({})", estimated_cost, tariff.year),
        })?;

    Ok(FeeResult {
        fee: band.fee,
        band_description: band.description.clone(),
        tariff_year: tariff.year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_million_is_lowest_band() {
        let r = lookup_fee(8_000_000.0).unwrap();
        assert_eq!(r.fee, 50_640.0);
        assert_eq!(r.tariff_year, 2025);
    }

    #[test]
    fn upper_bound_is_inclusive() {
        assert_eq!(lookup_fee(8_447_946.0).unwrap().fee, 50_640.0);
        assert_eq!(lookup_fee(8_447_946.01).unwrap().fee, 101_344.0);
    }

    #[test]
    fn every_band_is_reachable() {
        assert_eq!(lookup_fee(30_000_000.0).unwrap().fee, 101_344.0);
        assert_eq!(lookup_fee(100_000_000.0).unwrap().fee, 152_021.0);
        assert_eq!(lookup_fee(1e12).unwrap().fee, 202_718.0);
    }

    #[test]
    fn later_year_uses_its_own_schedule() {
        let r = lookup_fee_with(&Tariff::y2026(), 10_000_000.0).unwrap();
        assert_eq!(r.fee, 64_645.0);
        assert_eq!(r.tariff_year, 2026);
    }

    #[test]
    fn non_positive_cost_is_invalid() {
        assert!(lookup_fee(0.0).is_err());
        assert!(lookup_fee(-10.0).is_err());
    }
}
