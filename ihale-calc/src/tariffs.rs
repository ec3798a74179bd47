//! Year-tagged statutory tables.
//!
//! Procurement and labour law revise these figures periodically (fee bands
//! are re-indexed every January). Each `Tariff` is one year's table;
//! `TariffBook` keeps several of them so older tenders can be re-evaluated
//! against the rules that applied at the time.
//!
//! Changing a figure here changes the output of `fee`, `discount`,
//! `guarantee` and `severance`. The threshold formula itself has no
//! tunable constants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Statutory appeal window in calendar days, for both complaint types.
pub const APPEAL_PERIOD_DAYS: u32 = 10;

/// One step of the appeal-fee schedule. `upper` is inclusive; `None` is the
/// open-ended top band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeeBand {
    pub upper: Option<f64>,
    pub fee: f64,
    pub description: String,
}

/// Closed interval for the direct-cost ratio of a catering bid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscountBand {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

/// Rates applied to a bid amount.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuaranteeRates {
    /// Geçici teminat.
    pub provisional_rate: f64,
    /// Kesin teminat.
    pub final_rate: f64,
    /// Damga vergisi.
    pub stamp_duty_rate: f64,
}

/// Notice period for tenure strictly below `below_months` (None = no ceiling).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoticeTier {
    pub below_months: Option<u32>,
    pub days: u32,
}

/// Annual leave entitlement for tenure in `[min_years, below_years)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaveTier {
    pub min_years: f64,
    pub below_years: Option<f64>,
    pub days: u32,
}

/// One year's statutory figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub year: i32,
    pub appeal_fee_bands: Vec<FeeBand>,
    pub discount_band: DiscountBand,
    pub guarantee: GuaranteeRates,
    /// Monthly gross ceiling for the severance base (kıdem tavanı).
    pub severance_ceiling: f64,
    pub notice_tiers: Vec<NoticeTier>,
    pub leave_tiers: Vec<LeaveTier>,
}

impl Tariff {
    /// The 2025 table.
    pub fn y2025() -> Self {
        Self {
            year: 2025,
            appeal_fee_bands: vec![
                band(Some(8_447_946.0), 50_640.0, "8.447.946 TL'ye kadar"),
                band(Some(33_791_911.0), 101_344.0, "8.447.946 TL - 33.791.911 TL arası"),
                band(Some(253_439_417.0), 152_021.0, "33.791.911 TL - 253.439.417 TL arası"),
                band(None, 202_718.0, "253.439.417 TL üstü"),
            ],
            severance_ceiling: 41_828.42,
            ..Self::common(2025)
        }
    }

    /// The 2026 table (2025 fee bands re-indexed by 27.67 %).
    pub fn y2026() -> Self {
        Self {
            year: 2026,
            appeal_fee_bands: vec![
                band(Some(10_784_287.0), 64_645.0, "10.784.287 TL'ye kadar"),
                band(Some(43_141_277.0), 129_386.0, "10.784.287 TL - 43.141.277 TL arası"),
                band(Some(323_566_614.0), 194_085.0, "43.141.277 TL - 323.566.614 TL arası"),
                band(None, 258_790.0, "323.566.614 TL üstü"),
            ],
            severance_ceiling: 41_828.42,
            ..Self::common(2026)
        }
    }

    // Figures that have not changed between the shipped years.
    fn common(year: i32) -> Self {
        Self {
            year,
            appeal_fee_bands: Vec::new(),
            discount_band: DiscountBand {
                min_ratio: 0.80,
                max_ratio: 0.95,
            },
            guarantee: GuaranteeRates {
                provisional_rate: 0.03,
                final_rate: 0.06,
                stamp_duty_rate: 0.00948,
            },
            severance_ceiling: 0.0,
            notice_tiers: vec![
                NoticeTier { below_months: Some(6), days: 14 },
                NoticeTier { below_months: Some(18), days: 28 },
                NoticeTier { below_months: Some(36), days: 42 },
                NoticeTier { below_months: None, days: 56 },
            ],
            leave_tiers: vec![
                LeaveTier { min_years: 1.0, below_years: Some(5.0), days: 14 },
                LeaveTier { min_years: 5.0, below_years: Some(15.0), days: 20 },
                LeaveTier { min_years: 15.0, below_years: None, days: 26 },
            ],
        }
    }

    /// Check the structural rules every lookup relies on.
    pub fn validate(&self) -> CalcResult<()> {
        let bands = &self.appeal_fee_bands;
        if bands.is_empty() {
            return Err(self.invalid("fee schedule is empty"));
        }
        let mut previous = 0.0;
        for (i, b) in bands.iter().enumerate() {
            let last = i + 1 == bands.len();
            if !(b.fee.is_finite() && b.fee >= 0.0) {
                return Err(self.invalid("fees must be non-negative"));
            }
            match b.upper {
                Some(upper) if upper <= previous => {
                    return Err(self.invalid("fee band upper bounds must ascend"));
                }
                Some(upper) => previous = upper,
                None if !last => {
                    return Err(self.invalid("only the last fee band may be open-ended"));
                }
                None => {}
            }
        }
        if bands.last().and_then(|b| b.upper).is_some() {
            return Err(self.invalid("the last fee band must be open-ended"));
        }

        let d = self.discount_band;
        if !(d.min_ratio > 0.0 && d.min_ratio <= d.max_ratio) {
            return Err(self.invalid("discount band must satisfy 0 < min <= max"));
        }
        if !(self.severance_ceiling > 0.0) {
            return Err(self.invalid("severance ceiling must be positive"));
        }
        let g = self.guarantee;
        for rate in [g.provisional_rate, g.final_rate, g.stamp_duty_rate] {
            if !(rate.is_finite() && rate >= 0.0) {
                return Err(self.invalid("guarantee and stamp duty rates must be non-negative"));
            }
        }

        self.validate_notice_tiers()?;
        self.validate_leave_tiers()
    }

    fn validate_notice_tiers(&self) -> CalcResult<()> {
        let tiers = &self.notice_tiers;
        if tiers.last().map(|t| t.below_months.is_some()) != Some(false) {
            return Err(self.invalid("notice tiers must end with an open-ended tier"));
        }
        let mut previous = None;
        for t in &tiers[..tiers.len() - 1] {
            match t.below_months {
                None => return Err(self.invalid("only the last notice tier may be open-ended")),
                Some(below) if previous.map_or(false, |p| below <= p) => {
                    return Err(self.invalid("notice tier bounds must ascend"));
                }
                Some(below) => previous = Some(below),
            }
        }
        Ok(())
    }

    fn validate_leave_tiers(&self) -> CalcResult<()> {
        let tiers = &self.leave_tiers;
        if tiers.is_empty() {
            log::warn!("{} tariff has no leave tiers; annual leave will be zero", self.year);
            return Ok(());
        }
        let mut previous_end: Option<f64> = None;
        for (i, t) in tiers.iter().enumerate() {
            let last = i + 1 == tiers.len();
            if !(t.min_years.is_finite() && t.min_years >= 0.0) {
                return Err(self.invalid("leave tier start must be non-negative"));
            }
            if previous_end.map_or(false, |end| t.min_years < end) {
                return Err(self.invalid("leave tiers must ascend without overlap"));
            }
            match t.below_years {
                Some(below) if !(below > t.min_years) => {
                    return Err(self.invalid("leave tier must end after it starts"));
                }
                Some(below) => previous_end = Some(below),
                None if !last => {
                    return Err(self.invalid("only the last leave tier may be open-ended"));
                }
                None => {}
            }
        }
        if tiers.last().and_then(|t| t.below_years).is_some() {
            return Err(self.invalid("the last leave tier must be open-ended"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> CalcError {
        CalcError::InvalidInput {
            field: "tariff",
            reason: format!("{} ({})", reason, self.year),
        }
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::y2025()
    }
}

fn band(upper: Option<f64>, fee: f64, description: &str) -> FeeBand {
    FeeBand {
        upper,
        fee,
        description: description.to_string(),
    }
}

/// A set of tariffs keyed by year.
#[derive(Clone, Debug)]
pub struct TariffBook {
    tariffs: BTreeMap<i32, Tariff>,
}

impl TariffBook {
    /// The tables shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_tariffs(vec![Tariff::y2025(), Tariff::y2026()])
    }

    fn from_tariffs(tariffs: Vec<Tariff>) -> Self {
        Self {
            tariffs: tariffs.into_iter().map(|t| (t.year, t)).collect(),
        }
    }

    /// Load a book from a JSON array of tariffs. Every table is validated.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let tariffs: Vec<Tariff> = serde_json::from_str(json)?;
        if tariffs.is_empty() {
            return Err(CalcError::InvalidInput {
                field: "tariff",
                reason: "tariff book is empty".into(),
            });
        }
        for t in &tariffs {
            t.validate()?;
        }
        log::debug!("loaded {} tariff tables", tariffs.len());
        Ok(Self::from_tariffs(tariffs))
    }

    pub fn for_year(&self, year: i32) -> CalcResult<&Tariff> {
        self.tariffs
            .get(&year)
            .ok_or(CalcError::UnknownTariffYear(year))
    }

    /// The most recent table in the book.
    pub fn latest(&self) -> Option<&Tariff> {
        self.tariffs.values().next_back()
    }

    pub fn years(&self) -> Vec<i32> {
        self.tariffs.keys().copied().collect()
    }

    pub fn to_json(&self) -> CalcResult<String> {
        let tariffs: Vec<&Tariff> = self.tariffs.values().collect();
        Ok(serde_json::to_string_pretty(&tariffs)?)
    }
}

impl Default for TariffBook {
    fn default() -> Self {
        Self::builtin()
    }
}
