//! Evaluation sheet: JSON contract and human-readable output.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use ihale_calc::assessment::{assess_bid, BidAssessment, CostComponents};
use ihale_calc::deadline::{compute_deadline, DeadlineResult};
use ihale_calc::discount::{validate_discount_with, ExcessiveDiscountResult};
use ihale_calc::fee::{lookup_fee_with, FeeResult};
use ihale_calc::guarantee::{compute_guarantees_with, GuaranteeBreakdown};
use ihale_calc::threshold::{
    classify_bids, compute_threshold_detailed, BidSet, BidStanding, Standing, ThresholdBreakdown,
};
use ihale_calc::{CalcResult, Tariff, TrackingUpdate};

/// What the caller asked to evaluate.
#[derive(Clone, Debug)]
pub struct EvaluationRequest {
    pub bids: BidSet,
    pub estimated_cost: f64,
    pub our_bid: Option<f64>,
    pub costs: CostComponents,
    pub notice_date: Option<NaiveDate>,
    pub appeal_days: u32,
    pub today: NaiveDate,
}

#[derive(Serialize)]
pub struct EvaluationReport {
    pub generated_at: String,
    pub tariff_year: i32,
    pub estimated_cost: f64,
    pub threshold: ThresholdBreakdown,
    pub standings: Vec<BidStanding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_bid: Option<OwnBidReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appeal: Option<AppealReport>,
    pub tracking_update: TrackingUpdate,
}

#[derive(Serialize)]
pub struct OwnBidReport {
    pub amount: f64,
    pub assessment: BidAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_cost_ratio: Option<ExcessiveDiscountResult>,
    pub guarantees: GuaranteeBreakdown,
}

#[derive(Serialize)]
pub struct AppealReport {
    pub notice_date: NaiveDate,
    pub deadline: DeadlineResult,
    pub fee: FeeResult,
}

/// Run every calculator that has the inputs it needs.
pub fn evaluate(request: &EvaluationRequest, tariff: &Tariff) -> CalcResult<EvaluationReport> {
    let amounts = request.bids.valid_amounts();
    let threshold = compute_threshold_detailed(&amounts, request.estimated_cost)?;
    let standings = classify_bids(&request.bids, threshold.threshold_value);

    let own_bid = match request.our_bid {
        Some(amount) => {
            let assessment = assess_bid(amount, threshold.threshold_value, &request.costs)?;
            // The ratio needs at least one direct-cost figure to mean anything.
            let direct_cost_ratio = if request.costs.main_input > 0.0 || request.costs.labor > 0.0 {
                Some(validate_discount_with(
                    tariff,
                    request.costs.main_input,
                    request.costs.labor,
                    amount,
                )?)
            } else {
                None
            };
            Some(OwnBidReport {
                amount,
                assessment,
                direct_cost_ratio,
                guarantees: compute_guarantees_with(tariff, amount)?,
            })
        }
        None => None,
    };

    let appeal = match request.notice_date {
        Some(notice_date) => Some(AppealReport {
            notice_date,
            deadline: compute_deadline(notice_date, request.appeal_days, request.today)?,
            fee: lookup_fee_with(tariff, request.estimated_cost)?,
        }),
        None => None,
    };

    let tracking_update = TrackingUpdate::new(
        request.estimated_cost,
        Some(threshold.threshold_value),
        request.our_bid.unwrap_or(0.0),
        &request.bids,
        request.costs,
        Utc::now(),
    );

    Ok(EvaluationReport {
        generated_at: Utc::now().to_rfc3339(),
        tariff_year: tariff.year,
        estimated_cost: request.estimated_cost,
        threshold,
        standings,
        own_bid,
        appeal,
        tracking_update,
    })
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format an amount in Turkish notation: `12.400.000,50`.
pub fn format_lira(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let kurus_total = (amount.abs() * 100.0).round() as u64;
    let whole = kurus_total / 100;
    let kurus = kurus_total % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();
    format!("{}{},{:02}", sign, grouped, kurus)
}

pub fn print_human(report: &EvaluationReport) {
    let t = &report.threshold;
    println!();
    println!("  IHALE DEGERLENDIRME  (tarife {})", report.tariff_year);
    println!("  {:\u{2500}<64}", "");
    println!("  Yaklaşık maliyet      {:>22} TL", format_lira(report.estimated_cost));
    println!(
        "  Geçerli teklif        {:>22}   (bant içi {})",
        t.valid_bid_count, t.in_band_count
    );
    println!("  Ortalama 1            {:>22} TL", format_lira(t.mean1));
    println!("  Standart sapma        {:>22} TL", format_lira(t.std_dev));
    println!("  Ortalama 2            {:>22} TL", format_lira(t.mean2));
    println!("  C / K                 {:>14.4} / {:.4}", t.c, t.k);
    println!("  Sınır değer           {:>22} TL", format_lira(t.threshold_value));
    println!();

    for (i, s) in report.standings.iter().enumerate() {
        let marker = match s.standing {
            Standing::BelowThreshold => "!!",
            Standing::AtOrAboveThreshold => "  ",
        };
        println!(
            "  {} {:>2}. {:32} {:>20} TL",
            marker,
            i + 1,
            s.firm.as_deref().unwrap_or("-"),
            format_lira(s.amount)
        );
    }

    if let Some(own) = &report.own_bid {
        println!();
        println!("  Bizim teklif          {:>22} TL", format_lira(own.amount));
        println!("    {}", own.assessment.explanation);
        if let Some(ratio) = &own.direct_cost_ratio {
            println!("    Direkt maliyet oranı {:.4}: {}", ratio.ratio, ratio.explanation);
        }
        println!(
            "    Geçici teminat {} TL · Kesin teminat {} TL · Damga vergisi {} TL",
            format_lira(own.guarantees.provisional),
            format_lira(own.guarantees.final_guarantee),
            format_lira(own.guarantees.stamp_duty)
        );
    }

    if let Some(appeal) = &report.appeal {
        println!();
        println!(
            "  İtirazen şikayet son gün {} ({} gün kaldı)",
            appeal.deadline.due_date, appeal.deadline.days_remaining
        );
        for w in &appeal.deadline.warnings {
            println!("    ! {}", w);
        }
        println!(
            "  Başvuru bedeli {} TL ({})",
            format_lira(appeal.fee.fee),
            appeal.fee.band_description
        );
    }
    println!("  {:\u{2500}<64}", "");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use ihale_calc::threshold::Bid;

    fn request() -> EvaluationRequest {
        EvaluationRequest {
            bids: BidSet::new(vec![
                Bid::new("A", 100_000.0),
                Bid::new("B", 120_000.0),
                Bid::new("C", 110_000.0),
            ]),
            estimated_cost: 150_000.0,
            our_bid: Some(80_000.0),
            costs: CostComponents {
                main_input: 45_000.0,
                labor: 25_000.0,
                ..CostComponents::default()
            },
            notice_date: NaiveDate::from_ymd_opt(2025, 3, 5),
            appeal_days: 10,
            today: NaiveDate::from_ymd_opt(2025, 3, 6).unwrap(),
        }
    }

    #[test]
    fn lira_formatting() {
        assert_eq!(format_lira(0.0), "0,00");
        assert_eq!(format_lira(999.5), "999,50");
        assert_eq!(format_lira(12_400_000.5), "12.400.000,50");
        assert_eq!(format_lira(-1_234.0), "-1.234,00");
    }

    #[test]
    fn full_evaluation() {
        let report = evaluate(&request(), &Tariff::y2025()).unwrap();
        assert!((report.threshold.threshold_value - 76_717.95).abs() < 0.1);
        assert_eq!(report.standings.len(), 3);

        let own = report.own_bid.as_ref().unwrap();
        assert!(!own.assessment.is_excessively_low);
        let ratio = own.direct_cost_ratio.as_ref().unwrap();
        assert!((ratio.ratio - 0.875).abs() < 1e-12);
        assert!(ratio.is_valid);

        let appeal = report.appeal.as_ref().unwrap();
        assert_eq!(appeal.deadline.due_date, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
        assert_eq!(appeal.fee.fee, 50_640.0);

        assert_eq!(report.tracking_update.bizim_teklif, Some(80_000.0));
    }

    #[test]
    fn optional_sections_are_skipped() {
        let mut req = request();
        req.our_bid = None;
        req.notice_date = None;
        let report = evaluate(&req, &Tariff::y2025()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("own_bid").is_none());
        assert!(json.get("appeal").is_none());
        assert!(json["tracking_update"]["bizim_teklif"].is_null());
    }

    #[test]
    fn too_few_bids_fail_the_evaluation() {
        let mut req = request();
        req.bids = BidSet::new(vec![Bid::new("A", 100_000.0)]);
        assert!(evaluate(&req, &Tariff::y2025()).is_err());
    }
}
