//! Tender-tracking update record.
//!
//! The body an enclosing application sends when it persists a calculation
//! session. Field names match the stored record; zero amounts are sent as
//! `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::CostComponents;
use crate::threshold::{Bid, BidSet};

/// One stored bid line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BidLine {
    pub firma: String,
    pub tutar: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationData {
    pub teklif_listesi: Vec<BidLine>,
    pub maliyet_bilesenleri: CostComponents,
    pub son_kayit: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    pub yaklasik_maliyet: Option<f64>,
    pub sinir_deger: Option<f64>,
    pub bizim_teklif: Option<f64>,
    pub hesaplama_verileri: CalculationData,
}

fn non_zero(value: f64) -> Option<f64> {
    (value.is_finite() && value != 0.0).then_some(value)
}

impl TrackingUpdate {
    /// Build the record; only positive bids are kept.
    pub fn new(
        estimated_cost: f64,
        threshold: Option<f64>,
        our_bid: f64,
        bids: &BidSet,
        costs: CostComponents,
        saved_at: DateTime<Utc>,
    ) -> Self {
        let teklif_listesi = bids
            .valid_bids()
            .map(|b| BidLine {
                firma: b.firm.clone().unwrap_or_default(),
                tutar: b.amount,
            })
            .collect();

        Self {
            yaklasik_maliyet: non_zero(estimated_cost),
            sinir_deger: threshold.and_then(non_zero),
            bizim_teklif: non_zero(our_bid),
            hesaplama_verileri: CalculationData {
                teklif_listesi,
                maliyet_bilesenleri: costs,
                son_kayit: saved_at,
            },
        }
    }

    /// Bid set restored from a stored record.
    pub fn bid_set(&self) -> BidSet {
        BidSet::new(
            self.hesaplama_verileri
                .teklif_listesi
                .iter()
                .map(|line| Bid {
                    firm: (!line.firma.is_empty()).then(|| line.firma.clone()),
                    amount: line.tutar,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn saved_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 5, 9, 30, 0).unwrap()
    }

    #[test]
    fn zero_amounts_become_null() {
        let update = TrackingUpdate::new(
            0.0,
            None,
            0.0,
            &BidSet::default(),
            CostComponents::default(),
            saved_at(),
        );
        let json = serde_json::to_value(&update).unwrap();
        assert!(json["yaklasik_maliyet"].is_null());
        assert!(json["sinir_deger"].is_null());
        assert!(json["bizim_teklif"].is_null());
    }

    #[test]
    fn only_positive_bids_are_stored() {
        let bids = BidSet::new(vec![
            Bid::new("Lezzet Catering", 1_200_000.0),
            Bid::anonymous(0.0),
            Bid::anonymous(1_100_000.0),
        ]);
        let update = TrackingUpdate::new(
            1_500_000.0,
            Some(1_000_000.0),
            1_150_000.0,
            &bids,
            CostComponents::default(),
            saved_at(),
        );
        let lines = &update.hesaplama_verileri.teklif_listesi;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].firma, "Lezzet Catering");
        assert_eq!(lines[1].firma, "");

        let restored = update.bid_set();
        assert_eq!(restored.bids[1].firm, None);
        assert_eq!(restored.valid_amounts(), vec![1_200_000.0, 1_100_000.0]);
    }

    #[test]
    fn record_uses_stored_field_names() {
        let update = TrackingUpdate::new(
            150_000.0,
            Some(76_717.95),
            80_000.0,
            &BidSet::from(vec![100_000.0, 120_000.0]),
            CostComponents {
                main_input: 40_000.0,
                ..CostComponents::default()
            },
            saved_at(),
        );
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["yaklasik_maliyet"], 150_000.0);
        assert_eq!(json["hesaplama_verileri"]["maliyet_bilesenleri"]["anaCigGirdi"], 40_000.0);
        assert_eq!(json["hesaplama_verileri"]["teklif_listesi"][0]["tutar"], 100_000.0);
        assert_eq!(json["hesaplama_verileri"]["son_kayit"], "2025-03-05T09:30:00Z");
    }
}
