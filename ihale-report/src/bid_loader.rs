//! CSV bid list loader.
//!
//! Parses a bid list exported from the tender desk into a `BidSet`.
//! Expected CSV columns:
//!   firma, tutar
//!
//! `firma` may be empty. `tutar` accepts plain numbers (`12400000.50`) and
//! Turkish-formatted amounts (`12.400.000,50 TL`).

use std::io::Read;

use ihale_calc::threshold::{Bid, BidSet};
use serde::Deserialize;

/// One CSV row.
#[derive(Debug, Clone, Deserialize)]
pub struct BidRecord {
    pub firma: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub tutar: f64,
}

impl BidRecord {
    pub fn to_bid(&self) -> Bid {
        Bid {
            firm: self
                .firma
                .as_ref()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty()),
            amount: self.tutar,
        }
    }
}

/// Load bids from a CSV reader. Rows are kept as entered, including
/// non-positive amounts; the calculators skip those themselves.
pub fn load_bids<R: Read>(reader: R) -> Result<BidSet, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bids = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: BidRecord =
            result.map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        bids.push(record.to_bid());
    }

    log::debug!("loaded {} bid rows", bids.len());
    Ok(BidSet::new(bids))
}

/// Load bids from a CSV file path.
pub fn load_bids_file(path: &str) -> Result<BidSet, String> {
    let file = std::fs::File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_bids(file)
}

/// Parse an amount written either as a plain number or in Turkish notation
/// (`.` thousands separator, `,` decimal separator, optional currency suffix).
pub fn parse_amount(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches("TL")
        .trim_end_matches('₺')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Ok(0.0);
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.matches('.').count() > 1 {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    normalized
        .parse::<f64>()
        .map_err(|_| format!("expected an amount, got '{}'", raw))
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_amount(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
firma,tutar
Anadolu Toplu Yemek,11850000
Ege Catering,\"12.400.000,00 TL\"
,12100000.50
Başkent Gıda,0
";

    #[test]
    fn load_sample_csv() {
        let bids = load_bids(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(bids.bids.len(), 4);
        assert_eq!(bids.bids[0].firm.as_deref(), Some("Anadolu Toplu Yemek"));
        assert!((bids.bids[1].amount - 12_400_000.0).abs() < 0.01);
        assert_eq!(bids.bids[2].firm, None);
        assert!((bids.bids[2].amount - 12_100_000.50).abs() < 0.01);
        assert_eq!(bids.valid_amounts().len(), 3);
    }

    #[test]
    fn amount_formats() {
        assert_eq!(parse_amount("1500").unwrap(), 1500.0);
        assert_eq!(parse_amount("1500.75").unwrap(), 1500.75);
        assert_eq!(parse_amount("1.500.000").unwrap(), 1_500_000.0);
        assert_eq!(parse_amount("1.500.000,25").unwrap(), 1_500_000.25);
        assert_eq!(parse_amount("250,5 ₺").unwrap(), 250.5);
        assert_eq!(parse_amount("").unwrap(), 0.0);
        assert!(parse_amount("on iki milyon").is_err());
    }

    #[test]
    fn bad_row_reports_line_number() {
        let csv_data = "firma,tutar\nA,100\nB,abc\n";
        let err = load_bids(csv_data.as_bytes()).unwrap_err();
        assert!(err.contains("line 3"), "{}", err);
    }
}
