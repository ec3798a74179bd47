mod bid_loader;
mod report;

use std::process;

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};

use ihale_calc::assessment::CostComponents;
use ihale_calc::deadline::AppealType;
use ihale_calc::{Tariff, TariffBook};

use crate::bid_loader::load_bids_file;
use crate::report::{evaluate, print_human, EvaluationRequest};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AppealKind {
    /// Complaint to the contracting administration
    Complaint,
    /// Appeal to the procurement board
    Board,
}

impl From<AppealKind> for AppealType {
    fn from(kind: AppealKind) -> Self {
        match kind {
            AppealKind::Complaint => AppealType::ComplaintToAdmin,
            AppealKind::Board => AppealType::AppealToBoard,
        }
    }
}

/// Evaluate a tender's bid list: threshold value, own-bid check,
/// guarantees, appeal deadline and fee.
#[derive(Parser, Debug)]
#[command(name = "ihale-report")]
struct Args {
    /// CSV file with `firma,tutar` columns
    bids_csv: String,

    /// Administration's estimated cost (yaklaşık maliyet)
    #[arg(long)]
    estimated_cost: f64,

    /// Our own bid amount
    #[arg(long)]
    our_bid: Option<f64>,

    /// Main input (ana çiğ girdi) cost of our bid
    #[arg(long, default_value_t = 0.0)]
    main_input: f64,

    /// Labor (işçilik) cost of our bid
    #[arg(long, default_value_t = 0.0)]
    labor: f64,

    /// Other direct and indirect costs of our bid
    #[arg(long, default_value_t = 0.0)]
    overhead: f64,

    /// Date the tender decision was notified (YYYY-MM-DD)
    #[arg(long)]
    notice_date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "board")]
    appeal_type: AppealKind,

    /// Reference date for days remaining; defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Tariff year; defaults to the latest in the book
    #[arg(long)]
    tariff_year: Option<i32>,

    /// JSON file replacing the built-in tariff book
    #[arg(long)]
    tariffs: Option<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

fn load_book(path: Option<&str>) -> Result<TariffBook, String> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to open '{}': {}", path, e))?;
            TariffBook::from_json(&text).map_err(|e| e.to_string())
        }
        None => Ok(TariffBook::builtin()),
    }
}

fn select_tariff(book: &TariffBook, year: Option<i32>) -> Result<Tariff, String> {
    match year {
        Some(year) => book.for_year(year).cloned().map_err(|e| e.to_string()),
        None => book
            .latest()
            .cloned()
            .ok_or_else(|| "tariff book is empty".to_string()),
    }
}

fn run(args: Args) -> Result<(), String> {
    let book = load_book(args.tariffs.as_deref())?;
    let tariff = select_tariff(&book, args.tariff_year)?;
    log::info!("using {} tariff", tariff.year);

    let bids = load_bids_file(&args.bids_csv)?;
    let appeal_type: AppealType = args.appeal_type.into();

    let request = EvaluationRequest {
        bids,
        estimated_cost: args.estimated_cost,
        our_bid: args.our_bid,
        costs: CostComponents {
            main_input: args.main_input,
            labor: args.labor,
            overhead: args.overhead,
            ..CostComponents::default()
        },
        notice_date: args.notice_date,
        appeal_days: appeal_type.duration_days(),
        today: args.today.unwrap_or_else(|| Local::now().date_naive()),
    };

    let report = evaluate(&request, &tariff).map_err(|e| e.to_string())?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else {
        print_human(&report);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::try_parse_from([
            "ihale-report",
            "bids.csv",
            "--estimated-cost",
            "13500000",
            "--notice-date",
            "2025-10-01",
        ])
        .unwrap();
        assert_eq!(args.estimated_cost, 13_500_000.0);
        assert_eq!(args.notice_date, NaiveDate::from_ymd_opt(2025, 10, 1));
        assert!(matches!(args.appeal_type, AppealKind::Board));
        assert!(!args.json);
    }

    #[test]
    fn default_tariff_is_latest_builtin() {
        let book = TariffBook::builtin();
        assert_eq!(select_tariff(&book, None).unwrap().year, 2026);
        assert_eq!(select_tariff(&book, Some(2025)).unwrap().year, 2025);
        assert!(select_tariff(&book, Some(1999)).is_err());
    }
}
