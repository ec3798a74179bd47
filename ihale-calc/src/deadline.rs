//! Statutory appeal deadlines.
//!
//! The due date is `notice + duration` calendar days, pushed past any
//! weekend. "Today" is always supplied by the caller; `compute_deadline_now`
//! is the only place that reads the wall clock.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};
use crate::tariffs::APPEAL_PERIOD_DAYS;

pub const WARNING_WEEKEND_ROLL: &str = "due date fell on a weekend, rolled forward";
pub const WARNING_IMMINENT: &str = "deadline imminent — urgent action required";
pub const WARNING_PASSED: &str = "deadline has passed — appeal right may be forfeited";

/// Days-remaining count below which the deadline is flagged as imminent.
const IMMINENT_DAYS: i64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealType {
    /// Şikayet, filed with the contracting administration.
    ComplaintToAdmin,
    /// İtirazen şikayet, filed with the procurement board.
    AppealToBoard,
}

impl AppealType {
    pub fn duration_days(&self) -> u32 {
        match self {
            AppealType::ComplaintToAdmin | AppealType::AppealToBoard => APPEAL_PERIOD_DAYS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineInput {
    pub notice_date: NaiveDate,
    pub appeal_type: AppealType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeadlineResult {
    pub due_date: NaiveDate,
    pub days_remaining: i64,
    pub warnings: Vec<String>,
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Compute the due date and the days left as of `today`.
pub fn compute_deadline(
    notice_date: NaiveDate,
    duration_days: u32,
    today: NaiveDate,
) -> CalcResult<DeadlineResult> {
    let mut due_date = notice_date
        .checked_add_signed(Duration::days(i64::from(duration_days)))
        .ok_or_else(|| CalcError::invalid("notice_date", "due date out of range"))?;
    let mut warnings = Vec::new();

    while is_weekend(due_date) {
        due_date = due_date
            .succ_opt()
            .ok_or_else(|| CalcError::invalid("notice_date", "due date out of range"))?;
        warnings.push(WARNING_WEEKEND_ROLL.to_string());
    }
    if !warnings.is_empty() {
        log::warn!("appeal due date rolled forward to {}", due_date);
    }

    let days_remaining = (due_date - today).num_days().max(0);
    if days_remaining == 0 {
        warnings.push(WARNING_PASSED.to_string());
    } else if days_remaining < IMMINENT_DAYS {
        warnings.push(WARNING_IMMINENT.to_string());
    }

    Ok(DeadlineResult {
        due_date,
        days_remaining,
        warnings,
    })
}

/// Deadline for a typed appeal, as of `today`.
pub fn compute_appeal_deadline(input: &DeadlineInput, today: NaiveDate) -> CalcResult<DeadlineResult> {
    compute_deadline(input.notice_date, input.appeal_type.duration_days(), today)
}

/// Live variant: reads the local date at the call boundary.
pub fn compute_deadline_now(notice_date: NaiveDate, duration_days: u32) -> CalcResult<DeadlineResult> {
    compute_deadline(notice_date, duration_days, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn wednesday_notice_rolls_to_monday() {
        // 2025-03-05 is a Wednesday; +10 days is Saturday 2025-03-15.
        let notice = date(2025, 3, 5);
        assert_eq!(notice.weekday(), Weekday::Wed);
        let r = compute_deadline(notice, 10, date(2025, 3, 6)).unwrap();
        assert_eq!(r.due_date, date(2025, 3, 17));
        assert_eq!(r.due_date.weekday(), Weekday::Mon);
        assert_eq!(
            r.warnings.iter().filter(|w| *w == WARNING_WEEKEND_ROLL).count(),
            2
        );
        assert_eq!(r.days_remaining, 11);
    }

    #[test]
    fn weekday_due_date_is_unchanged() {
        // Monday + 10 = Thursday.
        let r = compute_deadline(date(2025, 3, 3), 10, date(2025, 3, 3)).unwrap();
        assert_eq!(r.due_date, date(2025, 3, 13));
        assert!(r.warnings.is_empty());
        assert_eq!(r.days_remaining, 10);
    }

    #[test]
    fn imminent_deadline_is_flagged() {
        let r = compute_deadline(date(2025, 3, 3), 10, date(2025, 3, 11)).unwrap();
        assert_eq!(r.days_remaining, 2);
        assert_eq!(r.warnings, vec![WARNING_IMMINENT.to_string()]);
    }

    #[test]
    fn one_day_left_is_imminent() {
        let r = compute_deadline(date(2025, 3, 3), 10, date(2025, 3, 12)).unwrap();
        assert_eq!(r.days_remaining, 1);
        assert_eq!(r.warnings, vec![WARNING_IMMINENT.to_string()]);
    }

    #[test]
    fn three_days_left_is_not_imminent() {
        let r = compute_deadline(date(2025, 3, 3), 10, date(2025, 3, 10)).unwrap();
        assert_eq!(r.days_remaining, 3);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn sunday_due_date_rolls_once() {
        // Thursday 2025-03-06 + 10 days is Sunday 2025-03-16.
        let r = compute_deadline(date(2025, 3, 6), 10, date(2025, 3, 6)).unwrap();
        assert_eq!(r.due_date, date(2025, 3, 17));
        assert_eq!(r.warnings, vec![WARNING_WEEKEND_ROLL.to_string()]);
        assert_eq!(r.days_remaining, 11);
    }

    #[test]
    fn passed_deadline_clamps_to_zero() {
        let r = compute_deadline(date(2025, 3, 3), 10, date(2025, 4, 1)).unwrap();
        assert_eq!(r.days_remaining, 0);
        assert_eq!(r.warnings, vec![WARNING_PASSED.to_string()]);
    }

    #[test]
    fn due_today_counts_as_passed() {
        let r = compute_deadline(date(2025, 3, 3), 10, date(2025, 3, 13)).unwrap();
        assert_eq!(r.days_remaining, 0);
        assert!(r.warnings.contains(&WARNING_PASSED.to_string()));
    }

    #[test]
    fn both_appeal_types_use_ten_days() {
        let today = date(2025, 3, 3);
        for appeal_type in [AppealType::ComplaintToAdmin, AppealType::AppealToBoard] {
            let input = DeadlineInput {
                notice_date: today,
                appeal_type,
            };
            let r = compute_appeal_deadline(&input, today).unwrap();
            assert_eq!(r.due_date, date(2025, 3, 13));
        }
    }

    #[test]
    fn same_inputs_same_output() {
        let a = compute_deadline(date(2025, 6, 4), 10, date(2025, 6, 5)).unwrap();
        let b = compute_deadline(date(2025, 6, 4), 10, date(2025, 6, 5)).unwrap();
        assert_eq!(a, b);
    }
}
