//! Severance (tazminat) computation.
//!
//! Three statutory components are paid on termination:
//! - severance pay (kıdem), one month's capped gross salary per year of tenure,
//!   from one full year onward;
//! - notice pay (ihbar), a tenure-tiered number of days of gross pay;
//! - unused annual leave, days of gross pay.
//!
//! Which of them apply depends on the termination reason.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, CalcError, CalcResult};
use crate::math::round2;
use crate::tariffs::Tariff;

/// Gross salary is converted to a daily rate over a 30-day month.
const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    #[serde(rename = "isveren_fesih")]
    EmployerTermination,
    #[serde(rename = "istifa")]
    Resignation,
    #[serde(rename = "emeklilik")]
    Retirement,
    /// Female employee leaving within a year of marriage.
    #[serde(rename = "evlilik")]
    Marriage,
    #[serde(rename = "askerlik")]
    MilitaryService,
    /// Justified termination by the employee (unpaid wages, mobbing, ...).
    #[serde(rename = "hakli_fesih")]
    JustifiedByEmployee,
    #[serde(rename = "vefat")]
    Death,
}

/// Which components a termination reason grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rights {
    pub severance: bool,
    pub notice: bool,
    pub leave: bool,
}

impl TerminationReason {
    pub const ALL: [TerminationReason; 7] = [
        TerminationReason::EmployerTermination,
        TerminationReason::Resignation,
        TerminationReason::Retirement,
        TerminationReason::Marriage,
        TerminationReason::MilitaryService,
        TerminationReason::JustifiedByEmployee,
        TerminationReason::Death,
    ];

    pub fn rights(&self) -> Rights {
        match self {
            TerminationReason::EmployerTermination => Rights {
                severance: true,
                notice: true,
                leave: true,
            },
            TerminationReason::Resignation => Rights {
                severance: false,
                notice: false,
                leave: true,
            },
            TerminationReason::Retirement
            | TerminationReason::Marriage
            | TerminationReason::MilitaryService
            | TerminationReason::JustifiedByEmployee
            | TerminationReason::Death => Rights {
                severance: true,
                notice: false,
                leave: true,
            },
        }
    }

    /// Statute the entitlement rests on.
    pub fn statute(&self) -> &'static str {
        match self {
            TerminationReason::EmployerTermination => "4857 Sayılı İş Kanunu",
            TerminationReason::Resignation => "4857 Sayılı İş Kanunu Madde 17",
            TerminationReason::JustifiedByEmployee => "4857 Sayılı İş Kanunu Madde 24",
            TerminationReason::Retirement
            | TerminationReason::Marriage
            | TerminationReason::MilitaryService
            | TerminationReason::Death => "1475 Sayılı İş Kanunu Madde 14",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeveranceInput {
    pub hire_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub gross_monthly_salary: f64,
    pub reason: TerminationReason,
    pub unused_leave_days: u32,
}

/// Length of service.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tenure {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
    pub total_months: i32,
    /// `total_days / 365.25`, two decimals.
    pub total_years: f64,
}

impl Tenure {
    pub fn between(hire: NaiveDate, exit: NaiveDate) -> CalcResult<Self> {
        if exit < hire {
            return Err(CalcError::invalid("exit_date", "exit date precedes hire date"));
        }

        let mut years = exit.year() - hire.year();
        let mut months = exit.month() as i32 - hire.month() as i32;
        let mut days = exit.day() as i32 - hire.day() as i32;

        if days < 0 {
            months -= 1;
            days = (days + days_in_previous_month(exit)?).max(0);
        }
        if months < 0 {
            years -= 1;
            months += 12;
        }

        let total_days = (exit - hire).num_days();
        Ok(Self {
            years,
            months,
            days,
            total_days,
            total_months: years * 12 + months,
            total_years: round2(total_days as f64 / DAYS_PER_YEAR),
        })
    }
}

fn days_in_previous_month(date: NaiveDate) -> CalcResult<i32> {
    let last_of_previous = date
        .with_day(1)
        .and_then(|first| first.pred_opt())
        .ok_or_else(|| CalcError::invalid("exit_date", "date out of range"))?;
    Ok(last_of_previous.day() as i32)
}

/// One payable component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Entitlement {
    pub entitled: bool,
    pub days: u32,
    pub amount: f64,
}

impl Entitlement {
    fn none() -> Self {
        Self {
            entitled: false,
            days: 0,
            amount: 0.0,
        }
    }

    fn paid(days: u32, raw_amount: f64) -> Self {
        Self {
            entitled: true,
            days,
            amount: round2(raw_amount),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeveranceResult {
    pub reason: TerminationReason,
    pub tenure: Tenure,
    pub daily_gross: f64,
    pub ceiling: f64,
    pub ceiling_applied: bool,
    pub severance_base: f64,
    pub severance: Entitlement,
    pub notice: Entitlement,
    pub leave: Entitlement,
    pub total: f64,
}

/// Notice period in days for a tenure in whole months.
pub fn notice_period_days(tariff: &Tariff, total_months: i32) -> u32 {
    tariff
        .notice_tiers
        .iter()
        .find(|t| t.below_months.map_or(true, |below| total_months < below as i32))
        .map(|t| t.days)
        .unwrap_or(0)
}

/// Yearly leave days earned at a given tenure; zero under one year.
pub fn annual_leave_entitlement(tariff: &Tariff, total_years: f64) -> u32 {
    tariff
        .leave_tiers
        .iter()
        .find(|t| total_years >= t.min_years && t.below_years.map_or(true, |b| total_years < b))
        .map(|t| t.days)
        .unwrap_or(0)
}

pub fn compute_severance(input: &SeveranceInput, tariff: &Tariff) -> CalcResult<SeveranceResult> {
    require_non_negative("gross_monthly_salary", input.gross_monthly_salary)?;

    let tenure = Tenure::between(input.hire_date, input.exit_date)?;
    let rights = input.reason.rights();
    let salary = input.gross_monthly_salary;
    let daily_gross = salary / DAYS_PER_MONTH;

    let ceiling = tariff.severance_ceiling;
    let ceiling_applied = salary > ceiling;
    let severance_base = if ceiling_applied { ceiling } else { salary };
    if ceiling_applied {
        log::warn!(
            "salary {:.2} exceeds severance ceiling {:.2}; ceiling used",
            salary,
            ceiling
        );
    }

    // Component amounts stay unrounded until the total is taken.
    let severance_raw = if rights.severance && tenure.total_years >= 1.0 {
        Some(tenure.total_years * severance_base)
    } else {
        None
    };
    let notice_days = notice_period_days(tariff, tenure.total_months);
    let notice_raw = rights.notice.then(|| f64::from(notice_days) * daily_gross);
    let leave_raw = (rights.leave && input.unused_leave_days > 0)
        .then(|| f64::from(input.unused_leave_days) * daily_gross);

    let severance = match severance_raw {
        Some(raw) => Entitlement::paid((tenure.total_years * DAYS_PER_MONTH).round() as u32, raw),
        None => Entitlement::none(),
    };
    let notice = match notice_raw {
        Some(raw) => Entitlement::paid(notice_days, raw),
        None => Entitlement::none(),
    };
    let leave = match leave_raw {
        Some(raw) => Entitlement::paid(input.unused_leave_days, raw),
        None => Entitlement::none(),
    };

    let total = round2(
        severance_raw.unwrap_or(0.0) + notice_raw.unwrap_or(0.0) + leave_raw.unwrap_or(0.0),
    );
    log::debug!(
        "severance {:?}: tenure {:.2}y, kidem {:.2}, ihbar {:.2}, izin {:.2}",
        input.reason,
        tenure.total_years,
        severance.amount,
        notice.amount,
        leave.amount
    );

    Ok(SeveranceResult {
        reason: input.reason,
        tenure,
        daily_gross: round2(daily_gross),
        ceiling,
        ceiling_applied,
        severance_base,
        severance,
        notice,
        leave,
        total,
    })
}
