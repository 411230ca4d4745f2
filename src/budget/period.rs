// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{BudgetError, BudgetResult};
use crate::models::Period;

/// Logical period a user can pick for status and analysis views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    ThisMonth,
    LastMonth,
    Last3Months,
    Custom,
}

impl FromStr for PeriodKind {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "this-month" | "thismonth" => Ok(PeriodKind::ThisMonth),
            "last-month" | "lastmonth" => Ok(PeriodKind::LastMonth),
            "last-3-months" | "last3months" => Ok(PeriodKind::Last3Months),
            "custom" => Ok(PeriodKind::Custom),
            other => Err(BudgetError::InvalidPeriod(format!(
                "unknown period '{}' (use this-month|last-month|last-3-months|custom)",
                other
            ))),
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PeriodKind::ThisMonth => "this-month",
            PeriodKind::LastMonth => "last-month",
            PeriodKind::Last3Months => "last-3-months",
            PeriodKind::Custom => "custom",
        };
        f.write_str(s)
    }
}

pub fn month_start(date: NaiveDate) -> BudgetResult<NaiveDate> {
    date.with_day(1)
        .ok_or_else(|| BudgetError::InvalidPeriod(format!("no first day for {}", date)))
}

pub fn month_end(date: NaiveDate) -> BudgetResult<NaiveDate> {
    month_start(date)?
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| BudgetError::InvalidPeriod(format!("no last day for {}", date)))
}

/// Whole calendar month containing `date`.
pub fn month_of(date: NaiveDate) -> BudgetResult<Period> {
    Ok(Period {
        start: month_start(date)?,
        end: month_end(date)?,
    })
}

fn months_back(date: NaiveDate, n: u32) -> BudgetResult<NaiveDate> {
    month_start(date)?
        .checked_sub_months(Months::new(n))
        .ok_or_else(|| BudgetError::InvalidPeriod(format!("{} months before {} is out of range", n, date)))
}

/// Map a logical period onto concrete inclusive dates.
///
/// Month-based kinds are anchored on `reference`; `Custom` uses the supplied
/// bounds verbatim and fails rather than guessing when one is missing or the
/// range is reversed.
pub fn resolve_period(
    kind: PeriodKind,
    reference: NaiveDate,
    custom_start: Option<NaiveDate>,
    custom_end: Option<NaiveDate>,
) -> BudgetResult<Period> {
    match kind {
        PeriodKind::ThisMonth => month_of(reference),
        PeriodKind::LastMonth => month_of(months_back(reference, 1)?),
        PeriodKind::Last3Months => Ok(Period {
            start: months_back(reference, 2)?,
            end: month_end(reference)?,
        }),
        PeriodKind::Custom => {
            let (start, end) = match (custom_start, custom_end) {
                (Some(s), Some(e)) => (s, e),
                (None, _) => {
                    return Err(BudgetError::InvalidPeriod(
                        "custom period requires a start date".into(),
                    ));
                }
                (_, None) => {
                    return Err(BudgetError::InvalidPeriod(
                        "custom period requires an end date".into(),
                    ));
                }
            };
            if start > end {
                return Err(BudgetError::InvalidPeriod(format!(
                    "start {} is after end {}",
                    start, end
                )));
            }
            Ok(Period { start, end })
        }
    }
}

/// `YYYY-MM` into that month's period.
pub fn parse_month(s: &str) -> BudgetResult<Period> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| BudgetError::InvalidPeriod(format!("invalid month '{}', expected YYYY-MM", s)))?;
    month_of(first)
}
