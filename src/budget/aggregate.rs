// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::status::percent_of;
use crate::models::{Category, Expense, Period};

/// Display name for spending whose category no longer exists.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Per-category spend for one period.
///
/// Every known category has an entry, zero when nothing was spent. Expenses
/// pointing at a category id outside the list land in `unmatched`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Spending {
    pub by_category: HashMap<String, Decimal>,
    pub unmatched: Decimal,
}

impl Spending {
    pub fn spent(&self, category_id: &str) -> Decimal {
        self.by_category
            .get(category_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Named categories plus the unmatched bucket.
    pub fn total(&self) -> Decimal {
        self.by_category
            .values()
            .fold(self.unmatched, |acc, v| acc.saturating_add(*v))
    }
}

pub fn spending_by_category(
    categories: &[Category],
    expenses: &[Expense],
    period: &Period,
) -> Spending {
    let mut spending = Spending {
        by_category: categories
            .iter()
            .map(|c| (c.id.clone(), Decimal::ZERO))
            .collect(),
        unmatched: Decimal::ZERO,
    };

    for e in expenses.iter().filter(|e| period.contains(e.date)) {
        match spending.by_category.get_mut(&e.category_id) {
            Some(total) => *total = total.saturating_add(e.amount),
            None => {
                debug!(
                    expense = %e.id,
                    category = %e.category_id,
                    "expense references unknown category; counting as unmatched"
                );
                spending.unmatched = spending.unmatched.saturating_add(e.amount);
            }
        }
    }
    spending
}

/// Sum that sticks at the representable bound instead of overflowing.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Sum of every expense in the period regardless of category.
pub fn monthly_total(expenses: &[Expense], period: &Period) -> Decimal {
    expenses
        .iter()
        .filter(|e| period.contains(e.date))
        .map(|e| e.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSlice {
    pub name: String,
    pub color: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    /// Share of total spend, one decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub share: Decimal,
}

/// Spending distribution across categories with non-zero spend, in
/// category-list order, with the unmatched bucket last.
pub fn distribution(categories: &[Category], spending: &Spending) -> Vec<DistributionSlice> {
    let total = spending.total();
    let share = |v: Decimal| percent_of(v, total);

    let mut out: Vec<DistributionSlice> = categories
        .iter()
        .filter_map(|c| {
            let spent = spending.spent(&c.id);
            (spent > Decimal::ZERO).then(|| DistributionSlice {
                name: c.name.clone(),
                color: Some(c.color.clone()),
                spent,
                share: share(spent),
            })
        })
        .collect();
    if spending.unmatched > Decimal::ZERO {
        out.push(DistributionSlice {
            name: UNKNOWN_CATEGORY.to_string(),
            color: None,
            spent: spending.unmatched,
            share: share(spending.unmatched),
        });
    }
    out
}

/// Calendar view: total spend per day inside the period. Days without
/// expenses are absent.
pub fn daily_totals(expenses: &[Expense], period: &Period) -> BTreeMap<NaiveDate, Decimal> {
    let mut days = BTreeMap::new();
    for e in expenses.iter().filter(|e| period.contains(e.date)) {
        let day = days.entry(e.date).or_insert(Decimal::ZERO);
        *day = day.saturating_add(e.amount);
    }
    days
}
