// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::{Spending, saturating_sum};
use crate::models::{BudgetStatus, Category, CategoryStatus};

/// `part / whole * 100` to one decimal place; zero when `whole` is not positive.
/// Saturates at `Decimal::MAX` (or `MIN`) when the ratio does not fit.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .map(|p| p.round_dp(1))
        .unwrap_or(if part.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

fn warning_threshold(limit: Decimal) -> Decimal {
    limit * Decimal::new(8, 1)
}

pub fn classify(category: &Category, spent: Decimal) -> CategoryStatus {
    let limit = category.limit;
    let status = if spent > limit {
        BudgetStatus::OverBudget
    } else if spent > warning_threshold(limit) {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    };
    CategoryStatus {
        category_id: category.id.clone(),
        category_name: category.name.clone(),
        limit,
        spent,
        remaining: limit.saturating_sub(spent),
        percentage: percent_of(spent, limit),
        status,
    }
}

/// One classification per category, in category-list order.
pub fn budget_report(categories: &[Category], spending: &Spending) -> Vec<CategoryStatus> {
    categories
        .iter()
        .map(|c| classify(c, spending.spent(&c.id)))
        .collect()
}

pub fn over_budget_categories<'a>(
    categories: &'a [Category],
    spending: &Spending,
) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| spending.spent(&c.id) > c.limit)
        .collect()
}

/// Dashboard figures for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_budget: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unmatched: Decimal,
    /// Income minus everything spent, may be negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_income: Decimal,
    /// Income minus the sum of limits.
    #[serde(with = "rust_decimal::serde::float")]
    pub planned_savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub overall_percentage: Decimal,
    pub categories: Vec<CategoryStatus>,
    pub over_budget: Vec<String>,
}

pub fn overview(
    categories: &[Category],
    spending: &Spending,
    monthly_income: Decimal,
) -> BudgetOverview {
    let report = budget_report(categories, spending);
    let total_budget = saturating_sum(categories.iter().map(|c| c.limit));
    let total_spent = spending.total();
    let over_budget = report
        .iter()
        .filter(|s| s.is_over_budget())
        .map(|s| s.category_name.clone())
        .collect();

    BudgetOverview {
        monthly_income,
        total_budget,
        total_spent,
        unmatched: spending.unmatched,
        remaining_income: monthly_income.saturating_sub(total_spent),
        planned_savings: monthly_income.saturating_sub(total_budget),
        overall_percentage: percent_of(total_spent, total_budget),
        categories: report,
        over_budget,
    }
}
