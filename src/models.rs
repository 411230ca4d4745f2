// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named spending bucket with a monthly limit.
///
/// Essential categories (rent, utilities, ...) are never used as donors when
/// budget is moved between categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub limit: Decimal,
    pub color: String,
    #[serde(default)]
    pub is_essential: bool,
}

impl Category {
    pub fn new(name: &str, limit: Decimal, color: &str, is_essential: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            limit,
            color: color.to_string(),
            is_essential,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub category_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate, // YYYY-MM-DD
    pub created_at: DateTime<Utc>,
}

/// An expense as entered by the user, before the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category_id: String,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn into_expense(self, created_at: DateTime<Utc>) -> Expense {
        Expense {
            id: uuid::Uuid::new_v4().to_string(),
            category_id: self.category_id,
            amount: self.amount,
            description: self.description,
            date: self.date,
            created_at,
        }
    }
}

/// Inclusive calendar-date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "OVER BUDGET")]
    OverBudget,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Ok => "OK",
            BudgetStatus::Warning => "WARNING",
            BudgetStatus::OverBudget => "OVER BUDGET",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived, never persisted: one category's standing for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatus {
    pub category_id: String,
    pub category_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub limit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    /// 0-100+, one decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

impl CategoryStatus {
    pub fn is_over_budget(&self) -> bool {
        self.status == BudgetStatus::OverBudget
    }
}
