// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Named failure conditions of the budget engine.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BudgetError {
    /// Custom period missing a bound, or start after end.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Transfer against an essential donor, a self-transfer, a non-positive
    /// amount, or one that would leave the donor with a negative limit.
    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    #[error("Category not found: {0}")]
    UnknownCategory(String),

    /// The external summarizer failed or returned no usable text.
    #[error("Analysis unavailable: {0}")]
    AnalysisUnavailable(String),

    #[error("No expenses found between {start} and {end}")]
    NoExpensesInPeriod { start: NaiveDate, end: NaiveDate },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type BudgetResult<T> = Result<T, BudgetError>;
