// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Moving budget allowance from one non-essential category to an over-budget
//! one. A single call touches exactly two categories; covering a deficit from
//! several donors means calling [`apply_transfer`] once per donor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::aggregate::Spending;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPlan {
    #[serde(with = "rust_decimal::serde::float")]
    pub transfer_amount: Decimal,
    pub fully_covered: bool,
}

/// Request shape accepted from the CRUD layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub target_category_id: String,
    pub donor_category_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub transfer_amount: Decimal,
}

/// How far over budget a category is; zero when it is within its limit.
pub fn amount_needed(status: &CategoryStatus) -> Decimal {
    if status.remaining < Decimal::ZERO {
        status.remaining.abs()
    } else {
        Decimal::ZERO
    }
}

/// Non-essential categories other than the target that still have unspent
/// allowance. An empty list means there is nobody to borrow from.
pub fn eligible_donors(
    categories: &[Category],
    spending: &Spending,
    target_category_id: &str,
) -> Vec<Donor> {
    categories
        .iter()
        .filter(|c| c.id != target_category_id && !c.is_essential)
        .filter_map(|c| {
            let spent = spending.spent(&c.id);
            let remaining = c.limit - spent;
            (remaining > Decimal::ZERO).then(|| Donor {
                category: c.clone(),
                spent,
                remaining,
            })
        })
        .collect()
}

pub fn plan_transfer(donor: &Donor, amount_needed: Decimal) -> TransferPlan {
    let needed = amount_needed.abs();
    TransferPlan {
        transfer_amount: needed.min(donor.remaining),
        fully_covered: donor.remaining >= needed,
    }
}

/// Raise the target's limit and lower the donor's by `transfer_amount`.
/// Returns a new list; the sum of limits is unchanged.
pub fn apply_transfer(
    categories: &[Category],
    target_id: &str,
    donor_id: &str,
    transfer_amount: Decimal,
) -> BudgetResult<Vec<Category>> {
    if target_id == donor_id {
        return Err(BudgetError::InvalidTransfer(
            "cannot transfer a category's budget to itself".into(),
        ));
    }
    if transfer_amount <= Decimal::ZERO {
        return Err(BudgetError::InvalidTransfer(format!(
            "amount must be positive, got {}",
            transfer_amount
        )));
    }
    if !categories.iter().any(|c| c.id == target_id) {
        return Err(BudgetError::UnknownCategory(target_id.to_string()));
    }
    let donor = categories
        .iter()
        .find(|c| c.id == donor_id)
        .ok_or_else(|| BudgetError::UnknownCategory(donor_id.to_string()))?;
    if donor.is_essential {
        return Err(BudgetError::InvalidTransfer(format!(
            "'{}' is essential and cannot fund other categories",
            donor.name
        )));
    }
    if donor.limit < transfer_amount {
        return Err(BudgetError::InvalidTransfer(format!(
            "'{}' has a limit of {}, cannot give {}",
            donor.name, donor.limit, transfer_amount
        )));
    }

    let updated = categories
        .iter()
        .map(|c| {
            let mut c = c.clone();
            if c.id == target_id {
                c.limit += transfer_amount;
            } else if c.id == donor_id {
                c.limit -= transfer_amount;
            }
            c
        })
        .collect();
    info!(target = %target_id, donor = %donor_id, amount = %transfer_amount, "budget transfer applied");
    Ok(updated)
}

impl TransferRequest {
    pub fn apply(&self, categories: &[Category]) -> BudgetResult<Vec<Category>> {
        apply_transfer(
            categories,
            &self.target_category_id,
            &self.donor_category_id,
            self.transfer_amount,
        )
    }
}
