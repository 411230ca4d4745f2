// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure budget computations over caller-supplied snapshots of categories and
//! expenses. Nothing here performs I/O or keeps state between calls.

pub mod adjust;
pub mod aggregate;
pub mod period;
pub mod status;

pub use adjust::{Donor, TransferPlan, amount_needed, apply_transfer, eligible_donors, plan_transfer};
pub use aggregate::{Spending, UNKNOWN_CATEGORY, monthly_total, spending_by_category};
pub use period::{PeriodKind, resolve_period};
pub use status::{budget_report, classify, over_budget_categories, overview};
