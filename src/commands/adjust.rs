// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{
    Donor, TransferPlan, amount_needed, apply_transfer, classify, eligible_donors, plan_transfer,
    spending_by_category,
};
use crate::config::get_currency_symbol;
use crate::models::{Category, Period};
use crate::store::{OrphanPolicy, load_categories, load_expenses, replace_categories};
use crate::utils::{
    arg, find_category, fmt_money, maybe_print_json, parse_decimal, period_from_args, pretty_table,
};
use anyhow::{Result, bail};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorOption {
    #[serde(flatten)]
    pub donor: Donor,
    #[serde(flatten)]
    pub plan: TransferPlan,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorReport {
    pub target: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_needed: Decimal,
    pub donors: Vec<DonorOption>,
    /// Names of essential categories left out of the list.
    pub protected: Vec<String>,
}

pub fn donor_report(conn: &Connection, target_key: &str, period: &Period) -> Result<DonorReport> {
    let categories = load_categories(conn)?;
    let expenses = load_expenses(conn, Some(period))?;
    let spending = spending_by_category(&categories, &expenses, period);
    let target = find_category(&categories, target_key)?.clone();

    let needed = amount_needed(&classify(&target, spending.spent(&target.id)));
    let donors = eligible_donors(&categories, &spending, &target.id)
        .into_iter()
        .map(|d| {
            let plan = plan_transfer(&d, needed);
            DonorOption { donor: d, plan }
        })
        .collect();
    let protected = categories
        .iter()
        .filter(|c| c.is_essential && c.id != target.id)
        .map(|c| c.name.clone())
        .collect();

    Ok(DonorReport {
        target,
        amount_needed: needed,
        donors,
        protected,
    })
}

pub fn donors(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_from_args(sub)?;
    let report = donor_report(conn, arg(sub, "target")?, &period)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    let symbol = get_currency_symbol(conn)?;
    if report.amount_needed.is_zero() {
        println!("'{}' is within its budget", report.target.name);
        return Ok(());
    }
    println!(
        "'{}' is over budget by {}",
        report.target.name,
        fmt_money(&report.amount_needed, &symbol)
    );
    if report.donors.is_empty() {
        println!("No available sources: every non-essential category is at or over its limit");
    } else {
        let rows = report
            .donors
            .iter()
            .map(|o| {
                vec![
                    o.donor.category.name.clone(),
                    fmt_money(&o.donor.remaining, &symbol),
                    if o.plan.fully_covered {
                        "covers full amount".to_string()
                    } else {
                        format!("partial: {}", fmt_money(&o.plan.transfer_amount, &symbol))
                    },
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Donor", "Available", "Coverage"], rows));
    }
    if !report.protected.is_empty() {
        println!("Essential categories are protected: {}", report.protected.join(", "));
    }
    Ok(())
}

pub fn adjust(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_from_args(sub)?;
    let report = donor_report(conn, arg(sub, "target")?, &period)?;
    let categories = load_categories(conn)?;
    let donor = find_category(&categories, arg(sub, "donor")?)?.clone();

    // Only a category with unspent allowance can give, and never more than that.
    let Some(option) = report
        .donors
        .iter()
        .find(|o| o.donor.category.id == donor.id)
    else {
        bail!(
            "'{}' cannot fund this transfer (essential or no remaining budget)",
            donor.name
        );
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(a) => {
            let a = parse_decimal(a)?;
            if a > option.donor.remaining {
                bail!(
                    "'{}' only has {} left this period, cannot give {}",
                    donor.name,
                    option.donor.remaining,
                    a
                );
            }
            a
        }
        None => {
            if report.amount_needed.is_zero() {
                bail!("'{}' is not over budget; pass --amount to move budget anyway", report.target.name);
            }
            option.plan.transfer_amount
        }
    };

    let updated = apply_transfer(&categories, &report.target.id, &donor.id, amount)?;
    let symbol = get_currency_symbol(conn)?;
    let limit_of = |list: &[Category], id: &str| {
        list.iter()
            .find(|c| c.id == id)
            .map(|c| c.limit)
            .unwrap_or_default()
    };
    let rows = vec![
        vec![
            donor.name.clone(),
            fmt_money(&limit_of(&categories, &donor.id), &symbol),
            fmt_money(&limit_of(&updated, &donor.id), &symbol),
        ],
        vec![
            report.target.name.clone(),
            fmt_money(&limit_of(&categories, &report.target.id), &symbol),
            fmt_money(&limit_of(&updated, &report.target.id), &symbol),
        ],
    ];
    println!("{}", pretty_table(&["Category", "Limit before", "Limit after"], rows));
    if amount < report.amount_needed {
        println!(
            "Note: this only partially covers the {} overspend",
            fmt_money(&report.amount_needed, &symbol)
        );
    }

    if sub.get_flag("dry-run") {
        println!("Dry run: nothing saved");
        return Ok(());
    }
    replace_categories(conn, &updated, &OrphanPolicy::Block)?;
    println!(
        "Moved {} from {} to {}",
        fmt_money(&amount, &symbol),
        donor.name,
        report.target.name
    );
    Ok(())
}
