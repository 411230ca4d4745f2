// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::aggregate::{daily_totals, distribution, saturating_sum};
use crate::budget::period::{month_of, parse_month};
use crate::budget::{Spending, UNKNOWN_CATEGORY, overview, spending_by_category};
use crate::commands::expenses::category_name;
use crate::config::{get_currency_symbol, get_monthly_income};
use crate::models::{BudgetStatus, Category, Expense, Period};
use crate::store::{expenses_on, load_categories, load_expenses};
use crate::utils::{fmt_money, maybe_print_json, parse_date, period_from_args, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

fn snapshot(conn: &Connection, period: &Period) -> Result<(Vec<Category>, Spending)> {
    let categories = load_categories(conn)?;
    let expenses = load_expenses(conn, Some(period))?;
    let spending = spending_by_category(&categories, &expenses, period);
    Ok((categories, spending))
}

pub fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_from_args(sub)?;
    let (categories, spending) = snapshot(conn, &period)?;
    let ov = overview(&categories, &spending, get_monthly_income(conn)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ov)? {
        return Ok(());
    }

    let symbol = get_currency_symbol(conn)?;
    let money = |d: &Decimal| fmt_money(d, &symbol);

    println!("Period {} to {}", period.start, period.end);
    if !ov.over_budget.is_empty() {
        println!(
            "Budget alert: over budget in {}",
            ov.over_budget.join(", ")
        );
    }

    let mut rows: Vec<Vec<String>> = ov
        .categories
        .iter()
        .map(|s| {
            let left = if s.remaining < Decimal::ZERO {
                format!("over by {}", money(&s.remaining.abs()))
            } else {
                format!("{} left", money(&s.remaining))
            };
            vec![
                s.category_name.clone(),
                money(&s.spent),
                money(&s.limit),
                format!("{:.1}%", s.percentage),
                left,
                s.status.to_string(),
            ]
        })
        .collect();
    if ov.unmatched > Decimal::ZERO {
        rows.push(vec![
            UNKNOWN_CATEGORY.into(),
            money(&ov.unmatched),
            "-".into(),
            "-".into(),
            "-".into(),
            "-".into(),
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["Category", "Spent", "Limit", "Used", "Remaining", "Status"],
            rows
        )
    );

    let summary = vec![
        vec!["Monthly income".into(), money(&ov.monthly_income)],
        vec!["Total budget".into(), money(&ov.total_budget)],
        vec!["Total spent".into(), money(&ov.total_spent)],
        vec!["Overall progress".into(), format!("{:.1}%", ov.overall_percentage)],
        vec!["Remaining from income".into(), money(&ov.remaining_income)],
    ];
    println!("{}", pretty_table(&["Overview", ""], summary));

    let slices = distribution(&categories, &spending);
    if !slices.is_empty() {
        let rows = slices
            .into_iter()
            .map(|s| vec![s.name, money(&s.spent), format!("{:.1}%", s.share)])
            .collect();
        println!("{}", pretty_table(&["Distribution", "Spent", "Share"], rows));
    }

    let warnings = ov
        .categories
        .iter()
        .filter(|s| s.status == BudgetStatus::Warning)
        .count();
    if warnings > 0 {
        println!("{} categor{} above 80% of limit", warnings, if warnings == 1 { "y" } else { "ies" });
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

pub fn day_detail(conn: &Connection, date: NaiveDate) -> Result<DayDetail> {
    let expenses = expenses_on(conn, date)?;
    Ok(DayDetail {
        date,
        total: saturating_sum(expenses.iter().map(|e| e.amount)),
        expenses,
    })
}

pub fn calendar_totals(conn: &Connection, period: &Period) -> Result<Vec<DayTotal>> {
    let expenses = load_expenses(conn, Some(period))?;
    Ok(daily_totals(&expenses, period)
        .into_iter()
        .map(|(date, total)| DayTotal { date, total })
        .collect())
}

pub fn day(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let detail = day_detail(conn, date)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &detail)? {
        return Ok(());
    }
    let categories = load_categories(conn)?;
    let DayDetail { total, expenses, .. } = detail;

    let symbol = get_currency_symbol(conn)?;
    if expenses.is_empty() {
        println!("No expenses on {}", date);
        return Ok(());
    }
    let rows = expenses
        .iter()
        .map(|e| {
            vec![
                category_name(&categories, &e.category_id),
                fmt_money(&e.amount, &symbol),
                e.description.clone(),
                e.id.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Amount", "Description", "Id"], rows));
    println!("Total for {}: {}", date, fmt_money(&total, &symbol));
    Ok(())
}

pub fn calendar(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => month_of(today())?,
    };
    let days = calendar_totals(conn, &period)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &days)? {
        return Ok(());
    }

    let symbol = get_currency_symbol(conn)?;
    let title = period.start.format("%B %Y").to_string();
    let rows = days
        .iter()
        .map(|d| vec![d.date.format("%a %d").to_string(), fmt_money(&d.total, &symbol)])
        .collect();
    println!("{}", pretty_table(&[title.as_str(), "Spent"], rows));
    Ok(())
}
