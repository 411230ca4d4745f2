// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::UNKNOWN_CATEGORY;
use crate::config::get_currency_symbol;
use crate::models::{Category, Expense, NewExpense};
use crate::store::{delete_expense, get_expense, insert_expense, load_categories, load_expenses, update_expense};
use crate::utils::{
    arg, find_category, fmt_money, maybe_print_json, parse_date, parse_decimal, period_from_args,
    pretty_table, today,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = arg(sub, "id")?;
            delete_expense(conn, id)?;
            println!("Deleted expense {}", id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let categories = load_categories(conn)?;
    let category = find_category(&categories, arg(sub, "category")?)?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let new = NewExpense {
        category_id: category.id.clone(),
        amount: parse_decimal(arg(sub, "amount")?)?,
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        date,
    };
    let e = insert_expense(conn, new)?;
    println!(
        "Recorded {} on {} in {} ({})",
        fmt_money(&e.amount, &get_currency_symbol(conn)?),
        e.date,
        category.name,
        e.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut e = get_expense(conn, arg(sub, "id")?)?;
    if let Some(key) = sub.get_one::<String>("category") {
        let categories = load_categories(conn)?;
        e.category_id = find_category(&categories, key)?.id.clone();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        e.amount = parse_decimal(a)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        e.date = parse_date(d)?;
    }
    if let Some(desc) = sub.get_one::<String>("description") {
        e.description = desc.trim().to_string();
    }
    update_expense(conn, &e)?;
    println!("Updated expense {}", e.id);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

pub fn category_name(categories: &[Category], id: &str) -> String {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}

pub fn to_rows(categories: &[Category], expenses: &[Expense]) -> Vec<ExpenseRow> {
    expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.clone(),
            date: e.date.to_string(),
            category: category_name(categories, &e.category_id),
            amount: e.amount.to_string(),
            description: e.description.clone(),
        })
        .collect()
}

/// Newest first, optionally bounded by period and count.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let categories = load_categories(conn)?;
    let mut expenses = if sub.get_flag("all") {
        load_expenses(conn, None)?
    } else {
        let period = period_from_args(sub)?;
        load_expenses(conn, Some(&period))?
    };
    if let Some(limit) = sub.get_one::<usize>("limit") {
        expenses.truncate(*limit);
    }
    Ok(to_rows(&categories, &expenses))
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Category", "Amount", "Description", "Id"], rows)
        );
    }
    Ok(())
}
