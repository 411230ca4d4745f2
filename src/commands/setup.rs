// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{
    get_currency_symbol, get_monthly_income, is_setup_complete, set_currency_symbol,
    set_monthly_income, set_setup_complete,
};
use crate::budget::aggregate::saturating_sum;
use crate::models::Category;
use crate::store::{OrphanPolicy, load_categories, palette_color, replace_categories, reset};
use crate::utils::{arg, fmt_money, parse_decimal, pretty_table};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;

/// `NAME:LIMIT[:COLOR][:essential]`. Without a colour the palette entry for
/// `index` is used.
pub fn parse_category_arg(raw: &str, index: usize) -> Result<Category> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    if parts.len() < 2 || parts[0].is_empty() {
        bail!(
            "Invalid category '{}', expected NAME:LIMIT[:COLOR][:essential]",
            raw
        );
    }
    let limit = parse_decimal(parts[1])
        .with_context(|| format!("Invalid limit in category '{}'", raw))?;

    let mut color = palette_color(index).to_string();
    let mut essential = false;
    for extra in &parts[2..] {
        if extra.eq_ignore_ascii_case("essential") {
            essential = true;
        } else if !extra.is_empty() {
            color = extra.to_string();
        }
    }
    Ok(Category::new(parts[0], limit, &color, essential))
}

pub fn handle_setup(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let income = parse_decimal(arg(sub, "income")?)?;
    let raw: Vec<&String> = sub
        .get_many::<String>("category")
        .map(|v| v.collect())
        .unwrap_or_default();
    let categories = raw
        .iter()
        .enumerate()
        .map(|(i, s)| parse_category_arg(s, i))
        .collect::<Result<Vec<_>>>()?;

    if is_setup_complete(conn)? && !sub.get_flag("force") {
        bail!("Budget is already set up; pass --force to replace it");
    }

    // Setup starts a fresh list, so every previous category is dropped.
    let saved = replace_categories(conn, &categories, &OrphanPolicy::Keep)?;
    set_monthly_income(conn, income)?;
    if let Some(sym) = sub.get_one::<String>("currency") {
        set_currency_symbol(conn, sym.trim())?;
    }
    set_setup_complete(conn, true)?;

    let symbol = get_currency_symbol(conn)?;
    let total = saturating_sum(saved.iter().map(|c| c.limit));
    println!(
        "Budget set up with {} categories: {} budgeted of {} income ({} left to save)",
        saved.len(),
        fmt_money(&total, &symbol),
        fmt_money(&income, &symbol),
        fmt_money(&income.saturating_sub(total), &symbol)
    );
    Ok(())
}

pub fn handle_settings(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income", sub)) => {
            let income = parse_decimal(arg(sub, "amount")?)?;
            set_monthly_income(conn, income)?;
            println!(
                "Monthly income set to {}",
                fmt_money(&income, &get_currency_symbol(conn)?)
            );
        }
        Some(("currency", sub)) => {
            let sym = arg(sub, "symbol")?.trim();
            set_currency_symbol(conn, sym)?;
            println!("Currency symbol set to {}", sym);
        }
        _ => {
            let symbol = get_currency_symbol(conn)?;
            let income = get_monthly_income(conn)?;
            let budgeted = saturating_sum(load_categories(conn)?.iter().map(|c| c.limit));
            let rows = vec![
                vec!["Setup complete".into(), is_setup_complete(conn)?.to_string()],
                vec!["Currency symbol".into(), symbol.clone()],
                vec!["Monthly income".into(), fmt_money(&income, &symbol)],
                vec!["Total budget".into(), fmt_money(&budgeted, &symbol)],
                vec!["Planned savings".into(), fmt_money(&income.saturating_sub(budgeted), &symbol)],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
    }
    Ok(())
}

pub fn handle_reset(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("Refusing to delete all data without --yes");
    }
    reset(conn)?;
    println!("All categories and expenses removed");
    Ok(())
}
