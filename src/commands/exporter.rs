// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::expenses::to_rows;
use crate::store::{load_categories, load_expenses};
use crate::utils::{arg, period_from_args};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(sub, "format")?.to_lowercase();
    let out = arg(sub, "out")?;

    // Without an explicit period everything is exported.
    let bounded = ["period", "from", "to", "on"]
        .iter()
        .any(|k| sub.get_one::<String>(k).is_some());
    let period = if bounded { Some(period_from_args(sub)?) } else { None };

    let categories = load_categories(conn)?;
    let mut expenses = load_expenses(conn, period.as_ref())?;
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
    let rows = to_rows(&categories, &expenses);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "category", "amount", "description", "id"])?;
            for r in &rows {
                wtr.write_record([&r.date, &r.category, &r.amount, &r.description, &r.id])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} expenses to {}", rows.len(), out);
    Ok(())
}
