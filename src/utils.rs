// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::budget::{PeriodKind, resolve_period};
use crate::models::{Category, Period};

const UA: &str = concat!(
    "spendwise/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/spendwise)"
);

pub fn http_client(timeout: std::time::Duration) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(anyhow!("Invalid boolean '{}', expected true|false", s)),
    }
}

/// Required string argument; clap enforces presence, this keeps callers
/// free of unwraps.
pub fn arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .with_context(|| format!("Missing argument '{}'", name))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Resolve `--period/--from/--to/--on` into concrete dates.
pub fn period_from_args(m: &clap::ArgMatches) -> Result<Period> {
    let kind: PeriodKind = m
        .get_one::<String>("period")
        .map(|s| s.parse::<PeriodKind>())
        .transpose()?
        .unwrap_or(PeriodKind::ThisMonth);
    let on = m
        .get_one::<String>("on")
        .map(|s| parse_date(s))
        .transpose()?
        .unwrap_or_else(today);
    let from = m.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = m.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    Ok(resolve_period(kind, on, from, to)?)
}

/// Look a category up by id first, then by case-insensitive name.
pub fn find_category<'a>(categories: &'a [Category], key: &str) -> Result<&'a Category> {
    let key = key.trim();
    categories
        .iter()
        .find(|c| c.id == key)
        .or_else(|| {
            categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(key))
        })
        .with_context(|| format!("Category '{}' not found", key))
}

/// `¥2,200`, `-¥200`, `$12.5`: two decimals at most, thousands grouped.
pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    let v = d.round_dp(2).normalize();
    let digits = v.abs().to_string();
    let (int, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v.is_sign_negative() && !v.is_zero() { "-" } else { "" };
    match frac {
        Some(f) => format!("{}{}{}.{}", sign, symbol, grouped, f),
        None => format!("{}{}{}", sign, symbol, grouped),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line.
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
