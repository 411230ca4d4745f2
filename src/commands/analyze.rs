// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::{AnalysisReport, Narrative, Summarizer, analyze};
use crate::config::{LlmConfig, get_currency_symbol};
use crate::llm::GroqClient;
use crate::models::Period;
use crate::store::{load_categories, load_expenses};
use crate::utils::{fmt_money, maybe_print_json, period_from_args, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// Stands in when no API key is configured, so the numbers are still shown.
struct Unconfigured(String);

impl Summarizer for Unconfigured {
    fn summarize(&self, _prompt: &str) -> Result<String> {
        Err(anyhow::anyhow!(self.0.clone()))
    }
}

pub fn run_analysis(
    conn: &Connection,
    period: &Period,
    summarizer: &dyn Summarizer,
) -> Result<AnalysisReport> {
    let categories = load_categories(conn)?;
    let expenses = load_expenses(conn, Some(period))?;
    let symbol = get_currency_symbol(conn)?;
    Ok(analyze(&categories, &expenses, period, summarizer, &symbol)?)
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_from_args(sub)?;
    let report = match GroqClient::new(LlmConfig::from_env()?) {
        Ok(client) => run_analysis(conn, &period, &client)?,
        Err(e) => run_analysis(conn, &period, &Unconfigured(format!("{:#}", e)))?,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    let symbol = get_currency_symbol(conn)?;
    let s = &report.summary;
    println!("Period {} to {}", s.period.start, s.period.end);
    println!(
        "Total spent {} of {} budgeted",
        fmt_money(&s.total_spent, &symbol),
        fmt_money(&s.total_budget, &symbol)
    );
    println!();
    match &report.narrative {
        Narrative::Available { text } => println!("{}", text),
        Narrative::Unavailable { reason } => println!("AI insights unavailable: {}", reason),
    }
    println!();

    let rows = s
        .budget_status
        .iter()
        .map(|b| {
            vec![
                b.category_name.clone(),
                format!("{:.1}%", b.percentage),
                b.status.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Used", "Status"], rows));
    Ok(())
}
