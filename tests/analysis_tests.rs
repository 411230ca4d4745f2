// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;

use anyhow::{Result, anyhow};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use spendwise::analysis::{AnalysisSummary, Narrative, RECENT_TRANSACTIONS, Summarizer, analyze};
use spendwise::error::BudgetError;
use spendwise::models::{Category, Expense, Period};

struct Canned {
    reply: Result<String, String>,
    seen: RefCell<Vec<String>>,
}

impl Canned {
    fn ok(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn failing(msg: &str) -> Self {
        Self {
            reply: Err(msg.to_string()),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Summarizer for Canned {
    fn summarize(&self, prompt: &str) -> Result<String> {
        self.seen.borrow_mut().push(prompt.to_string());
        self.reply.clone().map_err(|e| anyhow!(e))
    }
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn categories() -> Vec<Category> {
    vec![
        Category {
            id: "rent".into(),
            name: "Rent".into(),
            limit: d("2000"),
            color: "#ef4444".into(),
            is_essential: true,
        },
        Category {
            id: "food".into(),
            name: "Food".into(),
            limit: d("500"),
            color: "#f97316".into(),
            is_essential: false,
        },
    ]
}

fn expense(id: &str, category_id: &str, amount: &str, on: &str, desc: &str) -> Expense {
    Expense {
        id: id.into(),
        category_id: category_id.into(),
        amount: d(amount),
        description: desc.into(),
        date: date(on),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
    }
}

fn january() -> Period {
    Period {
        start: date("2024-01-01"),
        end: date("2024-01-31"),
    }
}

#[test]
fn narrative_is_relayed_with_the_numbers() {
    let exps = vec![
        expense("1", "rent", "2200", "2024-01-05", "January rent"),
        expense("2", "food", "45.5", "2024-01-07", ""),
    ];
    let llm = Canned::ok("Rent is over budget. Cook at home.");
    let report = analyze(&categories(), &exps, &january(), &llm, "¥").unwrap();

    assert_eq!(report.narrative.text().unwrap(), "Rent is over budget. Cook at home.");
    assert_eq!(report.summary.total_spent, d("2245.5"));
    assert_eq!(report.summary.total_budget, d("2500"));
    assert_eq!(report.summary.budget_status.len(), 2);
    assert!(report.summary.budget_status[0].is_over_budget());
    assert_eq!(llm.seen.borrow().len(), 1);
}

#[test]
fn prompt_carries_breakdown_and_recent_transactions() {
    let exps = vec![
        expense("1", "rent", "2200", "2024-01-05", "January rent"),
        expense("2", "food", "45.5", "2024-01-07", ""),
        expense("3", "removed", "10", "2024-01-08", "old category"),
    ];
    let llm = Canned::ok("fine");
    analyze(&categories(), &exps, &january(), &llm, "¥").unwrap();
    let prompt = llm.seen.borrow()[0].clone();

    assert!(prompt.contains("EXPENSE DATA (2024-01-01 to 2024-01-31):"));
    assert!(prompt.contains("- Total Spent: ¥2,255.5"));
    assert!(prompt.contains("- Total Budget: ¥2,500"));
    assert!(prompt.contains("- Rent: ¥2,200 / ¥2,000 (110.0%) [OVER BUDGET]"));
    assert!(prompt.contains("- Food: ¥45.5 / ¥500 (9.1%) [OK]"));
    assert!(prompt.contains("- Unknown: ¥10 (no budget)"));
    assert!(prompt.contains("- 2024-01-05: Rent - ¥2,200 (January rent)"));
    assert!(prompt.contains("- 2024-01-07: Food - ¥45.5\n"));
    assert!(prompt.contains("- 2024-01-08: Unknown - ¥10 (old category)"));
    assert!(prompt.contains("Use ¥ for currency."));
}

#[test]
fn recent_list_is_newest_first_and_capped() {
    let start = date("2024-01-01");
    let exps: Vec<Expense> = (0..25)
        .map(|i| {
            let on = (start + Duration::days(i)).format("%Y-%m-%d").to_string();
            expense(&i.to_string(), "food", "1", &on, "")
        })
        .collect();
    let summary = AnalysisSummary::build(&categories(), &exps, &january());

    assert_eq!(summary.recent.len(), RECENT_TRANSACTIONS);
    assert_eq!(summary.recent[0].date, date("2024-01-25"));
    assert_eq!(summary.recent[19].date, date("2024-01-06"));
    // totals still include everything in the period
    assert_eq!(summary.total_spent, d("25"));
}

#[test]
fn summarizer_failure_keeps_the_numbers() {
    let exps = vec![expense("1", "food", "20", "2024-01-02", "")];
    let llm = Canned::failing("HTTP 503");
    let report = analyze(&categories(), &exps, &january(), &llm, "$").unwrap();

    match &report.narrative {
        Narrative::Unavailable { reason } => assert!(reason.contains("503")),
        other => panic!("unexpected narrative {:?}", other),
    }
    assert!(matches!(
        report.narrative.text(),
        Err(BudgetError::AnalysisUnavailable(_))
    ));
    assert_eq!(report.summary.total_spent, d("20"));
}

#[test]
fn blank_reply_counts_as_unavailable() {
    let exps = vec![expense("1", "food", "20", "2024-01-02", "")];
    let report = analyze(&categories(), &exps, &january(), &Canned::ok("   \n"), "¥").unwrap();
    assert!(report.narrative.text().is_err());
}

#[test]
fn empty_period_is_rejected_before_calling_out() {
    let exps = vec![expense("1", "food", "20", "2023-12-30", "")];
    let llm = Canned::ok("unused");
    let err = analyze(&categories(), &exps, &january(), &llm, "¥").unwrap_err();
    assert_eq!(
        err,
        BudgetError::NoExpensesInPeriod {
            start: date("2024-01-01"),
            end: date("2024-01-31"),
        }
    );
    assert!(llm.seen.borrow().is_empty());
}

#[test]
fn report_serializes_narrative_state() {
    let exps = vec![expense("1", "food", "20", "2024-01-02", "")];
    let report = analyze(&categories(), &exps, &january(), &Canned::ok("ok"), "¥").unwrap();
    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["narrative"]["state"], "available");
    assert_eq!(v["narrative"]["text"], "ok");
    assert_eq!(v["summary"]["budgetStatus"][1]["status"], "OK");
}
