// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending analysis: a fixed-shape summary of a period is rendered into a
//! prompt for an external text generator, and whatever text comes back is
//! relayed untouched next to the numbers it was based on.

use std::fmt::Write as _;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::budget::aggregate::{UNKNOWN_CATEGORY, saturating_sum, spending_by_category};
use crate::budget::status::budget_report;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryStatus, Expense, Period};
use crate::utils::fmt_money;

pub const RECENT_TRANSACTIONS: usize = 20;

/// Text in, text out. Implemented over HTTP by [`crate::llm::GroqClient`].
pub trait Summarizer {
    fn summarize(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub date: NaiveDate,
    pub category_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub period: Period,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_budget: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unmatched: Decimal,
    pub budget_status: Vec<CategoryStatus>,
    pub recent: Vec<RecentTransaction>,
}

impl AnalysisSummary {
    pub fn build(categories: &[Category], expenses: &[Expense], period: &Period) -> Self {
        let spending = spending_by_category(categories, expenses, period);

        let mut in_period: Vec<&Expense> =
            expenses.iter().filter(|e| period.contains(e.date)).collect();
        in_period.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        let recent = in_period
            .into_iter()
            .take(RECENT_TRANSACTIONS)
            .map(|e| RecentTransaction {
                date: e.date,
                category_name: categories
                    .iter()
                    .find(|c| c.id == e.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
                amount: e.amount,
                description: e.description.clone(),
            })
            .collect();

        Self {
            period: *period,
            total_spent: spending.total(),
            total_budget: saturating_sum(categories.iter().map(|c| c.limit)),
            unmatched: spending.unmatched,
            budget_status: budget_report(categories, &spending),
            recent,
        }
    }

    pub fn prompt(&self, currency: &str) -> String {
        let money = |d: Decimal| fmt_money(&d, currency);
        let mut p = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(
            p,
            "You are a personal finance advisor analyzing expense data. Be concise and actionable.\n"
        );
        let _ = writeln!(p, "EXPENSE DATA ({} to {}):", self.period.start, self.period.end);
        let _ = writeln!(p, "- Total Spent: {}", money(self.total_spent));
        let _ = writeln!(p, "- Total Budget: {}\n", money(self.total_budget));

        let _ = writeln!(p, "CATEGORY BREAKDOWN:");
        for s in &self.budget_status {
            let _ = writeln!(
                p,
                "- {}: {} / {} ({:.1}%) [{}]",
                s.category_name,
                money(s.spent),
                money(s.limit),
                s.percentage,
                s.status
            );
        }
        if self.unmatched > Decimal::ZERO {
            let _ = writeln!(p, "- {}: {} (no budget)", UNKNOWN_CATEGORY, money(self.unmatched));
        }

        let _ = writeln!(p, "\nRECENT TRANSACTIONS:");
        for t in &self.recent {
            let _ = write!(p, "- {}: {} - {}", t.date, t.category_name, money(t.amount));
            if !t.description.is_empty() {
                let _ = write!(p, " ({})", t.description);
            }
            p.push('\n');
        }

        let _ = write!(
            p,
            "\nPlease provide a brief analysis (max 200 words) covering:\n\
             1. Where is most money being spent?\n\
             2. Which categories are over budget or at risk?\n\
             3. One specific, actionable tip to save money\n\n\
             Use {} for currency. Be direct and helpful.",
            currency
        );
        p
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Narrative {
    Available { text: String },
    Unavailable { reason: String },
}

impl Narrative {
    pub fn text(&self) -> BudgetResult<&str> {
        match self {
            Narrative::Available { text } => Ok(text),
            Narrative::Unavailable { reason } => {
                Err(BudgetError::AnalysisUnavailable(reason.clone()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub narrative: Narrative,
}

/// Build the summary, ask the summarizer for a narrative and package both.
///
/// A summarizer failure or blank answer never fails the call: the numbers
/// are returned with the narrative marked unavailable. Only a period without
/// any expenses is rejected up front.
pub fn analyze(
    categories: &[Category],
    expenses: &[Expense],
    period: &Period,
    summarizer: &dyn Summarizer,
    currency: &str,
) -> BudgetResult<AnalysisReport> {
    if !expenses.iter().any(|e| period.contains(e.date)) {
        return Err(BudgetError::NoExpensesInPeriod {
            start: period.start,
            end: period.end,
        });
    }

    let summary = AnalysisSummary::build(categories, expenses, period);
    let prompt = summary.prompt(currency);
    debug!(chars = prompt.len(), "requesting spending summary");

    let narrative = match summarizer.summarize(&prompt) {
        Ok(text) if !text.trim().is_empty() => Narrative::Available { text },
        Ok(_) => {
            warn!("summarizer returned an empty response");
            Narrative::Unavailable {
                reason: "summarizer returned no text".into(),
            }
        }
        Err(e) => {
            warn!(error = %e, "summarizer failed");
            Narrative::Unavailable {
                reason: format!("{:#}", e),
            }
        }
    };

    Ok(AnalysisReport { summary, narrative })
}
