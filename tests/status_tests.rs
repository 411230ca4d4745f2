// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendwise::budget::status::percent_of;
use spendwise::budget::{Spending, budget_report, classify, over_budget_categories, overview};
use spendwise::models::{BudgetStatus, Category};

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn cat(id: &str, limit: &str) -> Category {
    Category {
        id: id.into(),
        name: id.into(),
        limit: d(limit),
        color: "#22c55e".into(),
        is_essential: false,
    }
}

fn spending(pairs: &[(&str, &str)]) -> Spending {
    Spending {
        by_category: pairs
            .iter()
            .map(|(id, v)| (id.to_string(), d(v)))
            .collect(),
        unmatched: Decimal::ZERO,
    }
}

#[test]
fn spending_equal_to_limit_is_not_over_budget() {
    let s = classify(&cat("c1", "1000"), d("1000"));
    assert_ne!(s.status, BudgetStatus::OverBudget);
    assert_eq!(s.status, BudgetStatus::Warning);
    assert_eq!(s.remaining, Decimal::ZERO);
    assert_eq!(s.percentage, d("100"));
}

#[test]
fn above_eighty_percent_is_warning() {
    let s = classify(&cat("c1", "1000"), d("801"));
    assert_eq!(s.status, BudgetStatus::Warning);
    assert_eq!(s.percentage, d("80.1"));

    let at_threshold = classify(&cat("c1", "1000"), d("800"));
    assert_eq!(at_threshold.status, BudgetStatus::Ok);
}

#[test]
fn over_limit_has_negative_remaining() {
    let s = classify(&cat("rent", "2000"), d("2200"));
    assert_eq!(s.status, BudgetStatus::OverBudget);
    assert!(s.is_over_budget());
    assert_eq!(s.remaining, d("-200"));
    assert_eq!(s.percentage, d("110"));
}

#[test]
fn zero_limit_never_divides_by_zero() {
    let idle = classify(&cat("z", "0"), Decimal::ZERO);
    assert_eq!(idle.percentage, Decimal::ZERO);
    assert_eq!(idle.status, BudgetStatus::Ok);

    let spent = classify(&cat("z", "0"), d("5"));
    assert_eq!(spent.percentage, Decimal::ZERO);
    assert_eq!(spent.status, BudgetStatus::OverBudget);
    assert_eq!(percent_of(d("1"), d("-3")), Decimal::ZERO);
}

#[test]
fn percentage_rounds_to_one_decimal() {
    let s = classify(&cat("c", "300"), d("100"));
    assert_eq!(s.percentage, d("33.3"));
}

#[test]
fn status_labels_match_wire_strings() {
    assert_eq!(BudgetStatus::Ok.to_string(), "OK");
    assert_eq!(BudgetStatus::Warning.to_string(), "WARNING");
    assert_eq!(
        serde_json::to_string(&BudgetStatus::OverBudget).unwrap(),
        "\"OVER BUDGET\""
    );
}

#[test]
fn report_and_over_budget_filter_keep_category_order() {
    let cats = vec![cat("a", "100"), cat("b", "50"), cat("c", "10")];
    let sp = spending(&[("a", "150"), ("b", "10"), ("c", "11")]);

    let report = budget_report(&cats, &sp);
    let ids: Vec<&str> = report.iter().map(|s| s.category_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let over: Vec<&str> = over_budget_categories(&cats, &sp)
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(over, vec!["a", "c"]);
}

#[test]
fn overview_combines_income_budget_and_spend() {
    let cats = vec![cat("rent", "2000"), cat("food", "500")];
    let mut sp = spending(&[("rent", "2200"), ("food", "100")]);
    sp.unmatched = d("50");

    let ov = overview(&cats, &sp, d("4000"));
    assert_eq!(ov.total_budget, d("2500"));
    assert_eq!(ov.total_spent, d("2350"));
    assert_eq!(ov.remaining_income, d("1650"));
    assert_eq!(ov.planned_savings, d("1500"));
    assert_eq!(ov.overall_percentage, d("94"));
    assert_eq!(ov.over_budget, vec!["rent".to_string()]);

    let json = serde_json::to_value(&ov).unwrap();
    assert_eq!(json["totalBudget"], serde_json::json!(2500.0));
    assert_eq!(json["categories"][0]["status"], "OVER BUDGET");
}

#[test]
fn huge_spend_against_tiny_limit_saturates_instead_of_overflowing() {
    let tiny = cat("c", "0.0001");
    let spent = d("10000000000000000000000000");
    let s = classify(&tiny, spent);
    assert_eq!(s.status, BudgetStatus::OverBudget);
    assert_eq!(s.percentage, Decimal::MAX);
    assert!(s.remaining < Decimal::ZERO);

    let sp = spending(&[("c", "10000000000000000000000000")]);
    let ov = overview(&[tiny], &sp, d("1000"));
    assert_eq!(ov.overall_percentage, Decimal::MAX);
    assert_eq!(ov.over_budget, vec!["c".to_string()]);
}

#[test]
fn totals_stick_at_the_decimal_bound() {
    let cats = vec![cat("a", "1"), cat("b", "1")];
    let mut sp = spending(&[("a", "1")]);
    sp.by_category.insert("a".into(), Decimal::MAX);
    sp.by_category.insert("b".into(), Decimal::MAX);
    sp.unmatched = Decimal::MAX;
    assert_eq!(sp.total(), Decimal::MAX);

    let ov = overview(&cats, &sp, Decimal::ZERO);
    assert_eq!(ov.total_spent, Decimal::MAX);
    assert_eq!(ov.remaining_income, Decimal::MIN);
}
