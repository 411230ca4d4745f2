// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use spendwise::budget::aggregate::{daily_totals, distribution};
use spendwise::budget::{classify, monthly_total, spending_by_category};
use spendwise::models::{BudgetStatus, Category, Expense, Period};

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn category(id: &str, limit: &str) -> Category {
    Category {
        id: id.into(),
        name: id.to_uppercase(),
        limit: d(limit),
        color: "#3b82f6".into(),
        is_essential: false,
    }
}

fn expense(id: &str, category_id: &str, amount: &str, on: &str) -> Expense {
    Expense {
        id: id.into(),
        category_id: category_id.into(),
        amount: d(amount),
        description: String::new(),
        date: date(on),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    }
}

fn january() -> Period {
    Period {
        start: date("2024-01-01"),
        end: date("2024-01-31"),
    }
}

#[test]
fn every_category_gets_an_entry_even_without_spend() {
    let cats = vec![category("food", "500"), category("fun", "100")];
    let spending = spending_by_category(&cats, &[], &january());
    assert_eq!(spending.by_category.len(), 2);
    assert_eq!(spending.spent("food"), Decimal::ZERO);
    assert_eq!(spending.spent("fun"), Decimal::ZERO);
    assert_eq!(spending.total(), Decimal::ZERO);
    for c in &cats {
        let s = classify(c, spending.spent(&c.id));
        assert_eq!(s.status, BudgetStatus::Ok);
        assert_eq!(s.remaining, c.limit);
        assert_eq!(s.percentage, Decimal::ZERO);
    }
}

#[test]
fn sums_per_category_within_period_bounds() {
    let cats = vec![category("food", "500"), category("fun", "100")];
    let exps = vec![
        expense("1", "food", "12.50", "2024-01-01"),
        expense("2", "food", "7.25", "2024-01-31"),
        expense("3", "fun", "30", "2024-01-15"),
        // outside the window on both sides
        expense("4", "food", "99", "2023-12-31"),
        expense("5", "fun", "99", "2024-02-01"),
    ];
    let spending = spending_by_category(&cats, &exps, &january());
    assert_eq!(spending.spent("food"), d("19.75"));
    assert_eq!(spending.spent("fun"), d("30"));
    assert_eq!(spending.unmatched, Decimal::ZERO);
}

#[test]
fn orphaned_expenses_go_to_unmatched_and_still_count_in_total() {
    let cats = vec![category("food", "500")];
    let exps = vec![
        expense("1", "food", "40", "2024-01-03"),
        expense("2", "deleted-category", "15", "2024-01-04"),
    ];
    let spending = spending_by_category(&cats, &exps, &january());
    assert_eq!(spending.spent("food"), d("40"));
    assert_eq!(spending.unmatched, d("15"));
    assert!(!spending.by_category.contains_key("deleted-category"));
    assert_eq!(spending.total(), monthly_total(&exps, &january()));
}

#[test]
fn result_does_not_depend_on_expense_order() {
    let cats = vec![category("food", "500"), category("fun", "100")];
    let mut exps = vec![
        expense("1", "food", "0.10", "2024-01-02"),
        expense("2", "fun", "0.20", "2024-01-03"),
        expense("3", "food", "0.30", "2024-01-04"),
        expense("4", "gone", "1.00", "2024-01-05"),
    ];
    let first = spending_by_category(&cats, &exps, &january());
    exps.reverse();
    let second = spending_by_category(&cats, &exps, &january());
    assert_eq!(first, second);
    assert_eq!(first.spent("food"), d("0.40"));
}

#[test]
fn monthly_total_ignores_categories() {
    let exps = vec![
        expense("1", "a", "10", "2024-01-10"),
        expense("2", "b", "5.5", "2024-01-20"),
        expense("3", "a", "100", "2024-02-10"),
    ];
    assert_eq!(monthly_total(&exps, &january()), d("15.5"));
    assert_eq!(monthly_total(&[], &january()), Decimal::ZERO);
}

#[test]
fn distribution_skips_idle_categories_and_lists_unknown_last() {
    let cats = vec![
        category("food", "500"),
        category("idle", "100"),
        category("fun", "100"),
    ];
    let exps = vec![
        expense("1", "food", "50", "2024-01-02"),
        expense("2", "fun", "25", "2024-01-03"),
        expense("3", "gone", "25", "2024-01-04"),
    ];
    let spending = spending_by_category(&cats, &exps, &january());
    let slices = distribution(&cats, &spending);
    let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["FOOD", "FUN", "Unknown"]);
    assert_eq!(slices[0].share, d("50"));
    assert_eq!(slices[2].color, None);
}

#[test]
fn daily_totals_group_by_date() {
    let exps = vec![
        expense("1", "food", "10", "2024-01-05"),
        expense("2", "fun", "2.5", "2024-01-05"),
        expense("3", "food", "4", "2024-01-09"),
        expense("4", "food", "4", "2024-02-09"),
    ];
    let days = daily_totals(&exps, &january());
    assert_eq!(days.len(), 2);
    assert_eq!(days[&date("2024-01-05")], d("12.5"));
    assert_eq!(days[&date("2024-01-09")], d("4"));
}
