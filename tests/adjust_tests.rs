// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use spendwise::budget::adjust::TransferRequest;
use spendwise::budget::{
    amount_needed, apply_transfer, classify, eligible_donors, plan_transfer, spending_by_category,
};
use spendwise::error::BudgetError;
use spendwise::models::{Category, Expense, Period};

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn cat(id: &str, limit: &str, essential: bool) -> Category {
    Category {
        id: id.into(),
        name: id.into(),
        limit: d(limit),
        color: "#ef4444".into(),
        is_essential: essential,
    }
}

fn expense(category_id: &str, amount: &str, on: &str) -> Expense {
    Expense {
        id: format!("{}-{}", category_id, on),
        category_id: category_id.into(),
        amount: d(amount),
        description: String::new(),
        date: date(on),
        created_at: Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap(),
    }
}

fn january() -> Period {
    Period {
        start: date("2024-01-01"),
        end: date("2024-01-31"),
    }
}

fn total_limits(categories: &[Category]) -> Decimal {
    categories.iter().map(|c| c.limit).sum()
}

#[test]
fn rent_overspend_is_covered_by_food() {
    let cats = vec![cat("rent", "2000", true), cat("food", "500", false)];
    let exps = vec![expense("rent", "2200", "2024-01-05")];
    let spending = spending_by_category(&cats, &exps, &january());

    let rent = classify(&cats[0], spending.spent("rent"));
    assert_eq!(rent.remaining, d("-200"));
    assert!(rent.is_over_budget());
    let food = classify(&cats[1], spending.spent("food"));
    assert_eq!(food.spent, Decimal::ZERO);
    assert_eq!(food.remaining, d("500"));

    let donors = eligible_donors(&cats, &spending, "rent");
    assert_eq!(donors.len(), 1);
    assert_eq!(donors[0].category.id, "food");
    assert_eq!(donors[0].remaining, d("500"));

    let needed = amount_needed(&rent);
    assert_eq!(needed, d("200"));
    let plan = plan_transfer(&donors[0], needed);
    assert_eq!(plan.transfer_amount, d("200"));
    assert!(plan.fully_covered);

    let updated = apply_transfer(&cats, "rent", "food", plan.transfer_amount).unwrap();
    assert_eq!(updated[0].limit, d("2200"));
    assert_eq!(updated[1].limit, d("300"));
    assert_eq!(total_limits(&updated), total_limits(&cats));
    // input untouched
    assert_eq!(cats[0].limit, d("2000"));
}

#[test]
fn partial_coverage_is_capped_at_donor_remaining() {
    let cats = vec![cat("fun", "100", false), cat("food", "300", false)];
    let exps = vec![
        expense("fun", "60", "2024-01-02"),
        expense("food", "450", "2024-01-03"),
    ];
    let spending = spending_by_category(&cats, &exps, &january());
    let donors = eligible_donors(&cats, &spending, "food");
    assert_eq!(donors[0].remaining, d("40"));

    let plan = plan_transfer(&donors[0], d("150"));
    assert_eq!(plan.transfer_amount, d("40"));
    assert!(!plan.fully_covered);

    // negative deficits are treated by magnitude
    let plan = plan_transfer(&donors[0], d("-30"));
    assert_eq!(plan.transfer_amount, d("30"));
    assert!(plan.fully_covered);
}

#[test]
fn donors_exclude_target_essentials_and_exhausted_categories() {
    let cats = vec![
        cat("rent", "1000", true),
        cat("utilities", "200", true),
        cat("food", "300", false),
        cat("fun", "100", false),
        cat("travel", "50", false),
    ];
    let exps = vec![
        expense("rent", "1200", "2024-01-01"),
        expense("fun", "100", "2024-01-02"),
        expense("travel", "80", "2024-01-03"),
    ];
    let spending = spending_by_category(&cats, &exps, &january());
    let ids: Vec<String> = eligible_donors(&cats, &spending, "rent")
        .into_iter()
        .map(|d| d.category.id)
        .collect();
    assert_eq!(ids, vec!["food".to_string()]);

    // the target is never its own donor
    let ids: Vec<String> = eligible_donors(&cats, &spending, "food")
        .into_iter()
        .map(|d| d.category.id)
        .collect();
    assert!(ids.is_empty());
}

#[test]
fn within_budget_needs_nothing() {
    let s = classify(&cat("food", "300", false), d("120"));
    assert_eq!(amount_needed(&s), Decimal::ZERO);
}

#[test]
fn apply_transfer_rejections() {
    let cats = vec![
        cat("rent", "2000", true),
        cat("food", "500", false),
        cat("fun", "100", false),
    ];

    let err = apply_transfer(&cats, "food", "rent", d("10")).unwrap_err();
    assert!(matches!(err, BudgetError::InvalidTransfer(_)));

    let err = apply_transfer(&cats, "food", "food", d("10")).unwrap_err();
    assert!(matches!(err, BudgetError::InvalidTransfer(_)));

    let err = apply_transfer(&cats, "rent", "food", Decimal::ZERO).unwrap_err();
    assert!(matches!(err, BudgetError::InvalidTransfer(_)));

    let err = apply_transfer(&cats, "rent", "fun", d("100.01")).unwrap_err();
    assert!(matches!(err, BudgetError::InvalidTransfer(_)));

    let err = apply_transfer(&cats, "missing", "food", d("10")).unwrap_err();
    assert_eq!(err, BudgetError::UnknownCategory("missing".into()));

    let err = apply_transfer(&cats, "rent", "missing", d("10")).unwrap_err();
    assert_eq!(err, BudgetError::UnknownCategory("missing".into()));
}

#[test]
fn only_target_and_donor_change() {
    let cats = vec![
        cat("rent", "2000", true),
        cat("food", "500", false),
        cat("fun", "100", false),
    ];
    let req = TransferRequest {
        target_category_id: "rent".into(),
        donor_category_id: "fun".into(),
        transfer_amount: d("100"),
    };
    let updated = req.apply(&cats).unwrap();
    assert_eq!(updated[0].limit, d("2100"));
    assert_eq!(updated[1], cats[1]);
    assert_eq!(updated[2].limit, Decimal::ZERO);
    assert_eq!(total_limits(&updated), d("2600"));
}

#[test]
fn transfer_request_reads_camel_case_json() {
    let req: TransferRequest = serde_json::from_str(
        r#"{"targetCategoryId":"rent","donorCategoryId":"food","transferAmount":200}"#,
    )
    .unwrap();
    assert_eq!(req.transfer_amount, d("200"));
    assert_eq!(req.donor_category_id, "food");
}
