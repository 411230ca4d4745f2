// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite persistence for categories and expenses.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use tracing::info;

use crate::config;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, Expense, NewExpense, Period};

/// What happens to expenses whose category disappears in a list replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Refuse to drop a category that still has expenses.
    Block,
    /// Move its expenses to this category (must be in the new list).
    Reassign(String),
    /// Leave them in place; they show up as "Unknown".
    Keep,
}

pub const DEFAULT_PALETTE: [&str; 8] = [
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#3b82f6", "#8b5cf6", "#ec4899", "#6b7280",
];

pub fn palette_color(index: usize) -> &'static str {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

fn parse_amount(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' in database", what, s))
}

pub fn load_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, limit_amount, color, is_essential FROM categories ORDER BY position, rowid",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, bool>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, limit, color, is_essential) = row?;
        out.push(Category {
            limit: parse_amount(&limit, "limit")?,
            id,
            name,
            color,
            is_essential,
        });
    }
    Ok(out)
}

fn collect_expenses(stmt: &mut rusqlite::Statement<'_>, p: impl rusqlite::Params) -> Result<Vec<Expense>> {
    let rows = stmt.query_map(p, |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, NaiveDate>(4)?,
            r.get::<_, DateTime<Utc>>(5)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, category_id, amount, description, date, created_at) = row?;
        out.push(Expense {
            amount: parse_amount(&amount, "amount")?,
            id,
            category_id,
            description,
            date,
            created_at,
        });
    }
    Ok(out)
}

const EXPENSE_COLS: &str = "SELECT id, category_id, amount, description, date, created_at FROM expenses";

/// Newest first. `None` loads every expense.
pub fn load_expenses(conn: &Connection, period: Option<&Period>) -> Result<Vec<Expense>> {
    match period {
        Some(p) => {
            let mut stmt = conn.prepare(&format!(
                "{EXPENSE_COLS} WHERE date>=?1 AND date<=?2 ORDER BY date DESC, created_at DESC"
            ))?;
            collect_expenses(&mut stmt, params![p.start, p.end])
        }
        None => {
            let mut stmt =
                conn.prepare(&format!("{EXPENSE_COLS} ORDER BY date DESC, created_at DESC"))?;
            collect_expenses(&mut stmt, params![])
        }
    }
}

pub fn expenses_on(conn: &Connection, date: NaiveDate) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "{EXPENSE_COLS} WHERE date=?1 ORDER BY created_at DESC"
    ))?;
    collect_expenses(&mut stmt, params![date])
}

pub fn get_expense(conn: &Connection, id: &str) -> Result<Expense> {
    let mut stmt = conn.prepare(&format!("{EXPENSE_COLS} WHERE id=?1"))?;
    collect_expenses(&mut stmt, params![id])?
        .pop()
        .with_context(|| format!("Expense '{}' not found", id))
}

/// Ids unique, names present, limits non-negative.
pub fn validate_categories(categories: &[Category]) -> BudgetResult<()> {
    let mut seen = HashSet::new();
    for c in categories {
        if c.id.trim().is_empty() {
            return Err(BudgetError::Validation("category id cannot be empty".into()));
        }
        if !seen.insert(c.id.as_str()) {
            return Err(BudgetError::Validation(format!(
                "duplicate category id '{}'",
                c.id
            )));
        }
        if c.name.trim().is_empty() {
            return Err(BudgetError::Validation(format!(
                "category '{}' needs a name",
                c.id
            )));
        }
        if c.limit < Decimal::ZERO {
            return Err(BudgetError::Validation(format!(
                "limit for '{}' cannot be negative",
                c.name
            )));
        }
    }
    Ok(())
}

fn expense_count(conn: &Connection, category_id: &str) -> Result<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM expenses WHERE category_id=?1",
        params![category_id],
        |r| r.get(0),
    )?)
}

/// Make the stored category list equal to `categories`, in that order.
///
/// This is the only way categories are removed; `policy` decides what
/// happens to expenses of removed categories.
pub fn replace_categories(
    conn: &mut Connection,
    categories: &[Category],
    policy: &OrphanPolicy,
) -> Result<Vec<Category>> {
    validate_categories(categories)?;
    if let OrphanPolicy::Reassign(to) = policy {
        if !categories.iter().any(|c| &c.id == to) {
            bail!("Cannot reassign expenses to '{}': not in the new category list", to);
        }
    }

    let tx = conn.transaction()?;
    let existing: Vec<String> = {
        let mut stmt = tx.prepare("SELECT id FROM categories")?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        rows.collect::<rusqlite::Result<_>>()?
    };
    let keep: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();

    for removed in existing.iter().filter(|id| !keep.contains(id.as_str())) {
        let n = expense_count(&tx, removed)?;
        if n > 0 {
            match policy {
                OrphanPolicy::Block => bail!(
                    "Category '{}' still has {} expense(s); reassign or keep them explicitly",
                    removed,
                    n
                ),
                OrphanPolicy::Reassign(to) => {
                    tx.execute(
                        "UPDATE expenses SET category_id=?1 WHERE category_id=?2",
                        params![to, removed],
                    )?;
                }
                OrphanPolicy::Keep => {}
            }
        }
        tx.execute("DELETE FROM categories WHERE id=?1", params![removed])?;
        info!(category = %removed, orphans = n, "category removed");
    }

    for (pos, c) in categories.iter().enumerate() {
        tx.execute(
            "INSERT INTO categories(id, name, limit_amount, color, is_essential, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET name=excluded.name, limit_amount=excluded.limit_amount,
                color=excluded.color, is_essential=excluded.is_essential, position=excluded.position",
            params![
                c.id,
                c.name.trim(),
                c.limit.to_string(),
                c.color,
                c.is_essential,
                pos as i64
            ],
        )?;
    }
    tx.commit()?;
    info!(count = categories.len(), "category list saved");
    load_categories(conn)
}

fn category_exists(conn: &Connection, id: &str) -> Result<bool> {
    Ok(conn
        .query_row("SELECT 1 FROM categories WHERE id=?1", params![id], |r| {
            r.get::<_, i64>(0)
        })
        .optional()?
        .is_some())
}

fn check_expense(conn: &Connection, category_id: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(BudgetError::Validation(format!("amount must be positive, got {}", amount)).into());
    }
    if !category_exists(conn, category_id)? {
        return Err(BudgetError::UnknownCategory(category_id.to_string()).into());
    }
    Ok(())
}

pub fn insert_expense(conn: &Connection, new: NewExpense) -> Result<Expense> {
    check_expense(conn, &new.category_id, new.amount)?;
    let e = new.into_expense(Utc::now());
    conn.execute(
        "INSERT INTO expenses(id, category_id, amount, description, date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            e.id,
            e.category_id,
            e.amount.to_string(),
            e.description,
            e.date,
            e.created_at
        ],
    )?;
    info!(expense = %e.id, category = %e.category_id, "expense recorded");
    Ok(e)
}

/// Category, amount, description and date are mutable; id and creation
/// time are not.
pub fn update_expense(conn: &Connection, e: &Expense) -> Result<()> {
    check_expense(conn, &e.category_id, e.amount)?;
    let n = conn.execute(
        "UPDATE expenses SET category_id=?1, amount=?2, description=?3, date=?4 WHERE id=?5",
        params![
            e.category_id,
            e.amount.to_string(),
            e.description,
            e.date,
            e.id
        ],
    )?;
    if n == 0 {
        bail!("Expense '{}' not found", e.id);
    }
    info!(expense = %e.id, "expense updated");
    Ok(())
}

pub fn delete_expense(conn: &Connection, id: &str) -> Result<()> {
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Expense '{}' not found", id);
    }
    info!(expense = %id, "expense deleted");
    Ok(())
}

/// Clear categories and expenses and start over; the currency symbol is kept.
pub fn reset(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM expenses", [])?;
    tx.execute("DELETE FROM categories", [])?;
    config::set_monthly_income(&tx, Decimal::ZERO)?;
    config::set_setup_complete(&tx, false)?;
    tx.commit()?;
    info!("budget data reset");
    Ok(())
}
