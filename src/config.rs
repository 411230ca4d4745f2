// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-database settings (stored in the `settings` table) and the
//! environment-driven configuration of the external summarizer.

use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "¥";

const KEY_CURRENCY: &str = "currency_symbol";
const KEY_INCOME: &str = "monthly_income";
const KEY_SETUP: &str = "setup_complete";

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_currency_symbol(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, KEY_CURRENCY)?.unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()))
}

pub fn set_currency_symbol(conn: &Connection, symbol: &str) -> Result<()> {
    set_setting(conn, KEY_CURRENCY, symbol)
}

pub fn get_monthly_income(conn: &Connection) -> Result<Decimal> {
    match get_setting(conn, KEY_INCOME)? {
        Some(s) => s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid monthly income '{}' in settings", s)),
        None => Ok(Decimal::ZERO),
    }
}

pub fn set_monthly_income(conn: &Connection, income: Decimal) -> Result<()> {
    anyhow::ensure!(
        income >= Decimal::ZERO,
        "Monthly income cannot be negative"
    );
    set_setting(conn, KEY_INCOME, &income.to_string())
}

pub fn is_setup_complete(conn: &Connection) -> Result<bool> {
    Ok(get_setting(conn, KEY_SETUP)?.as_deref() == Some("true"))
}

pub fn set_setup_complete(conn: &Connection, done: bool) -> Result<()> {
    set_setting(conn, KEY_SETUP, if done { "true" } else { "false" })
}

/// Connection details for the chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout: Duration::from_secs(30),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        let mut cfg = Self {
            api_key: get("GROQ_API_KEY"),
            ..Self::default()
        };
        if let Some(url) = get("SPENDWISE_LLM_BASE_URL") {
            cfg.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = get("SPENDWISE_LLM_MODEL") {
            cfg.model = model;
        }
        if let Some(secs) = get("SPENDWISE_LLM_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid SPENDWISE_LLM_TIMEOUT_SECS '{}'", secs))?;
            cfg.timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }
}
