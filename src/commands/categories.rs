// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::get_currency_symbol;
use crate::models::Category;
use crate::store::{OrphanPolicy, load_categories, palette_color, replace_categories};
use crate::utils::{
    arg, find_category, fmt_money, maybe_print_json, parse_bool, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let categories = load_categories(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let rows = categories
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.name.clone(),
                fmt_money(&c.limit, &symbol),
                c.color.clone(),
                if c.is_essential { "yes".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Category", "Limit", "Color", "Essential"], rows)
    );
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut categories = load_categories(conn)?;
    let name = arg(sub, "name")?.trim();
    if categories.iter().any(|c| c.name.eq_ignore_ascii_case(name)) {
        anyhow::bail!("Category '{}' already exists", name);
    }
    let limit = parse_decimal(arg(sub, "limit")?)?;
    let color = sub
        .get_one::<String>("color")
        .cloned()
        .unwrap_or_else(|| palette_color(categories.len()).to_string());
    let category = Category::new(name, limit, &color, sub.get_flag("essential"));
    let id = category.id.clone();
    categories.push(category);
    replace_categories(conn, &categories, &OrphanPolicy::Block)?;
    println!("Added category '{}' ({})", name, id);
    Ok(())
}

fn edit(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut categories = load_categories(conn)?;
    let id = find_category(&categories, arg(sub, "key")?)?.id.clone();
    let new_name = sub.get_one::<String>("name").map(|s| s.trim().to_string());
    if let Some(n) = &new_name {
        if categories
            .iter()
            .any(|c| c.id != id && c.name.eq_ignore_ascii_case(n))
        {
            anyhow::bail!("Category '{}' already exists", n);
        }
    }
    let limit = sub
        .get_one::<String>("limit")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let essential = sub
        .get_one::<String>("essential")
        .map(|s| parse_bool(s))
        .transpose()?;

    for c in categories.iter_mut().filter(|c| c.id == id) {
        if let Some(n) = &new_name {
            c.name = n.clone();
        }
        if let Some(l) = limit {
            c.limit = l;
        }
        if let Some(col) = sub.get_one::<String>("color") {
            c.color = col.clone();
        }
        if let Some(e) = essential {
            c.is_essential = e;
        }
    }
    replace_categories(conn, &categories, &OrphanPolicy::Block)?;
    println!("Updated category {}", id);
    Ok(())
}

fn remove(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let categories = load_categories(conn)?;
    let target = find_category(&categories, arg(sub, "key")?)?.clone();
    let policy = if let Some(to) = sub.get_one::<String>("reassign") {
        let to = find_category(&categories, to)?;
        if to.id == target.id {
            anyhow::bail!("Cannot reassign expenses to the category being removed");
        }
        OrphanPolicy::Reassign(to.id.clone())
    } else if sub.get_flag("keep-expenses") {
        OrphanPolicy::Keep
    } else {
        OrphanPolicy::Block
    };
    let remaining: Vec<Category> = categories
        .into_iter()
        .filter(|c| c.id != target.id)
        .collect();
    replace_categories(conn, &remaining, &policy)?;
    println!("Removed category '{}'", target.name);
    Ok(())
}
