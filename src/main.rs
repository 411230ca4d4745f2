// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendwise::{cli, commands, db, logging};

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("setup", sub)) => commands::setup::handle_setup(&mut conn, sub)?,
        Some(("settings", sub)) => commands::setup::handle_settings(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut conn, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&conn, sub)?,
        Some(("status", sub)) => commands::reports::status(&conn, sub)?,
        Some(("donors", sub)) => commands::adjust::donors(&conn, sub)?,
        Some(("adjust", sub)) => commands::adjust::adjust(&mut conn, sub)?,
        Some(("analyze", sub)) => commands::analyze::handle(&conn, sub)?,
        Some(("day", sub)) => commands::reports::day(&conn, sub)?,
        Some(("calendar", sub)) => commands::reports::calendar(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("reset", sub)) => commands::setup::handle_reset(&mut conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
