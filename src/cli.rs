// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Pretty JSON output"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("One JSON document per line"),
    ]
}

fn period_args() -> [Arg; 4] {
    [
        Arg::new("period")
            .long("period")
            .short('p')
            .value_name("KIND")
            .help("this-month | last-month | last-3-months | custom (default this-month)"),
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("Start of a custom period"),
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("End of a custom period"),
        Arg::new("on")
            .long("on")
            .value_name("YYYY-MM-DD")
            .help("Reference date for month-based periods (default today)"),
    ]
}

fn category_key(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("ID|NAME")
        .required(true)
        .help(help)
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .about("Monthly category budgets, expense logging and spending analysis")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("setup")
                .about("Define monthly income and the category list")
                .arg(
                    Arg::new("income")
                        .long("income")
                        .required(true)
                        .value_name("AMOUNT"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .required(true)
                        .action(ArgAction::Append)
                        .value_name("NAME:LIMIT[:COLOR][:essential]"),
                )
                .arg(Arg::new("currency").long("currency").value_name("SYMBOL"))
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Replace an existing setup; old expenses are kept as Unknown"),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Show or change income and currency symbol")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("income").arg(Arg::new("amount").required(true).value_name("AMOUNT")),
                )
                .subcommand(
                    Command::new("currency").arg(Arg::new("symbol").required(true).value_name("SYMBOL")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage spending categories")
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(Arg::new("color").long("color"))
                        .arg(
                            Arg::new("essential")
                                .long("essential")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("key").required(true).value_name("ID|NAME"))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("limit").long("limit"))
                        .arg(Arg::new("color").long("color"))
                        .arg(
                            Arg::new("essential")
                                .long("essential")
                                .value_name("true|false"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("key").required(true).value_name("ID|NAME"))
                        .arg(
                            Arg::new("reassign")
                                .long("reassign")
                                .value_name("ID|NAME")
                                .conflicts_with("keep-expenses")
                                .help("Move this category's expenses to another category"),
                        )
                        .arg(
                            Arg::new("keep-expenses")
                                .long("keep-expenses")
                                .action(ArgAction::SetTrue)
                                .help("Keep expenses; they are reported as Unknown"),
                        ),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Log and edit expenses")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .required(true)
                                .value_name("ID|NAME"),
                        )
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description").short('d')),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("category").long("category").value_name("ID|NAME"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(
                    Command::new("list")
                        .args(period_args())
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("period")
                                .help("Ignore the period and list everything"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Budget overview for a period")
                .args(period_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("donors")
                .about("Categories that can cover an over-budget category")
                .arg(category_key("target", "Over-budget category"))
                .args(period_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("adjust")
                .about("Move budget from a non-essential category to an over-budget one")
                .arg(category_key("target", "Category receiving budget"))
                .arg(category_key("donor", "Non-essential category giving budget"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .help("Override the planned transfer amount"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Preview without saving"),
                )
                .args(period_args()),
        )
        .subcommand(
            Command::new("analyze")
                .about("AI spending summary for a period")
                .args(period_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("day")
                .about("Expenses on a single day")
                .arg(Arg::new("date").value_name("YYYY-MM-DD"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("calendar")
                .about("Daily totals for a month")
                .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("expenses")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .value_parser(["csv", "json"]),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .args(period_args()),
            ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all categories and expenses")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm deletion"),
                ),
        )
}
