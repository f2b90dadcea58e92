// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .version(crate_version!())
        .about("Double-entry bookkeeping ledger for student organizations")
        .subcommand_required(false)
        .subcommand(
            Command::new("init").about("Initialize the ledger database").arg(
                Arg::new("demo")
                    .long("demo")
                    .action(ArgAction::SetTrue)
                    .help("Load the demo dataset"),
            ),
        )
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Create an account")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Bank|Fund|Expense|Debt"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Seed amount (funds left, budget, balance, or debt owed)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List accounts with their category"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account (both running balances must be zero)")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Post, list, and reverse transactions")
                .subcommand(
                    Command::new("post")
                        .about("Post a two-entry transaction")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("transfer|income|expense"),
                        )
                        .arg(
                            Arg::new("from")
                                .long("from")
                                .required(true)
                                .value_parser(value_parser!(i64))
                                .help("Source account ID (cash/debt side for income and expense)"),
                        )
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .required(true)
                                .value_parser(value_parser!(i64))
                                .help("Destination account ID"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        ),
                )
                .subcommand(
                    json_flags(Command::new("list").about("List entries, newest first")).arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Reverse a transaction and delete it")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(json_flags(
            Command::new("summary").about("Category totals and the balance-sheet check"),
        ))
        .subcommand(
            Command::new("export")
                .about("Export ledger data")
                .subcommand(
                    Command::new("entries")
                        .about("Export the entry history")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check the accounting equation and balance reconciliation"),
        )
}
