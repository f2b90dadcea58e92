// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::ledger;
use crate::models::TransactionKind;
use crate::queries;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("post", sub)) => post(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn post(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = TransactionKind::parse(sub.get_one::<String>("kind").unwrap().trim())?;
    let from = *sub.get_one::<i64>("from").unwrap();
    let to = *sub.get_one::<i64>("to").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").map(|s| s.as_str());
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };

    let id = ledger::post_transaction(conn, kind, from, to, amount, description, date)?;
    println!(
        "Posted {} of {} from account {} to account {} (tx {})",
        kind.as_str(),
        fmt_money(amount),
        from,
        to,
        id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = sub.get_one::<usize>("limit").copied();
    let entries = queries::list_transactions(conn, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.transaction_id.to_string(),
                    e.date.to_string(),
                    e.description.clone().unwrap_or_default(),
                    e.account_name.clone(),
                    e.direction.as_str().to_string(),
                    fmt_money(e.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Tx", "Date", "Description", "Account", "Dir", "Amount"],
                rows
            )
        );
    }
    Ok(())
}

fn rm(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    ledger::reverse_transaction(conn, id)?;
    println!("Reversed and removed transaction {}", id);
    Ok(())
}
