// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::ledger;
use crate::models::AccountType;
use crate::queries;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let account_type = AccountType::parse(sub.get_one::<String>("type").unwrap().trim())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;

    let account = ledger::create_account(conn, name, account_type, amount)?;
    println!(
        "Added {} account '{}' (id {})",
        account.r#type.as_str(),
        account.name,
        account.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = queries::list_accounts(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &accounts)? {
        let rows: Vec<Vec<String>> = accounts
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.name.clone(),
                    a.r#type.as_str().to_string(),
                    a.category_name.clone(),
                    a.category_type.as_str().to_string(),
                    fmt_money(a.budgeted_amount),
                    fmt_money(a.remaining_amount),
                    fmt_money(a.current_balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Name", "Type", "Category", "Cat. Type", "Budgeted", "Remaining",
                    "Balance"
                ],
                rows
            )
        );
    }
    Ok(())
}

fn rm(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    ledger::delete_account(conn, id)?;
    println!("Removed account {}", id);
    Ok(())
}
