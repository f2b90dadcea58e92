// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::summary::compute_summary;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let summary = compute_summary(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    let category_rows: Vec<Vec<String>> = summary
        .category_totals
        .iter()
        .map(|c| {
            vec![
                c.category_name.clone(),
                c.category_type.as_str().to_string(),
                fmt_money(c.net_amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Type", "Net"], category_rows)
    );

    let account_rows: Vec<Vec<String>> = summary
        .account_balances
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.r#type.as_str().to_string(),
                fmt_money(a.budgeted_amount),
                fmt_money(a.remaining_amount),
                fmt_money(a.current_balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Account", "Type", "Budgeted", "Remaining", "Balance"],
            account_rows
        )
    );

    let t = &summary.totals;
    println!(
        "Assets {}  Liabilities {}  Equity {}  Check {}",
        fmt_money(t.assets),
        fmt_money(t.liabilities),
        fmt_money(t.equity),
        fmt_money(t.balance_check)
    );
    if t.is_balanced() {
        println!("Books are balanced");
    } else {
        println!("Books are NOT balanced (|check| >= 0.01)");
    }
    Ok(())
}
