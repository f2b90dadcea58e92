// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::AccountType;
use crate::summary::compute_summary;
use crate::utils::{fmt_money, pretty_table};

/// One account whose running balances disagree with its entry history.
#[derive(Debug, Clone)]
pub struct Discrepancy {
    pub account: String,
    pub field: &'static str,
    pub expected: f64,
    pub actual: f64,
}

/// Recompute every account's running balances from its creation seed plus
/// entry history and report the ones that disagree beyond a cent.
///
/// Seeded balances that bypassed the entry ledger (the demo dataset does
/// this) show up here; that is a known property of the data, not corruption,
/// so doctor reports it instead of failing.
pub fn reconcile(conn: &Connection) -> Result<Vec<Discrepancy>> {
    let mut stmt = conn.prepare(
        "SELECT a.name, a.type, a.initial_amount, a.remaining_amount, a.current_balance,
            IFNULL((SELECT SUM(CASE WHEN e.direction='IN' THEN e.amount ELSE -e.amount END)
                    FROM entries e WHERE e.account_id = a.id), 0)
         FROM accounts a ORDER BY a.name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, f64>(2)?,
            r.get::<_, f64>(3)?,
            r.get::<_, f64>(4)?,
            r.get::<_, f64>(5)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (name, account_type, initial, remaining, current, delta) = row?;
        let account_type = AccountType::parse(&account_type)?;
        // Fund/Expense seed remaining_amount at creation, Bank/Debt seed
        // current_balance; every posted entry then moves both fields.
        let (remaining0, current0) = match account_type {
            AccountType::Fund | AccountType::Expense => (initial, 0.0),
            AccountType::Bank | AccountType::Debt => (0.0, initial),
        };
        let expected_remaining = remaining0 + delta;
        let expected_current = current0 + delta;
        if (expected_remaining - remaining).abs() >= 0.01 {
            out.push(Discrepancy {
                account: name.clone(),
                field: "remaining_amount",
                expected: expected_remaining,
                actual: remaining,
            });
        }
        if (expected_current - current).abs() >= 0.01 {
            out.push(Discrepancy {
                account: name,
                field: "current_balance",
                expected: expected_current,
                actual: current,
            });
        }
    }
    Ok(out)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    let summary = compute_summary(conn)?;
    if !summary.totals.is_balanced() {
        rows.push(vec![
            "balance_check".into(),
            format!(
                "assets - liabilities - equity = {}",
                fmt_money(summary.totals.balance_check)
            ),
        ]);
    }

    for d in reconcile(conn)? {
        rows.push(vec![
            "balance_drift".into(),
            format!(
                "{} {}: expected {} from entries, found {}",
                d.account,
                d.field,
                fmt_money(d.expected),
                fmt_money(d.actual)
            ),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
