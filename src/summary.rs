// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-side aggregation: category net totals from entry history and the
//! Assets = Liabilities + Equity balance check. No mutation; the whole
//! summary is recomputable at any time from account and entry state.

use rusqlite::Connection;

use crate::error::LedgerError;
use crate::models::{AccountBalance, AccountType, CategoryTotal, CategoryType, Summary, Totals};

type Result<T> = std::result::Result<T, LedgerError>;

pub fn compute_summary(conn: &Connection) -> Result<Summary> {
    let category_totals = category_totals(conn)?;
    let account_balances = account_balances(conn)?;

    let net_for = |wanted: CategoryType| -> f64 {
        category_totals
            .iter()
            .filter(|c| c.category_type == wanted)
            .map(|c| c.net_amount)
            .sum()
    };
    let assets = net_for(CategoryType::Asset);
    let liabilities = net_for(CategoryType::Liability);
    let equity = net_for(CategoryType::Equity);

    Ok(Summary {
        category_totals,
        account_balances,
        totals: Totals {
            assets,
            liabilities,
            equity,
            balance_check: assets - liabilities - equity,
        },
    })
}

/// Net movement per category: for each of its accounts, entries count
/// +amount when IN and -amount when OUT. Categories with no accounts are
/// omitted, matching the inner join on accounts.
fn category_totals(conn: &Connection) -> Result<Vec<CategoryTotal>> {
    let mut stmt = conn.prepare(
        "SELECT
            c.name,
            c.type,
            IFNULL(SUM(
                CASE
                    WHEN e.direction = 'IN' THEN e.amount
                    WHEN e.direction = 'OUT' THEN -e.amount
                    ELSE 0
                END
            ), 0) AS net_amount
         FROM categories c
         JOIN accounts a ON a.category_id = c.id
         LEFT JOIN entries e ON e.account_id = a.id
         GROUP BY c.id, c.name, c.type
         ORDER BY c.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, f64>(2)?,
        ))
    })?;

    let mut totals = Vec::new();
    for row in rows {
        let (name, category_type, net_amount) = row?;
        totals.push(CategoryTotal {
            category_name: name,
            category_type: CategoryType::parse(&category_type)?,
            net_amount,
        });
    }
    Ok(totals)
}

fn account_balances(conn: &Connection) -> Result<Vec<AccountBalance>> {
    let mut stmt = conn.prepare(
        "SELECT a.name, a.type, a.remaining_amount, a.current_balance, a.budgeted_amount, c.type
         FROM accounts a
         JOIN categories c ON a.category_id = c.id
         ORDER BY a.type, a.name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, f64>(2)?,
            r.get::<_, f64>(3)?,
            r.get::<_, f64>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;

    let mut balances = Vec::new();
    for row in rows {
        let (name, account_type, remaining, current, budgeted, category_type) = row?;
        balances.push(AccountBalance {
            name,
            r#type: AccountType::parse(&account_type)?,
            remaining_amount: remaining,
            current_balance: current,
            budgeted_amount: budgeted,
            category_type: CategoryType::parse(&category_type)?,
        });
    }
    Ok(balances)
}
