// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only projections for the presentation layer: accounts decorated with
//! their category, and entries flattened with their transaction and account.
//! Empty tables produce empty vectors, never errors.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};

use crate::error::LedgerError;
use crate::models::{
    Account, AccountType, AccountView, Category, CategoryType, Direction, EntryView, Transaction,
};

type Result<T> = std::result::Result<T, LedgerError>;

/// The fixed set of categories the ledger was set up with.
pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, type FROM categories ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;

    let mut categories = Vec::new();
    for row in rows {
        let (id, name, category_type) = row?;
        categories.push(Category {
            id,
            name,
            r#type: CategoryType::parse(&category_type)?,
        });
    }
    Ok(categories)
}

pub fn get_account(conn: &Connection, id: i64) -> Result<Option<Account>> {
    let row = conn
        .query_row(
            "SELECT id, name, type, initial_amount, budgeted_amount,
                    remaining_amount, current_balance, category_id
             FROM accounts WHERE id=?1",
            [id],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, f64>(3)?,
                    r.get::<_, f64>(4)?,
                    r.get::<_, f64>(5)?,
                    r.get::<_, f64>(6)?,
                    r.get::<_, i64>(7)?,
                ))
            },
        )
        .optional()?;

    match row {
        None => Ok(None),
        Some((id, name, account_type, initial, budgeted, remaining, current, category_id)) => {
            Ok(Some(Account {
                id,
                name,
                r#type: AccountType::parse(&account_type)?,
                initial_amount: initial,
                budgeted_amount: budgeted,
                remaining_amount: remaining,
                current_balance: current,
                category_id,
            }))
        }
    }
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let row = conn
        .query_row(
            "SELECT id, date, description FROM transactions WHERE id=?1",
            [id],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, Option<String>>(2)?,
                ))
            },
        )
        .optional()?;

    match row {
        None => Ok(None),
        Some((id, date, description)) => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
                LedgerError::validation(format!("bad date '{}' in store: {}", date, e))
            })?;
            Ok(Some(Transaction {
                id,
                date,
                description,
            }))
        }
    }
}

pub fn list_accounts(conn: &Connection) -> Result<Vec<AccountView>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, a.type, a.initial_amount, a.budgeted_amount,
                a.remaining_amount, a.current_balance, c.name, c.type
         FROM accounts a
         JOIN categories c ON a.category_id = c.id
         ORDER BY a.type, a.name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, f64>(3)?,
            r.get::<_, f64>(4)?,
            r.get::<_, f64>(5)?,
            r.get::<_, f64>(6)?,
            r.get::<_, String>(7)?,
            r.get::<_, String>(8)?,
        ))
    })?;

    let mut accounts = Vec::new();
    for row in rows {
        let (id, name, account_type, initial, budgeted, remaining, current, cat_name, cat_type) =
            row?;
        accounts.push(AccountView {
            id,
            name,
            r#type: AccountType::parse(&account_type)?,
            initial_amount: initial,
            budgeted_amount: budgeted,
            remaining_amount: remaining,
            current_balance: current,
            category_name: cat_name,
            category_type: CategoryType::parse(&cat_type)?,
        });
    }
    Ok(accounts)
}

/// Flattened entry history, newest transaction first, entries in insertion
/// order within each transaction.
pub fn list_transactions(conn: &Connection, limit: Option<usize>) -> Result<Vec<EntryView>> {
    let mut sql = String::from(
        "SELECT e.transaction_id, t.date, t.description, a.name, e.direction, e.amount
         FROM entries e
         JOIN transactions t ON e.transaction_id = t.id
         JOIN accounts a ON e.account_id = a.id
         ORDER BY t.date DESC, t.id DESC, e.id ASC",
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, f64>(5)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (transaction_id, date, description, account_name, direction, amount) = row?;
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| LedgerError::validation(format!("bad date '{}' in store: {}", date, e)))?;
        entries.push(EntryView {
            transaction_id,
            date,
            description,
            account_name,
            direction: Direction::parse(&direction)?,
            amount,
        });
    }
    Ok(entries)
}
