// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Tallybook", "tallybook"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tallybook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// Apply the ledger schema and the built-in categories. Idempotent.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        type TEXT NOT NULL CHECK(type IN ('Asset','Liability','Equity'))
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('Bank','Fund','Expense','Debt')),
        initial_amount REAL NOT NULL DEFAULT 0.0,
        budgeted_amount REAL NOT NULL DEFAULT 0.0,
        remaining_amount REAL NOT NULL DEFAULT 0.0,
        current_balance REAL NOT NULL DEFAULT 0.0,
        category_id INTEGER NOT NULL
            REFERENCES categories(id)
            ON DELETE RESTRICT
            ON UPDATE CASCADE
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        description TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS entries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        transaction_id INTEGER NOT NULL
            REFERENCES transactions(id)
            ON DELETE CASCADE
            ON UPDATE CASCADE,
        account_id INTEGER NOT NULL
            REFERENCES accounts(id)
            ON DELETE RESTRICT
            ON UPDATE CASCADE,
        amount REAL NOT NULL CHECK(amount > 0),
        direction TEXT NOT NULL CHECK(direction IN ('IN','OUT'))
    );
    CREATE INDEX IF NOT EXISTS idx_entries_transaction ON entries(transaction_id);
    CREATE INDEX IF NOT EXISTS idx_entries_account ON entries(account_id);

    INSERT OR IGNORE INTO categories(name, type) VALUES
        ('Cash', 'Asset'),
        ('RSO Fund', 'Asset'),
        ('Planned Events', 'Liability'),
        ('Debts', 'Liability'),
        ('Remaining Funds', 'Equity');
    "#,
    )?;
    Ok(())
}

/// Load the demo dataset the original bookkeeping sheet shipped with: a
/// checking account with a directly-seeded balance, two grant funds, two
/// budgeted events, and two income postings into the funds.
///
/// Refuses to run on a ledger that already has accounts, so demo rows can
/// never get tangled up with real data or an earlier seed.
///
/// The checking account's 1000.00 seed bypasses the entry ledger, so
/// entry-derived totals will not reconcile with it; `doctor` reports this
/// rather than treating it as corruption.
pub fn seed_demo(conn: &mut Connection) -> Result<()> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))?;
    if existing > 0 {
        anyhow::bail!("ledger already contains accounts; refusing to load demo data");
    }

    let tx = conn.transaction()?;

    let insert_account = |name: &str,
                          account_type: &str,
                          initial: f64,
                          budgeted: f64,
                          remaining: f64,
                          current: f64,
                          category: &str|
     -> Result<i64> {
        tx.execute(
            "INSERT INTO accounts
                (name, type, initial_amount, budgeted_amount, remaining_amount, current_balance, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6,
                (SELECT id FROM categories WHERE name=?7))",
            rusqlite::params![name, account_type, initial, budgeted, remaining, current, category],
        )?;
        Ok(tx.last_insert_rowid())
    };

    let checking = insert_account("Main Checking", "Bank", 0.0, 0.0, 0.0, 1000.0, "Cash")?;
    insert_account(
        "Ice Cream Social",
        "Expense",
        0.0,
        100.0,
        100.0,
        0.0,
        "Planned Events",
    )?;
    let spring = insert_account("Spring Grant", "Fund", 500.0, 0.0, 500.0, 0.0, "RSO Fund")?;
    let conference = insert_account("Conference Fund", "Fund", 800.0, 0.0, 800.0, 0.0, "RSO Fund")?;
    insert_account("Pizza Night", "Expense", 0.0, 150.0, 150.0, 0.0, "Planned Events")?;

    let insert_transaction = |date: &str, description: &str| -> Result<i64> {
        tx.execute(
            "INSERT INTO transactions (date, description) VALUES (?1, ?2)",
            rusqlite::params![date, description],
        )?;
        Ok(tx.last_insert_rowid())
    };
    let grant_tx = insert_transaction("2025-01-15", "Initial grant funding")?;
    let dues_tx = insert_transaction("2025-01-20", "Membership dues collected")?;

    for (transaction_id, account_id, amount) in [
        (grant_tx, checking, 500.0),
        (grant_tx, spring, 500.0),
        (dues_tx, checking, 300.0),
        (dues_tx, conference, 300.0),
    ] {
        tx.execute(
            "INSERT INTO entries (transaction_id, account_id, amount, direction)
             VALUES (?1, ?2, ?3, 'IN')",
            rusqlite::params![transaction_id, account_id, amount],
        )?;
    }

    tx.commit()?;
    Ok(())
}
