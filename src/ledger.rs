// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger engine: posting and reversing transactions, creating and
//! deleting accounts. Every operation here runs inside a single rusqlite
//! transaction so concurrent readers see either the full pre-state or the
//! full post-state.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::LedgerError;
use crate::models::{Account, AccountType, CategoryType, Direction, Entry, TransactionKind};

type Result<T> = std::result::Result<T, LedgerError>;

/// Fixed category each account type belongs to. The category row itself is
/// created by `db::init_schema`.
fn category_for(account_type: AccountType) -> (&'static str, CategoryType) {
    match account_type {
        AccountType::Bank => ("Cash", CategoryType::Asset),
        AccountType::Fund => ("RSO Fund", CategoryType::Asset),
        AccountType::Expense => ("Planned Events", CategoryType::Liability),
        AccountType::Debt => ("Debts", CategoryType::Liability),
    }
}

/// Post a two-entry transaction and update both accounts' running balances.
///
/// Per-entry balance rule: an IN entry adds `amount` to the account's
/// `remaining_amount` and `current_balance`, an OUT entry subtracts it.
/// Which directions the (from, to) pair gets depends on the kind; see
/// [`TransactionKind::directions`]. Note that `income` and `expense` move
/// both legs in the recorded direction on purpose.
///
/// Returns the new transaction's ID.
pub fn post_transaction(
    conn: &mut Connection,
    kind: TransactionKind,
    from_id: i64,
    to_id: i64,
    amount: f64,
    description: Option<&str>,
    date: NaiveDate,
) -> Result<i64> {
    if !(amount > 0.0) {
        return Err(LedgerError::validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    if from_id == to_id {
        return Err(LedgerError::validation(
            "from and to accounts must differ".to_string(),
        ));
    }

    let tx = conn.transaction()?;

    // Existence checks up front so a bad ID fails before any write.
    for (label, id) in [("from", from_id), ("to", to_id)] {
        let exists: Option<i64> = tx
            .query_row("SELECT id FROM accounts WHERE id=?1", params![id], |r| {
                r.get(0)
            })
            .optional()?;
        if exists.is_none() {
            return Err(LedgerError::not_found(format!(
                "{} account {} does not exist",
                label, id
            )));
        }
    }

    tx.execute(
        "INSERT INTO transactions(date, description) VALUES (?1, ?2)",
        params![date.to_string(), description],
    )?;
    let transaction_id = tx.last_insert_rowid();

    let (from_dir, to_dir) = kind.directions();
    for (account_id, direction) in [(from_id, from_dir), (to_id, to_dir)] {
        tx.execute(
            "INSERT INTO entries(transaction_id, account_id, amount, direction)
             VALUES (?1, ?2, ?3, ?4)",
            params![transaction_id, account_id, amount, direction.as_str()],
        )?;
        apply_delta(&tx, account_id, direction.signed(amount))?;
    }

    tx.commit()?;
    tracing::debug!(
        kind = kind.as_str(),
        from_id,
        to_id,
        amount,
        transaction_id,
        "posted transaction"
    );
    Ok(transaction_id)
}

/// Undo a posted transaction: apply each entry's delta with inverted sign,
/// then delete the entries and the transaction itself.
pub fn reverse_transaction(conn: &mut Connection, transaction_id: i64) -> Result<()> {
    let tx = conn.transaction()?;

    let exists: Option<i64> = tx
        .query_row(
            "SELECT id FROM transactions WHERE id=?1",
            params![transaction_id],
            |r| r.get(0),
        )
        .optional()?;
    if exists.is_none() {
        return Err(LedgerError::not_found(format!(
            "transaction {} does not exist",
            transaction_id
        )));
    }

    let entries: Vec<Entry> = {
        let mut stmt = tx.prepare(
            "SELECT id, account_id, amount, direction FROM entries
             WHERE transaction_id=?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![transaction_id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, i64>(1)?,
                r.get::<_, f64>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, account_id, amount, direction) = row?;
            out.push(Entry {
                id,
                transaction_id,
                account_id,
                amount,
                direction: Direction::parse(&direction)?,
            });
        }
        out
    };

    for entry in &entries {
        apply_delta(&tx, entry.account_id, -entry.direction.signed(entry.amount))?;
    }

    tx.execute(
        "DELETE FROM entries WHERE transaction_id=?1",
        params![transaction_id],
    )?;
    tx.execute(
        "DELETE FROM transactions WHERE id=?1",
        params![transaction_id],
    )?;

    tx.commit()?;
    tracing::debug!(transaction_id, "reversed transaction");
    Ok(())
}

/// Create an account of the given type, seeded per the type's convention.
///
/// Fund and Expense accounts seed `remaining_amount` (funds or budget left);
/// Bank and Debt accounts seed `current_balance` (cash on hand or amount
/// owed). `initial_amount` always records the seed. Seeds bypass the entry
/// ledger; `doctor` reports the resulting gap against entry history.
pub fn create_account(
    conn: &mut Connection,
    name: &str,
    account_type: AccountType,
    amount: f64,
) -> Result<Account> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation(
            "account name cannot be empty".to_string(),
        ));
    }
    if !(amount > 0.0) {
        return Err(LedgerError::validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }

    let (category_name, _) = category_for(account_type);

    let tx = conn.transaction()?;
    let category_id: i64 = tx.query_row(
        "SELECT id FROM categories WHERE name=?1",
        params![category_name],
        |r| r.get(0),
    )?;

    let (budgeted, remaining, current) = match account_type {
        AccountType::Fund => (0.0, amount, 0.0),
        AccountType::Expense => (amount, amount, 0.0),
        AccountType::Bank | AccountType::Debt => (0.0, 0.0, amount),
    };

    tx.execute(
        "INSERT INTO accounts
            (name, type, initial_amount, budgeted_amount, remaining_amount, current_balance, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            name,
            account_type.as_str(),
            amount,
            budgeted,
            remaining,
            current,
            category_id
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    tracing::debug!(
        id,
        name,
        account_type = account_type.as_str(),
        amount,
        "created account"
    );
    Ok(Account {
        id,
        name: name.to_string(),
        r#type: account_type,
        initial_amount: amount,
        budgeted_amount: budgeted,
        remaining_amount: remaining,
        current_balance: current,
        category_id,
    })
}

/// Delete an account. Refused while either running balance is non-zero, or
/// while any entry still references the account.
pub fn delete_account(conn: &mut Connection, account_id: i64) -> Result<()> {
    let tx = conn.transaction()?;

    let balances: Option<(f64, f64)> = tx
        .query_row(
            "SELECT remaining_amount, current_balance FROM accounts WHERE id=?1",
            params![account_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let (remaining, current) = balances.ok_or_else(|| {
        LedgerError::not_found(format!("account {} does not exist", account_id))
    })?;

    if remaining != 0.0 || current != 0.0 {
        return Err(LedgerError::conflict(format!(
            "account {} has a non-zero balance (remaining {}, current {})",
            account_id, remaining, current
        )));
    }

    // Should be unreachable when the zero-balance guard holds, but checked
    // anyway so a broken invariant surfaces as Conflict, not an FK error.
    let referenced: i64 = tx.query_row(
        "SELECT COUNT(*) FROM entries WHERE account_id=?1",
        params![account_id],
        |r| r.get(0),
    )?;
    if referenced > 0 {
        return Err(LedgerError::conflict(format!(
            "account {} is still referenced by {} entries",
            account_id, referenced
        )));
    }

    tx.execute("DELETE FROM accounts WHERE id=?1", params![account_id])?;
    tx.commit()?;
    tracing::debug!(account_id, "deleted account");
    Ok(())
}

/// Add `delta` to both running balance fields of one account.
fn apply_delta(tx: &rusqlite::Transaction, account_id: i64, delta: f64) -> Result<()> {
    tx.execute(
        "UPDATE accounts
         SET remaining_amount = remaining_amount + ?1,
             current_balance = current_balance + ?1
         WHERE id=?2",
        params![delta, account_id],
    )?;
    Ok(())
}
