// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

use tallybook::error::LedgerError;
use tallybook::ledger;
use tallybook::models::{AccountType, CategoryType};
use tallybook::queries;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    tallybook::db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn fund_account_seeds_remaining_amount() {
    let mut conn = setup();
    let account =
        ledger::create_account(&mut conn, "Spring Grant", AccountType::Fund, 500.0).unwrap();

    assert_eq!(account.initial_amount, 500.0);
    assert_eq!(account.remaining_amount, 500.0);
    assert_eq!(account.budgeted_amount, 0.0);
    assert_eq!(account.current_balance, 0.0);
}

#[test]
fn expense_account_seeds_budget_and_remaining() {
    let mut conn = setup();
    let account =
        ledger::create_account(&mut conn, "Pizza Night", AccountType::Expense, 150.0).unwrap();

    assert_eq!(account.budgeted_amount, 150.0);
    assert_eq!(account.remaining_amount, 150.0);
    assert_eq!(account.current_balance, 0.0);
}

#[test]
fn bank_and_debt_accounts_seed_current_balance() {
    let mut conn = setup();
    let bank = ledger::create_account(&mut conn, "Checking", AccountType::Bank, 1000.0).unwrap();
    let debt = ledger::create_account(&mut conn, "Venue Loan", AccountType::Debt, 250.0).unwrap();

    assert_eq!(bank.current_balance, 1000.0);
    assert_eq!(bank.remaining_amount, 0.0);
    assert_eq!(debt.current_balance, 250.0);
    assert_eq!(debt.remaining_amount, 0.0);
}

#[test]
fn account_types_map_to_fixed_categories() {
    let mut conn = setup();
    ledger::create_account(&mut conn, "Checking", AccountType::Bank, 100.0).unwrap();
    ledger::create_account(&mut conn, "Grant", AccountType::Fund, 100.0).unwrap();
    ledger::create_account(&mut conn, "Social", AccountType::Expense, 100.0).unwrap();
    ledger::create_account(&mut conn, "Loan", AccountType::Debt, 100.0).unwrap();

    let views = queries::list_accounts(&conn).unwrap();
    let find = |name: &str| views.iter().find(|v| v.name == name).unwrap();

    assert_eq!(find("Checking").category_name, "Cash");
    assert_eq!(find("Checking").category_type, CategoryType::Asset);
    assert_eq!(find("Grant").category_name, "RSO Fund");
    assert_eq!(find("Grant").category_type, CategoryType::Asset);
    assert_eq!(find("Social").category_name, "Planned Events");
    assert_eq!(find("Social").category_type, CategoryType::Liability);
    assert_eq!(find("Loan").category_name, "Debts");
    assert_eq!(find("Loan").category_type, CategoryType::Liability);
}

#[test]
fn blank_name_rejected() {
    let mut conn = setup();
    for name in ["", "   "] {
        let err = ledger::create_account(&mut conn, name, AccountType::Fund, 100.0).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }
}

#[test]
fn non_positive_seed_rejected() {
    let mut conn = setup();
    for amount in [0.0, -10.0] {
        let err =
            ledger::create_account(&mut conn, "Grant", AccountType::Fund, amount).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }
}

#[test]
fn delete_with_non_zero_balance_conflicts_and_leaves_data() {
    let mut conn = setup();
    let fund = ledger::create_account(&mut conn, "Grant", AccountType::Fund, 500.0).unwrap();

    let err = ledger::delete_account(&mut conn, fund.id).unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(_)));

    let remaining: f64 = conn
        .query_row(
            "SELECT remaining_amount FROM accounts WHERE id=?1",
            [fund.id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 500.0);
}

#[test]
fn delete_zero_balance_account_succeeds() {
    let mut conn = setup();
    // A fully settled account: both running balances at zero.
    conn.execute(
        "INSERT INTO accounts(name, type, category_id)
         VALUES ('Settled', 'Fund', (SELECT id FROM categories WHERE name='RSO Fund'))",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    ledger::delete_account(&mut conn, id).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts WHERE id=?1", [id], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn delete_missing_account_is_not_found() {
    let mut conn = setup();
    let err = ledger::delete_account(&mut conn, 9999).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

// The referential guard is unreachable while the zero-balance guard holds;
// it still has to fire if an entry references a zeroed account.
#[test]
fn delete_referenced_account_conflicts() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO accounts(name, type, category_id)
         VALUES ('Zeroed', 'Bank', (SELECT id FROM categories WHERE name='Cash'))",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO transactions(date, description) VALUES ('2025-01-01', 'seed')",
        [],
    )
    .unwrap();
    let tx_id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO entries(transaction_id, account_id, amount, direction)
         VALUES (?1, ?2, 10.0, 'IN')",
        [tx_id, id],
    )
    .unwrap();
    // Zero the balances back out so only the referential guard can fire.
    conn.execute(
        "UPDATE accounts SET remaining_amount=0, current_balance=0 WHERE id=?1",
        [id],
    )
    .unwrap();

    let err = ledger::delete_account(&mut conn, id).unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(_)));
}
