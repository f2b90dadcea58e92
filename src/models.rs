// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Where a category sits in the accounting equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryType {
    Asset,
    Liability,
    Equity,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Asset => "Asset",
            CategoryType::Liability => "Liability",
            CategoryType::Equity => "Equity",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s {
            "Asset" => Ok(CategoryType::Asset),
            "Liability" => Ok(CategoryType::Liability),
            "Equity" => Ok(CategoryType::Equity),
            other => Err(LedgerError::validation(format!(
                "unknown category type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub r#type: CategoryType,
}

/// Account flavor. Bank and Debt accounts track cash on hand or amount owed
/// via `current_balance`; Fund and Expense accounts track funds or budget
/// left via `remaining_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Bank,
    Fund,
    Expense,
    Debt,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Bank => "Bank",
            AccountType::Fund => "Fund",
            AccountType::Expense => "Expense",
            AccountType::Debt => "Debt",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s {
            "Bank" => Ok(AccountType::Bank),
            "Fund" => Ok(AccountType::Fund),
            "Expense" => Ok(AccountType::Expense),
            "Debt" => Ok(AccountType::Debt),
            other => Err(LedgerError::validation(format!(
                "unknown account type '{}', expected Bank|Fund|Expense|Debt",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub r#type: AccountType,
    pub initial_amount: f64,
    pub budgeted_amount: f64,
    pub remaining_amount: f64,
    pub current_balance: f64,
    pub category_id: i64,
}

/// One leg of a transaction. IN adds the amount to both of the account's
/// running fields, OUT subtracts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s {
            "IN" => Ok(Direction::In),
            "OUT" => Ok(Direction::Out),
            other => Err(LedgerError::validation(format!(
                "unknown direction '{}', expected IN|OUT",
                other
            ))),
        }
    }

    /// Signed balance delta this direction applies for `amount`.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            Direction::In => amount,
            Direction::Out => -amount,
        }
    }
}

/// The three supported posting shapes.
///
/// `income` and `expense` intentionally move both legs in the recorded
/// direction rather than offsetting each other; this matches the simplified
/// single-entity bookkeeping model the ledger was built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Transfer,
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Transfer => "transfer",
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s {
            "transfer" => Ok(TransactionKind::Transfer),
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::validation(format!(
                "unknown transaction kind '{}', expected transfer|income|expense",
                other
            ))),
        }
    }

    /// Directions of the (from, to) entry pair for this kind.
    pub fn directions(&self) -> (Direction, Direction) {
        match self {
            TransactionKind::Transfer => (Direction::Out, Direction::In),
            TransactionKind::Income => (Direction::In, Direction::In),
            TransactionKind::Expense => (Direction::Out, Direction::In),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub transaction_id: i64,
    pub account_id: i64,
    pub amount: f64,
    pub direction: Direction,
}

/// An account joined with its category, for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub name: String,
    pub r#type: AccountType,
    pub initial_amount: f64,
    pub budgeted_amount: f64,
    pub remaining_amount: f64,
    pub current_balance: f64,
    pub category_name: String,
    pub category_type: CategoryType,
}

/// A flattened entry joined with its transaction and account, newest
/// transaction first.
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub transaction_id: i64,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub account_name: String,
    pub direction: Direction,
    pub amount: f64,
}

/// Net movement of one category, derived purely from entry history.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category_name: String,
    pub category_type: CategoryType,
    pub net_amount: f64,
}

/// An account's running balances as tracked by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub name: String,
    pub r#type: AccountType,
    pub remaining_amount: f64,
    pub current_balance: f64,
    pub budgeted_amount: f64,
    pub category_type: CategoryType,
}

/// Accounting-equation totals. Amounts are f64 currency, so the balance
/// check carries a cent of tolerance rather than exact equality.
#[derive(Debug, Clone, Serialize)]
pub struct Totals {
    pub assets: f64,
    pub liabilities: f64,
    pub equity: f64,
    pub balance_check: f64,
}

impl Totals {
    pub fn is_balanced(&self) -> bool {
        self.balance_check.abs() < 0.01
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub category_totals: Vec<CategoryTotal>,
    pub account_balances: Vec<AccountBalance>,
    pub totals: Totals,
}
