// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors surfaced by the ledger engine.
///
/// Every mutating operation is all-or-nothing: when one of these comes back,
/// the unit of work has been rolled back and no partial rows remain.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or out-of-range input: non-positive amount, unknown
    /// kind/type/direction, blank name, or equal from/to accounts.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A referenced account or transaction does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A delete guard was violated: non-zero balance, or a row that is
    /// still referenced.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An unexpected SQL error.
    #[error("unexpected SQL error: {0}")]
    Sql(rusqlite::Error),
}

impl From<rusqlite::Error> for LedgerError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => {
                LedgerError::NotFound("no matching row".into())
            }
            error => {
                tracing::error!("unhandled SQL error: {}", error);
                LedgerError::Sql(error)
            }
        }
    }
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        LedgerError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        LedgerError::Conflict(msg.into())
    }
}
