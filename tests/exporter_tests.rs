// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;

use tallybook::models::{AccountType, TransactionKind};
use tallybook::{cli, commands::exporter, ledger};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    tallybook::db::init_schema(&mut conn).unwrap();
    let bank = ledger::create_account(&mut conn, "Checking", AccountType::Bank, 1000.0).unwrap();
    let fund = ledger::create_account(&mut conn, "Grant", AccountType::Fund, 500.0).unwrap();
    ledger::post_transaction(
        &mut conn,
        TransactionKind::Income,
        bank.id,
        fund.id,
        300.0,
        Some("grant payout"),
        NaiveDate::parse_from_str("2025-03-01", "%Y-%m-%d").unwrap(),
    )
    .unwrap();
    conn
}

#[test]
fn export_entries_csv() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("entries.csv");

    let matches = cli::build_cli().get_matches_from([
        "tallybook",
        "export",
        "entries",
        "--format",
        "csv",
        "--out",
        out.to_str().unwrap(),
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,description,account,direction,amount"
    );
    assert_eq!(
        lines.next().unwrap(),
        "2025-03-01,grant payout,Checking,IN,300.00"
    );
    assert_eq!(
        lines.next().unwrap(),
        "2025-03-01,grant payout,Grant,IN,300.00"
    );
}

#[test]
fn export_unknown_format_fails_without_writing() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("entries.xml");

    let matches = cli::build_cli().get_matches_from([
        "tallybook",
        "export",
        "entries",
        "--format",
        "xml",
        "--out",
        out.to_str().unwrap(),
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&conn, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out.exists());
}

#[test]
fn export_entries_json() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("entries.json");

    let matches = cli::build_cli().get_matches_from([
        "tallybook",
        "export",
        "entries",
        "--format",
        "json",
        "--out",
        out.to_str().unwrap(),
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    }

    let items: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let arr = items.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["account"], "Checking");
    assert_eq!(arr[0]["direction"], "IN");
    assert_eq!(arr[0]["amount"], 300.0);
}
