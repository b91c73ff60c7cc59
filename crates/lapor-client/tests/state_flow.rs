use std::path::{Path, PathBuf};

use lapor_client::commands::{CommandOptions, config, reset, tx};
use lapor_client::model::TransactionKind;
use rusqlite::Connection;
use serde_json::Value;
use tempfile::tempdir;

fn temp_home() -> (tempfile::TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let home = dir.path().join("lapor-home");
    (dir, home)
}

fn options(home: &Path) -> CommandOptions<'_> {
    CommandOptions {
        home_override: Some(home),
    }
}

fn payload(envelope: lapor_client::SuccessEnvelope) -> Value {
    serde_json::to_value(envelope).unwrap()
}

fn add_expense(home: &Path, description: &str, amount: i64) -> Value {
    let envelope = tx::add_with_options(
        tx::TxAddArgs {
            date: Some("2026-08-05".to_string()),
            description: description.to_string(),
            amount,
            kind: TransactionKind::Expense,
            label: None,
            receipt: None,
        },
        options(home),
    )
    .unwrap();
    payload(envelope)
}

#[test]
fn config_set_round_trips_through_show() {
    let (_dir, home) = temp_home();

    config::set_with_options("event", "Pentas Seni 2026", options(&home)).unwrap();
    config::set_with_options("mode", "Lengkap", options(&home)).unwrap();
    config::set_with_options("signer3-name", "Rina", options(&home)).unwrap();

    let shown = payload(config::show_with_options(options(&home)).unwrap());
    assert_eq!(shown["ok"], true);
    assert_eq!(shown["data"]["config"]["event_name"], "Pentas Seni 2026");
    assert_eq!(shown["data"]["config"]["mode"], "Lengkap");
    assert_eq!(shown["data"]["config"]["signers"][2]["name"], "Rina");
    assert_eq!(shown["data"]["transaction_count"], 0);
}

#[test]
fn tx_add_list_remove_keeps_totals_exact() {
    let (_dir, home) = temp_home();

    let added = tx::add_with_options(
        tx::TxAddArgs {
            date: None,
            description: "Dana sponsor".to_string(),
            amount: 500_000,
            kind: TransactionKind::Income,
            label: None,
            receipt: None,
        },
        options(&home),
    )
    .unwrap();
    let added = payload(added);
    assert_eq!(added["data"]["totals"]["income"], 500_000);

    add_expense(&home, "Konsumsi", 125_000);

    let listed = payload(tx::list_with_options(options(&home)).unwrap());
    let rows = listed["data"]["transactions"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(listed["data"]["totals"]["balance"], 375_000);
    assert_eq!(listed["data"]["totals"]["balance_display"], "Rp 375.000");

    let removed_id = rows[1]["id"].as_str().unwrap().to_string();
    let removed = payload(tx::remove_with_options(&removed_id, options(&home)).unwrap());
    assert_eq!(removed["data"]["totals"]["balance"], 500_000);

    let relisted = payload(tx::list_with_options(options(&home)).unwrap());
    assert_eq!(relisted["data"]["transactions"].as_array().unwrap().len(), 1);
}

#[test]
fn manual_descriptions_are_stored_uppercase() {
    let (_dir, home) = temp_home();

    let added = add_expense(&home, "konsumsi rapat", 50_000);
    assert_eq!(added["data"]["transaction"]["description"], "KONSUMSI RAPAT");

    let listed = payload(tx::list_with_options(options(&home)).unwrap());
    assert_eq!(
        listed["data"]["transactions"][0]["description"],
        "KONSUMSI RAPAT"
    );
}

#[test]
fn manual_negative_amounts_are_rejected() {
    let (_dir, home) = temp_home();
    let error = tx::add_with_options(
        tx::TxAddArgs {
            date: None,
            description: "Diskon".to_string(),
            amount: -5_000,
            kind: TransactionKind::Expense,
            label: None,
            receipt: None,
        },
        options(&home),
    )
    .unwrap_err();
    assert_eq!(error.code, "invalid_argument");
}

#[test]
fn blank_description_and_bad_date_are_rejected() {
    let (_dir, home) = temp_home();

    let blank = tx::add_with_options(
        tx::TxAddArgs {
            date: None,
            description: "   ".to_string(),
            amount: 1_000,
            kind: TransactionKind::Expense,
            label: None,
            receipt: None,
        },
        options(&home),
    )
    .unwrap_err();
    assert_eq!(blank.code, "invalid_argument");

    let bad_date = tx::add_with_options(
        tx::TxAddArgs {
            date: Some("05-08-2026".to_string()),
            description: "Konsumsi".to_string(),
            amount: 1_000,
            kind: TransactionKind::Expense,
            label: None,
            receipt: None,
        },
        options(&home),
    )
    .unwrap_err();
    assert_eq!(bad_date.code, "invalid_argument");
}

#[test]
fn removing_an_unknown_id_fails_cleanly() {
    let (_dir, home) = temp_home();
    let error = tx::remove_with_options("txn_missing", options(&home)).unwrap_err();
    assert_eq!(error.code, "transaction_not_found");

    let failure = lapor_client::contracts::envelope::failure_from_error(&error);
    let rendered = serde_json::to_value(failure).unwrap();
    assert_eq!(rendered["ok"], false);
    assert_eq!(rendered["error"]["code"], "transaction_not_found");
}

#[test]
fn unknown_config_field_lists_known_fields() {
    let (_dir, home) = temp_home();
    let error = config::set_with_options("theme", "dark", options(&home)).unwrap_err();
    assert_eq!(error.code, "unknown_config_field");
    let known = error.data.unwrap()["known_fields"].as_array().unwrap().len();
    assert_eq!(known, config::KNOWN_FIELDS.len());
}

#[test]
fn corrupt_state_slot_falls_back_to_defaults() {
    let (_dir, home) = temp_home();
    add_expense(&home, "Konsumsi", 10_000);

    let db_path = home.join("state.db");
    let conn = Connection::open(&db_path).unwrap();
    conn.execute(
        "UPDATE internal_app_state SET value = '{not json' WHERE key = 'lapor_state_v1'",
        [],
    )
    .unwrap();
    drop(conn);

    let listed = payload(tx::list_with_options(options(&home)).unwrap());
    assert_eq!(listed["data"]["transactions"].as_array().unwrap().len(), 0);
    assert_eq!(listed["data"]["totals"]["balance"], 0);

    // The fallback state is usable: new writes land normally.
    add_expense(&home, "Aqua", 5_000);
    let relisted = payload(tx::list_with_options(options(&home)).unwrap());
    assert_eq!(relisted["data"]["transactions"].as_array().unwrap().len(), 1);
}

#[test]
fn reset_clears_rows_and_narrative_but_keeps_identity() {
    let (_dir, home) = temp_home();
    config::set_with_options("event", "Pentas Seni", options(&home)).unwrap();
    config::set_with_options("background", "Latar belakang.", options(&home)).unwrap();
    add_expense(&home, "Konsumsi", 10_000);
    add_expense(&home, "Aqua", 5_000);

    let result = payload(reset::run_with_options(options(&home)).unwrap());
    assert_eq!(result["data"]["cleared_transactions"], 2);

    let shown = payload(config::show_with_options(options(&home)).unwrap());
    assert_eq!(shown["data"]["transaction_count"], 0);
    assert_eq!(shown["data"]["config"]["event_name"], "Pentas Seni");
    assert_eq!(shown["data"]["config"]["background"], "");
}
