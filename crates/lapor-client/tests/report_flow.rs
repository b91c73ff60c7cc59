use std::fs;
use std::path::{Path, PathBuf};

use lapor_client::commands::{CommandOptions, config, report, scan, tx};
use lapor_client::model::TransactionKind;
use serde_json::{Value, json};
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

fn run_report(home: &Path) -> Value {
    payload(report::run_with_options(options(home)).unwrap())
}

#[test]
fn quick_report_has_three_chapters_and_default_signers() {
    let (_dir, home) = temp_home();
    config::set_with_options("event", "HUT RI Ke-81", options(&home)).unwrap();
    config::set_with_options("date", "2026-08-17", options(&home)).unwrap();

    let document = run_report(&home);
    let document = &document["data"]["document"];
    assert_eq!(document["mode"], "Cepat");
    assert!(document.get("cover").is_none());
    assert_eq!(document["header"]["event_name"], "HUT RI KE-81");
    assert_eq!(document["header"]["report_date_long"], "17 AGUSTUS 2026");

    let chapters = document["chapters"].as_array().unwrap();
    assert_eq!(chapters.len(), 3);
    assert_eq!(chapters[1]["number"], "II");
    assert_eq!(chapters[1]["body"]["kind"], "finance");

    let signers = document["signers"].as_array().unwrap();
    assert_eq!(signers.len(), 2);
    assert_eq!(signers[0]["title"], "Ketua Panitia");
}

#[test]
fn full_report_gains_cover_and_numbered_sections() {
    let (_dir, home) = temp_home();
    config::set_with_options("mode", "Lengkap", options(&home)).unwrap();
    config::set_with_options("location", "Bandung", options(&home)).unwrap();

    let document = run_report(&home);
    let document = &document["data"]["document"];
    assert_eq!(document["cover"]["location"], "BANDUNG");

    let chapters = document["chapters"].as_array().unwrap();
    assert_eq!(chapters.len(), 4);
    assert_eq!(chapters[2]["heading"], "LAPORAN KEUANGAN");
    let closing = chapters[3]["body"]["sections"].as_array().unwrap();
    assert_eq!(closing[0]["number"], "4.1");
    assert_eq!(closing[3]["text"], "Belum diisi.");
}

#[test]
fn extracted_discount_nets_the_expense_subtotal() {
    let (dir, home) = temp_home();
    tx::add_with_options(
        tx::TxAddArgs {
            date: Some("2026-08-05".to_string()),
            description: "Beras".to_string(),
            amount: 20_000,
            kind: TransactionKind::Expense,
            label: None,
            receipt: None,
        },
        options(&home),
    )
    .unwrap();

    let image = dir.path().join("nota.jpg");
    fs::write(&image, b"jpeg bytes").unwrap();
    let response = json!({
        "transactions": [
            { "date": "2026-08-05", "description": "diskon", "amount": -5000, "type": "Pengeluaran" },
        ]
    })
    .to_string();
    scan::apply_with_options(&image, &response, options(&home)).unwrap();

    let document = run_report(&home);
    let finance = &document["data"]["document"]["finance"];
    assert_eq!(finance["totals"]["expense"], 15_000);
    assert_eq!(finance["subtotal_expense"], "Rp 15.000");
    assert_eq!(finance["balance"], "-Rp 15.000");

    // The discount row shows unsigned in the opposite column.
    let rows = finance["rows"].as_array().unwrap();
    assert_eq!(rows[1]["debit"], "Rp 5.000");
    assert!(rows[1].get("credit").is_none());
}

#[test]
fn appendix_dedupes_rows_from_one_receipt() {
    let (dir, home) = temp_home();
    let image = dir.path().join("nota.jpg");
    fs::write(&image, b"jpeg bytes").unwrap();
    let response = json!({
        "transactions": [
            { "date": "2026-08-05", "description": "susu", "amount": 18500, "type": "Pengeluaran" },
            { "date": "2026-08-05", "description": "roti", "amount": 12000, "type": "Pengeluaran" },
        ]
    })
    .to_string();
    scan::apply_with_options(&image, &response, options(&home)).unwrap();

    let document = run_report(&home);
    let appendix = document["data"]["document"]["appendix"].as_array().unwrap();
    assert_eq!(appendix.len(), 1);
    assert_eq!(appendix[0]["date_long"], "05 AGUSTUS 2026");
}

#[test]
fn report_is_idempotent_across_invocations() {
    let (_dir, home) = temp_home();
    config::set_with_options("event", "Pentas Seni", options(&home)).unwrap();
    let first = run_report(&home);
    let second = run_report(&home);
    assert_eq!(first["data"], second["data"]);
}
