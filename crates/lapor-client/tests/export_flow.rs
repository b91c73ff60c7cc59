use std::fs;
use std::path::{Path, PathBuf};

use lapor_client::commands::{CommandOptions, config, export, tx};
use lapor_client::model::TransactionKind;
use lapor_client::ops::{self, ActionKind};
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

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

fn add_expense_with_receipt(home: &Path, dir: &Path) {
    let receipt = dir.join("nota.png");
    fs::write(&receipt, png_bytes(400, 600)).unwrap();
    tx::add_with_options(
        tx::TxAddArgs {
            date: Some("2026-08-05".to_string()),
            description: "Konsumsi".to_string(),
            amount: 50_000,
            kind: TransactionKind::Expense,
            label: None,
            receipt: Some(receipt),
        },
        options(home),
    )
    .unwrap();
}

fn count_image_runs(document: &Value) -> usize {
    document["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|block| block["kind"] == "paragraph")
        .flat_map(|block| block["runs"].as_array().unwrap())
        .filter(|run| run["run"] == "image")
        .count()
}

#[test]
fn word_export_embeds_receipts_and_names_the_file() {
    let (dir, home) = temp_home();
    config::set_with_options("event", "Pentas Seni", options(&home)).unwrap();
    add_expense_with_receipt(&home, dir.path());

    let exported = payload(export::word_with_options(options(&home)).unwrap());
    assert_eq!(exported["data"]["file_name"], "LPJ_Pentas Seni.docx");
    assert_eq!(exported["data"]["variant"], "word");
    assert_eq!(count_image_runs(&exported["data"]["document"]), 1);
    assert!(exported["data"]["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn gdoc_export_shares_structure_but_carries_no_images() {
    let (dir, home) = temp_home();
    add_expense_with_receipt(&home, dir.path());

    let exported = payload(export::gdoc_with_options(options(&home)).unwrap());
    assert_eq!(exported["data"]["variant"], "gdoc");
    assert_eq!(exported["data"]["file_name"], "LPJ_Laporan.docx");
    assert_eq!(count_image_runs(&exported["data"]["document"]), 0);

    // The evidence appendix is still present as captions.
    let text: String = serde_json::to_string(&exported["data"]["document"]).unwrap();
    assert!(text.contains("LAMPIRAN BUKTI TRANSAKSI"));
    assert!(text.contains("BUKTI TRANSAKSI 05 AGUSTUS 2026"));
}

#[test]
fn pdf_export_plans_pages_from_the_capture() {
    let (dir, home) = temp_home();
    let capture = dir.path().join("capture.png");
    fs::write(&capture, png_bytes(794, 4490)).unwrap();

    let exported = payload(export::pdf_with_options(&capture, options(&home)).unwrap());
    assert_eq!(exported["data"]["file_name"], "LPJ_Laporan.pdf");
    let plan = &exported["data"]["plan"];
    assert_eq!(plan["page_width_mm"], 210.0);
    assert_eq!(plan["page_height_mm"], 295.0);
    assert_eq!(plan["pages"].as_array().unwrap().len(), 5);
    assert_eq!(plan["pages"][0]["image_offset_mm"], 0.0);
    assert!(plan["pages"][1]["image_offset_mm"].as_f64().unwrap() < 0.0);
}

#[test]
fn pdf_export_rejects_a_broken_capture() {
    let (dir, home) = temp_home();
    let capture = dir.path().join("capture.png");
    fs::write(&capture, b"not a png").unwrap();

    let error = export::pdf_with_options(&capture, options(&home)).unwrap_err();
    assert_eq!(error.code, "export_capture_invalid");

    let missing = export::pdf_with_options(&dir.path().join("missing.png"), options(&home))
        .unwrap_err();
    assert_eq!(missing.code, "export_capture_invalid");
}

#[test]
fn concurrent_export_of_the_same_kind_is_blocked() {
    let (_dir, home) = temp_home();
    // Initialize the state home first.
    tx::list_with_options(options(&home)).unwrap();

    let db_path = home.join("state.db");
    let _permit = ops::acquire(&db_path, ActionKind::ExportWord).unwrap();

    let error = export::word_with_options(options(&home)).unwrap_err();
    assert_eq!(error.code, "operation_in_progress");

    // A different export kind is independent.
    export::gdoc_with_options(options(&home)).unwrap();
}
