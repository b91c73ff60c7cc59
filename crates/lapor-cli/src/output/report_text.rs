use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_report(data: &Value) -> io::Result<String> {
    let document = data
        .get("document")
        .filter(|value| value.is_object())
        .ok_or_else(|| io::Error::other("report output requires a document"))?;

    let header = document.get("header").cloned().unwrap_or(Value::Null);
    let mut lines = vec![
        text_field(&header, "title"),
        format!(
            "{} ({})",
            text_field(&header, "event_name"),
            text_field(document, "mode")
        ),
        format!("Tanggal: {}", text_field(&header, "report_date_long")),
        String::new(),
    ];

    lines.push("Chapters:".to_string());
    lines.extend(chapter_lines(document));
    lines.push(String::new());

    lines.push("Finance:".to_string());
    lines.extend(finance_lines(document));
    lines.push(String::new());

    lines.push("Signers:".to_string());
    lines.extend(signer_lines(document));

    let appendix_count = document
        .get("appendix")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    if appendix_count > 0 {
        lines.push(String::new());
        let label = if appendix_count == 1 { "receipt" } else { "receipts" };
        lines.push(format!("Appendix: {appendix_count} {label} attached."));
    }

    lines.push(String::new());
    lines.push("Run `lapor report --json` for the full document.".to_string());

    Ok(lines.join("\n"))
}

fn chapter_lines(document: &Value) -> Vec<String> {
    let Some(chapters) = document.get("chapters").and_then(Value::as_array) else {
        return Vec::new();
    };

    let entries = chapters
        .iter()
        .map(|chapter| {
            (
                format!("BAB {}", text_field(chapter, "number")),
                text_field(chapter, "heading"),
            )
        })
        .collect::<Vec<(String, String)>>();

    let borrowed = entries
        .iter()
        .map(|(number, heading)| (number.as_str(), heading.clone()))
        .collect::<Vec<(&str, String)>>();
    format::key_value_rows(&borrowed, 2)
}

fn finance_lines(document: &Value) -> Vec<String> {
    let Some(finance) = document.get("finance").filter(|value| value.is_object()) else {
        return Vec::new();
    };

    let rows = finance
        .get("rows")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut lines = Vec::new();
    if rows.is_empty() {
        lines.push("  Belum ada transaksi terekam.".to_string());
    } else {
        let columns = [
            Column {
                name: "No",
                align: Align::Left,
            },
            Column {
                name: "Tanggal",
                align: Align::Left,
            },
            Column {
                name: "Deskripsi",
                align: Align::Left,
            },
            Column {
                name: "Debit",
                align: Align::Right,
            },
            Column {
                name: "Kredit",
                align: Align::Right,
            },
        ];
        let table_rows = rows
            .iter()
            .map(|row| {
                vec![
                    text_field(row, "label"),
                    text_field(row, "date"),
                    text_field(row, "description"),
                    amount_field(row, "debit"),
                    amount_field(row, "credit"),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(&columns, &table_rows));
    }

    lines.push(String::new());
    let entries = [
        ("SUBTOTAL KAS (debit):", text_field(finance, "subtotal_income")),
        ("SUBTOTAL KAS (kredit):", text_field(finance, "subtotal_expense")),
        ("SALDO AKHIR PANITIA:", text_field(finance, "balance")),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    lines
}

fn signer_lines(document: &Value) -> Vec<String> {
    let Some(signers) = document.get("signers").and_then(Value::as_array) else {
        return Vec::new();
    };

    signers
        .iter()
        .map(|signer| {
            let title = text_field(signer, "title");
            let name = signer
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("....................");
            format!("  {title}: {name}")
        })
        .collect()
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

// An absent amount column renders as `-`, matching the word exporter.
fn amount_field(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("-")
        .to_string()
}
