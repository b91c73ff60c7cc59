use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_tx_add(data: &Value) -> io::Result<String> {
    let transaction = data
        .get("transaction")
        .filter(|value| value.is_object())
        .ok_or_else(|| io::Error::other("tx add output requires a transaction"))?;

    let mut lines = vec!["Transaction recorded.".to_string(), String::new()];
    let entries = [
        ("ID:", text_field(transaction, "id")),
        ("Date:", text_field(transaction, "date")),
        ("Description:", text_field(transaction, "description")),
        ("Kind:", text_field(transaction, "kind")),
        ("Amount:", text_field(transaction, "amount_display")),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    lines.push(String::new());
    lines.extend(totals_lines(data));

    Ok(lines.join("\n"))
}

pub fn render_tx_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("transactions")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("tx list output requires transactions"))?;

    if rows.is_empty() {
        return Ok([
            "No transactions recorded yet.",
            "",
            "Record your first one:",
            "  lapor tx add \"Konsumsi rapat\" 50000",
            "  lapor scan request nota.jpg",
        ]
        .join("\n"));
    }

    let count_line = if rows.len() == 1 {
        "1 transaction recorded.".to_string()
    } else {
        format!("{} transactions recorded.", rows.len())
    };

    let mut lines = vec![count_line, String::new()];
    lines.extend(transaction_table(rows));
    lines.push(String::new());
    lines.extend(totals_lines(data));

    Ok(lines.join("\n"))
}

pub fn render_tx_remove(data: &Value) -> io::Result<String> {
    let removed_id = data
        .get("removed_id")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("tx remove output requires removed_id"))?;

    let mut lines = vec![format!("Removed {removed_id}."), String::new()];
    lines.extend(totals_lines(data));
    Ok(lines.join("\n"))
}

pub fn transaction_table(rows: &[Value]) -> Vec<String> {
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
            name: "Jenis",
            align: Align::Left,
        },
        Column {
            name: "Jumlah",
            align: Align::Right,
        },
        Column {
            name: "Bukti",
            align: Align::Left,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "label"),
                text_field(row, "date"),
                text_field(row, "description"),
                text_field(row, "kind"),
                text_field(row, "amount_display"),
                if row.get("has_receipt").and_then(Value::as_bool).unwrap_or(false) {
                    "yes".to_string()
                } else {
                    "-".to_string()
                },
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &table_rows)
}

pub fn totals_lines(data: &Value) -> Vec<String> {
    let Some(totals) = data.get("totals").filter(|value| value.is_object()) else {
        return Vec::new();
    };

    let mut lines = vec!["Totals:".to_string()];
    let entries = [
        ("Pemasukan:", text_field(totals, "income_display")),
        ("Pengeluaran:", text_field(totals, "expense_display")),
        ("Saldo:", text_field(totals, "balance_display")),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    lines
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
