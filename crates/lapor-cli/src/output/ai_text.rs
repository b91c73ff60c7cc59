use std::io;

use serde_json::Value;

use super::format;
use super::tx_text;

pub fn render_narrate_request(data: &Value) -> io::Result<String> {
    let request = request_object(data, "narrate request")?;

    let mut lines = vec![
        "Narrative request prepared. Send this payload to the model:".to_string(),
        String::new(),
    ];
    lines.push(
        serde_json::to_string_pretty(request).map_err(io::Error::other)?,
    );
    lines.push(String::new());
    lines.push("Then merge the reply: `lapor narrate apply <reply.json>`.".to_string());

    Ok(lines.join("\n"))
}

pub fn render_narrate_apply(data: &Value) -> io::Result<String> {
    let mode = data.get("mode").and_then(Value::as_str).unwrap_or("");
    let applied = string_list(data, "applied");
    let skipped = string_list(data, "skipped");

    let mut lines = vec![format!("Narrative updated ({mode})."), String::new()];
    let entries = [
        ("Applied:", join_or_dash(&applied)),
        ("Skipped:", join_or_dash(&skipped)),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    lines.push(String::new());
    lines.push("Run `lapor report` to see the updated chapters.".to_string());

    Ok(lines.join("\n"))
}

/// The scan request embeds the whole receipt as base64, so text mode prints
/// a summary instead of megabytes of image data.
pub fn render_scan_request(data: &Value) -> io::Result<String> {
    let request = request_object(data, "scan request")?;

    let image_len = request
        .get("image_data")
        .and_then(Value::as_str)
        .map(str::len)
        .unwrap_or(0);

    let mut lines = vec!["Receipt scan request prepared.".to_string(), String::new()];
    let entries = [
        (
            "Model:",
            request
                .get("model")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
        ),
        (
            "Image:",
            format!(
                "{} ({} KiB base64)",
                request
                    .get("image_mime_type")
                    .and_then(Value::as_str)
                    .unwrap_or(""),
                image_len / 1024
            ),
        ),
        (
            "API key:",
            if request.get("api_key").is_some_and(|key| !key.is_null()) {
                "provided".to_string()
            } else {
                "missing (pass --api-key or set LAPOR_API_KEY)".to_string()
            },
        ),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    lines.push(String::new());
    lines.push("Run with --json to get the full payload for forwarding,".to_string());
    lines.push("then record the reply: `lapor scan apply <image> <reply.json>`.".to_string());

    Ok(lines.join("\n"))
}

pub fn render_scan_apply(data: &Value) -> io::Result<String> {
    let added = data
        .get("added")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("scan apply output requires added rows"))?;

    let count_line = if added.len() == 1 {
        "1 transaction added from the receipt.".to_string()
    } else {
        format!("{} transactions added from the receipt.", added.len())
    };

    let mut lines = vec![count_line, String::new()];
    lines.extend(tx_text::transaction_table(added));
    lines.push(String::new());
    lines.extend(tx_text::totals_lines(data));

    Ok(lines.join("\n"))
}

fn request_object<'a>(data: &'a Value, command: &str) -> io::Result<&'a Value> {
    data.get("request")
        .filter(|value| value.is_object())
        .ok_or_else(|| io::Error::other(format!("{command} output requires a request")))
}

fn string_list(data: &Value, key: &str) -> Vec<String> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        render_narrate_apply, render_narrate_request, render_scan_apply, render_scan_request,
    };

    #[test]
    fn narrate_request_prints_the_payload() {
        let data = json!({
            "request": {
                "model": "gemini-3-pro-preview",
                "prompt": "Buatkan narasi...",
                "response_mime_type": "application/json",
                "response_schema": {"type": "OBJECT"}
            }
        });

        let rendered = render_narrate_request(&data).unwrap();
        assert!(rendered.contains("gemini-3-pro-preview"));
        assert!(rendered.contains("Buatkan narasi..."));
        assert!(rendered.contains("lapor narrate apply"));
    }

    #[test]
    fn narrate_apply_lists_applied_and_skipped_fields() {
        let data = json!({
            "mode": "Cepat",
            "applied": ["background"],
            "skipped": ["conclusion"]
        });

        let rendered = render_narrate_apply(&data).unwrap();
        assert!(rendered.starts_with("Narrative updated (Cepat)."));
        assert!(rendered.contains("Applied:  background"));
        assert!(rendered.contains("Skipped:  conclusion"));
    }

    #[test]
    fn scan_request_summarizes_instead_of_dumping_base64() {
        let data = json!({
            "request": {
                "model": "gemini-3-pro-preview",
                "image_mime_type": "image/jpeg",
                "image_data": "x".repeat(4096),
                "api_key": null
            }
        });

        let rendered = render_scan_request(&data).unwrap();
        assert!(rendered.contains("image/jpeg (4 KiB base64)"));
        assert!(rendered.contains("missing"));
        assert!(!rendered.contains("xxxxxxxx"));
    }

    #[test]
    fn scan_apply_reuses_the_transaction_table() {
        let data = json!({
            "added": [
                {
                    "label": "2",
                    "date": "2026-08-05",
                    "description": "Susu Ultra",
                    "kind": "Pengeluaran",
                    "amount_display": "Rp 18.500",
                    "has_receipt": true
                }
            ],
            "totals": {
                "income_display": "Rp 0",
                "expense_display": "Rp 18.500",
                "balance_display": "-Rp 18.500"
            }
        });

        let rendered = render_scan_apply(&data).unwrap();
        assert!(rendered.starts_with("1 transaction added"));
        assert!(rendered.contains("Susu Ultra"));
        assert!(rendered.contains("Saldo:"));
    }
}
